use serde::{Deserialize, Serialize};

/// A normalized business listing produced by one extraction pass.
///
/// Every optional field is always serialized (as `null` when absent) so
/// consumers can rely on a fixed shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// Trimmed, non-empty business name; the de-duplication key.
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// `tel:` URI built from the digits of `phone`.
    pub phone_url: Option<String>,
    pub website: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    /// The listing's page on the chamber's own site.
    pub chamber_url: Option<String>,
    /// Maps search URI built from name and address.
    pub map_url: Option<String>,
}

impl BusinessRecord {
    /// A record with only a name; every other field absent.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            phone: None,
            phone_url: None,
            website: None,
            contact_person: None,
            email: None,
            chamber_url: None,
            map_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_serialize_as_null() {
        let record = BusinessRecord::named("Ace Plumbing");
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 9, "every field is present in the output");
        assert_eq!(obj["name"], "Ace Plumbing");
        for key in [
            "address",
            "phone",
            "phone_url",
            "website",
            "contact_person",
            "email",
            "chamber_url",
            "map_url",
        ] {
            assert!(obj[key].is_null(), "{key} should be null");
        }
    }
}
