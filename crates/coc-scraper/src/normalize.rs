//! Record shape enforcement: text cleanup, derived URIs and de-duplication.

use std::collections::HashSet;

use coc_core::BusinessRecord;

use crate::urls::encode_component;

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Collapses runs of whitespace (including newlines and `&nbsp;`) to single
/// spaces and trims the ends.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `tel:` URI from the digits of `phone`; `None` when it has no digits.
///
/// `"(937) 555-0123"` becomes `tel:9375550123`.
#[must_use]
pub fn phone_url(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then(|| format!("tel:{digits}"))
}

/// Maps search URI for `"{name} {address}"`.
#[must_use]
pub fn map_url(name: &str, address: &str) -> String {
    let query = format!("{} {}", clean_text(name), clean_text(address));
    format!("{MAPS_SEARCH_BASE}{}", encode_component(&query))
}

/// Cleans every field, turns blank strings into `None` and fills in the
/// derived `phone_url` / `map_url` when the record lacks them.
#[must_use]
pub fn normalize_record(record: BusinessRecord) -> BusinessRecord {
    let name = clean_text(&record.name);
    let address = clean_opt(record.address);
    let phone = clean_opt(record.phone);
    let email = clean_opt(record.email).map(|e| {
        let addr = e.strip_prefix("mailto:").unwrap_or(&e);
        addr.split('?').next().unwrap_or(addr).to_string()
    });

    let dial_url = clean_opt(record.phone_url).or_else(|| phone.as_deref().and_then(phone_url));
    let maps_url = clean_opt(record.map_url).or_else(|| {
        address
            .as_deref()
            .filter(|_| !name.is_empty())
            .map(|addr| map_url(&name, addr))
    });

    BusinessRecord {
        name,
        address,
        phone,
        phone_url: dial_url,
        website: clean_opt(record.website),
        contact_person: clean_opt(record.contact_person),
        email,
        chamber_url: clean_opt(record.chamber_url),
        map_url: maps_url,
    }
}

/// Keeps the first record for each trimmed, non-empty name, preserving
/// first-appearance order. Records with a blank name are dropped.
#[must_use]
pub fn dedupe_by_name<I>(records: I) -> Vec<BusinessRecord>
where
    I: IntoIterator<Item = BusinessRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|mut record| {
            let name = record.name.trim().to_owned();
            if name.is_empty() {
                tracing::debug!("skipping record with blank name");
                return None;
            }
            if !seen.insert(name.clone()) {
                tracing::debug!(name, "skipping duplicate record");
                return None;
            }
            record.name = name;
            Some(record)
        })
        .collect()
}

fn clean_opt(value: Option<String>) -> Option<String> {
    value.map(|v| clean_text(&v)).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
