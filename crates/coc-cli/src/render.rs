//! Plain-text output for the terminal.

use coc_scraper::{BusinessRecord, SiteRegistry};

pub(crate) fn site_table(registry: &SiteRegistry) -> String {
    let id_width = registry.iter().map(|s| s.id.len()).max().unwrap_or(0);
    let name_width = registry.iter().map(|s| s.name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for site in registry.iter() {
        out.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {}\n",
            site.id, site.name, site.base_url
        ));
    }
    out
}

/// One block per record: the name, then each present field indented.
pub(crate) fn record_text(records: &[BusinessRecord]) -> String {
    if records.is_empty() {
        return "no businesses found\n".to_string();
    }

    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&record.name);
        out.push('\n');
        let fields = [
            ("address", &record.address),
            ("phone", &record.phone),
            ("website", &record.website),
            ("contact", &record.contact_person),
            ("email", &record.email),
            ("listing", &record.chamber_url),
            ("map", &record.map_url),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                out.push_str(&format!("  {label:<8} {value}\n"));
            }
        }
    }
    let noun = if records.len() == 1 { "business" } else { "businesses" };
    out.push_str(&format!("\n{} {noun}\n", records.len()));
    out
}
