//! Custom extractor for the Dayton Area Chamber of Commerce directory.
//!
//! The directory markup has no stable field classes, so each listing
//! container is read heuristically: the first heading is the name, text
//! lines are sorted into phone / email / address / contact person by
//! pattern, and links are split into the chamber's own listing page and the
//! business website.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use coc_core::BusinessRecord;

use super::{element_text, ExtractError};
use crate::normalize::clean_text;
use crate::urls::{host_of, resolve_href};

const CHAMBER_ORIGIN: &str = "https://daytonareachamberofcommerce.growthzoneapp.com";
const CHAMBER_HOST_MARKERS: [&str; 2] = ["daytonareachamberofcommerce", "daytonchamber.org"];

fn compile_css(css: &str) -> Selector {
    Selector::parse(css).expect("valid built-in selector")
}

static CONTAINERS: LazyLock<Selector> = LazyLock::new(|| {
    compile_css("div.gz-directory-card, div.directory-listing, div.member-listing, article.listing")
});
static HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| compile_css("h1, h2, h3, h4, h5, h6, .card-title"));
static TEXT_BLOCKS: LazyLock<Selector> = LazyLock::new(|| compile_css("p, address, li"));
static LINKS: LazyLock<Selector> = LazyLock::new(|| compile_css("a[href]"));
static FALLBACK_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    compile_css("h2 a[href], h3 a[href], h4 a[href], h5 a[href], .card-title a[href]")
});
static ERROR_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| compile_css("div.gz-alert-danger, div.alert-danger"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").expect("valid phone regex")
});
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
static STREET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+[A-Za-z]?\s+[A-Za-z0-9]").expect("valid street regex")
});
static CITY_STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z .]+,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?").expect("valid city/state/zip regex")
});
static CONTACT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:contact|owner|president|manager)\s*:\s*(.+)$")
        .expect("valid contact label regex")
});
/// Trailing words that mark a category, company or street line rather than a
/// person's name.
const NON_PERSON_SUFFIXES: [&str; 30] = [
    "street", "st", "avenue", "ave", "road", "rd", "drive", "dr", "boulevard", "blvd", "lane",
    "ln", "way", "pike", "suite", "contractors", "contractor", "services", "service", "company",
    "co", "inc", "llc", "group", "center", "associates", "solutions", "restaurant", "shop",
    "store",
];

static PERSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z]\.?)?\s+[A-Z][A-Za-z'-]+$").expect("valid person regex")
});

/// Parses a Dayton directory results page.
///
/// Falls back to heading links whose text mentions `term` when no listing
/// container is found.
///
/// # Errors
///
/// Returns [`ExtractError::Malformed`] when the page carries the
/// directory's error block instead of listings.
pub(super) fn parse_dayton_businesses(
    html: &str,
    term: &str,
) -> Result<Vec<BusinessRecord>, ExtractError> {
    let document = Html::parse_document(html);
    let containers: Vec<ElementRef<'_>> = document.select(&CONTAINERS).collect();
    tracing::debug!(
        html_len = html.len(),
        containers = containers.len(),
        "parsing dayton directory page"
    );

    if containers.is_empty() {
        if let Some(alert) = document.select(&ERROR_BLOCK).next() {
            return Err(ExtractError::Malformed {
                reason: format!(
                    "directory returned an error block: {}",
                    element_text(alert)
                ),
            });
        }

        let records = heading_link_fallback(&document, term);
        tracing::debug!(
            count = records.len(),
            "no listing containers; used heading-link fallback"
        );
        return Ok(records);
    }

    let records: Vec<BusinessRecord> = containers
        .into_iter()
        .filter_map(|container| parse_container(container, term))
        .collect();
    tracing::debug!(count = records.len(), "parsed dayton listing containers");
    Ok(records)
}

fn parse_container(container: ElementRef<'_>, term: &str) -> Option<BusinessRecord> {
    let name = container
        .select(&HEADINGS)
        .map(element_text)
        .find(|text| !text.is_empty())?;

    let mut record = BusinessRecord::named(name);
    let mut address_parts: Vec<String> = Vec::new();

    for block in container.select(&TEXT_BLOCKS) {
        for node in block.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let line = clean_text(text);
            if line.is_empty() {
                continue;
            }
            let in_link = node
                .ancestors()
                .any(|a| a.value().as_element().is_some_and(|el| el.name() == "a"));
            classify_line(&mut record, &mut address_parts, &line, in_link, term);
        }
    }
    if !address_parts.is_empty() {
        record.address = Some(address_parts.join(", "));
    }

    for link in container.select(&LINKS) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if let Some(addr) = href.trim().strip_prefix("mailto:") {
            record.email.get_or_insert_with(|| addr.to_owned());
            continue;
        }
        assign_link(&mut record, href);
    }

    Some(record)
}

/// Sorts one text line into the record. First match wins per field.
///
/// Link text ("Visit Website") is never taken as a person's name.
fn classify_line(
    record: &mut BusinessRecord,
    address_parts: &mut Vec<String>,
    line: &str,
    in_link: bool,
    term: &str,
) {
    if let Some(m) = EMAIL_RE.find(line) {
        record.email.get_or_insert_with(|| m.as_str().to_owned());
        return;
    }
    if let Some(m) = PHONE_RE.find(line) {
        record.phone.get_or_insert_with(|| m.as_str().to_owned());
        return;
    }
    if let Some(caps) = CONTACT_LABEL_RE.captures(line) {
        if let Some(who) = caps.get(1) {
            record
                .contact_person
                .get_or_insert_with(|| who.as_str().trim().to_owned());
        }
        return;
    }
    if STREET_RE.is_match(line) || CITY_STATE_ZIP_RE.is_match(line) {
        if !address_parts.iter().any(|p| p == line) {
            address_parts.push(line.to_owned());
        }
        return;
    }
    if !in_link && record.contact_person.is_none() && looks_like_person(line, &record.name, term) {
        record.contact_person = Some(line.to_owned());
    }
}

/// An unlabelled line reads as a person's name only if it has the shape of
/// one, shares no word with the business name or search term, and does not
/// end in a category or street word ("Plumbing Contractors", "Main Street").
fn looks_like_person(line: &str, business_name: &str, term: &str) -> bool {
    if !PERSON_RE.is_match(line) {
        return false;
    }

    let words = |s: &str| -> Vec<String> {
        s.split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 2)
            .map(str::to_lowercase)
            .collect()
    };
    let line_words = words(line);

    let last = line
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_end_matches('.')
        .to_lowercase();
    if NON_PERSON_SUFFIXES.contains(&last.as_str()) {
        return false;
    }

    let mut taken = words(business_name);
    taken.extend(words(term));
    !line_words.iter().any(|w| taken.contains(w))
}

/// Chamber-hosted links become `chamber_url`; the first other link is the website.
fn assign_link(record: &mut BusinessRecord, href: &str) {
    let Some(url) = resolve_href(CHAMBER_ORIGIN, href) else {
        return;
    };
    let is_chamber = host_of(&url)
        .is_some_and(|host| CHAMBER_HOST_MARKERS.iter().any(|m| host.contains(m)));
    if is_chamber {
        record.chamber_url.get_or_insert(url);
    } else {
        record.website.get_or_insert(url);
    }
}

fn heading_link_fallback(document: &Html, term: &str) -> Vec<BusinessRecord> {
    let needle = term.trim().to_lowercase();
    document
        .select(&FALLBACK_LINKS)
        .filter_map(|link| {
            let name = element_text(link);
            if name.is_empty() || (!needle.is_empty() && !name.to_lowercase().contains(&needle)) {
                return None;
            }
            let mut record = BusinessRecord::named(name);
            if let Some(href) = link.value().attr("href") {
                assign_link(&mut record, href);
            }
            Some(record)
        })
        .collect()
}

#[cfg(test)]
#[path = "dayton_test.rs"]
mod tests;
