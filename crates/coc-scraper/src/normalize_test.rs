use super::*;

fn record(name: &str) -> BusinessRecord {
    BusinessRecord::named(name)
}

// -----------------------------------------------------------------------
// derived URIs
// -----------------------------------------------------------------------

#[test]
fn phone_url_keeps_digits_only() {
    assert_eq!(phone_url("(937) 555-0123").as_deref(), Some("tel:9375550123"));
    assert_eq!(phone_url("555-111-2222").as_deref(), Some("tel:5551112222"));
}

#[test]
fn phone_url_none_without_digits() {
    assert_eq!(phone_url("call us"), None);
}

#[test]
fn map_url_encodes_name_and_address() {
    assert_eq!(
        map_url("Acme Co", "100 Main St"),
        "https://www.google.com/maps/search/?api=1&query=Acme%20Co%20100%20Main%20St"
    );
}

#[test]
fn map_url_collapses_multiline_address() {
    assert_eq!(
        map_url("Acme Co", "100 Main St\n  Wilmington, OH 45177"),
        "https://www.google.com/maps/search/?api=1&query=Acme%20Co%20100%20Main%20St%20Wilmington%2C%20OH%2045177"
    );
}

// -----------------------------------------------------------------------
// normalize_record
// -----------------------------------------------------------------------

#[test]
fn normalize_derives_phone_and_map_urls() {
    let mut r = record("  Acme   Co ");
    r.phone = Some(" (937) 555-0123 ".to_string());
    r.address = Some("100 Main St".to_string());
    let r = normalize_record(r);
    assert_eq!(r.name, "Acme Co");
    assert_eq!(r.phone.as_deref(), Some("(937) 555-0123"));
    assert_eq!(r.phone_url.as_deref(), Some("tel:9375550123"));
    assert_eq!(
        r.map_url.as_deref(),
        Some("https://www.google.com/maps/search/?api=1&query=Acme%20Co%20100%20Main%20St")
    );
}

#[test]
fn normalize_blank_fields_become_none() {
    let mut r = record("Acme");
    r.address = Some("   ".to_string());
    r.website = Some(String::new());
    r.phone = Some("\u{a0}".to_string());
    let r = normalize_record(r);
    assert_eq!(r.address, None);
    assert_eq!(r.website, None);
    assert_eq!(r.phone, None);
    assert_eq!(r.phone_url, None);
    assert_eq!(r.map_url, None, "no map URL without an address");
}

#[test]
fn normalize_strips_mailto() {
    let mut r = record("Acme");
    r.email = Some("mailto:info@acme.example?subject=Hi".to_string());
    assert_eq!(
        normalize_record(r).email.as_deref(),
        Some("info@acme.example")
    );
}

#[test]
fn normalize_keeps_existing_phone_url() {
    let mut r = record("Acme");
    r.phone = Some("555-111-2222".to_string());
    r.phone_url = Some("tel:+15551112222".to_string());
    assert_eq!(
        normalize_record(r).phone_url.as_deref(),
        Some("tel:+15551112222")
    );
}

// -----------------------------------------------------------------------
// dedupe_by_name
// -----------------------------------------------------------------------

#[test]
fn dedupe_keeps_first_seen_in_order() {
    let mut first = record("Ace Plumbing");
    first.phone = Some("1".to_string());
    let mut dup = record(" Ace Plumbing  ");
    dup.phone = Some("2".to_string());
    let out = dedupe_by_name(vec![first, record("Bolt Electric"), dup]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].name, "Ace Plumbing");
    assert_eq!(out[0].phone.as_deref(), Some("1"), "first record wins");
    assert_eq!(out[1].name, "Bolt Electric");
}

#[test]
fn dedupe_drops_blank_names() {
    let out = dedupe_by_name(vec![record(""), record("   "), record("Ace")]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "Ace");
}

#[test]
fn dedupe_is_idempotent() {
    let once = dedupe_by_name(vec![record("A"), record("A"), record("B")]);
    let twice = dedupe_by_name(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn clean_text_collapses_whitespace() {
    assert_eq!(clean_text("  a \n\t b\u{a0}c  "), "a b c");
    assert_eq!(clean_text(""), "");
}
