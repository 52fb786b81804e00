use super::*;

const RESULTS_PAGE: &str = r#"
<html><body>
<div class="gz-directory-card">
  <h4><a href="/directory/Details/ace-plumbing-1234">Ace Plumbing &amp; Heating</a></h4>
  <p>123 Main St<br>Dayton, OH 45402<br>(937) 555-0123</p>
  <p>Jane Q. Smith</p>
  <p><a href="mailto:jane@aceplumbing.example">Email</a></p>
  <ul>
    <li><a href="https://www.daytonchamber.org/events">Chamber Events</a></li>
    <li><a href="https://aceplumbing.example/">Visit Website</a></li>
  </ul>
</div>
<div class="gz-directory-card">
  <h4>Bolt Electric</h4>
  <p>Contact: Bob Jones</p>
  <p>Phone: 937.555.9876</p>
</div>
<div class="gz-directory-card">
  <p>Listing without a heading</p>
</div>
</body></html>
"#;

#[test]
fn reads_heading_as_name_and_classifies_lines() {
    let records = parse_dayton_businesses(RESULTS_PAGE, "plumbing").unwrap();
    assert_eq!(records.len(), 2, "container without heading is skipped");

    let ace = &records[0];
    assert_eq!(ace.name, "Ace Plumbing & Heating");
    assert_eq!(ace.address.as_deref(), Some("123 Main St, Dayton, OH 45402"));
    assert_eq!(ace.phone.as_deref(), Some("(937) 555-0123"));
    assert_eq!(ace.contact_person.as_deref(), Some("Jane Q. Smith"));
    assert_eq!(ace.email.as_deref(), Some("jane@aceplumbing.example"));
}

#[test]
fn splits_chamber_links_from_website() {
    let records = parse_dayton_businesses(RESULTS_PAGE, "plumbing").unwrap();
    let ace = &records[0];
    assert_eq!(
        ace.chamber_url.as_deref(),
        Some("https://daytonareachamberofcommerce.growthzoneapp.com/directory/Details/ace-plumbing-1234")
    );
    assert_eq!(
        ace.website.as_deref(),
        Some("https://aceplumbing.example/"),
        "first non-chamber link is the website"
    );
}

#[test]
fn labelled_contact_and_dotted_phone() {
    let records = parse_dayton_businesses(RESULTS_PAGE, "").unwrap();
    let bolt = &records[1];
    assert_eq!(bolt.name, "Bolt Electric");
    assert_eq!(bolt.contact_person.as_deref(), Some("Bob Jones"));
    assert_eq!(bolt.phone.as_deref(), Some("937.555.9876"));
    assert_eq!(bolt.address, None);
    assert_eq!(bolt.website, None);
    assert_eq!(bolt.chamber_url, None);
}

#[test]
fn link_text_is_not_a_contact_person() {
    let html = r#"<div class="gz-directory-card"><h3>Acme</h3>
        <p><a href="https://acme.example">Visit Website</a></p></div>"#;
    let records = parse_dayton_businesses(html, "").unwrap();
    assert_eq!(records[0].contact_person, None);
    assert_eq!(records[0].website.as_deref(), Some("https://acme.example/"));
}

#[test]
fn falls_back_to_heading_links_matching_term() {
    let html = r#"<html><body>
        <h3><a href="/directory/Details/acme-plumbing-9">Acme Plumbing</a></h3>
        <h3><a href="/directory/Details/best-bakery-2">Best Bakery</a></h3>
        <h3><a href="/directory/Details/blank">  </a></h3>
    </body></html>"#;
    let records = parse_dayton_businesses(html, "Plumbing").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Acme Plumbing");
    assert_eq!(
        records[0].chamber_url.as_deref(),
        Some("https://daytonareachamberofcommerce.growthzoneapp.com/directory/Details/acme-plumbing-9")
    );
}

#[test]
fn fallback_with_blank_term_keeps_every_named_link() {
    let html = r#"<h3><a href="/a">Acme Plumbing</a></h3><h3><a href="/b">Best Bakery</a></h3>"#;
    let records = parse_dayton_businesses(html, "  ").unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn error_block_is_malformed() {
    let html = r#"<html><body><div class="gz-alert-danger">Search is temporarily unavailable</div></body></html>"#;
    let err = parse_dayton_businesses(html, "plumbing").unwrap_err();
    assert!(
        matches!(err, ExtractError::Malformed { ref reason } if reason.contains("temporarily unavailable")),
        "got: {err:?}"
    );
}

#[test]
fn page_without_listings_is_empty() {
    let records = parse_dayton_businesses("<html><body><p>No results.</p></body></html>", "x").unwrap();
    assert!(records.is_empty());
}

#[test]
fn category_and_street_lines_are_not_contact_people() {
    let html = r#"<div class="gz-directory-card"><h4>Ace Plumbing</h4><p>Plumbing Contractors</p><p>937-555-1111</p></div>
        <div class="gz-directory-card"><h4>Bolt Electric</h4><p>Main Street</p><p>Electrical Services</p></div>"#;
    let records = parse_dayton_businesses(html, "plumbing").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].contact_person, None);
    assert_eq!(records[0].phone.as_deref(), Some("937-555-1111"));
    assert_eq!(records[1].contact_person, None);
}

#[test]
fn unlabelled_name_sharing_business_words_is_skipped() {
    let html = r#"<div class="gz-directory-card"><h4>Miller Landscaping</h4>
        <p>Miller Gardens</p><p>Tom Baker</p></div>"#;
    let records = parse_dayton_businesses(html, "").unwrap();
    assert_eq!(records[0].contact_person.as_deref(), Some("Tom Baker"));
}
