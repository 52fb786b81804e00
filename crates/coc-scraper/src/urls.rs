//! URL encoding and resolution helpers shared by the proxy chain and extractors.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by a browser's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `s` for embedding as a single query-string value.
pub(crate) fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Resolves `href` against `base`, dropping fragment-only, `javascript:`,
/// `mailto:` and `tel:` links.
pub(crate) fn resolve_href(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
    {
        return None;
    }

    if let Ok(absolute) = reqwest::Url::parse(href) {
        return matches!(absolute.scheme(), "http" | "https").then(|| absolute.to_string());
    }

    reqwest::Url::parse(base)
        .ok()?
        .join(href)
        .ok()
        .map(|u| u.to_string())
}

/// Lower-cased hostname of `url`, or `None` when it does not parse.
pub(crate) fn host_of(url: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_component_matches_browser_behaviour() {
        assert_eq!(encode_component("web design"), "web%20design");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("it's (ok)!"), "it's%20(ok)!");
        assert_eq!(
            encode_component("https://x.org/a?b=1"),
            "https%3A%2F%2Fx.org%2Fa%3Fb%3D1"
        );
    }

    #[test]
    fn resolve_href_relative_and_absolute() {
        let base = "https://www.wilmingtonchamber.org/list/search?q=x";
        assert_eq!(
            resolve_href(base, "/list/member/ace-plumbing-123").as_deref(),
            Some("https://www.wilmingtonchamber.org/list/member/ace-plumbing-123")
        );
        assert_eq!(
            resolve_href(base, "https://aceplumbing.example/").as_deref(),
            Some("https://aceplumbing.example/")
        );
    }

    #[test]
    fn resolve_href_drops_non_navigational_links() {
        let base = "https://www.wilmingtonchamber.org";
        assert_eq!(resolve_href(base, "#top"), None);
        assert_eq!(resolve_href(base, "javascript:void(0)"), None);
        assert_eq!(resolve_href(base, "mailto:a@b.com"), None);
        assert_eq!(resolve_href(base, "tel:5551112222"), None);
        assert_eq!(resolve_href(base, "   "), None);
    }

    #[test]
    fn host_of_lowercases() {
        assert_eq!(
            host_of("https://WWW.Example.com/path").as_deref(),
            Some("www.example.com")
        );
        assert_eq!(host_of("not a url"), None);
    }
}
