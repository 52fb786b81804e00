//! Soft-failure detection for 2xx responses.
//!
//! Relays answer with HTTP 200 for plenty of things that are not the
//! directory page: their own error banners, JSON error envelopes, bot
//! challenges served by the origin, or nothing at all.

use std::sync::LazyLock;

use regex::Regex;

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z!]").expect("valid markup regex"));

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex")
});

/// Page titles relays and origin firewalls use for their own error pages.
const ERROR_TITLE_MARKERS: [&str; 10] = [
    "access denied",
    "403 forbidden",
    "404 not found",
    "429 too many requests",
    "too many requests",
    "rate limit",
    "502 bad gateway",
    "503 service",
    "request blocked",
    "corsproxy",
];

/// Checks a 2xx body, returning the reason it is unusable.
pub(crate) fn check_body(body: &str) -> Result<(), String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err("empty body".to_string());
    }

    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<serde_json::Value>(trimmed).is_ok()
    {
        return Err("JSON envelope instead of HTML".to_string());
    }

    if !MARKUP_RE.is_match(trimmed) {
        return Err("no HTML markup".to_string());
    }

    if looks_like_bot_challenge(trimmed) {
        return Err("bot challenge page".to_string());
    }

    if let Some(title) = page_title(trimmed) {
        if ERROR_TITLE_MARKERS.iter().any(|m| title.contains(m)) {
            return Err(format!("relay error page ({title})"));
        }
    }

    Ok(())
}

fn page_title(body: &str) -> Option<String> {
    let title = TITLE_RE.captures(body)?.get(1)?.as_str();
    Some(
        title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase(),
    )
}

fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_just_a_moment = lowered.contains("just a moment...");
    let has_cookie_gate = lowered.contains("please enable cookies");
    let has_cf_chl = lowered.contains("cf-chl-");

    has_cloudflare_banner
        || has_challenge_platform
        || (has_just_a_moment && has_cookie_gate)
        || (has_just_a_moment && has_cf_chl)
}
