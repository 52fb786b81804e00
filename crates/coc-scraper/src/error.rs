use thiserror::Error;

use crate::fetch::FetchAttempt;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Every retrieval source was tried and none produced usable HTML.
    #[error(
        "all {} retrieval sources failed for {url}: {}",
        .attempts.len(),
        summarize_attempts(.attempts)
    )]
    RetrievalExhausted {
        url: String,
        attempts: Vec<FetchAttempt>,
    },

    #[error("unknown site: {0}")]
    UnknownSite(String),

    #[error("search cancelled")]
    Cancelled,

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

fn summarize_attempts(attempts: &[FetchAttempt]) -> String {
    if attempts.is_empty() {
        return "no sources configured".to_string();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
