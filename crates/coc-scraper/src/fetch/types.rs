//! Outcome types for the retrieval fallback loop.

use std::time::Duration;

/// Where a retrieval attempt was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchSource {
    /// The target URL itself, without a relay.
    Direct,
    /// A relay from the proxy chain; `index` is its zero-based position.
    Proxy { index: usize, host: String },
}

impl std::fmt::Display for FetchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchSource::Direct => write!(f, "direct"),
            FetchSource::Proxy { index, host } => write!(f, "proxy #{} ({host})", index + 1),
        }
    }
}

/// Classification of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    /// Connection, DNS, TLS or body-read failure.
    Network(String),
    TimedOut,
    /// Non-2xx status.
    Status(u16),
    /// 2xx response whose body is not the directory page.
    Unusable(String),
}

impl AttemptOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Succeeded)
    }
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptOutcome::Succeeded => write!(f, "ok"),
            AttemptOutcome::Network(msg) => write!(f, "network error: {msg}"),
            AttemptOutcome::TimedOut => write!(f, "timed out"),
            AttemptOutcome::Status(code) => write!(f, "HTTP {code}"),
            AttemptOutcome::Unusable(reason) => write!(f, "unusable response: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAttempt {
    pub source: FetchSource,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
}

impl std::fmt::Display for FetchAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.outcome)
    }
}

/// HTML retrieved by the fallback loop, plus how it was obtained.
#[derive(Debug, Clone)]
pub struct FetchedHtml {
    pub html: String,
    pub source: FetchSource,
    /// Every attempt made, in order; the last one succeeded.
    pub attempts: Vec<FetchAttempt>,
}
