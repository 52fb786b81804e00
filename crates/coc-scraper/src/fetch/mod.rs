//! Retrieval with ordered fallback across the direct request and relays.
//!
//! Each candidate gets exactly one attempt bounded by the per-attempt
//! timeout. The first attempt yielding plausible HTML wins; otherwise the
//! search fails with every attempt listed.

mod classify;
mod types;

use std::time::{Duration, Instant};

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use coc_core::AppConfig;

use crate::error::ScraperError;
use crate::proxy::{Candidate, ProxyChain};

pub use types::{AttemptOutcome, FetchAttempt, FetchSource, FetchedHtml};

/// Tunables for [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Bound on one attempt, connect through body read.
    pub timeout: Duration,
    pub user_agent: String,
    /// Try the origin itself before the relays.
    pub allow_direct: bool,
}

impl FetchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.request_timeout_secs),
            user_agent: config.user_agent.clone(),
            allow_direct: config.allow_direct,
        }
    }
}

/// Fetches directory HTML through the direct request and the proxy chain.
///
/// Holds no per-request state; one instance serves concurrent searches.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    chain: ProxyChain,
    settings: FetchSettings,
}

impl Fetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(chain: ProxyChain, settings: FetchSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout.min(Duration::from_secs(10)))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            chain,
            settings,
        })
    }

    /// Retrieves `target_url`, walking the candidates in order until one
    /// returns plausible HTML.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RetrievalExhausted`] when every candidate failed.
    /// - [`ScraperError::Cancelled`] when `cancel` fires; no further
    ///   candidates are tried.
    pub async fn fetch_html(
        &self,
        target_url: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchedHtml, ScraperError> {
        let candidates = self
            .chain
            .candidates(target_url, self.settings.allow_direct);
        let mut attempts = Vec::with_capacity(candidates.len());

        for Candidate { source, url } in candidates {
            if cancel.is_cancelled() {
                return Err(ScraperError::Cancelled);
            }

            tracing::debug!(target_url, %source, relay_url = %url, "trying retrieval source");
            let started = Instant::now();
            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::debug!(target_url, %source, "retrieval cancelled mid-attempt");
                    return Err(ScraperError::Cancelled);
                }
                result = self.attempt(&url) => result,
            };
            let elapsed = started.elapsed();

            match result {
                Ok(html) => {
                    tracing::info!(
                        target_url,
                        %source,
                        bytes = html.len(),
                        elapsed_ms = elapsed.as_millis(),
                        "retrieval succeeded"
                    );
                    attempts.push(FetchAttempt {
                        source: source.clone(),
                        outcome: AttemptOutcome::Succeeded,
                        elapsed,
                    });
                    return Ok(FetchedHtml {
                        html,
                        source,
                        attempts,
                    });
                }
                Err(outcome) => {
                    tracing::warn!(
                        target_url,
                        %source,
                        outcome = %outcome,
                        elapsed_ms = elapsed.as_millis(),
                        "retrieval source failed; falling back"
                    );
                    attempts.push(FetchAttempt {
                        source,
                        outcome,
                        elapsed,
                    });
                }
            }
        }

        Err(ScraperError::RetrievalExhausted {
            url: target_url.to_owned(),
            attempts,
        })
    }

    /// One request with no retries. `Err` carries the failure classification.
    async fn attempt(&self, url: &str) -> Result<String, AttemptOutcome> {
        let request = async {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .send()
                .await
                .map_err(|e| classify_transport_error(url, &e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(AttemptOutcome::Status(status.as_u16()));
            }

            let body = response
                .text()
                .await
                .map_err(|e| classify_transport_error(url, &e))?;
            classify::check_body(&body).map_err(AttemptOutcome::Unusable)?;
            Ok(body)
        };

        match tokio::time::timeout(self.settings.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(AttemptOutcome::TimedOut),
        }
    }
}

/// Maps a `reqwest` error to a short message; the full chain goes to debug logs only.
fn classify_transport_error(url: &str, err: &reqwest::Error) -> AttemptOutcome {
    tracing::debug!(url, error = %err, "transport error");
    if err.is_timeout() {
        AttemptOutcome::TimedOut
    } else if err.is_connect() {
        AttemptOutcome::Network("connection failed".to_string())
    } else if err.is_body() || err.is_decode() {
        AttemptOutcome::Network("failed to read response body".to_string())
    } else if err.is_redirect() {
        AttemptOutcome::Network("too many redirects".to_string())
    } else {
        AttemptOutcome::Network("request failed".to_string())
    }
}
