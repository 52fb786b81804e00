//! Extraction engine: turns a directory page into business records.
//!
//! Dispatch is a single `match` on [`ExtractionStrategy`]. Whatever the
//! strategy, output goes through [`normalize_record`] and
//! [`dedupe_by_name`] before reaching the caller.

mod custom;
mod dayton;
mod selector;

use coc_core::{BusinessRecord, SelectorMapConfig};
use scraper::ElementRef;

use crate::normalize::{clean_text, dedupe_by_name, normalize_record};
use crate::registry::SiteDescriptor;

pub use custom::{custom_extractor, CustomExtractor, ExtractFn};
pub use selector::{FieldSelector, SelectorMap};

/// Length of the HTML excerpt attached to extraction failure logs.
const HTML_SAMPLE_CHARS: usize = 200;

/// How a site's listings are read.
#[derive(Debug, Clone)]
pub enum ExtractionStrategy {
    /// Declarative selectors; no site-specific code.
    Selector(SelectorMap),
    /// A built-in parser. `selectors` documents the markup and is never executed.
    Custom {
        extractor: CustomExtractor,
        selectors: Option<SelectorMapConfig>,
    },
}

impl ExtractionStrategy {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionStrategy::Selector(_) => "selector",
            ExtractionStrategy::Custom { .. } => "custom",
        }
    }
}

/// Errors raised by an extractor on markup it cannot make sense of.
///
/// These never reach the caller of [`extract`]; they are logged and the
/// page counts as having zero listings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("malformed directory page: {reason}")]
    Malformed { reason: String },
}

/// Extracts de-duplicated records from `html` using `site`'s strategy.
///
/// An empty or non-HTML payload yields an empty `Vec`. Extractor failures
/// are logged with the site id, search term and an HTML sample, then
/// degrade to an empty `Vec`.
#[must_use]
pub fn extract(html: &str, site: &SiteDescriptor, term: &str) -> Vec<BusinessRecord> {
    if html.trim().is_empty() {
        tracing::debug!(site_id = %site.id, term, "empty payload; nothing to extract");
        return Vec::new();
    }

    let raw = match &site.strategy {
        ExtractionStrategy::Selector(map) => Ok(selector::extract_cards(html, map, &site.base_url)),
        ExtractionStrategy::Custom { extractor, .. } => {
            tracing::debug!(site_id = %site.id, extractor = extractor.name(), "running custom extractor");
            extractor.run(html, term)
        }
    };

    match raw {
        Ok(records) => {
            let found = records.len();
            let records = dedupe_by_name(records.into_iter().map(normalize_record));
            tracing::info!(
                site_id = %site.id,
                term,
                strategy = site.strategy.kind(),
                found,
                count = records.len(),
                "extracted business records"
            );
            records
        }
        Err(err) => {
            tracing::warn!(
                site_id = %site.id,
                term,
                error = %err,
                html_sample = %html_sample(html),
                "extraction failed; treating as zero records"
            );
            Vec::new()
        }
    }
}

/// Cleaned text content of `el`, with a space between adjacent text nodes so
/// `<span>100 Main St</span><span>Suite 2</span>` stays two phrases.
fn element_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<Vec<_>>().join(" ")).replace(" ,", ",")
}

fn html_sample(html: &str) -> String {
    let trimmed = html.trim();
    let mut sample: String = trimmed.chars().take(HTML_SAMPLE_CHARS).collect();
    if trimmed.chars().count() > HTML_SAMPLE_CHARS {
        sample.push_str("...");
    }
    sample
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
