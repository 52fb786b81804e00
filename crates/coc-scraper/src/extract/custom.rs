//! Built-in site-specific extractors, looked up by name from site config.

use coc_core::BusinessRecord;

use super::{dayton, ExtractError};

/// Signature every custom extractor conforms to: `(html, search_term)`.
pub type ExtractFn = fn(&str, &str) -> Result<Vec<BusinessRecord>, ExtractError>;

#[derive(Clone, Copy)]
pub struct CustomExtractor {
    name: &'static str,
    parse: ExtractFn,
}

impl CustomExtractor {
    #[must_use]
    pub const fn new(name: &'static str, parse: ExtractFn) -> Self {
        Self { name, parse }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// # Errors
    ///
    /// Propagates the extractor's [`ExtractError`].
    pub fn run(&self, html: &str, term: &str) -> Result<Vec<BusinessRecord>, ExtractError> {
        (self.parse)(html, term)
    }
}

impl std::fmt::Debug for CustomExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomExtractor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

const BUILT_IN: [CustomExtractor; 1] = [CustomExtractor::new(
    "dayton",
    dayton::parse_dayton_businesses,
)];

/// Resolves a `custom_parser` name from site config.
#[must_use]
pub fn custom_extractor(name: &str) -> Option<CustomExtractor> {
    BUILT_IN.iter().copied().find(|e| e.name == name)
}
