//! Site and proxy configuration, loaded once from `config/sites.yaml`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Placeholder in `search_params` replaced by the percent-encoded search term.
pub const TERM_PLACEHOLDER: &str = "{term}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Selector,
    Custom,
}

/// Selectors for one semantic field, primary first.
///
/// Accepts a bare string, a list of fallbacks, or a mapping that also names
/// the attribute to read instead of text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelectorConfig {
    One(String),
    Chain(Vec<String>),
    Detailed {
        selectors: Vec<String>,
        #[serde(default)]
        attr: Option<String>,
    },
}

impl FieldSelectorConfig {
    #[must_use]
    pub fn selectors(&self) -> Vec<&str> {
        match self {
            FieldSelectorConfig::One(s) => vec![s.as_str()],
            FieldSelectorConfig::Chain(list)
            | FieldSelectorConfig::Detailed {
                selectors: list, ..
            } => list.iter().map(String::as_str).collect(),
        }
    }

    #[must_use]
    pub fn attr(&self) -> Option<&str> {
        match self {
            FieldSelectorConfig::Detailed { attr, .. } => attr.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorMapConfig {
    /// Card wrapper: one match per listing.
    pub card: String,
    pub name: FieldSelectorConfig,
    #[serde(default)]
    pub url: Option<FieldSelectorConfig>,
    #[serde(default)]
    pub address: Option<FieldSelectorConfig>,
    #[serde(default)]
    pub phone: Option<FieldSelectorConfig>,
    #[serde(default)]
    pub website: Option<FieldSelectorConfig>,
    #[serde(default)]
    pub email: Option<FieldSelectorConfig>,
    #[serde(default)]
    pub contact_person: Option<FieldSelectorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub id: String,
    pub name: String,
    pub base_url: String,
    pub search_path: String,
    /// Query fragment template, e.g. `?q={term}&c=&sa=False`.
    pub search_params: String,
    pub strategy: StrategyKind,
    /// Executed for `selector` sites; documentation only for `custom` sites.
    #[serde(default)]
    pub selectors: Option<SelectorMapConfig>,
    /// Name of a built-in custom extractor. Required for `custom` sites.
    #[serde(default)]
    pub custom_parser: Option<String>,
    /// Selector for the outbound website link on a listing's detail page.
    #[serde(default)]
    pub detail_website: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SitesFile {
    /// Relay URL templates in fallback order.
    #[serde(default)]
    pub proxies: Vec<String>,
    pub sites: Vec<SiteConfig>,
}

/// Load and validate site configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_sites(&content)
}

/// Parse and validate site configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sites(content: &str) -> Result<SitesFile, ConfigError> {
    let sites_file: SitesFile = serde_yaml::from_str(content)?;
    validate_sites(&sites_file)?;
    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    for (index, proxy) in sites_file.proxies.iter().enumerate() {
        if !is_http_url(proxy) {
            return Err(ConfigError::Validation(format!(
                "proxy #{index} '{proxy}' must be an http(s) URL template"
            )));
        }
    }

    let mut seen_ids = HashSet::new();
    for site in &sites_file.sites {
        validate_site(site)?;
        if !seen_ids.insert(site.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site id: '{}'",
                site.id
            )));
        }
    }

    Ok(())
}

fn validate_site(site: &SiteConfig) -> Result<(), ConfigError> {
    let id = site.id.as_str();
    if id.is_empty()
        || !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "site id '{id}' must be non-empty lowercase ASCII (a-z, 0-9, '-', '_')"
        )));
    }
    if site.name.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "site '{id}' has an empty name"
        )));
    }
    if !is_http_url(&site.base_url) {
        return Err(ConfigError::Validation(format!(
            "site '{id}' base_url '{}' must start with http:// or https://",
            site.base_url
        )));
    }
    if !site.search_path.is_empty() && !site.search_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "site '{id}' search_path must start with '/'"
        )));
    }
    if !site.search_params.contains(TERM_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "site '{id}' search_params must contain {TERM_PLACEHOLDER}"
        )));
    }

    match site.strategy {
        StrategyKind::Selector if site.selectors.is_none() => Err(ConfigError::Validation(
            format!("selector site '{id}' has no selectors"),
        )),
        StrategyKind::Custom
            if site
                .custom_parser
                .as_deref()
                .is_none_or(|name| name.trim().is_empty()) =>
        {
            Err(ConfigError::Validation(format!(
                "custom site '{id}' has no custom_parser"
            )))
        }
        _ => Ok(()),
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("https://") || s.starts_with("http://")
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
