//! Site registry: immutable site descriptors with lookup by id.

use std::collections::HashMap;

use scraper::Selector;

use coc_core::{ConfigError, SiteConfig, SitesFile, StrategyKind};

use crate::error::ScraperError;
use crate::extract::{custom_extractor, ExtractionStrategy, SelectorMap};
use crate::urls::encode_component;

/// Everything needed to search one chamber directory and read its results.
#[derive(Debug, Clone)]
pub struct SiteDescriptor {
    pub id: String,
    pub name: String,
    pub base_url: String,
    pub search_path: String,
    /// Query template containing `{term}`.
    pub search_params: String,
    pub strategy: ExtractionStrategy,
    /// Website link on a listing's detail page, used by enrichment.
    pub detail_website: Option<Selector>,
}

impl SiteDescriptor {
    /// Builds a descriptor, compiling selectors and resolving the custom
    /// extractor by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for missing selectors, selectors
    /// that do not parse, or an unknown `custom_parser`.
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        let strategy = match config.strategy {
            StrategyKind::Selector => {
                let selectors = config.selectors.as_ref().ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "selector site '{}' has no selectors",
                        config.id
                    ))
                })?;
                ExtractionStrategy::Selector(SelectorMap::compile(selectors)?)
            }
            StrategyKind::Custom => {
                let name = config.custom_parser.as_deref().unwrap_or_default();
                let extractor = custom_extractor(name).ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "site '{}' names unknown custom_parser '{name}'",
                        config.id
                    ))
                })?;
                ExtractionStrategy::Custom {
                    extractor,
                    selectors: config.selectors.clone(),
                }
            }
        };

        let detail_website = config
            .detail_website
            .as_deref()
            .map(|css| {
                Selector::parse(css).map_err(|e| {
                    ConfigError::Validation(format!(
                        "site '{}' has invalid detail_website selector '{css}': {e}",
                        config.id
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            id: config.id.clone(),
            name: config.name.clone(),
            base_url: config.base_url.clone(),
            search_path: config.search_path.clone(),
            search_params: config.search_params.clone(),
            strategy,
            detail_website,
        })
    }

    /// Query fragment for `term`, e.g. `?q=web%20design&c=&sa=False`.
    #[must_use]
    pub fn search_query(&self, term: &str) -> String {
        self.search_params
            .replace(coc_core::sites::TERM_PLACEHOLDER, &encode_component(term.trim()))
    }
}

/// Sites in configured order with O(1) lookup by id.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<SiteDescriptor>,
    index: HashMap<String, usize>,
}

impl SiteRegistry {
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on a duplicate site id.
    pub fn new(sites: Vec<SiteDescriptor>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(sites.len());
        for (position, site) in sites.iter().enumerate() {
            if index.insert(site.id.clone(), position).is_some() {
                return Err(ConfigError::Validation(format!(
                    "duplicate site id: '{}'",
                    site.id
                )));
            }
        }
        Ok(Self { sites, index })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if any site fails to build.
    pub fn from_config(file: &SitesFile) -> Result<Self, ConfigError> {
        let sites = file
            .sites
            .iter()
            .map(SiteDescriptor::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sites)
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::UnknownSite`] if `site_id` is not registered.
    pub fn describe(&self, site_id: &str) -> Result<&SiteDescriptor, ScraperError> {
        self.index
            .get(site_id)
            .and_then(|&position| self.sites.get(position))
            .ok_or_else(|| ScraperError::UnknownSite(site_id.to_owned()))
    }

    /// Sites in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &SiteDescriptor> {
        self.sites.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
