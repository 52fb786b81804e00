//! Generic selector-driven extraction.

use scraper::{ElementRef, Html, Selector};

use coc_core::{BusinessRecord, ConfigError, FieldSelectorConfig, SelectorMapConfig};

use super::element_text;
use crate::normalize::clean_text;
use crate::urls::resolve_href;

/// Compiled selectors for one semantic field, primary first.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    selectors: Vec<Selector>,
    attr: Option<String>,
}

impl FieldSelector {
    /// Compiles `config`; `default_attr` applies when the config names none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an empty chain or a selector
    /// that does not parse.
    pub fn compile(
        field: &str,
        config: &FieldSelectorConfig,
        default_attr: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let raw = config.selectors();
        if raw.is_empty() {
            return Err(ConfigError::Validation(format!(
                "field '{field}' needs at least one selector"
            )));
        }
        let selectors = raw
            .into_iter()
            .map(|s| parse_selector(field, s))
            .collect::<Result<Vec<_>, _>>()?;
        let attr = config.attr().or(default_attr).map(str::to_owned);
        Ok(Self { selectors, attr })
    }

    /// First non-empty value inside `scope`, trying each selector in order.
    #[must_use]
    pub fn resolve(&self, scope: ElementRef<'_>) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            scope.select(selector).find_map(|el| {
                let value = match &self.attr {
                    Some(attr) => clean_text(el.value().attr(attr)?),
                    None => element_text(el),
                };
                (!value.is_empty()).then_some(value)
            })
        })
    }
}

/// Compiled form of a site's [`SelectorMapConfig`].
#[derive(Debug, Clone)]
pub struct SelectorMap {
    card: Selector,
    name: FieldSelector,
    url: Option<FieldSelector>,
    address: Option<FieldSelector>,
    phone: Option<FieldSelector>,
    website: Option<FieldSelector>,
    email: Option<FieldSelector>,
    contact_person: Option<FieldSelector>,
}

impl SelectorMap {
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any selector does not parse.
    pub fn compile(config: &SelectorMapConfig) -> Result<Self, ConfigError> {
        let optional = |field: &str,
                        cfg: Option<&FieldSelectorConfig>,
                        default_attr: Option<&str>|
         -> Result<Option<FieldSelector>, ConfigError> {
            cfg.map(|c| FieldSelector::compile(field, c, default_attr))
                .transpose()
        };

        Ok(Self {
            card: parse_selector("card", &config.card)?,
            name: FieldSelector::compile("name", &config.name, None)?,
            url: optional("url", config.url.as_ref(), Some("href"))?,
            address: optional("address", config.address.as_ref(), None)?,
            phone: optional("phone", config.phone.as_ref(), None)?,
            website: optional("website", config.website.as_ref(), Some("href"))?,
            email: optional("email", config.email.as_ref(), None)?,
            contact_person: optional("contact_person", config.contact_person.as_ref(), None)?,
        })
    }
}

/// Reads one record per card. Cards without a name are skipped.
pub(super) fn extract_cards(html: &str, map: &SelectorMap, base_url: &str) -> Vec<BusinessRecord> {
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    let mut nameless = 0usize;
    for card in document.select(&map.card) {
        let Some(name) = map.name.resolve(card) else {
            nameless += 1;
            continue;
        };

        let mut record = BusinessRecord::named(name);
        record.chamber_url = link_value(map.url.as_ref(), card, base_url);
        record.address = text_value(map.address.as_ref(), card);
        record.phone = text_value(map.phone.as_ref(), card);
        record.website = link_value(map.website.as_ref(), card, base_url);
        record.email = text_value(map.email.as_ref(), card);
        record.contact_person = text_value(map.contact_person.as_ref(), card);
        records.push(record);
    }

    tracing::debug!(
        cards = records.len() + nameless,
        nameless,
        "selector extraction pass"
    );
    records
}

fn text_value(field: Option<&FieldSelector>, card: ElementRef<'_>) -> Option<String> {
    field.and_then(|f| f.resolve(card))
}

fn link_value(field: Option<&FieldSelector>, card: ElementRef<'_>, base_url: &str) -> Option<String> {
    text_value(field, card).and_then(|href| resolve_href(base_url, &href))
}

fn parse_selector(field: &str, raw: &str) -> Result<Selector, ConfigError> {
    Selector::parse(raw).map_err(|e| {
        ConfigError::Validation(format!("invalid {field} selector '{raw}': {e}"))
    })
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
