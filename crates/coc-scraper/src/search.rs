//! Public search entry point tying the registry, fetcher and extraction
//! engine together.

use std::sync::{Arc, LazyLock};

use scraper::{Html, Selector};
use tokio_util::sync::CancellationToken;

use coc_core::BusinessRecord;

use crate::error::ScraperError;
use crate::extract::extract;
use crate::fetch::Fetcher;
use crate::registry::{SiteDescriptor, SiteRegistry};
use crate::urls::resolve_href;

/// Website link on a GrowthZone member detail page.
static DEFAULT_DETAIL_WEBSITE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.card-link").expect("valid selector"));

/// Builds the absolute search URL for `term` on `site`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the assembled URL does not parse.
pub fn build_search_url(site: &SiteDescriptor, term: &str) -> Result<String, ScraperError> {
    let url = format!(
        "{}{}{}",
        site.base_url.trim_end_matches('/'),
        site.search_path,
        site.search_query(term)
    );
    reqwest::Url::parse(&url).map_err(|e| ScraperError::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;
    Ok(url)
}

/// Searches chamber directories by site id.
///
/// Cheap to clone; clones share the registry and the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    registry: Arc<SiteRegistry>,
    fetcher: Fetcher,
}

impl DirectoryClient {
    #[must_use]
    pub fn new(registry: Arc<SiteRegistry>, fetcher: Fetcher) -> Self {
        Self { registry, fetcher }
    }

    /// Runs one search against `site_id`'s directory.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnknownSite`] if `site_id` is not registered.
    /// - [`ScraperError::InvalidUrl`] if the search URL cannot be built.
    /// - [`ScraperError::RetrievalExhausted`] when no source returned usable HTML.
    /// - [`ScraperError::Cancelled`] when `cancel` fires first.
    pub async fn search(
        &self,
        site_id: &str,
        term: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<BusinessRecord>, ScraperError> {
        let site = self.registry.describe(site_id)?;
        let url = build_search_url(site, term)?;
        tracing::info!(site_id, term, url = %url, "searching directory");

        let fetched = self.fetcher.fetch_html(&url, cancel).await?;
        let records = extract(&fetched.html, site, term);

        tracing::info!(
            site_id,
            term,
            source = %fetched.source,
            attempt = fetched.attempts.len(),
            count = records.len(),
            "search complete"
        );
        Ok(records)
    }

    /// Fills in `website` from each listing's detail page where the record
    /// has a `chamber_url` but no website.
    ///
    /// Pages are visited one at a time. A page that cannot be retrieved or
    /// has no website link leaves its record unchanged.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnknownSite`] if `site_id` is not registered.
    /// - [`ScraperError::Cancelled`] when `cancel` fires; no records are returned.
    pub async fn enrich_websites(
        &self,
        site_id: &str,
        mut records: Vec<BusinessRecord>,
        cancel: &CancellationToken,
    ) -> Result<Vec<BusinessRecord>, ScraperError> {
        let site = self.registry.describe(site_id)?;
        let selector = site
            .detail_website
            .as_ref()
            .unwrap_or(&DEFAULT_DETAIL_WEBSITE);

        let mut enriched = 0_usize;
        for record in &mut records {
            if record.website.is_some() {
                continue;
            }
            let Some(detail_url) = record.chamber_url.clone() else {
                continue;
            };

            let fetched = match self.fetcher.fetch_html(&detail_url, cancel).await {
                Ok(fetched) => fetched,
                Err(ScraperError::Cancelled) => return Err(ScraperError::Cancelled),
                Err(err) => {
                    tracing::warn!(
                        site_id,
                        name = %record.name,
                        url = %detail_url,
                        error = %err,
                        "detail page unavailable; leaving website empty"
                    );
                    continue;
                }
            };

            match detail_website(&fetched.html, selector, &detail_url) {
                Some(website) => {
                    tracing::debug!(site_id, name = %record.name, website = %website, "website found on detail page");
                    record.website = Some(website);
                    enriched += 1;
                }
                None => {
                    tracing::debug!(site_id, name = %record.name, url = %detail_url, "no website link on detail page");
                }
            }
        }

        tracing::info!(site_id, count = enriched, "website enrichment complete");
        Ok(records)
    }
}

/// First resolvable `href` matched by `selector`, skipping links back to the
/// chamber's own host.
fn detail_website(html: &str, selector: &Selector, page_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let chamber_host = crate::urls::host_of(page_url);
    document
        .select(selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| resolve_href(page_url, href))
        .find(|url| crate::urls::host_of(url) != chamber_host)
}
