//! Command handlers for `sites` and `search`.
//!
//! Both build the site registry from the configured sites file; `search`
//! also builds the fetcher and wires Ctrl-C to the cancellation token.

use std::sync::Arc;

use anyhow::Context;
use coc_core::AppConfig;
use coc_scraper::{
    CancellationToken, DirectoryClient, FetchSettings, Fetcher, ProxyChain, SiteRegistry,
};

use crate::render;
use crate::OutputFormat;

fn load_registry(config: &AppConfig) -> anyhow::Result<(SiteRegistry, ProxyChain)> {
    let file = coc_core::load_sites(&config.sites_path)
        .with_context(|| format!("failed to load {}", config.sites_path.display()))?;
    let registry = SiteRegistry::from_config(&file)?;
    let chain = ProxyChain::new(file.proxies);
    tracing::debug!(
        sites = registry.len(),
        proxies = chain.len(),
        path = %config.sites_path.display(),
        "site registry loaded"
    );
    Ok((registry, chain))
}

/// Prints `id  name  base_url` for each configured site, in order.
pub(crate) fn run_sites(config: &AppConfig) -> anyhow::Result<()> {
    let (registry, _) = load_registry(config)?;
    print!("{}", render::site_table(&registry));
    Ok(())
}

/// Runs one search and prints the records in `format`.
///
/// Ctrl-C cancels the search; nothing is printed in that case.
pub(crate) async fn run_search(
    config: &AppConfig,
    site_id: &str,
    term: &str,
    enrich: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let (registry, chain) = load_registry(config)?;
    let fetcher = Fetcher::new(chain, FetchSettings::from_app_config(config))
        .context("failed to build HTTP client")?;
    let client = DirectoryClient::new(Arc::new(registry), fetcher);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; cancelling search");
            on_interrupt.cancel();
        }
    });

    let mut records = client.search(site_id, term, &cancel).await?;
    if enrich {
        records = client.enrich_websites(site_id, records, &cancel).await?;
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => print!("{}", render::record_text(&records)),
    }
    Ok(())
}
