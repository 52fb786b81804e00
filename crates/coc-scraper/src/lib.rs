pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod proxy;
pub mod registry;
pub mod search;
mod urls;

pub use coc_core::BusinessRecord;
pub use error::ScraperError;
pub use extract::{extract, CustomExtractor, ExtractError, ExtractionStrategy};
pub use fetch::{AttemptOutcome, FetchAttempt, FetchSettings, FetchSource, FetchedHtml, Fetcher};
pub use proxy::{Candidate, ProxyChain, ProxyEndpoint};
pub use registry::{SiteDescriptor, SiteRegistry};
pub use search::{build_search_url, DirectoryClient};
pub use tokio_util::sync::CancellationToken;
