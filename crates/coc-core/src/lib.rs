//! Configuration and domain types shared by the chamber directory crates.

pub mod app_config;
pub mod business;
pub mod config;
pub mod sites;

pub use app_config::{AppConfig, Environment};
pub use business::BusinessRecord;
pub use config::{load_app_config, load_app_config_from_env};
pub use sites::{
    load_sites, parse_sites, FieldSelectorConfig, SelectorMapConfig, SiteConfig, SitesFile,
    StrategyKind,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sites file {path}: {source}")]
    SitesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sites file: {0}")]
    SitesFileParse(#[from] serde_yaml::Error),

    #[error("invalid site configuration: {0}")]
    Validation(String),
}
