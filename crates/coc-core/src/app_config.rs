use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Whether the deployment may reach chamber sites without a relay.
    ///
    /// Development and test runs talk to the origin directly first; a
    /// production build behind a browser origin policy has to go through the
    /// proxy chain.
    #[must_use]
    pub fn allows_direct_by_default(&self) -> bool {
        !matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub sites_path: PathBuf,
    /// Upper bound for a single retrieval attempt (direct or one proxy).
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Try the origin itself before walking the proxy chain.
    pub allow_direct: bool,
}
