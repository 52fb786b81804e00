mod render;
mod search;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "coc-cli")]
#[command(about = "Chamber of commerce directory search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List configured directory sites
    Sites,
    /// Search one site's directory for a term
    Search {
        /// Site id, e.g. `wilmington`
        site: String,
        /// Free-text search term
        term: String,
        /// Visit listing detail pages to fill in missing websites
        #[arg(long)]
        enrich: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = coc_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sites => search::run_sites(&config)?,
        Commands::Search {
            site,
            term,
            enrich,
            format,
        } => search::run_search(&config, &site, &term, enrich, format).await?,
    }

    Ok(())
}
