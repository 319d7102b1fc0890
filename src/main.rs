use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use catalog_sync::catalog::{CatalogStore, Category, Retention};
use catalog_sync::config::{Config, DEFAULT_BASE_URL};
use catalog_sync::registry::MarketplaceRegistry;
use catalog_sync::update;

#[derive(Parser)]
#[command(name = "catalog-sync")]
#[command(
    version,
    about = "Synchronize the plugin and theme catalogs with the marketplace",
    long_about = "Synchronize the plugin and theme catalogs with the marketplace.\n\n\
                  MATOMO_VERSION must name the host release to check compatibility against.\n\
                  DEBUG enables debug logging, COMMIT_LOG prints the changes as a commit message."
)]
struct Cli {
    /// Directory holding <category>.json and <category>.log
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Marketplace base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Drop catalog entries whose package is no longer listed
    #[arg(long)]
    prune_stale: bool,

    /// Only process these categories (plugins, themes)
    #[arg(long = "category", value_name = "CATEGORY")]
    categories: Vec<Category>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(debug: bool, json: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(config.as_ref().is_ok_and(|c| c.debug), cli.json_logs);

    let mut config = config.inspect_err(|e| error!("{}", e))?;
    config.output_dir = cli.output_dir;
    config.base_url = cli.base_url;
    if cli.prune_stale {
        config.retention = Retention::Prune;
    }
    if !cli.categories.is_empty() {
        config.categories = cli.categories;
    }

    let registry = MarketplaceRegistry::new(&config.base_url)?;
    let store = CatalogStore::new(config.output_dir.clone());

    let reports = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(update::run(&config, &registry, &store))
        .inspect_err(|e| error!("{}", e))?;

    if config.commit_log {
        print!("{}", update::commit_message(&reports));
    }

    Ok(())
}
