use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentinel_digest::api::{ArticleSource, DigestClient};
use sentinel_digest::config::Config;
use sentinel_digest::layout::{allocate, DailySelector, LayoutRegistry};
use sentinel_digest::models::Collection;
use sentinel_digest::render::PageRenderer;
use sentinel_digest::server::DigestServer;

#[derive(Parser)]
#[command(
    name = "sentinel-digest",
    version,
    about = "Server-side presentation layer for the Sentinel Digest news site",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve rendered pages over HTTP
    Serve {
        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Render one collection page and write the HTML out
    Render {
        /// Collection spec: home, trending, category:<slug>, tag:<slug>, search:<query>
        collection: String,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the deterministic layout selection for collection keys
    Layouts {
        /// Date to select for (defaults to today, UTC)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Collection keys to inspect
        #[arg(default_values_t = vec!["home".to_string(), "trending".to_string()])]
        keys: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(addr) = bind {
                config.server.bind_address = addr;
            }
            tracing::info!(addr = %config.server.bind_address, "Starting serve command");
            let server = DigestServer::new(config)?;
            server.start().await?;
        }

        Commands::Render { collection, output } => {
            let html = render_page(&config, &collection).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    tracing::info!(path = %path.display(), "Wrote rendered page");
                }
                None => println!("{html}"),
            }
        }

        Commands::Layouts { date, keys } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let selector = DailySelector::new(LayoutRegistry::builtin());

            println!("Layout selection for {date}");
            for key in keys {
                let (primary, secondary) = selector.select_for_date(&key, date);
                println!(
                    "{key:>16} | {} ({} slots) + {} ({} slots)",
                    primary.name,
                    primary.required_articles,
                    secondary.name,
                    secondary.required_articles
                );
            }
        }
    }

    Ok(())
}

async fn render_page(config: &Config, spec: &str) -> Result<String> {
    let collection = Collection::parse(spec);
    let client = Arc::new(DigestClient::with_config(
        &config.api.base_url,
        config.request_timeout(),
        config.api.max_retries,
    )?);
    let selector = DailySelector::new(LayoutRegistry::builtin());
    let renderer = PageRenderer::new()?;

    let (primary, secondary) = selector.select_daily(collection.key());
    let needed = primary.required_articles
        + secondary.required_articles
        + config.presentation.more_stories_count;
    let limit = needed.max(config.presentation.min_fetch_count);

    let articles = client.fetch_collection(&collection, limit).await?;
    let buckets = allocate(articles, primary.required_articles, secondary.required_articles);

    Ok(renderer.collection_page(
        &collection,
        primary,
        secondary,
        &buckets,
        config.presentation.more_stories_count,
    )?)
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => {
            let default_path = std::path::Path::new("config.toml");
            if default_path.exists() {
                Config::from_file(default_path)?
            } else {
                Config::from_env()?
            }
        }
    };

    config.validate()?;
    Ok(config)
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("sentinel_digest=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("sentinel_digest=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
