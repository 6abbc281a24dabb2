//! imagestream server entry point

use anyhow::{Context, Result};
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use imagestream::config::AppConfig;
use imagestream::routes;
use imagestream::state::{AppState, SiteConfig};
use imagestream_adapters::{
    articles::SqliteArticleRepository,
    assets::FsAssetStore,
    bitly::BitlyShortener,
    twitter::TwitterPublisher,
};
use imagestream_domain::usecases::{SubmitConfig, SubmitPipeline};
use imagestream_domain::{
    ArticleRepository, AssetStore, Clock, LinkShortener, SocialPublisher, SystemClock,
};

/// imagestream: image upload service with short links and social posting
#[derive(Parser, Debug)]
#[command(name = "imagestream")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_example_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_example_config {
        print!("{}", AppConfig::example_toml());
        return Ok(());
    }

    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize logging
    let log_level = cli.log_level.as_deref().unwrap_or(&config.server.log_level);
    init_logging(log_level)?;

    let repository = Arc::new(
        SqliteArticleRepository::new(&config.server.db_path)
            .await
            .context("Failed to initialize SQLite article repository")?,
    );

    let assets = Arc::new(
        FsAssetStore::new(&config.imagestream.image_path)
            .context("Failed to initialize image directory")?,
    );

    let (shortener, publisher) = build_api_clients(&config)?;

    let pipeline = SubmitPipeline::new(
        Arc::clone(&assets) as Arc<dyn AssetStore>,
        Arc::clone(&repository) as Arc<dyn ArticleRepository>,
        shortener,
        publisher,
        Arc::new(SystemClock) as Arc<dyn Clock>,
        SubmitConfig {
            base_url: config.imagestream.long_url.clone(),
            public_image_root: config.imagestream.public_image_root.clone(),
            enrichment_enabled: config.debug.api_usage,
        },
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
        repository,
        site: Arc::new(SiteConfig {
            base_url: config.imagestream.long_url.clone(),
            public_image_root: config.imagestream.public_image_root.clone(),
            post_limit: config.imagestream.post_limit,
            upload_dir: config.server.upload_dir.clone(),
            debug_enabled: config.debug.enabled,
        }),
    };

    let app = routes::router(state, &config.imagestream.image_path);

    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        addr = %addr,
        api_usage = config.debug.api_usage,
        "imagestream server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("imagestream server stopped");
    Ok(())
}

/// Build the external API clients, or disabled ones when the toggle is off.
/// The pipeline never calls the disabled clients.
fn build_api_clients(
    config: &AppConfig,
) -> Result<(Arc<dyn LinkShortener>, Arc<dyn SocialPublisher>)> {
    if !config.debug.api_usage {
        return Ok((
            Arc::new(BitlyShortener::disabled()),
            Arc::new(TwitterPublisher::disabled()),
        ));
    }

    let login = std::env::var(&config.bitly.login_env)
        .with_context(|| format!("Missing Bit.ly login in ${}", config.bitly.login_env))?;
    let api_key = load_secret(&config.bitly.api_key_env, "Bit.ly")?;
    let access_token = load_secret(&config.twitter.access_token_env, "Twitter")?;

    Ok((
        Arc::new(BitlyShortener::new(
            login,
            api_key,
            config.bitly.custom_domain.clone(),
        )),
        Arc::new(TwitterPublisher::new(access_token)),
    ))
}

fn load_secret(env_var: &str, what: &str) -> Result<SecretString> {
    let value = std::env::var(env_var)
        .with_context(|| format!("Missing {what} credential in ${env_var}"))?;
    Ok(SecretString::new(value.into()))
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
