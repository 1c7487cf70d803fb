//! Library catalog console
//!
//! Interactive text menu over the in-memory library catalog.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog::{
    cli::Console,
    config::{AppConfig, LogFormat},
    AppState,
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_filter().into());

    // Logs go to stderr so they do not interleave with the menu
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == LogFormat::Json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    tracing::info!("Starting library catalog v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config);
    let stdin = io::stdin();
    let mut console = Console::new(state.library.clone(), stdin.lock(), io::stdout());
    console.run()?;

    Ok(())
}
