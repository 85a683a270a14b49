use std::io;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use user_intake::{app, SqliteConfig};

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_logging();
    tracing::debug!("user_intake v{} starting", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let result = app::run(SqliteConfig::default(), stdin.lock(), io::stdout())
        .context("console is no longer writable");
    if let Err(err) = result {
        tracing::error!("{err:#}");
    }
}
