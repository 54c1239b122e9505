mod config;
mod db;
mod error;
mod models;
mod query;
mod run;
mod ui;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    let db = db::Database::open(&config.data_dir).with_context(|| {
        format!("Failed to open data directory: {}", config.data_dir.display())
    })?;

    let result = match args.len() {
        0 | 1 => run::as_shell(&db),
        _ => run::as_cli(&args, &db),
    };
    if let Err(err) = result {
        run::report(&err);
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(config::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}
