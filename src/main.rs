//! Records Grid - Main Entry Point
//!
//! Native viewer for paginated integration records with resizable, persisted columns.

use records_grid::app::application::run_app;
use records_grid::helpers::get_or_create_data_dir;
use records_grid::states::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Console logging plus a daily rolling file in the data dir.
///
/// The returned guard flushes the file writer and must outlive the app.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let (file_layer, guard) = match get_or_create_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join("logs"), "records-grid.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn main() {
    let _guard = init_logging();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Records Grid...");

    let config = match AppConfig::try_load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config, using defaults");
            let mut config = AppConfig::default();
            config.apply_overrides(std::env::var(records_grid::states::API_URL_ENV).ok());
            config
        }
    };

    // Run the GPUI application
    run_app(config);
}
