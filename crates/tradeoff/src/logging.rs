use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter from `RUST_LOG`, falling back to `level` for this crate
fn env_filter(level: &str) -> EnvFilter {
    let default_filter = format!("tradeoff={level},tradeoff_core=warn");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter))
}

/// Initialize logging.
///
/// Without `log_dir` events go to stderr so stdout stays clean for the JSON
/// response. With `log_dir` they go to `{log_dir}/tradeoff.log`, rolled daily
/// by `tracing-appender`. The returned guard flushes the background writer
/// when dropped and must be held until the program exits.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> color_eyre::Result<Option<WorkerGuard>> {
    let filter = env_filter(level);

    let guard = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "tradeoff.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .try_init()?;

            tracing::info!(log_dir = %dir.display(), "Tradeoff logging initialized");
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .try_init()?;
            None
        }
    };

    Ok(guard)
}
