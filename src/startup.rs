use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset. Serenity and songbird are chatty at info.
const DEFAULT_LOG_FILTER: &str = "info,serenity=warn,songbird=warn";

/// Installs the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, falling back to `DEFAULT_LOG_FILTER`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
