use tracing_subscriber::EnvFilter;

use super::settings::{LogFormat, LoggingConfig, LOG_ENV_VAR};

/// Installs the global tracing subscriber.
///
/// ```bash
/// POS_LOG=debug pos_orders                       # everything at debug
/// POS_LOG=pos_orders::clients=debug pos_orders   # one module at debug
/// ```
///
/// Without `POS_LOG`, the configured `logging.level` applies. Calling this
/// twice is harmless; the second call keeps the first subscriber.
pub fn setup_tracing(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime());

    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
