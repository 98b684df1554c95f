use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: Once = Once::new();

/// Console logging, filtered by `RUST_LOG` (default `info`). Safe to call twice.
pub fn init_logging() {
    LOGGER_INITIALIZED.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init();
    });
}
