//! Tracing subscriber configuration.

use tracing_subscriber::EnvFilter;

/// Install the JSON log subscriber for the process.
///
/// `RUST_LOG` overrides the default filter. The default keeps session and
/// authorization events at info and the HTTP client internals at warn.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
