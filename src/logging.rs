use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, failing if one is already set.
///
/// Level comes from `RUST_LOG` and defaults to `info`. The subscriber's
/// `tracing-log` feature also forwards records emitted through the `log`
/// crate (actix-web's request logger).
pub fn try_init() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}

/// Installs the global subscriber. Call once at the start of `main`.
pub fn init() {
    if let Err(e) = try_init() {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }
}
