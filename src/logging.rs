//! Logging initialization
//!
//! Suites call [`init`] once at startup; repeated calls are no-ops so
//! parallel test binaries can share the helper.

use tracing_subscriber::EnvFilter;

/// Install a global subscriber filtered by `RUST_LOG` (default `info`)
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
