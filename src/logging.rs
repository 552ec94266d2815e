//! Tracing setup shared by the binaries

use tracing_subscriber::{fmt, EnvFilter};

/// Install a stdout subscriber filtered by `level`, falling back to `info`
/// when the directive does not parse
///
/// Later calls are ignored once a global subscriber is set.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
