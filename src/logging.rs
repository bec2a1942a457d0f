//! Tracing subscriber setup for binaries, demos and benches.
//!
//! The library itself only emits `tracing` events (debug level for key
//! generation, recovery and rejected batch inputs); it never installs a
//! subscriber on its own.

use tracing_subscriber::{EnvFilter, fmt};

/// Directive used when neither `filter` nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global fmt subscriber filtered by `filter`, else `RUST_LOG`,
/// else [`DEFAULT_FILTER`]. Later calls are no-ops.
pub fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let subscriber = fmt().with_env_filter(filter).with_target(false).finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
