//! Tracing subscriber setup
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! application's call. [`init_tracing`] is a convenience for binaries and
//! tests. Token values and client secrets are never recorded as fields.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset and no directive is given.
pub const DEFAULT_LOG_FILTER: &str = "info,campline_core=debug";

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Output format for [`init_tracing`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install a global subscriber with an env filter.
///
/// `filter` overrides `RUST_LOG`; an invalid directive falls back to
/// [`DEFAULT_LOG_FILTER`]. Returns `false` if a subscriber was already
/// installed (by this function or anyone else), leaving it in place.
pub fn init_tracing(filter: Option<&str>, format: LogFormat) -> bool {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let env_filter = filter
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_current_span(true)).try_init(),
    };

    installed.is_ok()
}
