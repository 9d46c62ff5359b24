//! Tracing subscriber setup.
//!
//! Batch commands log to stderr. The dashboard owns the terminal, so it only
//! logs when a file is given.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;

fn filter(verbose: bool) -> EnvFilter {
    let default_directive = if verbose {
        "keylight=debug"
    } else {
        "keylight=warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber writing to stderr.
pub fn init_stderr(verbose: bool) {
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    // A subscriber may already be installed (tests); keep the first one.
    let _ = tracing_subscriber::registry()
        .with(filter(verbose))
        .with(layer)
        .try_init();
}

/// Install the global subscriber appending plain-text lines to `path`.
pub fn init_file(path: &Path, verbose: bool) -> Result<(), AppError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let _ = tracing_subscriber::registry()
        .with(filter(verbose))
        .with(layer)
        .try_init();
    Ok(())
}
