//! Diagnostics for the `snake` binary.
//!
//! The game owns the terminal, so tracing output never goes to stdout or
//! stderr. With `--log-file` a subscriber writes plain-text events to that
//! file, filtered by `RUST_LOG` (default `info`). Without it nothing is
//! installed and every `tracing` call is a no-op.
//!
//! ```bash
//! RUST_LOG=term_snake_core=debug snake --log-file /tmp/snake.log
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}
