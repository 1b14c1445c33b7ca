use std::{fs::File, io, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LoggingArg {
    /// Write logs to this file (the interactive game never logs to the terminal)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Minimum log level; `RUST_LOG` directives take precedence
    #[clap(long, global = true, default_value = "info")]
    log_level: LevelFilter,
}

/// Where log lines go when no log file is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FallbackSink {
    Stderr,
    Discard,
}

/// Installs the global `tracing` subscriber.
pub(crate) fn init(arg: &LoggingArg, fallback: FallbackSink) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(arg.log_level.into())
        .from_env_lossy();

    match (&arg.log_file, fallback) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, FallbackSink::Stderr) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        (None, FallbackSink::Discard) => {}
    }
    Ok(())
}
