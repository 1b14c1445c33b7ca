use clap::{Parser, Subcommand};

use crate::logging::{self, FallbackSink, LoggingArg};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    logging: LoggingArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Play a list of cells without a terminal UI and print a JSON report
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));
    let fallback = match mode {
        Mode::Play(_) => FallbackSink::Discard,
        Mode::Simulate(_) => FallbackSink::Stderr,
    };
    logging::init(&args.logging, fallback)?;

    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
