use ratatui_runtime::{Runtime, ScreenStack};

use crate::{command::play::screens::BoardScreen, config::ConfigArg};

mod screens;
mod view;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { config } = arg;

    let config = config.resolve()?;
    tracing::info!(
        cross = %config.cross_glyph,
        circle = %config.circle_glyph,
        on_win = %config.on_win,
        "starting interactive game"
    );

    let mut app = ScreenStack::new(Box::new(BoardScreen::new(config)));
    Runtime::new().run(&mut app)?;

    tracing::info!("interactive game closed");
    Ok(())
}
