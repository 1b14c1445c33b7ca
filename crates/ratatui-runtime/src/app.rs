use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for applications driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first frame.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal input (key, mouse, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the current state.
    fn draw(&self, frame: &mut Frame);

    /// Called after each frame has been drawn to the terminal.
    ///
    /// [`Runtime::frame_count`] already includes the frame that was just drawn.
    fn after_render(&mut self, runtime: &mut Runtime);
}
