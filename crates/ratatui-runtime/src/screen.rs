use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{App, Runtime};

/// One screen of a [`ScreenStack`], such as a game board or a modal message.
///
/// Only the top screen receives input, draws and is told about finished
/// frames. Lifecycle hooks:
///
/// - [`on_active`] when the screen reaches the top of the stack: at startup,
///   after being pushed, or when the screen above it is popped
/// - [`on_inactive`] when it leaves the top, either because another screen
///   is pushed over it or because it is being removed
/// - [`on_close`] right after [`on_inactive`] when it is removed (pop,
///   replace or exit), never when merely covered
///
/// [`on_active`]: Self::on_active
/// [`on_inactive`]: Self::on_inactive
/// [`on_close`]: Self::on_close
pub trait Screen: fmt::Debug {
    fn on_active(&mut self, runtime: &mut Runtime);

    fn on_inactive(&mut self, runtime: &mut Runtime);

    fn on_close(&mut self, runtime: &mut Runtime);

    /// Handles terminal input and tells the stack what to do next.
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    /// Called after each drawn frame while this screen is on top.
    fn after_render(&mut self, runtime: &mut Runtime) -> ScreenTransition;

    fn draw(&self, frame: &mut Frame);
}

/// What the stack does after a screen handled an event or a frame.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Cover the current screen with a new one.
    Push(Box<dyn Screen>),
    /// Remove the current screen and reactivate the one below.
    Pop,
    /// Remove the current screen and put a new one in its place.
    Replace(Box<dyn Screen>),
    /// Remove every screen and stop the runtime.
    Exit,
}

/// Stack of [`Screen`]s driven as a single [`App`].
///
/// The application exits when the stack becomes empty.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    #[must_use]
    pub fn new(initial: Box<dyn Screen + 'a>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn remove_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => return,
            ScreenTransition::Push(mut screen) => {
                if let Some(covered) = self.screens.last_mut() {
                    covered.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.remove_top(runtime);
                if let Some(uncovered) = self.screens.last_mut() {
                    uncovered.on_active(runtime);
                }
            }
            ScreenTransition::Replace(mut screen) => {
                self.remove_top(runtime);
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.remove_top(runtime);
                }
                self.should_exit = true;
            }
        }
        runtime.request_render();
    }
}

impl App for ScreenStack<'_> {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.handle_event(runtime, &event);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(top) = self.screens.last() {
            top.draw(frame);
        }
    }

    fn after_render(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.after_render(runtime);
            self.apply_transition(runtime, transition);
        }
    }
}
