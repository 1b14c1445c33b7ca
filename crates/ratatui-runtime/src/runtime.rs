use std::{io, time::Duration};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};

use ratatui::DefaultTerminal;

use crate::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal application runtime.
///
/// Owns the event loop and the count of frames drawn so far.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
    frame_count: u64,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum frame rate (frames per second).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.events
            .set_frame_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Asks for another frame to be drawn as soon as the frame rate allows.
    ///
    /// Input events request a frame on their own; call this when the state
    /// changes without input, e.g. to keep rendering while waiting on a
    /// [`FrameBarrier`](crate::FrameBarrier).
    pub fn request_render(&mut self) {
        self.events.request_render();
    }

    /// Number of frames drawn since the runtime started.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Records that a frame has been drawn and notifies the app.
    ///
    /// [`Self::run`] calls this after every draw. It is public so that apps
    /// can be driven against a test backend.
    pub fn finish_frame<A>(&mut self, app: &mut A)
    where
        A: App,
    {
        self.frame_count += 1;
        app.after_render(self);
    }

    /// Runs the application until [`App::should_exit`] returns true.
    ///
    /// - Input events go to [`App::handle_event`]
    /// - Render events call [`App::draw`], then [`App::after_render`]
    ///
    /// Mouse capture is enabled for the duration of the run.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            execute!(io::stdout(), EnableMouseCapture)?;
            let result = self.drive(terminal, app);
            execute!(io::stdout(), DisableMouseCapture)?;
            result
        })
    }

    fn drive<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                    self.finish_frame(app);
                }
                TuiEvent::Crossterm(event) => {
                    app.handle_event(self, event);
                }
            }
        }
        Ok(())
    }
}
