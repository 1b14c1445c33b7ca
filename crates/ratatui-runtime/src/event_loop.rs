use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// Default minimum time between two frames (60 frames per second).
pub(crate) const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Decides when to render and otherwise waits for terminal input.
///
/// A render happens only after it was requested (input arrived or
/// [`Self::request_render`] was called), and never sooner than
/// `frame_interval` after the previous one. Requests made while waiting are
/// merged into a single frame.
#[derive(Debug)]
pub(super) struct EventLoop {
    pub(super) frame_interval: Duration,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            last_render: now.checked_sub(DEFAULT_FRAME_INTERVAL).unwrap_or(now),
            dirty: true, // first frame
        }
    }

    pub(super) fn set_frame_interval(&mut self, interval: Duration) {
        self.frame_interval = interval;
    }

    pub(super) fn request_render(&mut self) {
        self.dirty = true;
    }

    /// Blocks until the next event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            let wait = self.time_until_render(now);
            if wait == Some(Duration::ZERO) {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            // Without a pending render, block on input.
            if let Some(timeout) = wait
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns how long until the pending render is due, or `None` if no
    /// render is pending.
    fn time_until_render(&self, now: Instant) -> Option<Duration> {
        if !self.dirty {
            return None;
        }
        let due_at = self.last_render + self.frame_interval;
        Some(due_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_due_immediately() {
        let events = EventLoop::new();
        assert_eq!(
            events.time_until_render(Instant::now()),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_no_render_without_request() {
        let mut events = EventLoop::new();
        events.dirty = false;
        assert_eq!(events.time_until_render(Instant::now()), None);

        events.request_render();
        assert!(events.time_until_render(Instant::now()).is_some());
    }

    #[test]
    fn test_render_waits_for_frame_interval() {
        let mut events = EventLoop::new();
        events.set_frame_interval(Duration::from_millis(100));
        let now = Instant::now();
        events.last_render = now;
        events.request_render();

        assert_eq!(
            events.time_until_render(now + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            events.time_until_render(now + Duration::from_millis(150)),
            Some(Duration::ZERO)
        );
    }
}
