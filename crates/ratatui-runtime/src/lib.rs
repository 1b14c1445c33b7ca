//! Minimal terminal runtime: an input/render loop that counts frames.
//!
//! Applications implement [`App`] (or stack [`Screen`]s in a [`ScreenStack`])
//! and are driven by [`Runtime::run`]. Drawing happens only when something
//! requested it, and every completed frame is reported back through
//! [`App::after_render`]. A [`FrameBarrier`] turns that into a "show this
//! first, then continue" ordering without timers.

pub use self::{
    app::App,
    frame_barrier::FrameBarrier,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod frame_barrier;
mod runtime;
mod screen;
