use crate::Runtime;

/// Released once a number of frames have been drawn after it was created.
///
/// Used to delay work until the user has actually seen a state change:
///
/// ```
/// use ratatui_runtime::{FrameBarrier, Runtime};
///
/// let runtime = Runtime::new();
/// let barrier = FrameBarrier::after_frames(&runtime, 2);
/// assert!(!barrier.is_released(&runtime));
/// assert_eq!(barrier.frames_remaining(&runtime), 2);
/// ```
///
/// The barrier does not request frames by itself; keep calling
/// [`Runtime::request_render`] until it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBarrier {
    release_at: u64,
}

impl FrameBarrier {
    #[must_use]
    pub fn after_frames(runtime: &Runtime, frames: u64) -> Self {
        Self {
            release_at: runtime.frame_count() + frames,
        }
    }

    #[must_use]
    pub fn is_released(self, runtime: &Runtime) -> bool {
        runtime.frame_count() >= self.release_at
    }

    #[must_use]
    pub fn frames_remaining(self, runtime: &Runtime) -> u64 {
        self.release_at.saturating_sub(runtime.frame_count())
    }
}
