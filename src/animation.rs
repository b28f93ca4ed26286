//! The per-refresh animation task.
//!
//! A [`FrameLoop`] is driven by the host's frame scheduler: the host calls
//! [`FrameLoop::run_frame`] once per display refresh and schedules another
//! frame while it reports [`FrameOutcome::Animating`]. Cancelling through a
//! [`CancelHandle`] stops all further stepping.

use crate::clock::TimeSource;
use crate::engine::ViewportEngine;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that stops a [`FrameLoop`].
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The surface moved; schedule another frame.
    Animating,
    /// Nothing to animate; wait for input.
    Idle,
    /// The loop was torn down.
    Cancelled,
}

#[derive(Debug, Default)]
pub struct FrameLoop {
    cancel: CancelHandle,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Number of frames that moved the surface.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn run_frame<C: TimeSource>(&mut self, engine: &mut ViewportEngine<C>) -> FrameOutcome {
        if self.cancel.is_cancelled() {
            return FrameOutcome::Cancelled;
        }
        if engine.tick() {
            self.frames += 1;
            if engine.is_animating() {
                return FrameOutcome::Animating;
            }
            log::debug!("momentum settled after {} frames", self.frames);
        }
        FrameOutcome::Idle
    }
}
