//! Drag and pinch transitions on [`ViewportState`].
//!
//! A viewport is in exactly one gesture phase at a time. A single contact
//! drags, two contacts pinch, and a second contact arriving mid-drag ends the
//! drag and starts a pinch.

use crate::geometry::Vec2;
use crate::viewport::{Pinch, ViewportState};

/// Which gesture, if any, currently owns the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Drag,
    Pinch,
}

impl ViewportState {
    pub fn phase(&self) -> GesturePhase {
        if self.dragging {
            GesturePhase::Drag
        } else if self.pinch.is_some() {
            GesturePhase::Pinch
        } else {
            GesturePhase::Idle
        }
    }

    /// Starts a drag at `position`, cancelling any momentum in flight.
    pub fn begin_drag(&mut self, position: Vec2, now: f64) {
        self.pinch = None;
        self.dragging = true;
        self.drag_anchor = position;
        self.last_sample_time = now;
        self.velocity = Vec2::ZERO;
    }

    /// Moves the surface by the pointer delta since the last sample.
    ///
    /// Velocity is only resampled when time has advanced, so repeated events
    /// with the same timestamp never divide by zero.
    pub fn drag_to(&mut self, position: Vec2, now: f64) -> bool {
        if !self.dragging {
            return false;
        }

        let delta = position - self.drag_anchor;
        self.offset += delta;

        let elapsed = now - self.last_sample_time;
        if elapsed > 0.0 {
            self.velocity = delta / elapsed.max(1.0);
        }

        self.drag_anchor = position;
        self.last_sample_time = now;
        delta != Vec2::ZERO
    }

    /// Releases the drag. The last sampled velocity is kept for momentum.
    pub fn end_drag(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }

    /// Starts a two-finger pinch. An active drag ends as if released, keeping
    /// its last sampled velocity.
    pub fn begin_pinch(&mut self, first: Vec2, second: Vec2) {
        self.dragging = false;
        self.pinch = Some(Pinch {
            distance: first.distance(second),
            center: first.midpoint(second),
        });
    }

    /// Zooms by the ratio of the new finger distance to the previous one,
    /// anchored at the midpoint of the two contacts.
    pub fn pinch_to(&mut self, first: Vec2, second: Vec2) -> bool {
        let Some(previous) = self.pinch else {
            return false;
        };

        let distance = first.distance(second);
        let center = first.midpoint(second);
        self.pinch = Some(Pinch { distance, center });

        if !(previous.distance > 0.0 && previous.distance.is_finite()) {
            return false;
        }
        self.apply_zoom(center, distance / previous.distance)
    }

    /// Ends a pinch. Velocity from the drag it replaced is left for momentum.
    pub fn end_pinch(&mut self) -> bool {
        self.pinch.take().is_some()
    }
}
