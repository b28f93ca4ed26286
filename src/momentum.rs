//! Momentum stepping after a drag is released.

use crate::config::MomentumConfig;
use crate::geometry::Vec2;
use crate::viewport::ViewportState;

impl ViewportState {
    /// True when no drag is active and either velocity component exceeds the
    /// threshold. A pinch does not hold momentum back.
    pub fn is_coasting(&self, config: &MomentumConfig) -> bool {
        !self.dragging
            && (self.velocity.x.abs() > config.threshold
                || self.velocity.y.abs() > config.threshold)
    }

    /// Advances one animation tick.
    ///
    /// Moves the surface by `velocity * frame_millis`, then applies friction.
    /// Once both components are at or below the threshold the velocity is
    /// zeroed and further ticks do nothing until a new drag.
    pub fn step_momentum(&mut self, config: &MomentumConfig) -> bool {
        if !self.is_coasting(config) {
            if !self.dragging && self.velocity != Vec2::ZERO {
                self.velocity = Vec2::ZERO;
            }
            return false;
        }

        self.offset += self.velocity * config.frame_millis;
        self.velocity *= config.friction;
        true
    }
}
