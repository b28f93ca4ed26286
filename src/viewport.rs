//! Viewport state and the focal-point zoom arithmetic.

use crate::config::ViewportConfig;
use crate::geometry::Vec2;
use crate::transform::Transform;

/// Two-finger gesture snapshot from the previous touch sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pinch {
    /// Distance between the two contacts.
    pub distance: f64,
    /// Midpoint of the two contacts, in viewport coordinates.
    pub center: Vec2,
}

/// Translation and uniform scale of the virtual surface, plus the transient
/// gesture bookkeeping that drives it.
///
/// All positions are viewport-local pixels. `scale` is kept inside
/// `[min_scale, max_scale]` by every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub(crate) offset: Vec2,
    pub(crate) scale: f64,
    min_scale: f64,
    max_scale: f64,
    home_offset: Vec2,
    pub(crate) dragging: bool,
    pub(crate) drag_anchor: Vec2,
    pub(crate) last_sample_time: f64,
    pub(crate) velocity: Vec2,
    pub(crate) pinch: Option<Pinch>,
}

impl ViewportState {
    /// Creates a viewport at the home position and unit scale.
    ///
    /// The config is assumed to be validated; see [`ViewportConfig::validate`].
    pub fn new(config: &ViewportConfig) -> Self {
        let mut state = Self {
            offset: config.home_offset,
            scale: 1.0,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            home_offset: config.home_offset,
            dragging: false,
            drag_anchor: Vec2::ZERO,
            last_sample_time: 0.0,
            velocity: Vec2::ZERO,
            pinch: None,
        };
        state.scale = state.clamp_scale(1.0);
        state
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn home_offset(&self) -> Vec2 {
        self.home_offset
    }

    /// Current pan velocity in px/ms.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pinch(&self) -> Option<Pinch> {
        self.pinch
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.offset, self.scale)
    }

    /// Clamps `scale` into the configured bounds.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Multiplies the scale by `factor` while keeping `anchor` visually fixed.
    ///
    /// Returns `false` and leaves the state untouched when the clamped scale
    /// equals the current one (or `factor` is NaN).
    pub fn apply_zoom(&mut self, anchor: Vec2, factor: f64) -> bool {
        let Some(previous) = self.set_scale_clamped(self.scale * factor) else {
            return false;
        };
        let ratio = self.scale / previous;
        self.offset = anchor - (anchor - self.offset) * ratio;
        true
    }

    /// Multiplies the scale by `factor` without touching the offset.
    ///
    /// Used when a zoom has no pointer or viewport context to anchor on.
    pub fn scale_by(&mut self, factor: f64) -> bool {
        self.set_scale_clamped(self.scale * factor).is_some()
    }

    /// Restores unit scale at the home offset and stops any coasting.
    pub fn reset(&mut self) -> bool {
        let target_scale = self.clamp_scale(1.0);
        let changed = self.scale != target_scale
            || self.offset != self.home_offset
            || self.velocity != Vec2::ZERO;
        self.scale = target_scale;
        self.offset = self.home_offset;
        self.velocity = Vec2::ZERO;
        changed
    }

    /// Translates the surface by `delta` viewport pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Maps a viewport point to surface coordinates.
    pub fn screen_to_surface(&self, point: Vec2) -> Vec2 {
        self.transform().invert(point)
    }

    /// Maps a surface point to viewport coordinates.
    pub fn surface_to_screen(&self, point: Vec2) -> Vec2 {
        self.transform().apply(point)
    }

    /// Sets the clamped scale, returning the previous scale if it changed.
    fn set_scale_clamped(&mut self, target: f64) -> Option<f64> {
        if target.is_nan() {
            return None;
        }
        let clamped = self.clamp_scale(target);
        if clamped == self.scale {
            return None;
        }
        let previous = self.scale;
        self.scale = clamped;
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_config() -> ViewportConfig {
        ViewportConfig {
            home_offset: Vec2::ZERO,
            ..ViewportConfig::default()
        }
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn starts_at_home_with_unit_scale() {
        let state = ViewportState::new(&ViewportConfig::default());
        assert_eq!(state.offset(), Vec2::new(-9000.0, -9000.0));
        assert_eq!(state.scale(), 1.0);
        assert!(!state.is_dragging());
        assert!(state.pinch().is_none());
    }

    #[test]
    fn zoom_out_toward_pointer() {
        let mut state = ViewportState::new(&origin_config());
        assert!(state.apply_zoom(Vec2::new(100.0, 100.0), 0.95));
        assert_eq!(state.scale(), 0.95);
        assert_close(state.offset(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn anchor_stays_fixed_in_surface_space() {
        let mut state = ViewportState::new(&ViewportConfig::default());
        let anchor = Vec2::new(320.0, 240.0);
        let before = state.screen_to_surface(anchor);
        state.apply_zoom(anchor, 1.2);
        state.apply_zoom(anchor, 1.2);
        let after = state.screen_to_surface(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn clamped_zoom_is_a_no_op() {
        let mut state = ViewportState::new(&origin_config());
        assert!(state.apply_zoom(Vec2::new(10.0, 10.0), 1e9));
        assert_eq!(state.scale(), 5.0);
        let snapshot = state.clone();

        assert!(!state.apply_zoom(Vec2::new(50.0, 50.0), 2.0));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn zero_factor_clamps_to_min() {
        let mut state = ViewportState::new(&origin_config());
        assert!(state.apply_zoom(Vec2::ZERO, 0.0));
        assert_eq!(state.scale(), 0.1);
    }

    #[test]
    fn nan_factor_is_ignored() {
        let mut state = ViewportState::new(&origin_config());
        assert!(!state.apply_zoom(Vec2::ZERO, f64::NAN));
        assert!(!state.scale_by(f64::NAN));
        assert_eq!(state.scale(), 1.0);
    }

    #[test]
    fn scale_by_leaves_offset_alone() {
        let mut state = ViewportState::new(&ViewportConfig::default());
        assert!(state.scale_by(1.2));
        assert_eq!(state.scale(), 1.2);
        assert_eq!(state.offset(), Vec2::new(-9000.0, -9000.0));
    }

    #[test]
    fn reset_returns_home_and_stops_motion() {
        let mut state = ViewportState::new(&ViewportConfig::default());
        state.apply_zoom(Vec2::new(400.0, 300.0), 3.0);
        state.pan_by(Vec2::new(123.0, -45.0));
        state.velocity = Vec2::new(2.0, 0.5);

        assert!(state.reset());
        assert_eq!(state.scale(), 1.0);
        assert_eq!(state.offset(), state.home_offset());
        assert_eq!(state.velocity(), Vec2::ZERO);
        assert!(!state.reset());
    }

    #[test]
    fn reset_respects_bounds_above_one() {
        let config = ViewportConfig {
            min_scale: 2.0,
            max_scale: 4.0,
            ..ViewportConfig::default()
        };
        let mut state = ViewportState::new(&config);
        assert_eq!(state.scale(), 2.0);
        state.reset();
        assert_eq!(state.scale(), 2.0);
    }

    #[test]
    fn surface_round_trip() {
        let mut state = ViewportState::new(&ViewportConfig::default());
        state.apply_zoom(Vec2::new(10.0, 20.0), 2.5);
        let surface = Vec2::new(9100.0, 9100.0);
        assert_close(state.screen_to_surface(state.surface_to_screen(surface)), surface);
    }
}
