//! Host-facing viewport API.
//!
//! [`ViewportEngine`] owns the [`ViewportState`] together with the clock, the
//! viewport geometry and the transform publisher. Hosts forward raw input to
//! the `on_*` methods, call [`ViewportEngine::tick`] once per display refresh,
//! and read the surface transform back for rendering.
//!
//! Every method runs to completion on the caller's thread. Hosts with more
//! than one UI thread must confine the engine to one of them.

use crate::clock::{SystemClock, TimeSource};
use crate::config::ViewportConfig;
use crate::geometry::{Rect, Vec2};
use crate::gesture::GesturePhase;
use crate::transform::{Layer, Transform, TransformPublisher};
use crate::viewport::ViewportState;

pub struct ViewportEngine<C = SystemClock> {
    state: ViewportState,
    config: ViewportConfig,
    clock: C,
    viewport_rect: Rect,
    publisher: TransformPublisher,
}

impl ViewportEngine<SystemClock> {
    pub fn new(config: ViewportConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: TimeSource> ViewportEngine<C> {
    pub fn with_clock(config: ViewportConfig, clock: C) -> Self {
        Self {
            state: ViewportState::new(&config),
            config,
            clock,
            viewport_rect: Rect::ZERO,
            publisher: TransformPublisher::new(),
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Viewport rectangle in absolute (window) coordinates.
    pub fn viewport_rect(&self) -> Rect {
        self.viewport_rect
    }

    /// Updates the viewport rectangle used to localize pointer positions.
    pub fn set_viewport_rect(&mut self, rect: Rect) {
        self.viewport_rect = rect;
    }

    pub fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    fn local(&self, position: Vec2) -> Vec2 {
        self.viewport_rect.to_local(position)
    }

    // ------------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------------

    /// Starts a drag when the press landed on bare surface.
    ///
    /// Presses on HUD chrome or surface content that handles its own input
    /// (`target_is_surface == false`) leave the viewport untouched.
    pub fn on_pointer_down(&mut self, position: Vec2, target_is_surface: bool) -> bool {
        if !target_is_surface || self.state.phase() == GesturePhase::Pinch {
            return false;
        }
        let now = self.clock.now_millis();
        let local = self.local(position);
        self.state.begin_drag(local, now);
        log::debug!("drag started at {position:?}");
        true
    }

    /// Continues an active drag. Moves are honored wherever they are
    /// delivered, so a drag keeps tracking past the viewport edges.
    pub fn on_pointer_move(&mut self, position: Vec2) -> bool {
        let now = self.clock.now_millis();
        let local = self.local(position);
        self.state.drag_to(local, now)
    }

    pub fn on_pointer_up(&mut self) -> bool {
        let ended = self.state.end_drag();
        if ended {
            log::debug!("drag released with velocity {:?}", self.state.velocity());
        }
        ended
    }

    // ------------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------------

    /// Handles a new contact. `points` lists every contact currently down.
    ///
    /// One contact starts a drag, two start a pinch (ending any drag). A new
    /// gesture only starts when the contact landed on bare surface; a second
    /// finger joining a gesture already in progress is always accepted.
    pub fn on_touch_start(&mut self, points: &[Vec2], target_is_surface: bool) -> bool {
        let idle = self.state.phase() == GesturePhase::Idle;
        if idle && !target_is_surface {
            return false;
        }

        match points {
            [single] if idle => {
                let now = self.clock.now_millis();
                let local = self.local(*single);
                self.state.begin_drag(local, now);
                log::debug!("touch drag started at {single:?}");
                true
            }
            [first, second, ..] if self.state.phase() != GesturePhase::Pinch => {
                let (local_first, local_second) = (self.local(*first), self.local(*second));
                self.state.begin_pinch(local_first, local_second);
                log::debug!("pinch started between {first:?} and {second:?}");
                true
            }
            _ => false,
        }
    }

    pub fn on_touch_move(&mut self, points: &[Vec2]) -> bool {
        match (self.state.phase(), points) {
            (GesturePhase::Drag, [single]) => {
                let now = self.clock.now_millis();
                let local = self.local(*single);
                self.state.drag_to(local, now)
            }
            (GesturePhase::Pinch, [first, second, ..]) => {
                let (first, second) = (self.local(*first), self.local(*second));
                self.state.pinch_to(first, second)
            }
            _ => false,
        }
    }

    /// Handles a lifted contact. `remaining` lists the contacts still down.
    ///
    /// A drag ends when its finger lifts; a pinch ends once fewer than two
    /// contacts remain, and the viewport goes idle until the next start.
    pub fn on_touch_end(&mut self, remaining: &[Vec2]) -> bool {
        match self.state.phase() {
            GesturePhase::Drag if remaining.is_empty() => self.on_pointer_up(),
            GesturePhase::Pinch if remaining.len() < 2 => {
                log::debug!("pinch ended");
                self.state.end_pinch()
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------------

    /// Zooms one wheel notch about the pointer.
    ///
    /// Positive `delta_y` scrolls away from the user and zooms out. The
    /// modifier state is accepted so hosts can forward raw wheel events
    /// unchanged; trackpad pinch reported as ctrl+wheel zooms the same way.
    pub fn on_wheel(&mut self, delta_y: f64, position: Vec2, ctrl_held: bool) -> bool {
        let factor = if delta_y > 0.0 {
            self.config.zoom.wheel_out
        } else if delta_y < 0.0 {
            self.config.zoom.wheel_in
        } else {
            return false;
        };
        let anchor = self.local(position);
        let changed = self.state.apply_zoom(anchor, factor);
        if changed {
            log::trace!(
                "wheel zoom to {:.3} (ctrl: {ctrl_held})",
                self.state.scale()
            );
        }
        changed
    }

    /// Zooms by an explicit ratio about `position`, as delivered by
    /// platform pinch gestures.
    pub fn on_zoom_gesture(&mut self, factor: f64, position: Vec2) -> bool {
        let anchor = self.local(position);
        self.state.apply_zoom(anchor, factor)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.toolbar_zoom(self.config.zoom.button_in)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.toolbar_zoom(self.config.zoom.button_out)
    }

    /// Returns to unit scale at the home offset.
    pub fn reset_zoom(&mut self) -> bool {
        log::debug!("viewport reset");
        self.state.reset()
    }

    /// Toolbar zoom anchors on the viewport centre when the viewport size is
    /// known, otherwise it scales without moving the offset.
    fn toolbar_zoom(&mut self, factor: f64) -> bool {
        if self.viewport_rect.is_empty() {
            self.state.scale_by(factor)
        } else {
            let center = self.viewport_rect.size * 0.5;
            self.state.apply_zoom(center, factor)
        }
    }

    /// Scale as a rounded percentage for the zoom readout.
    pub fn zoom_percent(&self) -> u32 {
        (self.state.scale() * 100.0).round() as u32
    }

    // ------------------------------------------------------------------------
    // Animation and output
    // ------------------------------------------------------------------------

    /// Runs one momentum step. Returns whether the surface moved.
    pub fn tick(&mut self) -> bool {
        self.state.step_momentum(&self.config.momentum)
    }

    /// Whether another tick would move the surface.
    pub fn is_animating(&self) -> bool {
        self.state.is_coasting(&self.config.momentum)
    }

    pub fn transform(&self) -> Transform {
        self.state.transform()
    }

    /// Transform for `layer`; HUD layers always receive identity.
    pub fn transform_for(&self, layer: Layer) -> Transform {
        TransformPublisher::for_layer(layer, self.state.transform())
    }

    /// Returns the surface transform if it changed since the last call.
    pub fn take_transform_update(&mut self) -> Option<Transform> {
        let update = self.publisher.publish(self.state.transform());
        if let Some(transform) = update {
            log::trace!("surface transform: {transform}");
        }
        update
    }

    /// Maps an absolute position to surface coordinates.
    pub fn surface_point_at(&self, position: Vec2) -> Vec2 {
        self.state.screen_to_surface(self.local(position))
    }

    /// Maps a surface point to an absolute position.
    pub fn screen_point_of(&self, surface: Vec2) -> Vec2 {
        self.viewport_rect.min + self.state.surface_to_screen(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn engine() -> ViewportEngine<ManualClock> {
        let config = ViewportConfig {
            home_offset: Vec2::ZERO,
            ..ViewportConfig::default()
        };
        ViewportEngine::with_clock(config, ManualClock::new(0.0))
    }

    #[test]
    fn pointer_drag_round_trip() {
        let mut engine = engine();
        assert!(engine.on_pointer_down(Vec2::new(100.0, 100.0), true));
        engine.clock().advance(16.0);
        assert!(engine.on_pointer_move(Vec2::new(116.0, 100.0)));
        assert!(engine.on_pointer_up());

        assert_eq!(engine.state().offset(), Vec2::new(16.0, 0.0));
        assert_eq!(engine.state().velocity(), Vec2::new(1.0, 0.0));
        assert!(engine.is_animating());
    }

    #[test]
    fn hud_press_does_not_start_a_drag() {
        let mut engine = engine();
        assert!(!engine.on_pointer_down(Vec2::new(10.0, 10.0), false));
        engine.clock().advance(16.0);
        assert!(!engine.on_pointer_move(Vec2::new(60.0, 60.0)));
        assert!(!engine.on_pointer_up());
        assert_eq!(engine.state().offset(), Vec2::ZERO);
    }

    #[test]
    fn drag_keeps_tracking_outside_viewport() {
        let mut engine = engine();
        engine.set_viewport_rect(Rect::from_min_size(
            Vec2::new(0.0, 0.0),
            Vec2::new(200.0, 200.0),
        ));
        engine.on_pointer_down(Vec2::new(150.0, 150.0), true);
        engine.clock().advance(10.0);
        assert!(engine.on_pointer_move(Vec2::new(450.0, -50.0)));
        assert_eq!(engine.state().offset(), Vec2::new(300.0, -200.0));
    }

    #[test]
    fn wheel_example_from_origin() {
        let mut engine = engine();
        assert!(engine.on_wheel(120.0, Vec2::new(100.0, 100.0), false));
        assert_eq!(engine.state().scale(), 0.95);
        let offset = engine.state().offset();
        assert!((offset.x - 5.0).abs() < 1e-9 && (offset.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn wheel_anchor_is_viewport_local() {
        let mut engine = engine();
        engine.set_viewport_rect(Rect::from_min_size(
            Vec2::new(200.0, 50.0),
            Vec2::new(800.0, 600.0),
        ));
        let anchor = Vec2::new(300.0, 150.0);
        let before = engine.surface_point_at(anchor);
        assert!(engine.on_wheel(-1.0, anchor, true));
        assert_eq!(engine.state().scale(), 1.05);
        let after = engine.surface_point_at(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn horizontal_only_wheel_does_nothing() {
        let mut engine = engine();
        assert!(!engine.on_wheel(0.0, Vec2::new(10.0, 10.0), false));
        assert_eq!(engine.state().scale(), 1.0);
    }

    #[test]
    fn toolbar_zoom_without_geometry_is_anchor_free() {
        let mut engine = engine();
        assert!(engine.zoom_in());
        assert_eq!(engine.state().scale(), 1.2);
        assert_eq!(engine.state().offset(), Vec2::ZERO);
        assert_eq!(engine.zoom_percent(), 120);
    }

    #[test]
    fn toolbar_zoom_anchors_on_viewport_center() {
        let mut engine = engine();
        engine.set_viewport_rect(Rect::from_min_size(
            Vec2::new(0.0, 0.0),
            Vec2::new(400.0, 200.0),
        ));
        assert!(engine.zoom_out());
        assert_eq!(engine.state().scale(), 0.8);
        // offset' = c - c * 0.8 with c = (200, 100)
        let offset = engine.state().offset();
        assert!((offset.x - 40.0).abs() < 1e-9 && (offset.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn touch_drag_then_second_finger_pinches() {
        let mut engine = engine();
        let a = Vec2::new(100.0, 100.0);
        assert!(engine.on_touch_start(&[a], true));
        engine.clock().advance(10.0);
        assert!(engine.on_touch_move(&[Vec2::new(110.0, 100.0)]));
        assert_eq!(engine.phase(), GesturePhase::Drag);

        let b = Vec2::new(210.0, 100.0);
        assert!(engine.on_touch_start(&[Vec2::new(110.0, 100.0), b], false));
        assert_eq!(engine.phase(), GesturePhase::Pinch);

        assert!(engine.on_touch_move(&[Vec2::new(60.0, 100.0), Vec2::new(260.0, 100.0)]));
        assert_eq!(engine.state().scale(), 2.0);

        assert!(engine.on_touch_end(&[Vec2::new(60.0, 100.0)]));
        assert_eq!(engine.phase(), GesturePhase::Idle);
        // The drag's 1 px/ms survives the pinch.
        assert!(engine.is_animating());
    }

    #[test]
    fn second_finger_hands_drag_velocity_to_momentum() {
        let mut engine = engine();
        engine.on_touch_start(&[Vec2::ZERO], true);
        engine.clock().advance(16.0);
        engine.on_touch_move(&[Vec2::new(32.0, 0.0)]);

        let pair = [Vec2::new(32.0, 0.0), Vec2::new(132.0, 0.0)];
        assert!(engine.on_touch_start(&pair, true));
        assert_eq!(engine.state().velocity(), Vec2::new(2.0, 0.0));

        let offset = engine.state().offset();
        assert!(engine.tick());
        assert_eq!(engine.state().offset(), offset + Vec2::new(32.0, 0.0));

        assert!(engine.on_touch_end(&[]));
        assert!(engine.tick());
        let coasted = engine.state().offset() - offset;
        assert!((coasted.x - (32.0 + 30.4)).abs() < 1e-9 && coasted.y == 0.0);
    }

    #[test]
    fn touch_on_hud_is_ignored() {
        let mut engine = engine();
        assert!(!engine.on_touch_start(&[Vec2::new(5.0, 5.0)], false));
        assert_eq!(engine.phase(), GesturePhase::Idle);
        assert!(!engine.on_touch_move(&[Vec2::new(50.0, 5.0)]));
    }

    #[test]
    fn touch_end_of_drag_hands_over_to_momentum() {
        let mut engine = engine();
        engine.on_touch_start(&[Vec2::ZERO], true);
        engine.clock().advance(16.0);
        engine.on_touch_move(&[Vec2::new(32.0, 0.0)]);
        assert!(engine.on_touch_end(&[]));
        assert!(engine.tick());
        assert_eq!(engine.state().offset(), Vec2::new(64.0, 0.0));
    }

    #[test]
    fn transform_updates_are_deduplicated() {
        let mut engine = engine();
        assert!(engine.take_transform_update().is_some());
        assert!(engine.take_transform_update().is_none());
        engine.zoom_in();
        assert_eq!(
            engine.take_transform_update().map(|t| t.scale),
            Some(1.2)
        );
        assert_eq!(engine.transform_for(Layer::Hud), Transform::IDENTITY);
    }

    #[test]
    fn reset_from_anywhere() {
        let mut engine =
            ViewportEngine::with_clock(ViewportConfig::default(), ManualClock::new(0.0));
        engine.on_wheel(-1.0, Vec2::new(40.0, 90.0), false);
        engine.on_pointer_down(Vec2::ZERO, true);
        engine.clock().advance(5.0);
        engine.on_pointer_move(Vec2::new(400.0, 20.0));
        engine.on_pointer_up();

        assert!(engine.reset_zoom());
        let transform = engine.transform();
        assert_eq!(transform.scale, 1.0);
        assert_eq!(transform.offset, Vec2::new(-9000.0, -9000.0));
        assert!(!engine.tick());
    }

    #[test]
    fn screen_and_surface_points_round_trip() {
        let mut engine = engine();
        engine.set_viewport_rect(Rect::from_min_size(
            Vec2::new(20.0, 30.0),
            Vec2::new(640.0, 480.0),
        ));
        engine.zoom_in();
        let surface = Vec2::new(120.0, 80.0);
        let screen = engine.screen_point_of(surface);
        let back = engine.surface_point_at(screen);
        assert!((back.x - surface.x).abs() < 1e-9 && (back.y - surface.y).abs() < 1e-9);
    }
}
