use cozy_corner::{
    GesturePhase, ManualClock, Rect, Vec2, ViewportConfig, ViewportEngine, ViewportState,
};
use proptest::prelude::*;

fn origin_config() -> ViewportConfig {
    ViewportConfig {
        home_offset: Vec2::ZERO,
        ..ViewportConfig::default()
    }
}

fn engine() -> ViewportEngine<ManualClock> {
    ViewportEngine::with_clock(ViewportConfig::default(), ManualClock::new(0.0))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn factor() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0..10.0f64,
        1e-12..1e-6f64,
        1e6..1e12f64,
        Just(0.0),
        Just(f64::INFINITY),
    ]
}

proptest! {
    #[test]
    fn zoom_keeps_anchor_on_the_same_surface_point(
        ax in -2000.0..2000.0f64,
        ay in -2000.0..2000.0f64,
        pre in 0.2..4.0f64,
        f in 0.05..20.0f64,
    ) {
        let mut state = ViewportState::new(&ViewportConfig::default());
        state.scale_by(pre);
        let anchor = Vec2::new(ax, ay);
        let before_scale = state.scale();
        let before = state.screen_to_surface(anchor);

        let changed = state.apply_zoom(anchor, f);
        prop_assert_eq!(changed, state.scale() != before_scale);

        let after = state.screen_to_surface(anchor);
        prop_assert!(close(before.x, after.x), "x drifted: {} -> {}", before.x, after.x);
        prop_assert!(close(before.y, after.y), "y drifted: {} -> {}", before.y, after.y);
    }

    #[test]
    fn scale_stays_within_bounds(factors in prop::collection::vec(factor(), 1..40)) {
        let mut state = ViewportState::new(&origin_config());
        for f in factors {
            state.apply_zoom(Vec2::new(123.0, 45.0), f);
            prop_assert!(state.scale() >= state.min_scale());
            prop_assert!(state.scale() <= state.max_scale());
            prop_assert!(state.offset().is_finite());
        }
    }

    #[test]
    fn reset_always_returns_home(
        steps in prop::collection::vec((-500i32..500, -500i32..500, factor()), 0..20),
    ) {
        let mut engine = engine();
        for (dx, dy, f) in steps {
            engine.on_pointer_down(Vec2::ZERO, true);
            engine.clock().advance(8.0);
            engine.on_pointer_move(Vec2::new(f64::from(dx), f64::from(dy)));
            engine.on_pointer_up();
            engine.on_zoom_gesture(f, Vec2::new(300.0, 200.0));
            engine.tick();
        }

        engine.reset_zoom();
        let transform = engine.transform();
        prop_assert_eq!(transform.scale, 1.0);
        prop_assert_eq!(transform.offset, Vec2::new(-9000.0, -9000.0));
    }

    #[test]
    fn momentum_decays_monotonically_and_terminates(
        vx in 0.2..50.0f64,
        vy in 0.0..50.0f64,
        flip_x in any::<bool>(),
        flip_y in any::<bool>(),
    ) {
        let (vx, vy) = (if flip_x { -vx } else { vx }, if flip_y { -vy } else { vy });
        let mut engine = engine();
        // A 16 ms sample leaves velocity = delta / 16.
        engine.on_pointer_down(Vec2::ZERO, true);
        engine.clock().advance(16.0);
        engine.on_pointer_move(Vec2::new(vx * 16.0, vy * 16.0));
        engine.on_pointer_up();

        let speed = vx.abs().max(vy.abs());
        let bound = ((0.1 / speed).ln() / 0.95f64.ln()).ceil() as usize + 1;

        let mut ticks = 0;
        let mut last = engine.state().velocity();
        while engine.tick() {
            ticks += 1;
            let v = engine.state().velocity();
            prop_assert!(v.x.abs() <= last.x.abs());
            prop_assert!(v.y.abs() <= last.y.abs());
            last = v;
            prop_assert!(ticks <= bound, "still coasting after {} ticks", ticks);
        }
        prop_assert!(ticks >= 1);
        prop_assert!(!engine.is_animating());
    }

    #[test]
    fn drag_moves_offset_by_exact_delta(
        start in (-1000i32..1000, -1000i32..1000),
        moves in prop::collection::vec((-400i32..400, -400i32..400, 0u8..40), 1..30),
    ) {
        let mut engine = engine();
        engine.set_viewport_rect(Rect::from_min_size(
            Vec2::new(30.0, 60.0),
            Vec2::new(1024.0, 768.0),
        ));
        let before = engine.state().offset();
        let first = Vec2::new(f64::from(start.0), f64::from(start.1));
        prop_assert!(engine.on_pointer_down(first, true));

        let mut last = first;
        for (x, y, dt) in moves {
            engine.clock().advance(f64::from(dt));
            last = Vec2::new(f64::from(x), f64::from(y));
            engine.on_pointer_move(last);
        }
        engine.on_pointer_up();

        let moved = engine.state().offset() - before;
        prop_assert_eq!(moved, last - first);
        prop_assert_eq!(engine.phase(), GesturePhase::Idle);
    }
}

#[test]
fn wheel_zoom_out_example() {
    let mut engine = ViewportEngine::with_clock(origin_config(), ManualClock::new(0.0));
    assert!(engine.on_wheel(1.0, Vec2::new(100.0, 100.0), false));
    let transform = engine.transform();
    assert_eq!(transform.scale, 0.95);
    assert!(close(transform.offset.x, 5.0));
    assert!(close(transform.offset.y, 5.0));
}

#[test]
fn unit_fling_stops_on_tick_45() {
    let mut engine = ViewportEngine::with_clock(origin_config(), ManualClock::new(0.0));
    engine.on_pointer_down(Vec2::ZERO, true);
    engine.clock().advance(16.0);
    engine.on_pointer_move(Vec2::new(16.0, 0.0));
    engine.on_pointer_up();
    assert_eq!(engine.state().velocity(), Vec2::new(1.0, 0.0));

    let start = engine.state().offset();
    assert!(engine.tick());
    assert_eq!(engine.state().offset() - start, Vec2::new(16.0, 0.0));
    assert_eq!(engine.state().velocity().x, 0.95);

    let mut ticks = 1;
    while engine.tick() {
        ticks += 1;
    }
    assert_eq!(ticks, 45);
}

#[test]
fn css_output_follows_the_state() {
    let mut engine = engine();
    assert_eq!(
        engine.take_transform_update().map(|t| t.to_css()).as_deref(),
        Some("translate(-9000px, -9000px) scale(1)")
    );
    engine.zoom_in();
    assert_eq!(
        engine.take_transform_update().map(|t| t.scale),
        Some(1.2)
    );
    assert!(engine.take_transform_update().is_none());
}
