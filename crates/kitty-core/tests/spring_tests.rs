// Host-side tests for the damped-spring eye tracker.

use glam::Vec2;
use kitty_core::constants::*;
use kitty_core::spring::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::ControlFlow;

const EPS: f32 = 1e-5;

fn unclamped(strength: f32, damping: f32) -> SpringParams {
    SpringParams {
        strength,
        damping,
        max_velocity: 1e6,
        max_distance: 1e6,
    }
}

#[test]
fn default_params_are_stable() {
    let p = SpringParams::default();
    assert!(p.is_stable());
    assert!(p.damping < 1.0);
}

#[test]
fn stability_check_rejects_divergent_params() {
    assert!(!unclamped(0.2, 1.0).is_stable());
    assert!(!unclamped(0.0, 0.8).is_stable());
    assert!(!unclamped(12.0, 0.9).is_stable());
}

#[test]
fn stable_params_decay_and_unstable_params_grow() {
    let target = Vec2::new(0.5, -0.25);

    let mut stable = PointerTracker::new(unclamped(SPRING_STRENGTH, SPRING_DAMPING));
    stable.set_target(target);
    for _ in 0..200 {
        stable.step();
    }
    assert!((stable.position() - target).length() < 1e-4);

    let mut wild = PointerTracker::new(unclamped(12.0, 0.9));
    wild.set_target(target);
    for _ in 0..10 {
        wild.step();
    }
    assert!((wild.position() - target).length() > 1.0);
}

#[test]
fn converges_to_target_inside_range() {
    let target = Vec2::new(0.1, -0.05);
    let mut t = PointerTracker::default();
    t.set_target(target);
    for _ in 0..1000 {
        t.step();
        assert!(t.position().length() <= MAX_DISTANCE + EPS);
    }
    assert!((t.position() - target).length() < 1e-4);
}

#[test]
fn converges_to_clamped_target_outside_range() {
    for target in [Vec2::new(1.0, 1.0), Vec2::new(-3.0, 0.5), Vec2::new(0.0, -0.9)] {
        let mut t = PointerTracker::default();
        t.set_target(target);
        for _ in 0..1000 {
            t.step();
            assert!(t.position().length() <= MAX_DISTANCE + EPS);
        }
        let expected = target.clamp_length_max(MAX_DISTANCE);
        assert!(
            (t.position() - expected).length() < 1e-3,
            "{target:?} -> {:?}",
            t.position()
        );
    }
}

#[test]
fn velocity_and_position_stay_bounded_for_any_input() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut t = PointerTracker::default();
    for _ in 0..5000 {
        if rng.gen_bool(0.3) {
            t.set_target(Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)));
        }
        t.step();
        assert!(t.velocity().length() <= MAX_VELOCITY + EPS);
        assert!(t.position().length() <= MAX_DISTANCE + EPS);
    }
}

#[test]
fn aim_scales_with_distance_up_to_reach() {
    let c = Vec2::new(100.0, 100.0);
    let full = aim(c, Vec2::new(400.0, 100.0), 300.0, MAX_DISTANCE).unwrap();
    assert!((full - Vec2::new(MAX_DISTANCE, 0.0)).length() < EPS);

    let half = aim(c, Vec2::new(100.0, 250.0), 300.0, MAX_DISTANCE).unwrap();
    assert!((half - Vec2::new(0.0, MAX_DISTANCE * 0.5)).length() < EPS);

    let far = aim(c, Vec2::new(5000.0, -4900.0), 300.0, MAX_DISTANCE).unwrap();
    assert!((far.length() - MAX_DISTANCE).abs() < EPS);
    assert!(far.x.abs() <= MAX_DISTANCE && far.y.abs() <= MAX_DISTANCE);

    assert_eq!(aim(c, c, 300.0, MAX_DISTANCE), None);
}

#[test]
fn idle_wander_drives_target_until_pointer_seen() {
    let idle = IdleParams::default();
    let start = idle.target_at(0.0);
    assert!((start - Vec2::new(IDLE_RADIUS, 0.0)).length() < EPS);

    let mut t = PointerTracker::default().with_idle(idle);
    assert_eq!(t.tick(1500.0), ControlFlow::Continue(()));
    assert!((t.target() - idle.target_at(1500.0)).length() < EPS);
    assert_eq!(t.last_timestamp(), Some(1500.0));

    t.set_target(Vec2::new(-0.1, 0.0));
    let _ = t.tick(3000.0);
    assert_eq!(t.target(), Vec2::new(-0.1, 0.0));
}

#[test]
fn tick_keeps_running_until_stopped() {
    let mut t = PointerTracker::default();
    t.set_target(Vec2::new(0.1, 0.1));
    for frame in 0..120 {
        assert_eq!(t.tick(frame as f64 * 16.7), ControlFlow::Continue(()));
    }
    t.stop();
    let frozen = t.position();
    assert_eq!(t.tick(5000.0), ControlFlow::Break(()));
    assert_eq!(t.position(), frozen);

    t.reset();
    assert!(!t.is_running());
    assert_eq!(t.position(), Vec2::ZERO);
}
