// Host-side tests for lightning strikes and their triggers.

use monsoon_core::*;

fn at(progress: f32, velocity: f32) -> ScrollTelemetry {
    ScrollTelemetry {
        progress,
        velocity,
        direction: Direction::Down,
    }
}

#[test]
fn flash_rises_holds_and_returns_to_zero() {
    let mut l = Lightning::new(7);
    assert_eq!(l.opacity(0.0), 0.0);
    assert!(l.strike(10.0));
    assert!((l.opacity(10.05) - 0.4).abs() < 1e-3);
    assert!((l.opacity(10.15) - 0.8).abs() < 1e-6);
    assert!((l.opacity(10.3) - 0.4).abs() < 1e-3);
    assert_eq!(l.opacity(10.5), 0.0);
    assert!(!l.is_flashing(11.0));
}

#[test]
fn strikes_are_ignored_while_lit_or_cooling_down() {
    let mut l = Lightning::new(7);
    assert!(l.strike(0.0));
    assert!(!l.strike(0.2));
    assert!(!l.strike(0.45));
    assert!(l.strike(0.7));
}

#[test]
fn bolt_parameters_stay_in_range() {
    let mut l = Lightning::new(99);
    for i in 0..50 {
        assert!(l.strike(i as f64));
        let b = l.bolt();
        assert!(b.variant < 3);
        assert!((20.0..=80.0).contains(&b.left_pct));
        assert!((0.8..=1.3).contains(&b.scale));
    }
}

#[test]
fn same_seed_same_bolts() {
    let mut a = Lightning::new(5);
    let mut b = Lightning::new(5);
    for i in 0..10 {
        a.strike(i as f64);
        b.strike(i as f64);
        assert_eq!(a.bolt(), b.bolt());
    }
}

#[test]
fn threshold_crossing_fires_once_each_way() {
    let mut trig = LightningTriggers::new(&[0.32, 0.46], 1500.0, (0.4, 0.6));
    assert!(!trig.observe(&at(0.30, 0.0)));
    assert!(!trig.observe(&at(0.31, 0.0)));
    assert!(trig.observe(&at(0.33, 0.0)));
    assert!(!trig.observe(&at(0.34, 0.0)));
    assert!(!trig.observe(&at(0.34, 0.0)));
    assert!(trig.observe(&at(0.31, 0.0)));
}

#[test]
fn landing_on_a_threshold_fires_once() {
    let mut trig = LightningTriggers::new(&[0.5], 1500.0, (0.4, 0.6));
    trig.observe(&at(0.4, 0.0));
    assert!(trig.observe(&at(0.5, 0.0)));
    assert!(!trig.observe(&at(0.55, 0.0)));
}

#[test]
fn first_observation_never_fires_on_progress() {
    let mut trig = LightningTriggers::default();
    assert!(!trig.observe(&at(0.9, 0.0)));
}

#[test]
fn velocity_surge_is_edge_triggered() {
    let mut trig = LightningTriggers::new(&[], 1500.0, (0.4, 0.6));
    assert!(trig.observe(&at(0.5, 2000.0)));
    assert!(!trig.observe(&at(0.5, 2100.0)));
    assert!(!trig.observe(&at(0.5, 100.0)));
    assert!(trig.observe(&at(0.5, -1600.0)));
}

#[test]
fn surge_in_the_calm_opening_does_not_strike() {
    let mut trig = LightningTriggers::default();
    assert!(!trig.observe(&at(0.05, 0.0)));
    let fast = at(0.05, 1600.0);
    assert!(!trig.observe(&fast));
    assert_eq!(story_arc_intensity(fast.progress), 0.0);
}

#[test]
fn surge_strikes_once_it_enters_the_storm_window() {
    let mut trig = LightningTriggers::new(&[], 1500.0, (0.4, 0.6));
    assert!(!trig.observe(&at(0.35, 2000.0)));
    assert!(trig.observe(&at(0.41, 2000.0)));
    assert!(!trig.observe(&at(0.45, 2000.0)));
    assert!(!trig.observe(&at(0.65, 100.0)));
    assert!(!trig.observe(&at(0.7, 2000.0)));
}

#[test]
fn requested_strike_waits_out_the_cooldown() {
    let mut l = Lightning::new(3);
    assert!(l.strike(0.0));
    l.request();
    assert!(!l.fire_pending(0.2));
    assert!(l.has_pending());
    assert!(l.fire_pending(0.65));
    assert!(!l.has_pending());
    assert!(l.is_flashing(0.7));
    assert!(!l.fire_pending(2.0));
}

#[test]
fn any_strike_satisfies_a_request() {
    let mut l = Lightning::new(3);
    l.request();
    assert!(l.strike(1.0));
    assert!(!l.has_pending());
    assert!(!l.fire_pending(5.0));
}

#[test]
fn nothing_fires_without_a_request() {
    let mut l = Lightning::new(3);
    assert!(!l.fire_pending(1.0));
    assert_eq!(l.opacity(1.05), 0.0);
}
