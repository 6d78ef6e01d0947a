// Host-side tests for scroll telemetry and the snapshot channel.

use monsoon_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn first_target_is_taken_without_easing() {
    let mut s = ScrollSmoother::default();
    s.set_target(640.0);
    assert_eq!(s.advance(FRAME), 640.0);
}

#[test]
fn smoother_approaches_monotonically_and_settles() {
    let mut s = ScrollSmoother::new(0.12);
    s.set_target(0.0);
    s.advance(FRAME);
    s.set_target(1000.0);
    let mut prev = 0.0;
    for _ in 0..200 {
        let pos = s.advance(FRAME);
        assert!(pos >= prev && pos <= 1000.0, "overshoot {pos}");
        prev = pos;
    }
    assert_eq!(s.position(), 1000.0);
}

#[test]
fn non_finite_targets_are_ignored() {
    let mut s = ScrollSmoother::default();
    s.jump_to(300.0);
    s.set_target(f32::NAN);
    s.set_target(f32::INFINITY);
    assert_eq!(s.target(), 300.0);
    assert_eq!(s.advance(FRAME), 300.0);
}

#[test]
fn first_sample_has_no_velocity_spike() {
    let mut a = TelemetryAdapter::default();
    let t = a.sample(1200.0, 4000.0, FRAME);
    assert_eq!(t.velocity, 0.0);
    assert_eq!(t.direction, Direction::Down);
    assert!((t.progress - 0.3).abs() < 1e-6);
}

#[test]
fn direction_follows_travel_and_holds_when_still() {
    let mut a = TelemetryAdapter::default();
    a.sample(0.0, 1000.0, FRAME);

    let down = a.sample(500.0, 1000.0, FRAME);
    assert!(down.velocity > 0.0);
    assert_eq!(down.direction, Direction::Down);

    for _ in 0..200 {
        a.sample(500.0, 1000.0, FRAME);
    }
    let up = a.sample(0.0, 1000.0, FRAME);
    assert!(up.velocity < 0.0);
    assert_eq!(up.direction, Direction::Up);

    let mut t = up;
    for _ in 0..200 {
        t = a.sample(0.0, 1000.0, FRAME);
    }
    assert_eq!(t.velocity, 0.0);
    assert_eq!(t.direction, Direction::Up);
    assert_eq!(t.progress, 0.0);
}

#[test]
fn progress_stays_in_unit_range() {
    let mut a = TelemetryAdapter::default();
    a.sample(0.0, 1000.0, FRAME);
    let mut t = a.last();
    for _ in 0..300 {
        t = a.sample(5000.0, 1000.0, FRAME);
        assert!((0.0..=1.0).contains(&t.progress));
    }
    assert_eq!(t.progress, 1.0);

    // No scrollable extent.
    let t = a.sample(200.0, 0.0, FRAME);
    assert_eq!(t.progress, 0.0);
}

#[test]
fn zero_dt_reports_zero_velocity() {
    let mut a = TelemetryAdapter::default();
    a.sample(0.0, 1000.0, FRAME);
    let t = a.sample(800.0, 1000.0, Duration::ZERO);
    assert_eq!(t.velocity, 0.0);
}

#[test]
fn velocity_is_smoothed_not_raw() {
    let mut a = TelemetryAdapter::default();
    a.sample(0.0, 10_000.0, FRAME);
    let t = a.sample(1000.0, 10_000.0, FRAME);
    // A raw derivative would report 1000px / 16ms.
    assert!(t.velocity < 1000.0 / FRAME.as_secs_f32());
    assert!(t.velocity > 0.0);
}

#[test]
fn progress_percent_for_indicator() {
    let t = ScrollTelemetry {
        progress: 0.42,
        ..Default::default()
    };
    assert!((progress_percent(&t) - 42.0).abs() < 1e-4);
}

#[test]
fn channel_delivers_in_subscription_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut ch: TelemetryChannel<ScrollTelemetry> = TelemetryChannel::new();

    let a = {
        let seen = seen.clone();
        ch.subscribe(move |t| seen.borrow_mut().push(("a", t.progress)))
    };
    {
        let seen = seen.clone();
        ch.subscribe(move |t| seen.borrow_mut().push(("b", t.progress)));
    }
    assert_eq!(ch.len(), 2);

    let t = ScrollTelemetry {
        progress: 0.5,
        ..Default::default()
    };
    ch.publish(&t);
    assert_eq!(*seen.borrow(), vec![("a", 0.5), ("b", 0.5)]);

    assert!(ch.unsubscribe(a));
    assert!(!ch.unsubscribe(a));
    ch.publish(&t);
    assert_eq!(seen.borrow().len(), 3);
    assert_eq!(seen.borrow()[2].0, "b");
}

#[test]
fn clearing_the_channel_drops_subscriber_state() {
    let owned = Rc::new(());
    let mut ch: TelemetryChannel<f32> = TelemetryChannel::default();
    {
        let owned = owned.clone();
        ch.subscribe(move |_| {
            let _ = Rc::strong_count(&owned);
        });
    }
    assert_eq!(Rc::strong_count(&owned), 2);
    ch.clear();
    assert!(ch.is_empty());
    assert_eq!(Rc::strong_count(&owned), 1);
    ch.publish(&1.0);
}
