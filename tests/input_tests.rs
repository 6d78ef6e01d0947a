// Host-side tests for pure input and layout helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn backing_size_scales_by_device_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 2.0), (1600, 1200));
    assert_eq!(backing_size(800.0, 600.0, 1.0), (800, 600));
}

#[test]
fn backing_size_never_collapses_to_zero() {
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
    assert_eq!(backing_size(f64::NAN, 300.0, 1.0), (1, 300));
    // A bogus ratio falls back to 1.
    assert_eq!(backing_size(100.0, 50.0, 0.0), (100, 50));
}

#[test]
fn scroll_extent_is_non_negative() {
    assert_eq!(scroll_extent(5000.0, 800.0), 4200.0);
    assert_eq!(scroll_extent(600.0, 800.0), 0.0);
    assert_eq!(scroll_extent(f64::INFINITY, 800.0), 0.0);
}

#[test]
fn client_point_is_relative_to_element() {
    let p = client_to_local(150.0, 90.0, 50.0, 40.0);
    assert_eq!(p, Vec2::new(100.0, 50.0));
}

#[test]
fn mouse_parallax_is_centred_and_bounded() {
    let vp = Vec2::new(1000.0, 800.0);
    assert_eq!(mouse_parallax_target(Vec2::new(500.0, 400.0), vp, 20.0), Vec2::ZERO);
    assert_eq!(
        mouse_parallax_target(Vec2::new(0.0, 800.0), vp, 20.0),
        Vec2::new(-10.0, 10.0)
    );
    // Pointer outside the viewport is clamped to the edge.
    assert_eq!(
        mouse_parallax_target(Vec2::new(5000.0, -100.0), vp, 20.0),
        Vec2::new(10.0, -10.0)
    );
    assert_eq!(mouse_parallax_target(Vec2::ONE, Vec2::ZERO, 20.0), Vec2::ZERO);
}

#[test]
fn follow_moves_toward_target_without_overshoot() {
    let target = Vec2::new(100.0, -40.0);
    let mut p = Vec2::ZERO;
    for _ in 0..120 {
        let next = follow(p, target, 1.0 / 60.0, 0.05);
        assert!(next.distance(target) <= p.distance(target));
        p = next;
    }
    assert!(p.distance(target) < 1e-2);
}

#[test]
fn follow_edge_cases() {
    let a = Vec2::new(1.0, 2.0);
    let b = Vec2::new(3.0, 4.0);
    assert_eq!(follow(a, b, 0.016, 0.0), b);
    assert_eq!(follow(a, b, 0.0, 0.1), a);
    assert_eq!(follow(a, b, -1.0, 0.1), a);
}
