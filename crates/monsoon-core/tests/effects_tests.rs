// Host-side tests for the transient effect pool.

use glam::Vec2;
use monsoon_core::*;

#[derive(Default)]
struct RingCounter {
    rings: Vec<(f32, f32)>,
}

impl RainSurface for RingCounter {
    fn clear(&mut self, _w: f32, _h: f32) {}
    fn stroke_segment(&mut self, _from: Vec2, _to: Vec2, _alpha: f32) {}
    fn stroke_ring(&mut self, _center: Vec2, radius: f32, alpha: f32) {
        self.rings.push((radius, alpha));
    }
}

#[test]
fn ripple_lives_for_its_lifetime() {
    let mut pool = TransientPool::default();
    let id = pool.spawn(EffectKind::Ripple, Vec2::new(10.0, 20.0), 0.0);
    assert_eq!(pool.live_count(0.5), 1);
    let fx = pool.get(id, 0.75).unwrap();
    assert!((fx.t - 0.5).abs() < 1e-6);
    assert_eq!(fx.pos, Vec2::new(10.0, 20.0));

    assert!(pool.get(id, 1.6).is_none());
    assert_eq!(pool.live_count(1.6), 0);
    assert_eq!(pool.sweep(1.6), 1);
    assert_eq!(pool.sweep(1.6), 0);
}

#[test]
fn pool_never_grows_past_capacity() {
    let mut pool = TransientPool::with_capacity(4);
    let ids: Vec<_> = (0..10)
        .map(|i| pool.spawn(EffectKind::Ripple, Vec2::ZERO, i as f64 * 0.01))
        .collect();
    assert_eq!(pool.slot_count(), 4);
    assert_eq!(pool.live_count(0.1), 4);
    // Oldest are evicted first.
    assert!(pool.get(ids[0], 0.1).is_none());
    assert!(pool.get(ids[5], 0.1).is_none());
    assert!(pool.get(ids[6], 0.1).is_some());
    assert!(pool.get(ids[9], 0.1).is_some());
}

#[test]
fn expired_slots_are_reused() {
    let mut pool = TransientPool::with_capacity(2);
    pool.spawn(EffectKind::Shockwave, Vec2::ZERO, 0.0);
    pool.spawn(EffectKind::Shockwave, Vec2::ZERO, 0.1);
    let id = pool.spawn(EffectKind::Ripple, Vec2::ONE, 2.0);
    assert_eq!(pool.slot_count(), 2);
    assert_eq!(pool.live_count(2.0), 1);
    assert_eq!(pool.get(id, 2.0).map(|fx| fx.kind), Some(EffectKind::Ripple));
}

#[test]
fn ripple_ring_grows_and_fades() {
    let mut pool = TransientPool::default();
    let id = pool.spawn(EffectKind::Ripple, Vec2::ZERO, 0.0);
    let (r0, a0) = pool.get(id, 0.0).unwrap().ring();
    let (r1, a1) = pool.get(id, 1.2).unwrap().ring();
    assert!(r1 > r0);
    assert!(a1 < a0);
    assert!((r0 - 12.0).abs() < 1e-6);
}

#[test]
fn draw_strokes_only_live_effects() {
    let mut pool = TransientPool::default();
    pool.spawn(EffectKind::Ripple, Vec2::ZERO, 0.0);
    pool.spawn(EffectKind::Shockwave, Vec2::ZERO, 0.0);
    let mut surface = RingCounter::default();
    pool.draw(0.5, &mut surface);
    assert_eq!(surface.rings.len(), 2);

    let mut surface = RingCounter::default();
    pool.draw(1.2, &mut surface);
    assert_eq!(surface.rings.len(), 1);

    pool.clear();
    assert_eq!(pool.slot_count(), 0);
}

#[test]
fn throttle_limits_spawn_rate() {
    let mut th = SpawnThrottle::default();
    assert!(th.allow(0.0));
    assert!(!th.allow(0.05));
    assert!(th.allow(0.09));
    assert!(!th.allow(0.1));
}
