//! Short-lived interaction effects (ripples, shockwaves) kept in a bounded,
//! recycled pool instead of creating elements from the animation loop.

use crate::constants::*;
use crate::rain::RainSurface;
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Ripple,
    Shockwave,
}

impl EffectKind {
    pub fn lifetime_sec(self) -> f32 {
        match self {
            EffectKind::Ripple => RIPPLE_LIFETIME_SEC,
            EffectKind::Shockwave => SHOCKWAVE_LIFETIME_SEC,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectId(u32);

#[derive(Clone, Copy, Debug)]
struct TransientEffect {
    id: EffectId,
    kind: EffectKind,
    pos: Vec2,
    born_at: f64,
    expires_at: f64,
}

impl TransientEffect {
    #[inline]
    fn expired(&self, now_sec: f64) -> bool {
        now_sec >= self.expires_at
    }
}

/// A live effect as seen by the renderer. `t` runs 0..1 over its lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveEffect {
    pub id: EffectId,
    pub kind: EffectKind,
    pub pos: Vec2,
    pub t: f32,
}

impl LiveEffect {
    /// Ring radius and alpha for this point of the effect's life.
    pub fn ring(&self) -> (f32, f32) {
        let t = self.t.clamp(0.0, 1.0);
        match self.kind {
            EffectKind::Ripple => (
                RIPPLE_BASE_RADIUS_PX * (1.0 + (RIPPLE_MAX_SCALE - 1.0) * t),
                0.5 * (1.0 - t),
            ),
            EffectKind::Shockwave => (
                RIPPLE_BASE_RADIUS_PX * (1.0 + 2.0 * RIPPLE_MAX_SCALE * t),
                0.8 * (1.0 - t) * (1.0 - t),
            ),
        }
    }
}

pub struct TransientPool {
    slots: SmallVec<[TransientEffect; 16]>,
    index: FnvHashMap<EffectId, usize>,
    capacity: usize,
    next_id: u32,
}

impl TransientPool {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: SmallVec::with_capacity(capacity.min(16)),
            index: FnvHashMap::default(),
            capacity,
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Allocated slots, live or not. Never exceeds the capacity.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn spawn(&mut self, kind: EffectKind, pos: Vec2, now_sec: f64) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let effect = TransientEffect {
            id,
            kind,
            pos,
            born_at: now_sec,
            expires_at: now_sec + kind.lifetime_sec() as f64,
        };

        let reuse = self.slots.iter().position(|e| e.expired(now_sec));
        let slot = match reuse {
            Some(i) => i,
            None if self.slots.len() < self.capacity => {
                self.slots.push(effect);
                self.index.insert(id, self.slots.len() - 1);
                return id;
            }
            None => self
                .slots
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.born_at.total_cmp(&b.1.born_at))
                .map(|(i, _)| i)
                .unwrap_or(0),
        };
        let old = self.slots[slot].id;
        self.index.remove(&old);
        self.slots[slot] = effect;
        self.index.insert(id, slot);
        id
    }

    /// Forget expired effects so lookups stop finding them. Returns how many
    /// were released.
    pub fn sweep(&mut self, now_sec: f64) -> usize {
        let slots = &self.slots;
        let before = self.index.len();
        self.index.retain(|_, &mut i| !slots[i].expired(now_sec));
        before - self.index.len()
    }

    fn view(e: &TransientEffect, now_sec: f64) -> LiveEffect {
        let life = (e.expires_at - e.born_at).max(1e-6);
        LiveEffect {
            id: e.id,
            kind: e.kind,
            pos: e.pos,
            t: (((now_sec - e.born_at) / life) as f32).clamp(0.0, 1.0),
        }
    }

    pub fn get(&self, id: EffectId, now_sec: f64) -> Option<LiveEffect> {
        let e = self.slots.get(*self.index.get(&id)?)?;
        (!e.expired(now_sec)).then(|| Self::view(e, now_sec))
    }

    pub fn live(&self, now_sec: f64) -> impl Iterator<Item = LiveEffect> + '_ {
        self.slots
            .iter()
            .filter(move |e| !e.expired(now_sec))
            .map(move |e| Self::view(e, now_sec))
    }

    pub fn live_count(&self, now_sec: f64) -> usize {
        self.live(now_sec).count()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    /// Stroke every live effect as a ring.
    pub fn draw(&self, now_sec: f64, surface: &mut impl RainSurface) {
        for fx in self.live(now_sec) {
            let (radius, alpha) = fx.ring();
            if alpha > 0.0 {
                surface.stroke_ring(fx.pos, radius, alpha);
            }
        }
    }
}

impl Default for TransientPool {
    fn default() -> Self {
        Self::with_capacity(TRANSIENT_CAPACITY)
    }
}

/// Rate limiter for pointer-driven spawns.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpawnThrottle {
    last: Option<f64>,
}

impl SpawnThrottle {
    pub fn allow(&mut self, now_sec: f64) -> bool {
        match self.last {
            Some(t) if now_sec - t < RIPPLE_MIN_INTERVAL_SEC as f64 => false,
            _ => {
                self.last = Some(now_sec);
                true
            }
        }
    }
}
