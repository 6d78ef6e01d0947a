//! Lightning flashes: edge-triggered strikes with a timed two-phase decay.

use crate::constants::*;
use crate::telemetry::ScrollTelemetry;
use rand::prelude::*;
use smallvec::SmallVec;

/// Visual parameters picked for a strike.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bolt {
    /// Index into the bolt path variants.
    pub variant: usize,
    /// Horizontal position in percent of the viewport width.
    pub left_pct: f32,
    pub scale: f32,
}

impl Default for Bolt {
    fn default() -> Self {
        Self {
            variant: 0,
            left_pct: 50.0,
            scale: 1.0,
        }
    }
}

pub struct Lightning {
    struck_at: Option<f64>,
    pending: bool,
    bolt: Bolt,
    rng: StdRng,
}

impl Lightning {
    pub fn new(seed: u64) -> Self {
        Self {
            struck_at: None,
            pending: false,
            bolt: Bolt::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn envelope_len() -> f64 {
        (LIGHTNING_ATTACK_SEC + LIGHTNING_HOLD_SEC + LIGHTNING_FADE_SEC) as f64
    }

    /// Start a flash at `now_sec`. Ignored while a flash is lit or cooling down.
    pub fn strike(&mut self, now_sec: f64) -> bool {
        if let Some(t0) = self.struck_at {
            let since = now_sec - t0;
            if since < Self::envelope_len() || since < LIGHTNING_COOLDOWN_SEC as f64 {
                return false;
            }
        }
        self.struck_at = Some(now_sec);
        self.pending = false;
        self.bolt = Bolt {
            variant: self.rng.gen_range(0..LIGHTNING_BOLT_VARIANTS),
            left_pct: 20.0 + self.rng.gen::<f32>() * 60.0,
            scale: 0.8 + self.rng.gen::<f32>() * 0.5,
        };
        log::debug!("[lightning] strike variant={}", self.bolt.variant);
        true
    }

    /// Ask for a strike as soon as the cooldown allows. Any strike that
    /// begins first satisfies the request.
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Strike now if a request is waiting and the cooldown has passed.
    pub fn fire_pending(&mut self, now_sec: f64) -> bool {
        self.pending && self.strike(now_sec)
    }

    /// Flash overlay opacity: attack to peak, hold, then fade out.
    pub fn opacity(&self, now_sec: f64) -> f32 {
        let t0 = match self.struck_at {
            Some(t) => t,
            None => return 0.0,
        };
        let t = (now_sec - t0) as f32;
        if t < 0.0 {
            return 0.0;
        }
        if t < LIGHTNING_ATTACK_SEC {
            return LIGHTNING_PEAK_OPACITY * (t / LIGHTNING_ATTACK_SEC);
        }
        let t = t - LIGHTNING_ATTACK_SEC;
        if t < LIGHTNING_HOLD_SEC {
            return LIGHTNING_PEAK_OPACITY;
        }
        let t = t - LIGHTNING_HOLD_SEC;
        if t < LIGHTNING_FADE_SEC {
            return LIGHTNING_PEAK_OPACITY * (1.0 - t / LIGHTNING_FADE_SEC);
        }
        0.0
    }

    pub fn is_flashing(&self, now_sec: f64) -> bool {
        self.opacity(now_sec) > 0.0
    }

    pub fn bolt(&self) -> Bolt {
        self.bolt
    }
}

/// Watches telemetry for the scroll events that should strike lightning:
/// crossing a progress threshold, or a velocity surge inside the storm window.
#[derive(Clone, Debug)]
pub struct LightningTriggers {
    thresholds: SmallVec<[f32; 4]>,
    surge_velocity: f32,
    surge_window: (f32, f32),
    last_progress: Option<f32>,
    surge_armed: bool,
}

impl LightningTriggers {
    pub fn new(thresholds: &[f32], surge_velocity: f32, surge_window: (f32, f32)) -> Self {
        Self {
            thresholds: thresholds.iter().copied().collect(),
            surge_velocity,
            surge_window,
            last_progress: None,
            surge_armed: true,
        }
    }

    #[inline]
    fn in_surge_window(&self, progress: f32) -> bool {
        let (lo, hi) = self.surge_window;
        progress >= lo && progress <= hi
    }

    /// Returns true when this snapshot should strike.
    pub fn observe(&mut self, t: &ScrollTelemetry) -> bool {
        let mut fire = false;

        if let Some(prev) = self.last_progress {
            let (lo, hi) = if prev <= t.progress {
                (prev, t.progress)
            } else {
                (t.progress, prev)
            };
            // Half-open so landing exactly on a threshold fires once.
            if self
                .thresholds
                .iter()
                .any(|&th| prev != t.progress && th > lo && th <= hi)
            {
                fire = true;
            }
        }
        self.last_progress = Some(t.progress);

        // Fast scrolling outside the window neither fires nor re-arms.
        let speed = t.velocity.abs();
        if speed <= self.surge_velocity {
            self.surge_armed = true;
        } else if self.surge_armed && self.in_surge_window(t.progress) {
            self.surge_armed = false;
            fire = true;
        }

        fire
    }
}

impl Default for LightningTriggers {
    fn default() -> Self {
        Self::new(
            LIGHTNING_PROGRESS_THRESHOLDS,
            LIGHTNING_SURGE_VELOCITY,
            LIGHTNING_SURGE_WINDOW,
        )
    }
}
