use crate::constants::*;

/// Runtime-overridable settings for one mounted atmosphere.
#[derive(Clone, Debug)]
pub struct AtmosphereConfig {
    pub pool_size: usize,
    pub seed: u64,
    pub smoothing_tau_sec: f32,
    pub lightning_thresholds: Vec<f32>,
    pub lightning_surge_velocity: f32,
    /// Progress range in which a velocity surge may strike.
    pub lightning_surge_window: (f32, f32),
    pub transient_capacity: usize,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            pool_size: RAIN_POOL_SIZE,
            seed: 42,
            smoothing_tau_sec: SCROLL_SMOOTHING_TAU_SEC,
            lightning_thresholds: LIGHTNING_PROGRESS_THRESHOLDS.to_vec(),
            lightning_surge_velocity: LIGHTNING_SURGE_VELOCITY,
            lightning_surge_window: LIGHTNING_SURGE_WINDOW,
            transient_capacity: TRANSIENT_CAPACITY,
        }
    }
}

impl AtmosphereConfig {
    /// Derive independent seeds for each randomized subsystem.
    pub fn sub_seed(&self, stream: u64) -> u64 {
        self.seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}
