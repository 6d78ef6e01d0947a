//! Pooled rain particles.
//!
//! The pool is filled once. Each frame only the first
//! `floor(intensity * pool_size)` drops are simulated and drawn; drops that
//! fall out of the bottom are respawned in place above the top edge.

use crate::constants::*;
use crate::weather::WeatherState;
use glam::Vec2;
use rand::prelude::*;

/// Drawing seam for the rain layer. The web front-end implements this on a
/// 2D canvas context.
pub trait RainSurface {
    fn clear(&mut self, width: f32, height: f32);
    fn stroke_segment(&mut self, from: Vec2, to: Vec2, alpha: f32);
    fn stroke_ring(&mut self, center: Vec2, radius: f32, alpha: f32);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub length: f32,
    pub fall_speed: f32,
    pub opacity: f32,
}

/// Layer opacity target: fully shown while raining, hidden when calm.
#[inline]
pub fn layer_opacity(intensity: f32) -> f32 {
    if intensity > RAIN_VISIBLE_EPSILON {
        1.0
    } else {
        0.0
    }
}

/// Horizontal drift per frame for a wind value.
#[inline]
pub fn wind_offset(wind: f32) -> f32 {
    wind.clamp(-1.0, 1.0) * RAIN_WIND_DRIFT
}

/// Range a respawned drop's x is drawn from, widened upwind so gusts do not
/// leave an empty strip.
pub fn respawn_x_range(width: f32, wind: f32) -> (f32, f32) {
    let wo = wind_offset(wind);
    let shift = if wo > 0.0 { (wo * 50.0).abs() } else { 0.0 };
    let lo = -shift;
    let hi = width + (wo * 100.0).abs() - shift;
    (lo, hi.max(lo))
}

pub struct RainPool {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl RainPool {
    pub fn new(pool_size: usize, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let width = width.max(1.0);
        let height = height.max(1.0);
        let particles = (0..pool_size)
            .map(|_| Particle {
                pos: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height - height),
                length: RAIN_LENGTH_MIN + rng.gen::<f32>() * RAIN_LENGTH_SPAN,
                fall_speed: RAIN_SPEED_MIN + rng.gen::<f32>() * RAIN_SPEED_SPAN,
                opacity: RAIN_OPACITY_MIN + rng.gen::<f32>() * RAIN_OPACITY_SPAN,
            })
            .collect();
        Self {
            particles,
            width,
            height,
            rng,
        }
    }

    /// Change surface bounds. The pool itself is left untouched.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    #[inline]
    pub fn pool_size(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn active_count(&self, intensity: f32) -> usize {
        let i = if intensity.is_finite() {
            intensity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        ((i * self.particles.len() as f32).floor() as usize).min(self.particles.len())
    }

    /// Advance the active prefix by one frame. Returns the active count.
    pub fn step(&mut self, weather: &WeatherState) -> usize {
        let active = self.active_count(weather.intensity);
        let intensity = weather.intensity.clamp(0.0, 1.0);
        let wo = wind_offset(weather.wind);
        let (x_lo, x_hi) = respawn_x_range(self.width, weather.wind);
        let (width, height) = (self.width, self.height);

        for drop in self.particles[..active].iter_mut() {
            drop.pos.y += drop.fall_speed + intensity * RAIN_INTENSITY_SPEEDUP;
            drop.pos.x += wo;

            if drop.pos.y > height {
                drop.pos.y = -drop.length - self.rng.gen::<f32>() * RAIN_RESPAWN_JITTER;
                drop.pos.x = x_lo + self.rng.gen::<f32>() * (x_hi - x_lo);
                drop.fall_speed = RAIN_SPEED_MIN + self.rng.gen::<f32>() * RAIN_SPEED_SPAN;
            }

            if drop.pos.x > width + RAIN_WRAP_MARGIN {
                drop.pos.x = -RAIN_WRAP_MARGIN;
            }
            if drop.pos.x < -RAIN_WRAP_MARGIN {
                drop.pos.x = width + RAIN_WRAP_MARGIN;
            }
        }
        active
    }

    /// Clear the surface and stroke the active drops. Nothing but the clear
    /// happens while the layer is hidden.
    pub fn draw(&self, weather: &WeatherState, surface: &mut impl RainSurface) {
        surface.clear(self.width, self.height);
        if layer_opacity(weather.intensity) == 0.0 {
            return;
        }
        let intensity = weather.intensity.clamp(0.0, 1.0);
        let wo = wind_offset(weather.wind);
        let global = 0.5 + intensity * 0.5;
        for drop in &self.particles[..self.active_count(intensity)] {
            let to = Vec2::new(drop.pos.x + wo, drop.pos.y + drop.length);
            surface.stroke_segment(drop.pos, to, drop.opacity * global);
        }
    }

    /// One rain frame: simulate, then draw.
    pub fn frame(&mut self, weather: &WeatherState, surface: &mut impl RainSurface) -> usize {
        let active = self.step(weather);
        self.draw(weather, surface);
        active
    }
}
