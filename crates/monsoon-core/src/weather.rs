//! Weather derivation: scroll telemetry in, {intensity, wind, flash, blur} out.
//!
//! Everything here is a pure function of one telemetry snapshot. The flash
//! bit is owned by [`crate::lightning::Lightning`] and merged in with
//! [`WeatherState::with_flash`]; blur is returned as a value and applied by
//! the caller.

use crate::constants::*;
use crate::curve::{finite_or, piecewise_linear};
use crate::telemetry::{Direction, ScrollTelemetry};

/// Derived atmosphere for one frame.
///
/// - `intensity`: rain density, 0..=1
/// - `wind`: lateral drift, -1..=1 (negative blows left)
/// - `flash`: a lightning flash is currently lit
/// - `blur_px`: motion blur to apply to the page, 0..=`BLUR_MAX_PX`
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WeatherState {
    pub intensity: f32,
    pub wind: f32,
    pub flash: bool,
    pub blur_px: f32,
}

impl WeatherState {
    #[inline]
    pub fn with_flash(self, flash: bool) -> Self {
        Self { flash, ..self }
    }
}

/// Base rain intensity from the story arc. Exactly 0 outside the rain zone.
pub fn story_arc_intensity(progress: f32) -> f32 {
    let p = finite_or(progress, 0.0).clamp(0.0, 1.0);
    piecewise_linear(&STORY_ARC, p).clamp(0.0, 1.0)
}

/// Extra rain from fast scrolling, capped.
#[inline]
pub fn velocity_bonus(velocity: f32) -> f32 {
    (finite_or(velocity, 0.0).abs() / VELOCITY_BONUS_DIVISOR).min(VELOCITY_BONUS_MAX)
}

/// Rain intensity. Velocity only adds to rain the story arc already allows.
pub fn rain_intensity(progress: f32, velocity: f32) -> f32 {
    let base = story_arc_intensity(progress);
    if base <= 0.0 {
        return 0.0;
    }
    (base + velocity_bonus(velocity)).clamp(0.0, 1.0)
}

/// Wind from scroll speed: blows against the direction of travel.
/// Independent of the rain gate.
pub fn wind_force(velocity: f32, direction: Direction) -> f32 {
    let speed = finite_or(velocity, 0.0).abs();
    ((speed / WIND_VELOCITY_DIVISOR) * direction.sign() * -1.0).clamp(-1.0, 1.0)
}

/// Motion blur in px for the page while flicking fast.
pub fn motion_blur_px(velocity: f32) -> f32 {
    let speed = finite_or(velocity, 0.0).abs();
    if speed <= BLUR_VELOCITY_THRESHOLD {
        return 0.0;
    }
    ((speed - BLUR_VELOCITY_THRESHOLD) / BLUR_VELOCITY_DIVISOR).min(BLUR_MAX_PX)
}

/// One derivation pass. `flash` is always false here.
pub fn derive_weather(t: &ScrollTelemetry) -> WeatherState {
    WeatherState {
        intensity: rain_intensity(t.progress, t.velocity),
        wind: wind_force(t.velocity, t.direction),
        flash: false,
        blur_px: motion_blur_px(t.velocity),
    }
}
