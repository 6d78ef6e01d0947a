//! Scroll telemetry: the one smoothed scroll signal every subsystem reads.
//!
//! Raw scroll positions go through exactly one inertia stage
//! ([`ScrollSmoother`]). Consumers receive [`ScrollTelemetry`] snapshots and
//! must not filter them again.

use crate::constants::{SCROLL_SMOOTHING_TAU_SEC, SCROLL_SNAP_EPSILON_PX};
use std::time::Duration;

/// Scroll direction. `Down` moves further into the story.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
}

impl Direction {
    /// -1 for up, +1 for down.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

/// Snapshot of the scroll signal for one frame.
///
/// - `progress`: fraction of the scrollable extent, 0..=1
/// - `velocity`: signed px/s of the smoothed position, positive when scrolling down
/// - `direction`: last non-zero direction of travel
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollTelemetry {
    pub progress: f32,
    pub velocity: f32,
    pub direction: Direction,
}

/// Progress in percent for the progress indicator.
#[inline]
pub fn progress_percent(t: &ScrollTelemetry) -> f32 {
    (t.progress * 100.0).clamp(0.0, 100.0)
}

/// Frame-rate independent exponential approach toward the raw scroll target.
#[derive(Clone, Debug)]
pub struct ScrollSmoother {
    tau_sec: f32,
    target: f32,
    current: f32,
    initialized: bool,
}

impl ScrollSmoother {
    pub fn new(tau_sec: f32) -> Self {
        Self {
            tau_sec: tau_sec.max(0.0),
            target: 0.0,
            current: 0.0,
            initialized: false,
        }
    }

    /// Update the raw target. The first finite target is taken as-is so the
    /// page does not ease in from zero on load.
    pub fn set_target(&mut self, raw_px: f32) {
        if !raw_px.is_finite() {
            return;
        }
        self.target = raw_px;
        if !self.initialized {
            self.current = raw_px;
            self.initialized = true;
        }
    }

    /// Reset both target and position (used for programmatic jumps).
    pub fn jump_to(&mut self, px: f32) {
        if px.is_finite() {
            self.target = px;
            self.current = px;
            self.initialized = true;
        }
    }

    pub fn advance(&mut self, dt: Duration) -> f32 {
        let dt_sec = dt.as_secs_f32();
        if self.tau_sec <= 0.0 {
            self.current = self.target;
            return self.current;
        }
        let alpha = 1.0 - (-dt_sec / self.tau_sec).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < SCROLL_SNAP_EPSILON_PX {
            self.current = self.target;
        }
        self.current
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }
}

impl Default for ScrollSmoother {
    fn default() -> Self {
        Self::new(SCROLL_SMOOTHING_TAU_SEC)
    }
}

/// Turns raw scroll offsets into [`ScrollTelemetry`], once per frame.
#[derive(Clone, Debug, Default)]
pub struct TelemetryAdapter {
    smoother: ScrollSmoother,
    last: ScrollTelemetry,
}

impl TelemetryAdapter {
    pub fn new(smoothing_tau_sec: f32) -> Self {
        Self {
            smoother: ScrollSmoother::new(smoothing_tau_sec),
            last: ScrollTelemetry::default(),
        }
    }

    /// Sample the page once for this frame.
    ///
    /// `scroll_extent_px` is the maximum scroll offset (document height minus
    /// viewport height). Velocity is measured on the smoothed position.
    pub fn sample(
        &mut self,
        raw_scroll_px: f32,
        scroll_extent_px: f32,
        dt: Duration,
    ) -> ScrollTelemetry {
        self.smoother.set_target(raw_scroll_px);
        let before = self.smoother.position();
        let after = self.smoother.advance(dt);

        let dt_sec = dt.as_secs_f32();
        let velocity = if dt_sec > 0.0 {
            (after - before) / dt_sec
        } else {
            0.0
        };
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };

        let progress = if scroll_extent_px.is_finite() && scroll_extent_px > 0.0 {
            (after / scroll_extent_px).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let direction = if velocity > 0.0 {
            Direction::Down
        } else if velocity < 0.0 {
            Direction::Up
        } else {
            self.last.direction
        };

        self.last = ScrollTelemetry {
            progress,
            velocity,
            direction,
        };
        self.last
    }

    /// Latest snapshot, without sampling.
    #[inline]
    pub fn last(&self) -> ScrollTelemetry {
        self.last
    }

    /// Smoothed scroll offset in px. Scroll-position consumers read this
    /// rather than the raw offset.
    #[inline]
    pub fn position(&self) -> f32 {
        self.smoother.position()
    }

    pub fn jump_to(&mut self, px: f32) {
        self.smoother.jump_to(px);
    }
}
