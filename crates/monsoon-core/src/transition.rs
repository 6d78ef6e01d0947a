//! Scene bleed transitions and parallax drift.
//!
//! Each scene's content rises into view as the scene top climbs from 75% to
//! 30% of the viewport. Each scene but the last then fades out while it
//! scrolls past the top of the viewport, revealing the next one underneath.
//! The entrance finishes before the exit starts, so the two never style the
//! content at once. Progress here is local to the
//! scene and is computed from the already-smoothed scroll offset, so there is
//! no second easing stage.

use crate::constants::*;
use crate::curve::{ease_out_quad, finite_or};

/// Page-space vertical extent of a scene, in px.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SceneBounds {
    pub top: f32,
    pub height: f32,
}

impl SceneBounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Local exit progress: 0 when the scene top reaches the viewport top, 1 when
/// the scene bottom does.
pub fn exit_progress(bounds: SceneBounds, scroll_y: f32) -> f32 {
    if bounds.height.is_nan() || bounds.height <= 0.0 {
        return 0.0;
    }
    let y = finite_or(scroll_y, bounds.top);
    ((y - bounds.top) / bounds.height).clamp(0.0, 1.0)
}

/// Content entrance progress: 0 while the scene top is below 75% of the
/// viewport, 1 once it has risen to 30%. Reverses when scrolling back up.
pub fn entrance_progress(bounds: SceneBounds, scroll_y: f32, viewport_h: f32) -> f32 {
    if viewport_h.is_nan() || viewport_h <= 0.0 {
        return 1.0;
    }
    let start = bounds.top - ENTRANCE_START_VIEWPORT * viewport_h;
    let end = bounds.top - ENTRANCE_END_VIEWPORT * viewport_h;
    let y = finite_or(scroll_y, end);
    ((y - start) / (end - start)).clamp(0.0, 1.0)
}

/// Styles for a scene: entrance first, then exit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTransition {
    pub bg_opacity: f32,
    pub bg_scale: f32,
    pub content_opacity: f32,
    pub content_offset_y: f32,
}

impl SceneTransition {
    pub fn at(progress: f32) -> Self {
        let p = finite_or(progress, 0.0).clamp(0.0, 1.0);
        Self {
            bg_opacity: 1.0 - p,
            bg_scale: 1.0 + BG_SCALE_DRIFT * p,
            content_opacity: (1.0 - CONTENT_FADE_RATE * p).max(0.0),
            content_offset_y: -CONTENT_LIFT_PX * p,
        }
    }

    /// Combine entrance and exit. While the exit has not begun the content
    /// follows the eased entrance; once it has, the exit styles win.
    pub fn compose(entrance: f32, exit: f32) -> Self {
        let exit = finite_or(exit, 0.0);
        let mut s = Self::at(exit);
        if exit <= 0.0 {
            let e = ease_out_quad(finite_or(entrance, 1.0));
            s.content_opacity = e;
            s.content_offset_y = ENTRANCE_RISE_PX * (1.0 - e);
        }
        s
    }
}

#[derive(Clone, Debug)]
pub struct SceneSlot {
    pub bounds: SceneBounds,
    pub z_index: i32,
    last: Option<(f32, f32)>,
}

/// One per-scene transition update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneUpdate {
    pub index: usize,
    pub entrance: f32,
    /// Exit progress; always 0 for the last scene.
    pub progress: f32,
    pub style: SceneTransition,
}

#[derive(Clone, Debug, Default)]
pub struct TransitionLayer {
    scenes: Vec<SceneSlot>,
}

impl TransitionLayer {
    /// Scenes in document order. Later scenes stack above earlier ones.
    pub fn new(bounds: impl IntoIterator<Item = SceneBounds>) -> Self {
        let scenes = bounds
            .into_iter()
            .enumerate()
            .map(|(i, b)| SceneSlot {
                bounds: b,
                z_index: i as i32 + 1,
                last: None,
            })
            .collect();
        Self { scenes }
    }

    pub fn scenes(&self) -> &[SceneSlot] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// The last scene never exits.
    #[inline]
    pub fn has_exit(&self, index: usize) -> bool {
        index + 1 < self.scenes.len()
    }

    /// New layout after a resize; forces every scene to be restyled.
    pub fn relayout(&mut self, bounds: impl IntoIterator<Item = SceneBounds>) {
        for (slot, b) in self.scenes.iter_mut().zip(bounds) {
            slot.bounds = b;
            slot.last = None;
        }
    }

    /// Styles for scenes whose entrance or exit progress changed since the
    /// last update.
    pub fn update(&mut self, scroll_y: f32, viewport_h: f32) -> Vec<SceneUpdate> {
        let exiting = self.scenes.len().saturating_sub(1);
        let mut out = Vec::new();
        for (index, slot) in self.scenes.iter_mut().enumerate() {
            let entrance = entrance_progress(slot.bounds, scroll_y, viewport_h);
            let progress = if index < exiting {
                exit_progress(slot.bounds, scroll_y)
            } else {
                0.0
            };
            if slot.last == Some((entrance, progress)) {
                continue;
            }
            slot.last = Some((entrance, progress));
            out.push(SceneUpdate {
                index,
                entrance,
                progress,
                style: SceneTransition::compose(entrance, progress),
            });
        }
        out
    }
}

/// Parallax progress: 0 when the scene top enters at the viewport bottom, 1
/// when the scene bottom leaves at the viewport top.
pub fn parallax_progress(bounds: SceneBounds, scroll_y: f32, viewport_h: f32) -> f32 {
    let start = bounds.top - viewport_h;
    let span = bounds.height + viewport_h;
    if span.is_nan() || span <= 0.0 {
        return 0.0;
    }
    let y = finite_or(scroll_y, start);
    ((y - start) / span).clamp(0.0, 1.0)
}

/// Vertical offset for a parallax layer.
pub fn parallax_offset(bounds: SceneBounds, scroll_y: f32, viewport_h: f32, speed: f32) -> f32 {
    viewport_h * speed * parallax_progress(bounds, scroll_y, viewport_h)
}

/// Parse a `data-speed` attribute, falling back to the default speed.
pub fn parse_speed(attr: Option<&str>) -> f32 {
    attr.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(PARALLAX_DEFAULT_SPEED)
}
