use glam::Vec2;

/// Canvas backing store size for a CSS box at a device pixel ratio.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let px = |v: f64| {
        if v.is_finite() && v > 0.0 {
            ((v * dpr) as u32).max(1)
        } else {
            1
        }
    };
    (px(css_w), px(css_h))
}

/// Maximum scroll offset of the page.
#[inline]
pub fn scroll_extent(scroll_height: f64, inner_height: f64) -> f32 {
    let extent = (scroll_height - inner_height) as f32;
    if extent.is_finite() {
        extent.max(0.0)
    } else {
        0.0
    }
}

/// Pointer position relative to an element's top-left corner.
#[inline]
pub fn client_to_local(client_x: f64, client_y: f64, left: f64, top: f64) -> Vec2 {
    Vec2::new((client_x - left) as f32, (client_y - top) as f32)
}

/// Offset for `.mouse-parallax` elements: zero at the viewport centre,
/// half the range at either edge.
pub fn mouse_parallax_target(pointer: Vec2, viewport: Vec2, range_px: f32) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    let n = (pointer / viewport - Vec2::splat(0.5)).clamp(Vec2::splat(-0.5), Vec2::splat(0.5));
    n * range_px
}

/// Frame-rate independent approach toward a target point.
#[inline]
pub fn follow(current: Vec2, target: Vec2, dt_sec: f32, tau_sec: f32) -> Vec2 {
    if tau_sec <= 0.0 {
        return target;
    }
    let alpha = 1.0 - (-dt_sec.max(0.0) / tau_sec).exp();
    current + (target - current) * alpha
}
