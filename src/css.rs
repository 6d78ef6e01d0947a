// Inline style values written by the frame loop.

#[inline]
pub fn blur_filter(px: f32) -> String {
    if px > 0.0 {
        format!("blur({:.2}px)", px)
    } else {
        "none".to_string()
    }
}

#[inline]
pub fn scale(s: f32) -> String {
    format!("scale({:.4})", s)
}

#[inline]
pub fn translate_y(px: f32) -> String {
    format!("translate3d(0, {:.2}px, 0)", px)
}

#[inline]
pub fn translate(x: f32, y: f32) -> String {
    format!("translate3d({:.2}px, {:.2}px, 0)", x, y)
}

/// Bolt placement: horizontal position in percent plus a uniform scale.
#[inline]
pub fn bolt_transform(scale: f32) -> String {
    format!("translateX(-50%) scale({:.3})", scale)
}

#[inline]
pub fn opacity(v: f32) -> String {
    format!("{:.3}", v.clamp(0.0, 1.0))
}

#[inline]
pub fn percent(v: f32) -> String {
    format!("{:.2}%", v)
}

/// Progress indicator label, e.g. `42% DISCOVERED`.
#[inline]
pub fn progress_label(percent: f32) -> String {
    format!("{}% DISCOVERED", percent.round() as i32)
}

/// Stroke colour for a rain drop or ring at an alpha.
#[inline]
pub fn rgba(rgb: &str, alpha: f32) -> String {
    format!("rgba({}, {:.3})", rgb, alpha.clamp(0.0, 1.0))
}
