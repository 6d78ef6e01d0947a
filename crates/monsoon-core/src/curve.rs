//! Small interpolation helpers shared by the story arc, crossfade envelopes
//! and transition curves.

/// Linearly remap `x` from `[in_lo, in_hi]` to `[out_lo, out_hi]` without clamping.
#[inline]
pub fn map_range(in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32, x: f32) -> f32 {
    let span = in_hi - in_lo;
    if span.abs() <= f32::EPSILON {
        return out_hi;
    }
    out_lo + (x - in_lo) / span * (out_hi - out_lo)
}

/// Evaluate a piecewise-linear curve through `knots` (sorted by x).
///
/// Inputs left of the first knot take the first value and inputs right of the
/// last knot take the last value. An empty curve is 0 everywhere, and NaN
/// inputs evaluate like the left edge.
pub fn piecewise_linear(knots: &[(f32, f32)], x: f32) -> f32 {
    let (first, last) = match (knots.first(), knots.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return 0.0,
    };
    if x.is_nan() || x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    for pair in knots.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            return map_range(x0, x1, y0, y1, x);
        }
    }
    last.1
}

/// Quadratic ease-out: fast start, gentle landing.
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Replace non-finite values with `fallback`.
#[inline]
pub fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}
