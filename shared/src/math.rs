//! Scalar math for roadster
//!
//! Frame-independent integration, easing curves and wraparound arithmetic.
//! Everything here is a pure function of its arguments.

use std::f64::consts::PI;

/// Add `delta` to `start` and wrap the result into `[0, max)`.
///
/// Works for deltas of either sign and any magnitude. A `max` that is not a
/// positive finite number leaves the sum unwrapped.
pub fn wrap_increase(start: f64, delta: f64, max: f64) -> f64 {
    let mut result = start + delta;
    if !(max.is_finite() && max > 0.0) {
        return result;
    }

    // One correction covers the per-tick case; fall back to the remainder
    // for anything further out.
    if result >= max {
        result -= max;
    } else if result < 0.0 {
        result += max;
    }
    if !(0.0..max).contains(&result) {
        result = result.rem_euclid(max);
        // rem_euclid can round up to exactly `max` for tiny negative inputs
        if result >= max {
            result = 0.0;
        }
    }
    result
}

/// Clamp `value` into `[min, max]`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

/// Explicit Euler step: `v + accel * dt`.
#[inline]
pub fn integrate(v: f64, accel: f64, dt: f64) -> f64 {
    v + accel * dt
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn interpolate(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Quadratic ease-in from `a` to `b`.
#[inline]
pub fn ease_in(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t * t
}

/// Quadratic ease-out from `a` to `b`.
#[inline]
pub fn ease_out(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * (1.0 - (1.0 - t) * (1.0 - t))
}

/// Cosine ease-in-out from `a` to `b`.
#[inline]
pub fn ease_in_out(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * (0.5 - (t * PI).cos() / 2.0)
}

/// Fractional progress of `n` within the current `total`-sized bucket.
///
/// Uses floating-point division so the result is continuous in `[0, 1)`.
pub fn percent_remaining(n: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    n.rem_euclid(total) / total
}

/// Perspective divide strength for a horizontal field of view in degrees.
pub fn camera_depth(field_of_view: f64) -> f64 {
    1.0 / ((field_of_view / 2.0) * PI / 180.0).tan()
}
