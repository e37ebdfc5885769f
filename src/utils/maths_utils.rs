/// Round a non-negative quantity to the nearest whole number for emission.
/// Negative and non-finite inputs collapse to 0; halves round up.
pub fn round_to_u64(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

/// Clamp `value` into `[min, max]`; NaN falls back to `min`.
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min <= max);
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Share of `part` in `total` as a percentage, 0 when the total is empty.
pub fn percentage_of(part: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    part / total * 100.0
}
