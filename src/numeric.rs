/// Numeric helpers shared by the normalizer and the classifier.

/// Parses a table cell as a finite `f64`.
///
/// Empty cells, text, `NaN` and infinities all become `None`. Never returns
/// `Some(0.0)` for a cell that did not contain zero.
pub fn parse_float_or_none(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Two-decimal rounding used for displayed water levels.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// `current / danger`, or `None` when either is missing or `danger` is zero.
pub fn flow_ratio(current: Option<f64>, danger: Option<f64>) -> Option<f64> {
    match (current, danger) {
        (Some(c), Some(d)) if d != 0.0 => Some(c / d),
        _ => None,
    }
}
