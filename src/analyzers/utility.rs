/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Truncates (toward zero, never rounds) to 3 decimal digits.
pub fn three_truncate(value: f64) -> f64 {
    (value * 1000.0).trunc() / 1000.0
}

/// Rounds to the nearest 3 decimal digits.
pub fn three_round(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
