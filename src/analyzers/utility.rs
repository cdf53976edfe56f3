/// Share of `part` in `total` as a percentage rounded to the nearest tenth.
///
/// Scales by 1000, rounds, then divides by 10. Returns 0.0 when `total` is 0.
pub fn percent_tenths(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Computes the mean of `(value, weight)` pairs. Returns 0.0 when the total
/// weight is zero. Weights are summed as `f64`, so large counts cannot overflow.
pub fn weighted_mean(pairs: impl IntoIterator<Item = (f64, u64)>) -> f64 {
    let mut weighted_total = 0.0;
    let mut weight_sum = 0.0;
    for (value, weight) in pairs {
        weighted_total += value * weight as f64;
        weight_sum += weight as f64;
    }

    if weight_sum == 0.0 {
        0.0
    } else {
        weighted_total / weight_sum
    }
}
