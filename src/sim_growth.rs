// Growth Model - percentage-based capacity growth rule

/// Capacity delta (TB) to add at the start of an epoch
///
/// `round(current_total * rate)`, using `f64::round` (half away from zero;
/// inputs are continuous in practice so tie behavior never matters).
/// Attrition is not modeled: a negative product clamps to 0 rather than
/// shrinking the network.
pub fn capacity_delta(current_total_tb: f64, rate: f64) -> f64 {
    (current_total_tb * rate).round().max(0.0)
}
