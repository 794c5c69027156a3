//! Exit-probability scoring.

/// Scale a raw 0-10 screening score to a percentage, one decimal place.
/// Missing or non-numeric scores coerce to 0; out-of-range values are
/// clamped rather than rejected.
pub fn exit_probability(raw_score: Option<f64>) -> f64 {
    let score = raw_score.unwrap_or(0.0).clamp(0.0, 10.0);
    (score * 10.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_below_zero() {
        assert_eq!(exit_probability(Some(-5.0)), 0.0);
    }

    #[test]
    fn test_clamps_above_ten() {
        assert_eq!(exit_probability(Some(10.0)), 100.0);
        assert_eq!(exit_probability(Some(12.5)), 100.0);
    }

    #[test]
    fn test_scales_and_rounds_to_one_decimal() {
        assert_eq!(exit_probability(Some(7.25)), 72.5);
        assert_eq!(exit_probability(Some(3.333)), 33.3);
    }

    #[test]
    fn test_missing_score_is_zero() {
        assert_eq!(exit_probability(None), 0.0);
    }
}
