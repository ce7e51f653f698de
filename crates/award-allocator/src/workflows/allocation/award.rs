use crate::config::AwardLimits;

/// Award for one applicant in isolation, before any budget constraint.
///
/// The cap is the lower of `max_award` and `requested * max_percent`. Requests below the floor
/// are honored as-is rather than inflated. The cap is re-applied after that override and again
/// after rounding, so the result never exceeds it.
pub fn compute_award(
    requested: f64,
    min_award: f64,
    max_award: f64,
    round_to: f64,
    max_percent: f64,
) -> f64 {
    let cap = max_award.min(requested * max_percent).max(0.0);

    let mut award = bounded(requested, min_award, cap);
    if requested < min_award {
        award = requested;
    }
    award = award.min(cap);

    if round_to > 0.0 {
        award = bounded(round_to_increment(award, round_to), min_award, cap);
    }

    award.max(0.0)
}

impl AwardLimits {
    pub fn award_for(&self, requested: f64) -> f64 {
        compute_award(
            requested,
            self.min_award,
            self.max_award,
            self.round_to,
            self.max_percent,
        )
    }
}

/// Round half-up to the nearest multiple of `increment`.
pub(crate) fn round_to_increment(value: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment + 0.5).floor() * increment
}

// Floor first, ceiling last: when the floor sits above the cap, the cap wins.
// The cap is never above the request, so this order keeps awarded <= requested.
fn bounded(value: f64, floor: f64, ceiling: f64) -> f64 {
    value.max(floor).min(ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_cap_binds_before_max_award() {
        assert_eq!(compute_award(1000.0, 500.0, 2000.0, 0.0, 0.5), 500.0);
    }

    #[test]
    fn below_minimum_request_is_honored() {
        assert_eq!(compute_award(300.0, 500.0, 2000.0, 0.0, 1.0), 300.0);
    }

    #[test]
    fn rounds_to_nearest_increment_within_bounds() {
        assert_eq!(compute_award(1100.0, 200.0, 2000.0, 250.0, 1.0), 1000.0);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_to_increment(125.0, 250.0), 250.0);
        assert_eq!(round_to_increment(124.99, 250.0), 0.0);
        assert_eq!(round_to_increment(37.0, 0.0), 37.0);
    }

    #[test]
    fn large_requests_stop_at_max_award() {
        assert_eq!(compute_award(9000.0, 500.0, 5000.0, 0.0, 1.0), 5000.0);
    }

    #[test]
    fn rounding_overshoot_is_pulled_back_to_cap() {
        // 1900 rounds to 2000 but the percent cap is 1900.
        assert_eq!(compute_award(1900.0, 100.0, 5000.0, 500.0, 1.0), 1900.0);
    }

    #[test]
    fn rounding_never_lifts_small_request_above_itself() {
        assert_eq!(compute_award(300.0, 500.0, 2000.0, 250.0, 1.0), 300.0);
    }

    #[test]
    fn percent_cap_below_floor_wins_over_floor() {
        assert_eq!(compute_award(1000.0, 500.0, 2000.0, 0.0, 0.3), 300.0);
        assert_eq!(compute_award(1000.0, 500.0, 2000.0, 250.0, 0.3), 300.0);
    }

    #[test]
    fn limits_delegate_to_compute_award() {
        let limits = AwardLimits {
            min_award: 200.0,
            max_award: 2000.0,
            round_to: 250.0,
            max_percent: 1.0,
        };
        assert_eq!(limits.award_for(1100.0), 1000.0);
    }
}
