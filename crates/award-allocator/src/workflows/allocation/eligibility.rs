use super::domain::Applicant;

pub const REASON_NON_POSITIVE_REQUEST: &str = "requested amount must be positive";
pub const REASON_INVALID_NEED_TIER: &str = "invalid need tier";
pub const REASON_SCORE_BELOW_MINIMUM: &str = "score below minimum";

/// Flag structurally invalid or sub-threshold applicants. A `min_score` of zero disables the
/// threshold check. Must run once per allocation; reasons accumulate on repeat calls.
pub(crate) fn apply_eligibility(applicants: &mut [Applicant], min_score: f64) {
    for applicant in applicants.iter_mut() {
        if applicant.requested <= 0.0 {
            applicant.mark_ineligible(REASON_NON_POSITIVE_REQUEST);
        }
        if applicant.need_tier.is_none() {
            applicant.mark_ineligible(REASON_INVALID_NEED_TIER);
        }
        if min_score > 0.0 && applicant.score_raw < min_score {
            applicant.mark_ineligible(REASON_SCORE_BELOW_MINIMUM);
        }
    }
}
