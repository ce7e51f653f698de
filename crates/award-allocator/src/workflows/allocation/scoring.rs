use super::domain::Applicant;
use crate::config::PriorityWeights;
use std::cmp::Ordering;

/// Rescale raw scores against the maximum over the whole input population, eligible or not,
/// so excluding the top scorer does not shift everyone else's scale.
pub(crate) fn normalize_scores(applicants: &mut [Applicant]) {
    let max_score = applicants
        .iter()
        .map(|applicant| applicant.score_raw)
        .fold(0.0_f64, f64::max);
    let denominator = if max_score > 0.0 { max_score } else { 1.0 };

    for applicant in applicants.iter_mut() {
        applicant.score_norm = applicant.score_raw / denominator;
    }
}

/// Blend normalized score with the need-tier base value. Weights are validated upstream so
/// their sum is strictly positive.
pub(crate) fn assign_priority(applicants: &mut [Applicant], weights: &PriorityWeights) {
    let total = weights.score + weights.need;
    for applicant in applicants.iter_mut() {
        let need_base = applicant
            .need_tier
            .map(|tier| tier.base_weight())
            .unwrap_or(0.0);
        applicant.priority =
            (weights.score * applicant.score_norm + weights.need * need_base) / total;
    }
}

/// Descending priority, then descending raw score. `sort_by` is stable, so full ties keep
/// input order.
pub(crate) fn rank(applicants: &mut [Applicant]) {
    applicants.sort_by(compare_rank);
}

pub(crate) fn compare_rank(a: &Applicant, b: &Applicant) -> Ordering {
    b.priority
        .partial_cmp(&a.priority)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.score_raw
                .partial_cmp(&a.score_raw)
                .unwrap_or(Ordering::Equal)
        })
}
