use super::domain::{Applicant, NeedTier};
use super::scenario::ScenarioResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-tier demand, funding, and equity figures. One entry exists for every tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NeedCoverage {
    pub eligible_count: usize,
    pub awarded_count: usize,
    pub unfunded_count: usize,
    pub requested_total: f64,
    pub awarded_total: f64,
    pub unfunded_requested: f64,
    pub coverage_rate: f64,
    /// Tier share of all eligible requested dollars.
    pub requested_share: f64,
    /// Tier share of all awarded dollars.
    pub awarded_share: f64,
    /// `awarded_share - requested_share`; positive means over-represented in awards.
    pub share_delta: f64,
}

/// Flat applicant view used for listings and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardRecord {
    pub applicant_id: String,
    pub name: Option<String>,
    pub need_level: String,
    pub score: f64,
    pub requested: f64,
    pub awarded: f64,
    pub priority: f64,
}

impl AwardRecord {
    fn from_applicant(applicant: &Applicant) -> Self {
        Self {
            applicant_id: applicant.id.0.clone(),
            name: applicant.name.clone(),
            need_level: applicant.need_level.clone(),
            score: applicant.score_raw,
            requested: applicant.requested,
            awarded: applicant.awarded,
            priority: applicant.priority,
        }
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.applicant_id),
            None => self.applicant_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IneligibleRecord {
    pub applicant_id: String,
    pub name: Option<String>,
    pub need_level: String,
    pub score: f64,
    pub requested: f64,
    pub reason: String,
}

/// The marginal applicant: last entry in funding order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastFunded {
    pub priority: f64,
    pub score: f64,
    pub need_level: String,
    pub requested: f64,
}

/// Shape of the awarded amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AwardDistribution {
    pub average_award: f64,
    pub award_p25: f64,
    pub award_p50: f64,
    pub award_p75: f64,
    pub award_to_request_avg: f64,
    pub min_awarded: f64,
    pub max_awarded: f64,
}

/// Immutable snapshot of one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub generated_at: DateTime<Utc>,
    pub budget: f64,
    pub budget_used: f64,
    pub budget_left: f64,
    pub budget_required_full: f64,
    pub budget_shortfall: f64,
    pub applicants: usize,
    pub eligible_count: usize,
    pub awarded_count: usize,
    pub ineligible_count: usize,
    pub eligible_unfunded_count: usize,
    pub eligible_unfunded_amount: f64,
    pub eligible_requested_total: f64,
    pub fully_funded_count: usize,
    pub partially_funded_count: usize,
    pub funding_gap_total: f64,
    pub coverage_rate: f64,
    pub full_funding_rate: f64,
    #[serde(flatten)]
    pub distribution: AwardDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_funded: Option<LastFunded>,
    pub need_coverage: BTreeMap<NeedTier, NeedCoverage>,
    pub ineligible_reasons: BTreeMap<String, usize>,
    pub awards: Vec<AwardRecord>,
    pub unfunded: Vec<AwardRecord>,
    pub ineligible: Vec<IneligibleRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenario_results: Vec<ScenarioResult>,
}

impl AllocationSummary {
    pub(crate) fn with_scenarios(self, scenario_results: Vec<ScenarioResult>) -> Self {
        Self {
            scenario_results,
            ..self
        }
    }

    /// Reasons ordered by descending count, then alphabetically.
    pub fn ranked_ineligible_reasons(&self) -> Vec<(&str, usize)> {
        let mut reasons: Vec<(&str, usize)> = self
            .ineligible_reasons
            .iter()
            .map(|(reason, count)| (reason.as_str(), *count))
            .collect();
        reasons.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        reasons
    }

    pub fn coverage_for(&self, tier: NeedTier) -> NeedCoverage {
        self.need_coverage.get(&tier).cloned().unwrap_or_default()
    }
}

/// Counts and totals shared by the full summary and scenario results.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FundingTotals {
    pub eligible_count: usize,
    pub ineligible_count: usize,
    pub unfunded_count: usize,
    pub unfunded_amount: f64,
    pub eligible_requested: f64,
    pub fully_funded: usize,
    pub partially_funded: usize,
    pub budget_used: f64,
    pub awarded_count: usize,
    pub award_to_request_avg: f64,
}

impl FundingTotals {
    pub fn collect(applicants: &[Applicant], funded: &[usize]) -> Self {
        let mut totals = Self::default();

        for applicant in applicants {
            if !applicant.eligible {
                totals.ineligible_count += 1;
                continue;
            }
            totals.eligible_count += 1;
            totals.eligible_requested += applicant.requested;
            if !applicant.is_funded() {
                totals.unfunded_count += 1;
                totals.unfunded_amount += applicant.requested;
            } else if applicant.is_fully_funded() {
                totals.fully_funded += 1;
            } else {
                totals.partially_funded += 1;
            }
        }

        let mut ratios = Vec::with_capacity(funded.len());
        for applicant in funded.iter().map(|index| &applicants[*index]) {
            totals.budget_used += applicant.awarded;
            if applicant.requested > 0.0 {
                ratios.push(applicant.awarded / applicant.requested);
            }
        }
        totals.awarded_count = funded.len();
        totals.award_to_request_avg = average(&ratios);
        totals
    }

    pub fn average_award(&self) -> f64 {
        ratio(self.budget_used, self.awarded_count as f64)
    }

    pub fn coverage_rate(&self) -> f64 {
        ratio(self.budget_used, self.eligible_requested)
    }

    pub fn full_funding_rate(&self) -> f64 {
        ratio(self.fully_funded as f64, self.eligible_count as f64)
    }

    pub fn funding_gap(&self) -> f64 {
        (self.eligible_requested - self.budget_used).max(0.0)
    }
}

/// Build the summary from the ranked applicants and the funding-order index list.
pub fn summarize(applicants: &[Applicant], funded: &[usize], budget: f64) -> AllocationSummary {
    let totals = FundingTotals::collect(applicants, funded);
    let awarded: Vec<&Applicant> = funded.iter().map(|index| &applicants[*index]).collect();

    let amounts: Vec<f64> = awarded.iter().map(|applicant| applicant.awarded).collect();
    let distribution = AwardDistribution {
        average_award: totals.average_award(),
        award_p25: percentile(&amounts, 0.25),
        award_p50: percentile(&amounts, 0.50),
        award_p75: percentile(&amounts, 0.75),
        award_to_request_avg: totals.award_to_request_avg,
        min_awarded: min_value(&amounts),
        max_awarded: max_value(&amounts),
    };

    let last_funded = awarded.last().map(|applicant| LastFunded {
        priority: applicant.priority,
        score: applicant.score_raw,
        need_level: applicant.need_level.clone(),
        requested: applicant.requested,
    });

    let mut ineligible_reasons = BTreeMap::new();
    for applicant in applicants.iter().filter(|applicant| !applicant.eligible) {
        if let Some(reason) = &applicant.eligibility_reason {
            *ineligible_reasons.entry(reason.clone()).or_insert(0) += 1;
        }
    }

    AllocationSummary {
        generated_at: Utc::now(),
        budget,
        budget_used: totals.budget_used,
        budget_left: budget - totals.budget_used,
        budget_required_full: totals.eligible_requested,
        budget_shortfall: (totals.eligible_requested - budget).max(0.0),
        applicants: applicants.len(),
        eligible_count: totals.eligible_count,
        awarded_count: totals.awarded_count,
        ineligible_count: totals.ineligible_count,
        eligible_unfunded_count: totals.unfunded_count,
        eligible_unfunded_amount: totals.unfunded_amount,
        eligible_requested_total: totals.eligible_requested,
        fully_funded_count: totals.fully_funded,
        partially_funded_count: totals.partially_funded,
        funding_gap_total: totals.funding_gap(),
        coverage_rate: totals.coverage_rate(),
        full_funding_rate: totals.full_funding_rate(),
        distribution,
        last_funded,
        need_coverage: need_coverage(applicants, totals.eligible_requested, totals.budget_used),
        ineligible_reasons,
        awards: awarded
            .iter()
            .map(|applicant| AwardRecord::from_applicant(applicant))
            .collect(),
        unfunded: applicants
            .iter()
            .filter(|applicant| applicant.eligible && !applicant.is_funded())
            .map(AwardRecord::from_applicant)
            .collect(),
        ineligible: applicants
            .iter()
            .filter(|applicant| !applicant.eligible)
            .map(|applicant| IneligibleRecord {
                applicant_id: applicant.id.0.clone(),
                name: applicant.name.clone(),
                need_level: applicant.need_level.clone(),
                score: applicant.score_raw,
                requested: applicant.requested,
                reason: applicant.eligibility_reason.clone().unwrap_or_default(),
            })
            .collect(),
        scenario_results: Vec::new(),
    }
}

fn need_coverage(
    applicants: &[Applicant],
    eligible_requested: f64,
    budget_used: f64,
) -> BTreeMap<NeedTier, NeedCoverage> {
    let mut coverage: BTreeMap<NeedTier, NeedCoverage> = NeedTier::ordered()
        .into_iter()
        .map(|tier| (tier, NeedCoverage::default()))
        .collect();

    for applicant in applicants.iter().filter(|applicant| applicant.eligible) {
        let Some(tier) = applicant.need_tier else {
            continue;
        };
        let entry = coverage.entry(tier).or_default();
        entry.eligible_count += 1;
        entry.requested_total += applicant.requested;
        if applicant.is_funded() {
            entry.awarded_count += 1;
            entry.awarded_total += applicant.awarded;
        } else {
            entry.unfunded_count += 1;
            entry.unfunded_requested += applicant.requested;
        }
    }

    for entry in coverage.values_mut() {
        entry.coverage_rate = ratio(entry.awarded_total, entry.requested_total);
        entry.requested_share = ratio(entry.requested_total, eligible_requested);
        entry.awarded_share = ratio(entry.awarded_total, budget_used);
        entry.share_delta = entry.awarded_share - entry.requested_share;
    }

    coverage
}

/// Nearest-rank percentile: sort ascending, take index `ceil(p * n) - 1` clamped into bounds.
/// `p <= 0` yields the minimum and `p >= 1` the maximum; an empty slice yields 0.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    if p <= 0.0 {
        return min_value(values);
    }
    if p >= 1.0 {
        return max_value(values);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = (p * sorted.len() as f64).ceil() as usize;
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[index]
}

pub(crate) fn average(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}

fn min_value(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
