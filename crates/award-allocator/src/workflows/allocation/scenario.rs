use super::allocator::allocate_budget;
use super::domain::Applicant;
use super::summary::FundingTotals;
use crate::config::{AwardLimits, ReserveShares};
use serde::Serialize;

/// Budget and coverage figures for one alternate budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub budget: f64,
    pub budget_used: f64,
    pub budget_left: f64,
    pub budget_required_full: f64,
    pub awarded_count: usize,
    pub eligible_count: usize,
    pub eligible_unfunded_count: usize,
    pub fully_funded_count: usize,
    pub partially_funded_count: usize,
    pub coverage_rate: f64,
    pub full_funding_rate: f64,
    pub funding_gap_total: f64,
    pub average_award: f64,
    pub award_to_request_avg: f64,
}

/// Re-run allocation against each budget on a fresh copy of the ranked applicants.
/// `ranked` is only read; results come back in the order of `budgets`.
pub fn run_scenarios(
    ranked: &[Applicant],
    budgets: &[f64],
    limits: &AwardLimits,
    reserves: &ReserveShares,
) -> Vec<ScenarioResult> {
    budgets
        .iter()
        .map(|budget| run_scenario(ranked, *budget, limits, reserves))
        .collect()
}

pub fn run_scenario(
    ranked: &[Applicant],
    budget: f64,
    limits: &AwardLimits,
    reserves: &ReserveShares,
) -> ScenarioResult {
    let mut copy: Vec<Applicant> = ranked.iter().map(Applicant::unfunded_copy).collect();
    let allocation = allocate_budget(&mut copy, budget, limits, reserves);
    let totals = FundingTotals::collect(&copy, &allocation.funded);

    ScenarioResult {
        budget,
        budget_used: totals.budget_used,
        budget_left: budget - totals.budget_used,
        budget_required_full: totals.eligible_requested,
        awarded_count: totals.awarded_count,
        eligible_count: totals.eligible_count,
        eligible_unfunded_count: totals.unfunded_count,
        fully_funded_count: totals.fully_funded,
        partially_funded_count: totals.partially_funded,
        coverage_rate: totals.coverage_rate(),
        full_funding_rate: totals.full_funding_rate(),
        funding_gap_total: totals.funding_gap(),
        average_award: totals.average_award(),
        award_to_request_avg: totals.award_to_request_avg,
    }
}
