//! Budget-constrained award allocation.
//!
//! Stages run in a fixed order: eligibility, score normalization, priority blending, ranking,
//! reserve and residual funding passes, then summarization. Scenario runs replay the funding
//! passes on copies of the ranked applicants.

mod allocator;
mod award;
pub mod domain;
mod eligibility;
pub mod report;
mod scenario;
mod scoring;
mod summary;

#[cfg(test)]
mod tests;

pub use allocator::{allocate_budget, Allocation, FundingStage, PassOutcome};
pub use award::compute_award;
pub use domain::{Applicant, ApplicantId, NeedTier};
pub use eligibility::{
    REASON_INVALID_NEED_TIER, REASON_NON_POSITIVE_REQUEST, REASON_SCORE_BELOW_MINIMUM,
};
pub use scenario::{run_scenario, run_scenarios, ScenarioResult};
pub use summary::{
    percentile, summarize, AllocationSummary, AwardDistribution, AwardRecord, IneligibleRecord,
    LastFunded, NeedCoverage,
};

use crate::config::{AllocationConfig, ConfigError};
use tracing::info;

/// Runs the full pipeline against a validated configuration.
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    config: AllocationConfig,
}

impl AllocationEngine {
    /// Validate up front so a bad configuration never reaches allocation.
    pub fn new(config: AllocationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Score and rank in place. Eligibility is applied here and nowhere else.
    pub fn rank(&self, applicants: &mut [Applicant]) {
        eligibility::apply_eligibility(applicants, self.config.min_score);
        scoring::normalize_scores(applicants);
        scoring::assign_priority(applicants, &self.config.weights);
        scoring::rank(applicants);
    }

    pub fn run(&self, mut applicants: Vec<Applicant>) -> AllocationRun {
        let config = &self.config;
        info!(
            applicants = applicants.len(),
            budget = config.budget,
            "starting allocation run"
        );

        self.rank(&mut applicants);
        let allocation =
            allocate_budget(&mut applicants, config.budget, &config.limits, &config.reserves);

        let mut summary = summarize(&applicants, &allocation.funded, config.budget);
        if !config.scenario_budgets.is_empty() {
            let results = run_scenarios(
                &applicants,
                &config.scenario_budgets,
                &config.limits,
                &config.reserves,
            );
            summary = summary.with_scenarios(results);
        }

        info!(
            eligible = summary.eligible_count,
            awarded = summary.awarded_count,
            budget_used = summary.budget_used,
            scenarios = summary.scenario_results.len(),
            "allocation run complete"
        );

        AllocationRun {
            applicants,
            funded: allocation.funded,
            passes: allocation.passes,
            summary,
        }
    }
}

/// Output of one run: ranked applicants with final awards, funding order, and the summary.
#[derive(Debug, Clone)]
pub struct AllocationRun {
    pub applicants: Vec<Applicant>,
    pub funded: Vec<usize>,
    pub passes: Vec<PassOutcome>,
    pub summary: AllocationSummary,
}

impl AllocationRun {
    /// Funded applicants in the order awards were made.
    pub fn awarded(&self) -> impl Iterator<Item = &Applicant> + '_ {
        self.funded.iter().map(|index| &self.applicants[*index])
    }

    pub fn total_awarded(&self) -> f64 {
        self.awarded().map(|applicant| applicant.awarded).sum()
    }
}
