use super::domain::{Applicant, NeedTier};
use crate::config::{AwardLimits, ReserveShares};
use serde::Serialize;
use tracing::debug;

/// Which applicants a funding pass may consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tier")]
pub enum FundingStage {
    Reserve(NeedTier),
    Residual,
}

impl FundingStage {
    fn admits(self, applicant: &Applicant) -> bool {
        if !applicant.eligible || applicant.awarded != 0.0 {
            return false;
        }
        match self {
            Self::Reserve(tier) => applicant.need_tier == Some(tier),
            Self::Residual => true,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Reserve(tier) => format!("{} reserve", tier.label()),
            Self::Residual => "Residual".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StageBudget {
    Fixed(f64),
    /// Total budget less whatever earlier passes actually spent.
    Remaining,
}

/// Bookkeeping for one completed pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassOutcome {
    pub stage: FundingStage,
    pub sub_budget: f64,
    pub spent: f64,
    pub funded: usize,
}

/// Result of running every pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    /// Indices into the ranked slice, in the order awards were made.
    pub funded: Vec<usize>,
    pub passes: Vec<PassOutcome>,
}

impl Allocation {
    pub fn total_spent(&self) -> f64 {
        self.passes.iter().map(|pass| pass.spent).sum()
    }
}

fn funding_plan(budget: f64, reserves: &ReserveShares) -> Vec<(FundingStage, StageBudget)> {
    let mut plan: Vec<(FundingStage, StageBudget)> = NeedTier::ordered()
        .into_iter()
        .filter_map(|tier| {
            let reserved = budget * reserves.share(tier);
            (reserved > 0.0).then_some((FundingStage::Reserve(tier), StageBudget::Fixed(reserved)))
        })
        .collect();
    plan.push((FundingStage::Residual, StageBudget::Remaining));
    plan
}

/// Distribute `budget` over an already ranked slice: reserve passes in tier order, then one
/// residual pass over everyone still unfunded. Writes `awarded` on each funded applicant.
pub fn allocate_budget(
    applicants: &mut [Applicant],
    budget: f64,
    limits: &AwardLimits,
    reserves: &ReserveShares,
) -> Allocation {
    let mut allocation = Allocation::default();
    let mut spent_total = 0.0;

    for (stage, stage_budget) in funding_plan(budget, reserves) {
        let sub_budget = match stage_budget {
            StageBudget::Fixed(amount) => amount.min((budget - spent_total).max(0.0)),
            StageBudget::Remaining => (budget - spent_total).max(0.0),
        };

        let before = allocation.funded.len();
        let spent = run_pass(applicants, stage, sub_budget, limits, &mut allocation.funded);
        spent_total += spent;

        let outcome = PassOutcome {
            stage,
            sub_budget,
            spent,
            funded: allocation.funded.len() - before,
        };
        debug!(
            stage = %stage.label(),
            sub_budget,
            spent,
            funded = outcome.funded,
            "funding pass complete"
        );
        allocation.passes.push(outcome);
    }

    allocation
}

fn run_pass(
    applicants: &mut [Applicant],
    stage: FundingStage,
    sub_budget: f64,
    limits: &AwardLimits,
    funded: &mut Vec<usize>,
) -> f64 {
    let mut remaining = sub_budget;

    for (index, applicant) in applicants.iter_mut().enumerate() {
        if remaining <= 0.0 {
            break;
        }
        if !stage.admits(applicant) {
            continue;
        }

        let mut award = limits.award_for(applicant.requested);
        if award <= 0.0 {
            continue;
        }
        if award > remaining {
            // Never hand out a sub-floor remainder; only the last award of a pass is partial.
            if remaining < limits.min_award {
                break;
            }
            award = remaining;
        }

        applicant.awarded = award;
        remaining -= award;
        funded.push(index);
    }

    sub_budget - remaining
}
