use crate::config::{AllocationConfig, AwardLimits, PriorityWeights, ReserveShares};
use crate::workflows::allocation::{Applicant, AllocationEngine};

pub(super) fn applicant(id: &str, need: &str, score: f64, requested: f64) -> Applicant {
    Applicant::new(id, Some(format!("Applicant {id}")), need, score, requested)
}

pub(super) fn cohort() -> Vec<Applicant> {
    vec![
        applicant("a1", "high", 95.0, 3000.0),
        applicant("a2", "medium", 88.0, 2500.0),
        applicant("a3", "low", 91.0, 4000.0),
        applicant("a4", "high", 72.0, 1200.0),
        applicant("a5", "medium", 64.0, 6000.0),
        applicant("a6", "low", 55.0, 800.0),
        applicant("a7", "high", 40.0, 2000.0),
        applicant("a8", "critical", 99.0, 1500.0),
        applicant("a9", "medium", 81.0, 0.0),
    ]
}

pub(super) fn config(budget: f64) -> AllocationConfig {
    AllocationConfig {
        budget,
        limits: AwardLimits {
            min_award: 500.0,
            max_award: 5000.0,
            round_to: 0.0,
            max_percent: 1.0,
        },
        weights: PriorityWeights {
            score: 0.7,
            need: 0.3,
        },
        reserves: ReserveShares::default(),
        min_score: 0.0,
        scenario_budgets: Vec::new(),
    }
}

pub(super) fn engine(config: AllocationConfig) -> AllocationEngine {
    AllocationEngine::new(config).expect("valid allocation config")
}

pub(super) fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9,
        "expected {expected}, got {actual}"
    );
}
