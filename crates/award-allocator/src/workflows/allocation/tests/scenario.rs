use super::common::*;
use crate::config::ReserveShares;
use crate::workflows::allocation::{run_scenario, run_scenarios};

#[test]
fn scenarios_are_attached_in_requested_order() {
    let mut config = config(10_000.0);
    config.scenario_budgets = vec![20_000.0, 5_000.0, 10_000.0];

    let run = engine(config).run(cohort());
    let results = &run.summary.scenario_results;

    let budgets: Vec<f64> = results.iter().map(|result| result.budget).collect();
    assert_eq!(budgets, vec![20_000.0, 5_000.0, 10_000.0]);

    let matching = &results[2];
    approx(matching.budget_used, run.summary.budget_used);
    assert_eq!(matching.awarded_count, run.summary.awarded_count);
    approx(matching.coverage_rate, run.summary.coverage_rate);
    approx(matching.funding_gap_total, run.summary.funding_gap_total);
    approx(
        matching.award_to_request_avg,
        run.summary.distribution.award_to_request_avg,
    );
}

#[test]
fn scenarios_never_touch_live_awards() {
    let mut config = config(10_000.0);
    config.scenario_budgets = vec![50_000.0, 1_000.0];
    let with_scenarios = engine(config.clone()).run(cohort());
    config.scenario_budgets.clear();
    let without = engine(config).run(cohort());

    let awarded = |applicants: &[crate::workflows::allocation::Applicant]| -> Vec<f64> {
        applicants.iter().map(|applicant| applicant.awarded).collect()
    };
    assert_eq!(
        awarded(&with_scenarios.applicants),
        awarded(&without.applicants)
    );
}

#[test]
fn run_scenario_reads_ranked_slice_without_mutation() {
    let run = engine(config(10_000.0)).run(cohort());
    let before = run.applicants.clone();

    let result = run_scenario(
        &run.applicants,
        2_000.0,
        &run_limits(),
        &ReserveShares::default(),
    );

    assert_eq!(run.applicants, before);
    assert_eq!(result.awarded_count, 1);
    approx(result.budget_used, 2_000.0);
    approx(result.budget_left, 0.0);
    assert_eq!(result.partially_funded_count, 1);
}

#[test]
fn larger_budget_funds_everyone() {
    let run = engine(config(1_000.0)).run(cohort());

    let result = run_scenario(
        &run.applicants,
        100_000.0,
        &run_limits(),
        &ReserveShares::default(),
    );

    // a5 asks 6000 but the 5000 ceiling applies.
    assert_eq!(result.awarded_count, 7);
    assert_eq!(result.eligible_unfunded_count, 0);
    assert_eq!(result.fully_funded_count, 6);
    assert_eq!(result.partially_funded_count, 1);
    approx(result.budget_used, 18_500.0);
    approx(result.funding_gap_total, 1_000.0);
}

#[test]
fn scenario_results_grow_with_budget() {
    let run = engine(config(1_000.0)).run(cohort());
    let budgets: Vec<f64> = (1..=20).map(|step| step as f64 * 1_000.0).collect();

    let results = run_scenarios(
        &run.applicants,
        &budgets,
        &run_limits(),
        &ReserveShares::default(),
    );

    for pair in results.windows(2) {
        assert!(pair[1].awarded_count >= pair[0].awarded_count);
        assert!(pair[1].coverage_rate + 1e-12 >= pair[0].coverage_rate);
    }
}

fn run_limits() -> crate::config::AwardLimits {
    config(1.0).limits
}
