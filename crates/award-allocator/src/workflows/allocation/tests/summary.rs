use super::common::*;
use crate::workflows::allocation::{summarize, NeedTier};

#[test]
fn summary_counts_and_totals_for_cohort() {
    let run = engine(config(10_000.0)).run(cohort());
    let summary = &run.summary;

    assert_eq!(summary.applicants, 9);
    assert_eq!(summary.eligible_count, 7);
    assert_eq!(summary.ineligible_count, 2);
    assert_eq!(summary.awarded_count, 4);
    assert_eq!(summary.eligible_unfunded_count, 3);
    approx(summary.eligible_unfunded_amount, 8800.0);
    approx(summary.eligible_requested_total, 19_500.0);
    approx(summary.budget_required_full, 19_500.0);
    approx(summary.budget_used, 10_000.0);
    approx(summary.budget_left, 0.0);
    approx(summary.funding_gap_total, 9500.0);
    approx(summary.budget_shortfall, 9500.0);
    assert_eq!(summary.fully_funded_count, 3);
    assert_eq!(summary.partially_funded_count, 1);
    approx(summary.coverage_rate, 10_000.0 / 19_500.0);
    approx(summary.full_funding_rate, 3.0 / 7.0);
}

#[test]
fn distribution_uses_nearest_rank_percentiles() {
    let run = engine(config(10_000.0)).run(cohort());
    let distribution = &run.summary.distribution;

    approx(distribution.award_p25, 1200.0);
    approx(distribution.award_p50, 2500.0);
    approx(distribution.award_p75, 3000.0);
    approx(distribution.average_award, 2500.0);
    approx(distribution.min_awarded, 1200.0);
    approx(distribution.max_awarded, 3300.0);
    approx(distribution.award_to_request_avg, (3.0 + 3300.0 / 4000.0) / 4.0);
}

#[test]
fn last_funded_reflects_final_award_in_funding_order() {
    let run = engine(config(10_000.0)).run(cohort());
    let last = run.summary.last_funded.as_ref().expect("someone funded");

    assert_eq!(last.need_level, "low");
    approx(last.score, 91.0);
    approx(last.requested, 4000.0);
    approx(last.priority, 0.7 * 91.0 / 99.0);
}

#[test]
fn need_coverage_reports_every_tier_with_equity_delta() {
    let run = engine(config(10_000.0)).run(cohort());
    let summary = &run.summary;

    assert_eq!(summary.need_coverage.len(), 3);

    let high = summary.coverage_for(NeedTier::High);
    assert_eq!(high.eligible_count, 3);
    assert_eq!(high.awarded_count, 2);
    assert_eq!(high.unfunded_count, 1);
    approx(high.requested_total, 6200.0);
    approx(high.awarded_total, 4200.0);
    approx(high.unfunded_requested, 2000.0);
    approx(high.coverage_rate, 4200.0 / 6200.0);
    approx(high.requested_share, 6200.0 / 19_500.0);
    approx(high.awarded_share, 0.42);
    approx(high.share_delta, 0.42 - 6200.0 / 19_500.0);

    let medium = summary.coverage_for(NeedTier::Medium);
    approx(medium.requested_total, 8500.0);
    approx(medium.awarded_total, 2500.0);
    assert!(medium.share_delta < 0.0);

    let low = summary.coverage_for(NeedTier::Low);
    approx(low.awarded_total, 3300.0);

    let delta_sum: f64 = summary
        .need_coverage
        .values()
        .map(|coverage| coverage.share_delta)
        .sum();
    approx(delta_sum, 0.0);
}

#[test]
fn record_lists_follow_funding_and_rank_order() {
    let run = engine(config(10_000.0)).run(cohort());
    let summary = &run.summary;

    let awards: Vec<&str> = summary
        .awards
        .iter()
        .map(|record| record.applicant_id.as_str())
        .collect();
    assert_eq!(awards, vec!["a1", "a4", "a2", "a3"]);

    let unfunded: Vec<&str> = summary
        .unfunded
        .iter()
        .map(|record| record.applicant_id.as_str())
        .collect();
    assert_eq!(unfunded, vec!["a5", "a7", "a6"]);

    let ineligible: Vec<(&str, &str)> = summary
        .ineligible
        .iter()
        .map(|record| (record.applicant_id.as_str(), record.reason.as_str()))
        .collect();
    assert_eq!(
        ineligible,
        vec![
            ("a9", "requested amount must be positive"),
            ("a8", "invalid need tier")
        ]
    );
}

#[test]
fn ineligible_reasons_are_tallied_and_ranked() {
    let mut applicants = cohort();
    applicants.push(applicant("b1", "unknown", 10.0, 500.0));
    let run = engine(config(10_000.0)).run(applicants);

    assert_eq!(
        run.summary.ranked_ineligible_reasons(),
        vec![
            ("invalid need tier", 2),
            ("requested amount must be positive", 1)
        ]
    );
}

#[test]
fn empty_funding_produces_zeroed_statistics() {
    let applicants = vec![
        applicant("x1", "high", 10.0, 100.0),
        applicant("x2", "bogus", 20.0, 100.0),
    ];
    let mut config = config(1000.0);
    config.min_score = 50.0;

    let run = engine(config).run(applicants);
    let summary = &run.summary;

    assert_eq!(summary.eligible_count, 0);
    assert_eq!(summary.awarded_count, 0);
    approx(summary.coverage_rate, 0.0);
    approx(summary.full_funding_rate, 0.0);
    approx(summary.distribution.award_p50, 0.0);
    approx(summary.distribution.average_award, 0.0);
    assert!(summary.last_funded.is_none());
    for coverage in summary.need_coverage.values() {
        approx(coverage.requested_share, 0.0);
        approx(coverage.awarded_share, 0.0);
        approx(coverage.share_delta, 0.0);
    }
}

#[test]
fn summarize_accepts_preset_awards() {
    let mut applicants = vec![
        applicant("1", "high", 90.0, 1000.0),
        applicant("2", "low", 80.0, 500.0),
        applicant("3", "medium", 70.0, 300.0),
        applicant("4", "low", 60.0, 0.0),
    ];
    applicants[0].awarded = 1000.0;
    applicants[2].awarded = 200.0;
    applicants[3].mark_ineligible("requested amount must be positive");

    let summary = summarize(&applicants, &[0, 2], 1500.0);

    assert_eq!(summary.eligible_count, 3);
    assert_eq!(summary.awarded_count, 2);
    assert_eq!(summary.eligible_unfunded_count, 1);
    assert_eq!(summary.ineligible_count, 1);
    assert_eq!(summary.fully_funded_count, 1);
    assert_eq!(summary.partially_funded_count, 1);
    approx(summary.funding_gap_total, 600.0);
    approx(summary.budget_required_full, 1800.0);
    approx(summary.budget_shortfall, 300.0);

    let high = summary.coverage_for(NeedTier::High);
    approx(high.requested_share, 1000.0 / 1800.0);
    approx(high.awarded_share, 1000.0 / 1200.0);
}

#[test]
fn summary_serializes_tier_keys_and_flattened_distribution() {
    let run = engine(config(10_000.0)).run(cohort());
    let value = serde_json::to_value(&run.summary).expect("summary serializes");

    assert!(value["need_coverage"]["high"].is_object());
    assert!(value["need_coverage"]["medium"].is_object());
    assert!(value["need_coverage"]["low"].is_object());
    assert_eq!(value["award_p50"], serde_json::json!(2500.0));
    assert!(value.get("scenario_results").is_none());
}

#[test]
fn funding_predicates_split_full_and_partial_awards() {
    let mut applicants = vec![
        applicant("full", "high", 90.0, 400.0),
        applicant("partial", "low", 80.0, 400.0),
        applicant("none", "low", 70.0, 400.0),
    ];
    applicants[0].awarded = 400.0;
    applicants[1].awarded = 150.0;

    assert!(applicants[0].is_fully_funded());
    assert!(applicants[1].is_funded() && !applicants[1].is_fully_funded());
    assert!(!applicants[2].is_funded() && !applicants[2].is_fully_funded());

    let summary = summarize(&applicants, &[0, 1], 550.0);

    assert_eq!(summary.fully_funded_count, 1);
    assert_eq!(summary.partially_funded_count, 1);
    assert_eq!(summary.eligible_unfunded_count, 1);
}
