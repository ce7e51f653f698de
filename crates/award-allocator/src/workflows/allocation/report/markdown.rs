use super::format::{currency, need_title, percent, signed_percent};
use super::ListingOptions;
use crate::workflows::allocation::{AllocationSummary, NeedTier};
use chrono::SecondsFormat;
use std::io::{self, Write};

pub fn write_markdown<W: Write>(
    out: &mut W,
    summary: &AllocationSummary,
    listing: &ListingOptions,
) -> io::Result<()> {
    writeln!(out, "# Award Allocation Report")?;
    writeln!(out)?;
    writeln!(
        out,
        "Generated: {}",
        summary
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;

    write_budget(out, summary)?;
    write_eligibility(out, summary)?;
    write_awards(out, summary, listing)?;
    write_unfunded(out, summary, listing)?;
    write_need_coverage(out, summary)?;
    write_need_equity(out, summary)?;
    write_scenarios(out, summary)?;
    write_ineligible_reasons(out, summary)
}

fn write_budget<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    writeln!(out, "\n## Budget")?;
    writeln!(out, "- Budget: {}", currency(summary.budget))?;
    writeln!(out, "- Budget used: {}", currency(summary.budget_used))?;
    writeln!(out, "- Budget left: {}", currency(summary.budget_left))?;
    writeln!(
        out,
        "- Budget required (full funding): {}",
        currency(summary.budget_required_full)
    )?;
    writeln!(out, "- Budget shortfall: {}", currency(summary.budget_shortfall))
}

fn write_eligibility<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    let distribution = &summary.distribution;

    writeln!(out, "\n## Eligibility")?;
    writeln!(out, "- Applicants: {}", summary.applicants)?;
    writeln!(out, "- Eligible: {}", summary.eligible_count)?;
    writeln!(out, "- Awarded: {}", summary.awarded_count)?;
    writeln!(out, "- Ineligible: {}", summary.ineligible_count)?;
    writeln!(
        out,
        "- Eligible unfunded: {} ({} requested)",
        summary.eligible_unfunded_count,
        currency(summary.eligible_unfunded_amount)
    )?;
    writeln!(
        out,
        "- Eligible requested: {}",
        currency(summary.eligible_requested_total)
    )?;
    writeln!(out, "- Coverage rate: {}", percent(summary.coverage_rate))?;
    writeln!(
        out,
        "- Fully funded: {} ({} of eligible)",
        summary.fully_funded_count,
        percent(summary.full_funding_rate)
    )?;
    writeln!(out, "- Partially funded: {}", summary.partially_funded_count)?;
    writeln!(out, "- Funding gap: {}", currency(summary.funding_gap_total))?;
    writeln!(out, "- Average award: {}", currency(distribution.average_award))?;
    writeln!(
        out,
        "- Award percentiles: P25 {} | P50 {} | P75 {}",
        currency(distribution.award_p25),
        currency(distribution.award_p50),
        currency(distribution.award_p75)
    )?;
    writeln!(
        out,
        "- Avg award/request: {}",
        percent(distribution.award_to_request_avg)
    )?;
    writeln!(
        out,
        "- Award range: {} - {}",
        currency(distribution.min_awarded),
        currency(distribution.max_awarded)
    )?;

    if let Some(last) = &summary.last_funded {
        writeln!(
            out,
            "- Last funded cutoff: {:.2} priority | {:.1} score | {} need | {} requested",
            last.priority,
            last.score,
            need_title(&last.need_level),
            currency(last.requested)
        )?;
    }
    Ok(())
}

fn write_awards<W: Write>(
    out: &mut W,
    summary: &AllocationSummary,
    listing: &ListingOptions,
) -> io::Result<()> {
    writeln!(out, "\n## Awards")?;
    let rows = listing.awards.apply(&summary.awards);
    if rows.is_empty() {
        return writeln!(out, "_No awards allocated._");
    }

    writeln!(
        out,
        "| Rank | Applicant | Need | Score | Requested | Awarded | Priority |"
    )?;
    writeln!(out, "| --- | --- | --- | --- | --- | --- | --- |")?;
    for (index, record) in rows.iter().enumerate() {
        writeln!(
            out,
            "| {} | {} | {} | {:.1} | {} | {} | {:.2} |",
            index + 1,
            record.label(),
            need_title(&record.need_level),
            record.score,
            currency(record.requested),
            currency(record.awarded),
            record.priority
        )?;
    }
    if rows.len() < summary.awards.len() {
        writeln!(
            out,
            "\n_Showing top {} of {} awards._",
            rows.len(),
            summary.awards.len()
        )?;
    }
    Ok(())
}

fn write_unfunded<W: Write>(
    out: &mut W,
    summary: &AllocationSummary,
    listing: &ListingOptions,
) -> io::Result<()> {
    writeln!(out, "\n## Unfunded Eligible Applicants")?;
    let rows = listing.unfunded.apply(&summary.unfunded);
    if rows.is_empty() {
        return writeln!(out, "_No eligible unfunded applicants._");
    }

    writeln!(out, "| Rank | Applicant | Need | Score | Requested | Priority |")?;
    writeln!(out, "| --- | --- | --- | --- | --- | --- |")?;
    for (index, record) in rows.iter().enumerate() {
        writeln!(
            out,
            "| {} | {} | {} | {:.1} | {} | {:.2} |",
            index + 1,
            record.label(),
            need_title(&record.need_level),
            record.score,
            currency(record.requested),
            record.priority
        )?;
    }
    if rows.len() < summary.unfunded.len() {
        writeln!(
            out,
            "\n_Showing top {} of {} unfunded applicants._",
            rows.len(),
            summary.unfunded.len()
        )?;
    }
    Ok(())
}

fn write_need_coverage<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    writeln!(out, "\n## Need Coverage")?;
    writeln!(
        out,
        "| Need Level | Eligible | Awarded | Unfunded | Requested | Awarded Total | Coverage |"
    )?;
    writeln!(out, "| --- | --- | --- | --- | --- | --- | --- |")?;
    for tier in NeedTier::ordered() {
        let coverage = summary.coverage_for(tier);
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            tier.label(),
            coverage.eligible_count,
            coverage.awarded_count,
            coverage.unfunded_count,
            currency(coverage.requested_total),
            currency(coverage.awarded_total),
            percent(coverage.coverage_rate)
        )?;
    }
    Ok(())
}

fn write_need_equity<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    writeln!(out, "\n## Need Equity")?;
    writeln!(out, "| Need Level | Requested Share | Awarded Share | Delta |")?;
    writeln!(out, "| --- | --- | --- | --- |")?;
    for tier in NeedTier::ordered() {
        let coverage = summary.coverage_for(tier);
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            tier.label(),
            percent(coverage.requested_share),
            percent(coverage.awarded_share),
            signed_percent(coverage.share_delta)
        )?;
    }
    Ok(())
}

fn write_scenarios<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    if summary.scenario_results.is_empty() {
        return Ok(());
    }

    writeln!(out, "\n## Scenario Analysis")?;
    writeln!(
        out,
        "| Budget | Awarded | Unfunded | Coverage | Full Funding | Budget Used | Budget Left |"
    )?;
    writeln!(out, "| --- | --- | --- | --- | --- | --- | --- |")?;
    for result in &summary.scenario_results {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            currency(result.budget),
            result.awarded_count,
            result.eligible_unfunded_count,
            percent(result.coverage_rate),
            percent(result.full_funding_rate),
            currency(result.budget_used),
            currency(result.budget_left)
        )?;
    }
    Ok(())
}

fn write_ineligible_reasons<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    let reasons = summary.ranked_ineligible_reasons();
    if reasons.is_empty() {
        return Ok(());
    }

    writeln!(out, "\n## Ineligible Reasons")?;
    for (reason, count) in reasons {
        writeln!(out, "- {reason}: {count}")?;
    }
    Ok(())
}
