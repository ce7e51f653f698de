use award_allocator::workflows::allocation::report::format::{
    currency, need_title, percent, signed_percent,
};
use award_allocator::workflows::allocation::report::{ListingLimit, ListingOptions};
use award_allocator::workflows::allocation::{AllocationSummary, AwardRecord, NeedTier};
use std::io::{self, Write};

const REASON_PREVIEW: usize = 3;

pub(crate) fn write_warnings<W: Write>(out: &mut W, warnings: &[String]) -> io::Result<()> {
    if warnings.is_empty() {
        return Ok(());
    }

    writeln!(out, "Warnings:")?;
    for warning in warnings {
        writeln!(out, "- {warning}")?;
    }
    writeln!(out)
}

pub(crate) fn write_console<W: Write>(
    out: &mut W,
    summary: &AllocationSummary,
    listing: &ListingOptions,
) -> io::Result<()> {
    write_overview(out, summary)?;
    write_ineligible_reasons(out, summary)?;
    write_by_need(out, summary)?;
    write_need_coverage(out, summary)?;
    write_need_equity(out, summary)?;
    write_unfunded_by_need(out, summary)?;
    write_scenarios(out, summary)?;
    write_awards(out, &summary.awards, listing.awards)?;
    write_unfunded(out, &summary.unfunded, listing.unfunded)
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{title}")?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

fn write_overview<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    let distribution = &summary.distribution;

    writeln!(out, "Award Allocation Summary")?;
    writeln!(out, "{}", "-".repeat(26))?;
    writeln!(out, "Applicants:   {}", summary.applicants)?;
    writeln!(out, "Eligible:     {}", summary.eligible_count)?;
    writeln!(out, "Awarded:      {}", summary.awarded_count)?;
    writeln!(out, "Ineligible:   {}", summary.ineligible_count)?;
    writeln!(
        out,
        "Eligible Unfunded: {} ({} requested)",
        summary.eligible_unfunded_count,
        currency(summary.eligible_unfunded_amount)
    )?;
    writeln!(
        out,
        "Eligible Requested: {}",
        currency(summary.eligible_requested_total)
    )?;
    writeln!(
        out,
        "Budget Required (Full Funding): {}",
        currency(summary.budget_required_full)
    )?;
    writeln!(out, "Budget Shortfall: {}", currency(summary.budget_shortfall))?;
    writeln!(out, "Coverage Rate: {}", percent(summary.coverage_rate))?;
    writeln!(
        out,
        "Fully Funded: {} ({} of eligible)",
        summary.fully_funded_count,
        percent(summary.full_funding_rate)
    )?;
    writeln!(out, "Partially Funded: {}", summary.partially_funded_count)?;
    writeln!(out, "Funding Gap:  {}", currency(summary.funding_gap_total))?;
    writeln!(out, "Budget Used:  {}", currency(summary.budget_used))?;
    writeln!(out, "Budget Left:  {}", currency(summary.budget_left))?;
    writeln!(out, "Average Award {}", currency(distribution.average_award))?;
    writeln!(
        out,
        "Award Percentiles: P25 {} | P50 {} | P75 {}",
        currency(distribution.award_p25),
        currency(distribution.award_p50),
        currency(distribution.award_p75)
    )?;
    writeln!(
        out,
        "Avg Award/Request: {}",
        percent(distribution.award_to_request_avg)
    )?;
    writeln!(
        out,
        "Award Range:  {} - {}",
        currency(distribution.min_awarded),
        currency(distribution.max_awarded)
    )?;
    if let Some(last) = &summary.last_funded {
        writeln!(
            out,
            "Last Funded Cutoff: {:.2} priority | {:.1} score | {} need | {} requested",
            last.priority,
            last.score,
            need_title(&last.need_level),
            currency(last.requested)
        )?;
    }
    Ok(())
}

fn write_ineligible_reasons<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    let reasons = summary.ranked_ineligible_reasons();
    if reasons.is_empty() {
        return Ok(());
    }

    heading(out, "Ineligible Reasons")?;
    for (reason, count) in reasons.iter().take(REASON_PREVIEW) {
        writeln!(out, "{reason}: {count}")?;
    }
    if reasons.len() > REASON_PREVIEW {
        writeln!(out, "... {} more", reasons.len() - REASON_PREVIEW)?;
    }
    Ok(())
}

fn write_by_need<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    heading(out, "By Need Level")?;
    for tier in NeedTier::ordered() {
        let coverage = summary.coverage_for(tier);
        writeln!(
            out,
            "{}: {} awarded ({})",
            tier.label(),
            coverage.awarded_count,
            currency(coverage.awarded_total)
        )?;
    }
    Ok(())
}

fn write_need_coverage<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    heading(out, "Need Coverage")?;
    for tier in NeedTier::ordered() {
        let coverage = summary.coverage_for(tier);
        writeln!(
            out,
            "{}: {} eligible | {} awarded | {} unfunded | {} requested | {} awarded | {} coverage",
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
    heading(out, "Need Equity (Requested vs Awarded Share)")?;
    for tier in NeedTier::ordered() {
        let coverage = summary.coverage_for(tier);
        writeln!(
            out,
            "{}: {} requested | {} awarded | {} delta",
            tier.label(),
            percent(coverage.requested_share),
            percent(coverage.awarded_share),
            signed_percent(coverage.share_delta)
        )?;
    }
    Ok(())
}

fn write_unfunded_by_need<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    heading(out, "Unfunded By Need Level")?;
    for tier in NeedTier::ordered() {
        let coverage = summary.coverage_for(tier);
        writeln!(
            out,
            "{}: {} unfunded ({} requested)",
            tier.label(),
            coverage.unfunded_count,
            currency(coverage.unfunded_requested)
        )?;
    }
    Ok(())
}

fn write_scenarios<W: Write>(out: &mut W, summary: &AllocationSummary) -> io::Result<()> {
    if summary.scenario_results.is_empty() {
        return Ok(());
    }

    heading(out, "Scenario Analysis")?;
    writeln!(
        out,
        "{:<12} | {:<7} | {:<8} | {:<9} | {:<11} | {:<11} | {:<11}",
        "Budget", "Awarded", "Unfunded", "Coverage", "Full Funded", "Budget Used", "Budget Left"
    )?;
    for result in &summary.scenario_results {
        writeln!(
            out,
            "{:<12} | {:<7} | {:<8} | {:<9} | {:<11} | {:<11} | {:<11}",
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

fn write_awards<W: Write>(
    out: &mut W,
    records: &[AwardRecord],
    limit: ListingLimit,
) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "\nNo awards allocated.");
    }

    heading(out, "Awarded Applicants")?;
    let rows = limit.apply(records);
    for (index, record) in rows.iter().enumerate() {
        writeln!(
            out,
            "{}. {} | Need: {} | Score: {:.1} | Requested: {} | Awarded: {} | Priority: {:.2}",
            index + 1,
            record.label(),
            need_title(&record.need_level),
            record.score,
            currency(record.requested),
            currency(record.awarded),
            record.priority
        )?;
    }
    more_line(out, rows.len(), records.len())
}

fn write_unfunded<W: Write>(
    out: &mut W,
    records: &[AwardRecord],
    limit: ListingLimit,
) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "\nNo eligible unfunded applicants.");
    }

    heading(out, "Unfunded Eligible Applicants")?;
    let rows = limit.apply(records);
    for (index, record) in rows.iter().enumerate() {
        writeln!(
            out,
            "{}. {} | Need: {} | Score: {:.1} | Requested: {} | Priority: {:.2}",
            index + 1,
            record.label(),
            need_title(&record.need_level),
            record.score,
            currency(record.requested),
            record.priority
        )?;
    }
    more_line(out, rows.len(), records.len())
}

fn more_line<W: Write>(out: &mut W, shown: usize, total: usize) -> io::Result<()> {
    if shown < total {
        writeln!(out, "... {} more", total - shown)?;
    }
    Ok(())
}
