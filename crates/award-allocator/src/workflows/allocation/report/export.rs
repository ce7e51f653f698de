use super::{markdown, ExportError, ListingOptions};
use crate::workflows::allocation::{AllocationSummary, AwardRecord, IneligibleRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const AWARD_HEADERS: [&str; 7] = [
    "applicant_id",
    "name",
    "need_level",
    "score",
    "requested_amount",
    "awarded_amount",
    "priority",
];
const UNFUNDED_HEADERS: [&str; 6] = [
    "applicant_id",
    "name",
    "need_level",
    "score",
    "requested_amount",
    "priority",
];
const INELIGIBLE_HEADERS: [&str; 6] = [
    "applicant_id",
    "name",
    "need_level",
    "score",
    "requested_amount",
    "eligibility_reason",
];

/// Output files a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    SummaryJson,
    AwardsCsv,
    UnfundedCsv,
    IneligibleCsv,
    MarkdownReport,
}

impl Artifact {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SummaryJson => "JSON summary",
            Self::AwardsCsv => "awards CSV",
            Self::UnfundedCsv => "unfunded CSV",
            Self::IneligibleCsv => "ineligible CSV",
            Self::MarkdownReport => "markdown report",
        }
    }
}

pub fn write_artifact(
    path: &Path,
    artifact: Artifact,
    summary: &AllocationSummary,
    listing: &ListingOptions,
) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io { artifact, source };
    let csv_error = |source| ExportError::Csv { artifact, source };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    match artifact {
        Artifact::SummaryJson => write_summary_json(&mut writer, summary)?,
        Artifact::AwardsCsv => {
            write_awards_csv(&mut writer, &summary.awards).map_err(csv_error)?
        }
        Artifact::UnfundedCsv => {
            write_unfunded_csv(&mut writer, &summary.unfunded).map_err(csv_error)?
        }
        Artifact::IneligibleCsv => {
            write_ineligible_csv(&mut writer, &summary.ineligible).map_err(csv_error)?
        }
        Artifact::MarkdownReport => {
            markdown::write_markdown(&mut writer, summary, listing).map_err(io_error)?
        }
    }
    writer.flush().map_err(io_error)?;

    info!(artifact = artifact.label(), path = %path.display(), "wrote allocation output");
    Ok(())
}

pub fn write_summary_json<W: Write>(
    mut writer: W,
    summary: &AllocationSummary,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer
        .write_all(b"\n")
        .map_err(|source| ExportError::Io {
            artifact: Artifact::SummaryJson,
            source,
        })
}

/// Funded applicants in funding order.
pub fn write_awards_csv<W: Write>(writer: W, records: &[AwardRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(AWARD_HEADERS)?;
    for record in records {
        csv_writer.write_record([
            record.applicant_id.clone(),
            record.name.clone().unwrap_or_default(),
            record.need_level.clone(),
            format!("{:.1}", record.score),
            format!("{:.2}", record.requested),
            format!("{:.2}", record.awarded),
            format!("{:.4}", record.priority),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_unfunded_csv<W: Write>(writer: W, records: &[AwardRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(UNFUNDED_HEADERS)?;
    for record in records {
        csv_writer.write_record([
            record.applicant_id.clone(),
            record.name.clone().unwrap_or_default(),
            record.need_level.clone(),
            format!("{:.1}", record.score),
            format!("{:.2}", record.requested),
            format!("{:.4}", record.priority),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_ineligible_csv<W: Write>(
    writer: W,
    records: &[IneligibleRecord],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(INELIGIBLE_HEADERS)?;
    for record in records {
        csv_writer.write_record([
            record.applicant_id.clone(),
            record.name.clone().unwrap_or_default(),
            record.need_level.clone(),
            format!("{:.1}", record.score),
            format!("{:.2}", record.requested),
            record.reason.clone(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
