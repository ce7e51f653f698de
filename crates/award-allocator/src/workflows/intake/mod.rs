//! CSV intake for applicant rosters.

mod normalizer;
mod parser;

use crate::workflows::allocation::Applicant;
use parser::ParsedRow;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read applicant file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required headers: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),
    #[error("no applicants found")]
    NoApplicants,
}

/// Applicants in file order plus the warnings for rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ImportedApplicants {
    pub applicants: Vec<Applicant>,
    pub warnings: Vec<String>,
}

pub struct ApplicantImporter;

impl ApplicantImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportedApplicants, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportedApplicants, IntakeError> {
        let sheet = parser::parse_rows(reader)?;
        if !sheet.missing_headers.is_empty() {
            return Err(IntakeError::MissingHeaders(sheet.missing_headers));
        }

        let mut imported = ImportedApplicants::default();
        let mut seen: HashSet<String> = HashSet::new();

        for row in sheet.rows {
            match row {
                ParsedRow::Applicant { line, applicant } => {
                    if !seen.insert(applicant.id.0.clone()) {
                        let id = &applicant.id;
                        let warning = format!("line {line}: duplicate applicant_id {id}");
                        imported.warnings.push(warning);
                        continue;
                    }
                    imported.applicants.push(applicant);
                }
                ParsedRow::Skipped(warning) => imported.warnings.push(warning),
            }
        }

        for warning in &imported.warnings {
            warn!(%warning, "skipped applicant row");
        }
        if imported.applicants.is_empty() {
            return Err(IntakeError::NoApplicants);
        }

        info!(
            applicants = imported.applicants.len(),
            skipped = imported.warnings.len(),
            "loaded applicant roster"
        );
        Ok(imported)
    }
}
