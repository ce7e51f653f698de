//! Rendered and exported views of an allocation summary.

pub mod export;
pub mod format;
pub mod markdown;

pub use export::{
    write_artifact, write_awards_csv, write_ineligible_csv, write_summary_json,
    write_unfunded_csv, Artifact,
};
pub use markdown::write_markdown;

/// How many rows of a ranked listing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingLimit {
    pub top: usize,
    pub show_all: bool,
}

impl ListingLimit {
    pub const fn top(top: usize) -> Self {
        Self {
            top,
            show_all: false,
        }
    }

    pub const fn all() -> Self {
        Self {
            top: 0,
            show_all: true,
        }
    }

    /// A zero limit shows everything.
    pub fn apply<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        if self.show_all || self.top == 0 || self.top >= records.len() {
            records
        } else {
            &records[..self.top]
        }
    }
}

impl Default for ListingLimit {
    fn default() -> Self {
        Self::top(10)
    }
}

/// Listing limits for the awarded and unfunded sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingOptions {
    pub awards: ListingLimit,
    pub unfunded: ListingLimit,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unable to write {}: {source}", .artifact.label())]
    Io {
        artifact: Artifact,
        source: std::io::Error,
    },
    #[error("unable to write {}: {source}", .artifact.label())]
    Csv {
        artifact: Artifact,
        source: csv::Error,
    },
    #[error("unable to encode allocation summary: {0}")]
    Json(#[from] serde_json::Error),
}
