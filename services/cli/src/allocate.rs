use crate::render;
use award_allocator::config::{
    parse_budget_list, AllocationConfig, AppConfig, AwardLimits, ConfigError, PriorityWeights,
    ReserveShares,
};
use award_allocator::error::AppError;
use award_allocator::telemetry;
use award_allocator::workflows::allocation::report::{
    write_artifact, Artifact, ListingLimit, ListingOptions,
};
use award_allocator::workflows::allocation::AllocationEngine;
use award_allocator::workflows::intake::ApplicantImporter;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AllocateArgs {
    /// Path to the applicant CSV file
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Total award budget
    #[arg(long)]
    pub(crate) budget: f64,
    /// Minimum award amount
    #[arg(long, default_value_t = 500.0)]
    pub(crate) min: f64,
    /// Maximum award amount
    #[arg(long, default_value_t = 5000.0)]
    pub(crate) max: f64,
    /// Weight for applicant score
    #[arg(long, default_value_t = 0.7)]
    pub(crate) score_weight: f64,
    /// Weight for need level
    #[arg(long, default_value_t = 0.3)]
    pub(crate) need_weight: f64,
    /// Share of budget reserved for high-need applicants (0-1)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) reserve_high: f64,
    /// Share of budget reserved for medium-need applicants (0-1)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) reserve_medium: f64,
    /// Share of budget reserved for low-need applicants (0-1)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) reserve_low: f64,
    /// Round awards to the nearest increment (0 disables)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) round: f64,
    /// Max fraction of the requested amount to award, in (0, 1]
    #[arg(long, default_value_t = 1.0)]
    pub(crate) max_percent: f64,
    /// Minimum applicant score to be eligible
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_score: f64,
    /// Comma-separated budgets for scenario analysis
    #[arg(long)]
    pub(crate) scenario_budgets: Option<String>,
    /// Write the summary as JSON
    #[arg(long)]
    pub(crate) json: Option<PathBuf>,
    /// Write awarded applicants as CSV
    #[arg(long)]
    pub(crate) awards_csv: Option<PathBuf>,
    /// Write unfunded eligible applicants as CSV
    #[arg(long)]
    pub(crate) unfunded_csv: Option<PathBuf>,
    /// Write ineligible applicants as CSV
    #[arg(long)]
    pub(crate) ineligible_csv: Option<PathBuf>,
    /// Write a Markdown allocation report
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,
    /// Number of awarded applicants to display
    #[arg(long, default_value_t = 10)]
    pub(crate) top: usize,
    /// Show all awarded applicants
    #[arg(long)]
    pub(crate) all: bool,
    /// Number of unfunded eligible applicants to display
    #[arg(long, default_value_t = 10)]
    pub(crate) unfunded: usize,
    /// Show all unfunded eligible applicants
    #[arg(long)]
    pub(crate) unfunded_all: bool,
}

impl AllocateArgs {
    pub(crate) fn allocation_config(&self) -> Result<AllocationConfig, ConfigError> {
        let scenario_budgets = match &self.scenario_budgets {
            Some(raw) => parse_budget_list(raw)?,
            None => Vec::new(),
        };

        Ok(AllocationConfig {
            budget: self.budget,
            limits: AwardLimits {
                min_award: self.min,
                max_award: self.max,
                round_to: self.round,
                max_percent: self.max_percent,
            },
            weights: PriorityWeights {
                score: self.score_weight,
                need: self.need_weight,
            },
            reserves: ReserveShares {
                high: self.reserve_high,
                medium: self.reserve_medium,
                low: self.reserve_low,
            },
            min_score: self.min_score,
            scenario_budgets,
        })
    }

    pub(crate) fn listing(&self) -> ListingOptions {
        ListingOptions {
            awards: ListingLimit {
                top: self.top,
                show_all: self.all,
            },
            unfunded: ListingLimit {
                top: self.unfunded,
                show_all: self.unfunded_all,
            },
        }
    }

    fn artifacts(&self) -> Vec<(&PathBuf, Artifact)> {
        [
            (&self.json, Artifact::SummaryJson),
            (&self.awards_csv, Artifact::AwardsCsv),
            (&self.unfunded_csv, Artifact::UnfundedCsv),
            (&self.ineligible_csv, Artifact::IneligibleCsv),
            (&self.report, Artifact::MarkdownReport),
        ]
        .into_iter()
        .filter_map(|(path, artifact)| path.as_ref().map(|path| (path, artifact)))
        .collect()
    }
}

pub(crate) fn run_allocation(args: AllocateArgs) -> Result<(), AppError> {
    let app_config = AppConfig::load()?;
    telemetry::init(&app_config.telemetry)?;
    info!(
        environment = ?app_config.environment,
        input = %args.input.display(),
        "allocate command"
    );

    let engine = AllocationEngine::new(args.allocation_config()?)?;
    let imported = ApplicantImporter::from_path(&args.input)?;
    let run = engine.run(imported.applicants);
    let listing = args.listing();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::write_warnings(&mut out, &imported.warnings)?;
    render::write_console(&mut out, &run.summary, &listing)?;

    for (path, artifact) in args.artifacts() {
        write_artifact(path, artifact, &run.summary, &listing)?;
        writeln!(out, "\n{} written to {}", artifact.label(), path.display())?;
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn parse(extra: &[&str]) -> AllocateArgs {
        let mut argv = vec![
            "award-allocator",
            "allocate",
            "--input",
            "applicants.csv",
            "--budget",
            "10000",
        ];
        argv.extend_from_slice(extra);
        let Command::Allocate(args) = Cli::try_parse_from(argv).expect("arguments parse").command;
        args
    }

    #[test]
    fn flags_map_onto_allocation_config() {
        let args = parse(&[
            "--min",
            "250",
            "--reserve-high",
            "0.4",
            "--round",
            "50",
            "--max-percent",
            "0.9",
            "--scenario-budgets",
            "5000, 20000",
        ]);

        let config = args.allocation_config().expect("config builds");
        assert_eq!(config.limits.min_award, 250.0);
        assert_eq!(config.limits.round_to, 50.0);
        assert_eq!(config.limits.max_percent, 0.9);
        assert_eq!(config.reserves.high, 0.4);
        assert_eq!(config.scenario_budgets, vec![5000.0, 20_000.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_scenario_list_is_a_config_error() {
        let args = parse(&["--scenario-budgets", "5000,lots"]);

        let error = args.allocation_config().expect_err("invalid budget");
        assert_eq!(error.to_string(), "invalid scenario budget: lots");
    }

    #[test]
    fn invalid_limits_fail_before_input_is_read() {
        let args = parse(&["--min", "6000"]);

        let error = AllocationEngine::new(args.allocation_config().expect("config builds"))
            .expect_err("min above max");
        assert_eq!(error.to_string(), "invalid min/max award values");
    }

    #[test]
    fn only_requested_artifacts_are_written() {
        let args = parse(&["--awards-csv", "awards.csv", "--report", "report.md", "--all"]);

        let artifacts: Vec<Artifact> = args.artifacts().into_iter().map(|(_, a)| a).collect();
        assert_eq!(artifacts, vec![Artifact::AwardsCsv, Artifact::MarkdownReport]);
        assert!(args.listing().awards.show_all);
        assert!(!args.listing().unfunded.show_all);
    }
}
