use crate::allocate::{run_allocation, AllocateArgs};
use award_allocator::error::AppError;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "award-allocator",
    about = "Rank applicants and allocate a fixed award budget",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Score, rank, and fund an applicant CSV against a budget
    Allocate(AllocateArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Allocate(args) => run_allocation(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn allocate_defaults_match_documented_values() {
        let cli = Cli::try_parse_from([
            "award-allocator",
            "allocate",
            "--input",
            "applicants.csv",
            "--budget",
            "25000",
        ])
        .expect("arguments parse");

        let Command::Allocate(args) = cli.command;
        assert_eq!(args.budget, 25_000.0);
        assert_eq!(args.min, 500.0);
        assert_eq!(args.max, 5000.0);
        assert_eq!(args.score_weight, 0.7);
        assert_eq!(args.need_weight, 0.3);
        assert_eq!(args.max_percent, 1.0);
        assert_eq!(args.top, 10);
        assert_eq!(args.unfunded, 10);
        assert!(!args.all);
        assert!(args.scenario_budgets.is_none());
    }

    #[test]
    fn budget_is_required() {
        let result = Cli::try_parse_from(["award-allocator", "allocate", "--input", "a.csv"]);
        assert!(result.is_err());
    }
}
