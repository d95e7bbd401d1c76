use crate::cli::{Cli, FileArgs};
use crate::error::Result;
use crate::output::print_error;
use crate::project::{CheckRunResult, FileOutcome, ProjectAggregator, SkipReason};
use crate::state;
use crate::{EXIT_ERROR, EXIT_SUCCESS};

use super::context::{formatter_for, load_config, resolve, write_output};

#[must_use]
pub fn run_file(args: &FileArgs, cli: &Cli) -> i32 {
    match run_file_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(cli.color.into(), &e);
            EXIT_ERROR
        }
    }
}

/// Check a single source file and print its problems.
///
/// The workspace root used for whitelist matching and configuration is the
/// nearest ancestor holding `.git/` or `.doc-doctor.toml`.
///
/// # Errors
/// Returns an error if the configuration is invalid or the report cannot be
/// written. A file that cannot be read is reported and yields exit code 2.
pub fn run_file_impl(args: &FileArgs, cli: &Cli) -> Result<i32> {
    let path = resolve(&args.path);
    let root = path
        .parent()
        .map_or_else(|| path.clone(), state::discover_project_root);

    let mut config = load_config(args.config.as_deref(), cli.no_config, &root)?;
    if args.check_main {
        config.whitelist.check_main_function = true;
    }

    let aggregator = ProjectAggregator::new(&config, Some(root.clone()));
    let relative = aggregator.policy().relative_path(&path);
    let outcome = aggregator.check_file(&path);
    let failed = matches!(
        outcome,
        FileOutcome::Skipped(SkipReason::MetadataUnavailable | SkipReason::Unreadable { .. })
    );
    let result = outcome_to_result(outcome, &relative);

    let formatter = formatter_for(args.format, cli.color.into(), cli.verbose, &root);
    write_output(None, &formatter.format(&result)?)?;

    Ok(if failed { EXIT_ERROR } else { EXIT_SUCCESS })
}

/// Wrap a single-file outcome as a one-file run.
pub(crate) fn outcome_to_result(outcome: FileOutcome, relative: &str) -> CheckRunResult {
    let mut result = CheckRunResult::new(1);
    match outcome {
        FileOutcome::Checked(problems) => {
            result.checked_files = 1;
            result.problems = problems;
        }
        FileOutcome::SyntaxError(problem) => {
            result.problems.push(problem);
            result
                .skipped_files
                .push(format!("{relative} ({})", SkipReason::SyntaxErrors));
        }
        FileOutcome::Skipped(reason) => {
            result.skipped_files.push(format!("{relative} ({reason})"));
        }
    }
    result
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
