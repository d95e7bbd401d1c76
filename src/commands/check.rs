use std::path::Path;

use crate::cli::{CheckArgs, Cli};
use crate::error::{DocDoctorError, Result};
use crate::output::{ColorMode, ScanProgress, print_error, print_warning};
use crate::project::{
    CancellationToken, DelimiterDiagnostics, DiagnosticsSource, JsonDiagnostics,
    ProjectAggregator,
};
use crate::scanner::DirectoryEnumerator;
use crate::store::{JsonProblemStore, ProblemStore};
use crate::{EXIT_ERROR, EXIT_PROBLEMS_FOUND, EXIT_SUCCESS};

use super::context::{formatter_for, load_config, resolve, write_output};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli, &CancellationToken::new()) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(cli.color.into(), &e);
            EXIT_ERROR
        }
    }
}

/// Check every candidate file under `args.root` and report the problems.
///
/// Problems of a successful run replace the contents of the workspace
/// problem store unless `--no-store` is given.
///
/// # Errors
/// Returns an error if the root does not exist, the configuration is
/// invalid, the diagnostics file cannot be loaded, or the report cannot be
/// written.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli, cancel: &CancellationToken) -> Result<i32> {
    if !args.root.is_dir() {
        return Err(DocDoctorError::RootNotFound(args.root.clone()));
    }
    let root = resolve(&args.root);

    // 1. Configuration, snapshotted once for the whole run
    let mut config = load_config(args.config.as_deref(), cli.no_config, &root)?;
    if args.check_main {
        config.whitelist.check_main_function = true;
    }

    // 2. Collaborators
    let enumerator = DirectoryEnumerator::from_config(&root, &config.scan)?;
    let aggregator = ProjectAggregator::new(&config, Some(root.clone()))
        .with_diagnostics(diagnostics_sources(args, &root)?)
        .with_cancellation(cancel.clone());

    // 3. Run
    let progress = ScanProgress::new(cli.quiet);
    let result = aggregator.run(&enumerator, Some(&progress));

    // 4. Report
    let color = if args.output.is_some() {
        ColorMode::Never
    } else {
        cli.color.into()
    };
    let formatter = formatter_for(args.format, color, cli.verbose, &root);
    write_output(args.output.as_deref(), &formatter.format(&result)?)?;

    if !result.success {
        return Ok(EXIT_ERROR);
    }

    // 5. Persist
    if !args.no_store {
        let store = JsonProblemStore::for_project(&root);
        if let Err(e) = store.replace_all(&result.problems) {
            print_warning(
                cli.color.into(),
                &format!("problems were not saved to {}: {e}", store.path().display()),
            );
        }
    }

    if args.fail_on_problems && result.has_problems() {
        Ok(EXIT_PROBLEMS_FOUND)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn diagnostics_sources(args: &CheckArgs, root: &Path) -> Result<Vec<Box<dyn DiagnosticsSource>>> {
    let mut sources: Vec<Box<dyn DiagnosticsSource>> = Vec::new();
    if let Some(path) = &args.diagnostics {
        sources.push(Box::new(JsonDiagnostics::load(path, root)?));
    }
    if args.syntax_check {
        sources.push(Box::new(DelimiterDiagnostics));
    }
    Ok(sources)
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
