use std::io::{self, Write};
use std::path::Path;

use crate::cli::{Cli, ProblemsAction, ProblemsArgs};
use crate::error::Result;
use crate::output::print_error;
use crate::path_utils::relative_slash_path;
use crate::store::{JsonProblemStore, ProblemStatus, ProblemStore, StoredProblem};
use crate::{EXIT_ERROR, EXIT_SUCCESS};

use super::context::resolve;

#[must_use]
pub fn run_problems(args: &ProblemsArgs, cli: &Cli) -> i32 {
    let root = resolve(&args.root);
    let store = JsonProblemStore::for_project(&root);
    let mut stdout = io::stdout().lock();
    match run_problems_impl(&args.action, &store, &root, &mut stdout) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(cli.color.into(), &e);
            EXIT_ERROR
        }
    }
}

/// Apply one `problems` action to `store`, writing feedback to `out`.
///
/// # Errors
/// Returns an error if the store cannot be read or written, or an id is unknown.
pub fn run_problems_impl<S, W>(
    action: &ProblemsAction,
    store: &S,
    root: &Path,
    out: &mut W,
) -> Result<()>
where
    S: ProblemStore + ?Sized,
    W: Write,
{
    match action {
        ProblemsAction::List { all } => {
            let problems: Vec<StoredProblem> = store
                .load_all()?
                .into_iter()
                .filter(|p| *all || p.status == ProblemStatus::Normal)
                .collect();
            if problems.is_empty() {
                writeln!(out, "no saved problems")?;
            }
            for problem in &problems {
                writeln!(out, "{}", format_stored(problem, root))?;
            }
        }
        ProblemsAction::Ignore { id } => {
            store.update_status(*id, ProblemStatus::Ignored)?;
            writeln!(out, "problem #{id} ignored")?;
        }
        ProblemsAction::Restore { id } => {
            store.update_status(*id, ProblemStatus::Normal)?;
            writeln!(out, "problem #{id} restored")?;
        }
        ProblemsAction::Clear => {
            store.clear()?;
            writeln!(out, "saved problems cleared")?;
        }
    }
    Ok(())
}

fn format_stored(stored: &StoredProblem, root: &Path) -> String {
    let problem = &stored.problem;
    let status = match stored.status {
        ProblemStatus::Normal => String::new(),
        ProblemStatus::Ignored => format!(" [{}]", stored.status),
    };
    format!(
        "#{}{status} {}:{}:{}: {} {}: {}",
        stored.id,
        relative_slash_path(&problem.file_path, Some(root)),
        problem.line,
        problem.column,
        problem.problem_type.as_str(),
        problem.function_name,
        problem.description
    )
}

#[cfg(test)]
#[path = "problems_tests.rs"]
mod tests;
