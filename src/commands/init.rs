use std::fs;

use crate::cli::{Cli, InitArgs};
use crate::config::DEFAULT_CONFIG_TEMPLATE;
use crate::output::print_error;
use crate::{DocDoctorError, EXIT_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args) {
        Ok(()) => {
            if !cli.quiet {
                println!("Created configuration file: {}", args.output.display());
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(cli.color.into(), &e);
            EXIT_ERROR
        }
    }
}

/// Write the default configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(DocDoctorError::Config(format!(
            "configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, DEFAULT_CONFIG_TEMPLATE)?;
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
