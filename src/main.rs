use clap::Parser;

use doc_doctor::cli::{Cli, Commands};
use doc_doctor::commands::{run_check, run_file, run_init, run_problems};
use doc_doctor::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::File(args) => run_file(args, &cli),
        Commands::Init(args) => run_init(args, &cli),
        Commands::Problems(args) => run_problems(args, &cli),
    };

    std::process::exit(exit_code);
}
