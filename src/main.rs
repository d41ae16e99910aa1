//! relasm - release assembler
//!
//! Command line entry point for application discovery.

use clap::Parser;

use relasm::cli::{Cli, Commands};
use relasm::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Discover(args) => commands::discover::run(cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
