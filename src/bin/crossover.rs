// src/bin/crossover.rs
use clap::{CommandFactory, Parser};
use crossover_core::cli::{self, Cli, Session};
use crossover_core::exit::CrossoverExit;
use log::LevelFilter;

fn main() -> CrossoverExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command.clone() else {
        let _ = Cli::command().print_help();
        return CrossoverExit::Success;
    };

    let result = Session::open(&cli).and_then(|session| cli::dispatch::execute(&session, command));
    CrossoverExit::from(result)
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
