use catalog_parser::cli::{self, Args};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    cli::setup_logging(&args);

    match cli::run(&args) {
        Ok(_stats) => {
            // Summary has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
