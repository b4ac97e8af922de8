//! `concrete-estimate` entry point

use clap::Parser;
use estimate_cli::cli::Cli;
use estimate_cli::commands;
use estimate_cli::error::Error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        if let Error::Calc(calc) = &e {
            if let Ok(json) = serde_json::to_string_pretty(calc) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}
