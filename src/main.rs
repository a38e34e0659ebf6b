use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use phishguard::cli::{describe, execute, exit_code, Cli, Command};
use phishguard::config::print_schema;
use phishguard::startup;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::PrintSchema = cli.command {
        return match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Failed to render schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let state = match startup::init(&cli.config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute(&state, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Command failed: {:?}", e);
            eprintln!("{}", describe(&e));
            ExitCode::from(exit_code(&e))
        }
    }
}
