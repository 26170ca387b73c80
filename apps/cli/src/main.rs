//! `boleta` binary entry point. The actual setup is in lib.rs.

use boleta_cli::cli::Cli;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    boleta_cli::init_tracing();

    match boleta_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "Command failed");
            eprintln!("error: {}", boleta_cli::user_message(&err));
            ExitCode::FAILURE
        }
    }
}
