use std::process::ExitCode;

use clap::Parser;
use pricegrid::browser::Columns;
use pricegrid::catalog::CatalogClient;
use pricegrid::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List(args)) => {
            init_stderr_logging();
            pricegrid::cli::run(cli.base_url, cli.api_key, args).await
        }
        None => {
            init_file_logging();
            let client = CatalogClient::new(cli.base_url, cli.api_key);
            match pricegrid::tui::run(client, Columns::default()).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("Error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn init_stderr_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// In interactive mode logs go to a file so they don't tear the screen.
fn init_file_logging() {
    if std::env::var("PRICEGRID_LOG").is_err() {
        return;
    }
    use tracing_subscriber::prelude::*;
    match std::fs::File::create("pricegrid.log") {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false);
            let filter = tracing_subscriber::EnvFilter::new("pricegrid=debug");
            let _ = tracing_subscriber::registry()
                .with(file_layer.with_filter(filter))
                .try_init();
        }
        Err(err) => {
            eprintln!("Failed to create log file: {err}");
        }
    }
}
