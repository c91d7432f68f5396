//! FX CLI
//!
//! Command-line interface for the exchange rate service.

mod commands;
mod config;
mod render;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fx_client::ForexClient;
use fx_types::FxError;

use commands::Command;
use config::Config;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency exchange rate CLI", long_about = None)]
struct Cli {
    /// Base URL of the rate service (overrides FOREX_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,fx=debug,fx_client=debug,fx_service=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    tracing::debug!(api_url = %config.api_url, base = %config.default_base, "configuration loaded");

    let result = match ForexClient::new(&config.api_url, config.request_timeout) {
        Ok(client) => commands::run(cli.command, client, &config).await,
        Err(e) => Err(FxError::from(e)),
    };

    match result {
        Ok(output) => {
            let text = if cli.json {
                render::to_json(&output)?
            } else {
                render::to_text(&output)
            };
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", render::error_line(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}
