//! `check_ttn_gateway`: Nagios/Icinga-style plugin for The Things
//! Network gateways.
//!
//! One run, one line on stdout, one exit code. The check fetches the
//! gateway's connection stats, measures how long ago the last status
//! update arrived, and compares that age against the thresholds.

mod cli;
mod output;

use chrono::Utc;
use clap::Parser;
use clap::error::ErrorKind;
use secrecy::SecretString;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use ttncheck_api::GatewayClient;
use ttncheck_core::{
    CheckError, CheckOutcome, ServiceState, Thresholds, evaluate, gateway_metrics,
    seconds_since_last_status,
};

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version exit 0; any real parse error is
            // UNKNOWN, never a false OK.
            let exit = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => ServiceState::Unknown.exit_code(),
            };
            let _ = err.print();
            std::process::exit(exit);
        }
    };

    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(outcome) => output::report(&outcome, cli.always_ok),
        Err(err) => output::report_error(&err, cli.always_ok),
    }
}

async fn run(cli: &Cli) -> Result<CheckOutcome, CheckError> {
    debug!("checking gateway {} on {}", cli.gateway_id, cli.server);

    let api_key = SecretString::from(cli.api_key.clone());
    let client = GatewayClient::new(&cli.server, &cli.gateway_id, &api_key)?;
    let stats = client.connection_stats().await?;

    let elapsed = seconds_since_last_status(&stats, Utc::now())?;
    let metrics = gateway_metrics(&stats)?;
    let thresholds = Thresholds {
        warning: cli.warning,
        critical: cli.critical,
    };
    Ok(evaluate(elapsed, thresholds, &metrics))
}

/// Logs go to stderr; stdout belongs to the monitoring core.
fn init_tracing(verbosity: u8) {
    let directive = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
