//! Command-line surface of the plugin.
//!
//! Flag spelling is part of the operational contract: monitoring cores
//! carry these invocations in their service definitions, so the camel
//! case long options (`--gatewayID`, `--apiKey`) stay as they are.

use clap::Parser;
use ttncheck_api::DEFAULT_SERVER;
use ttncheck_core::{DEFAULT_CRITICAL_SECS, DEFAULT_WARNING_SECS};

#[derive(Debug, Parser)]
#[command(
    name = "check_ttn_gateway",
    version,
    about = "Check the connection of a LoRaWAN gateway on The Things Network",
    long_about = "Tracks how long ago a gateway last reported a status update to its \
                  Things Stack deployment and alerts once that age crosses the warning \
                  or critical threshold. Exit codes follow the monitoring plugin \
                  convention: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN."
)]
pub struct Cli {
    /// Address of the Things Stack deployment the gateway belongs to
    #[arg(long, value_name = "URL", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// ID of the gateway to check
    #[arg(long = "gatewayID", value_name = "ID")]
    pub gateway_id: String,

    /// API key with the gateway-link right, generated in the console
    #[arg(long = "apiKey", value_name = "KEY")]
    pub api_key: String,

    /// Warning threshold in seconds since the last status update
    #[arg(
        short = 'w',
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_WARNING_SECS
    )]
    pub warning: u64,

    /// Critical threshold in seconds since the last status update
    #[arg(
        short = 'c',
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_CRITICAL_SECS
    )]
    pub critical: u64,

    /// Always exit OK, whatever the computed state
    #[arg(long)]
    pub always_ok: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
