//! Core check logic for the `check_ttn_gateway` monitoring plugin.
//!
//! This crate is the policy layer between the Gateway Server API client
//! and the process surface:
//!
//! - [`check`] turns a stats response into elapsed seconds, extracted
//!   metrics, and a threshold verdict
//! - [`perfdata`] renders `'label'=value;warn;crit;min;max` tokens
//! - [`state`] maps verdicts to the exit codes monitoring cores expect
//!
//! Nothing in here prints or exits the process; that belongs to the
//! binary crate.

pub mod check;
pub mod error;
pub mod perfdata;
pub mod state;

// ── Primary re-exports ──
pub use check::{
    CheckOutcome, DEFAULT_CRITICAL_SECS, DEFAULT_WARNING_SECS, GatewayMetrics, Thresholds,
    UPLINK_COUNT_UNAVAILABLE, evaluate, gateway_metrics, seconds_since_last_status,
};
pub use error::CheckError;
pub use perfdata::PerfdataToken;
pub use state::ServiceState;
