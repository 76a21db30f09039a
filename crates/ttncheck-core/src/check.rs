//! Connection-stats evaluation: elapsed-time extraction, metric
//! extraction, and the threshold verdict.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Number;
use tracing::debug;
use ttncheck_api::ConnectionStats;

use crate::error::CheckError;
use crate::perfdata::PerfdataToken;
use crate::state::ServiceState;

/// Default warning threshold, in seconds since the last status update.
pub const DEFAULT_WARNING_SECS: u64 = 600;
/// Default critical threshold, in seconds since the last status update.
pub const DEFAULT_CRITICAL_SECS: u64 = 3600;

/// Sentinel for `uplink_count` on servers that no longer send the field
/// (dropped in Gateway Server 3.19.1).
pub const UPLINK_COUNT_UNAVAILABLE: i64 = -1;

/// Version map key of the component whose version the plugin reports.
const GATEWAY_SERVER_VERSION: &str = "ttn-lw-gateway-server";

/// Warning/critical limits on elapsed seconds. A verdict changes
/// strictly above a limit, so `elapsed == warning` is still OK.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub warning: u64,
    pub critical: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: DEFAULT_WARNING_SECS,
            critical: DEFAULT_CRITICAL_SECS,
        }
    }
}

/// Version string and packet-forwarder counters pulled out of a status
/// message.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayMetrics {
    /// Version of the `ttn-lw-gateway-server` component, when reported.
    pub version: Option<String>,
    /// Session uplink total, or [`UPLINK_COUNT_UNAVAILABLE`].
    pub uplink_count: i64,
    pub rxok: Number,
    pub rxfw: Number,
    pub ackr: Number,
    pub txin: Number,
    pub txok: Number,
    pub rxin: Number,
}

impl GatewayMetrics {
    /// Perfdata tokens in the order they appear on the output line.
    #[must_use]
    pub fn perfdata(&self) -> Vec<PerfdataToken> {
        vec![
            PerfdataToken::new("uplink_count", self.uplink_count).with_min(0),
            PerfdataToken::new("rxok", self.rxok.clone()).with_min(0).with_max(100),
            PerfdataToken::new("rxfw", self.rxfw.clone()).with_min(0).with_max(100),
            PerfdataToken::new("ackr", self.ackr.clone()).with_min(0).with_max(100),
            PerfdataToken::new("txin", self.txin.clone()).with_min(0).with_max(100),
            PerfdataToken::new("txok", self.txok.clone()).with_min(0).with_max(100),
            PerfdataToken::new("rxin", self.rxin.clone()).with_min(0).with_max(100),
        ]
    }
}

/// Everything the reporting layer needs: verdict, human-readable
/// message, and perfdata.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub state: ServiceState,
    pub message: String,
    pub perfdata: Vec<PerfdataToken>,
}

/// Whole seconds between `now` and the gateway's `last_status.time`,
/// regardless of which of the two comes first.
pub fn seconds_since_last_status(
    stats: &ConnectionStats,
    now: DateTime<Utc>,
) -> Result<u64, CheckError> {
    let time = stats
        .last_status
        .as_ref()
        .and_then(|status| status.time.as_deref())
        .ok_or(CheckError::LastStatus)?;
    let last = parse_status_time(time)?;
    let elapsed = now.timestamp().abs_diff(last.and_utc().timestamp());
    debug!("last status at {last}, {elapsed}s ago");
    Ok(elapsed)
}

/// Parse a status timestamp, tolerating a missing `Z` suffix and any
/// number of fractional-second digits. Gateway timestamps are always
/// UTC; fractional digits are dropped, never rounded, so a status at
/// `..:06.488` counts as `..:06`.
fn parse_status_time(raw: &str) -> Result<NaiveDateTime, CheckError> {
    let trimmed = raw.strip_suffix('Z').unwrap_or(raw);
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| CheckError::LastStatus)
}

/// Pull the version string and the required packet-forwarder counters
/// out of a stats response.
///
/// `rxok`, `rxfw`, `ackr`, `txin`, `txok` and `rxin` must all be
/// present; the version is optional since not every forwarder reports
/// one. A missing `uplink_count` maps to [`UPLINK_COUNT_UNAVAILABLE`].
pub fn gateway_metrics(stats: &ConnectionStats) -> Result<GatewayMetrics, CheckError> {
    let status = stats.last_status.as_ref().ok_or(CheckError::Metrics)?;
    let metric = |name: &str| status.metrics.get(name).cloned().ok_or(CheckError::Metrics);

    Ok(GatewayMetrics {
        version: status.versions.get(GATEWAY_SERVER_VERSION).cloned(),
        uplink_count: stats.uplink_count.unwrap_or(UPLINK_COUNT_UNAVAILABLE),
        rxok: metric("rxok")?,
        rxfw: metric("rxfw")?,
        ackr: metric("ackr")?,
        txin: metric("txin")?,
        txok: metric("txok")?,
        rxin: metric("rxin")?,
    })
}

/// Compare elapsed seconds against the thresholds and build the final
/// outcome. Perfdata is attached to every verdict.
#[must_use]
pub fn evaluate(
    elapsed_secs: u64,
    thresholds: Thresholds,
    metrics: &GatewayMetrics,
) -> CheckOutcome {
    let (state, message) = if elapsed_secs > thresholds.critical {
        (
            ServiceState::Critical,
            format!("CRIT threshold reached: {elapsed_secs}"),
        )
    } else if elapsed_secs > thresholds.warning {
        (
            ServiceState::Warning,
            format!("WARN threshold reached: {elapsed_secs}"),
        )
    } else {
        let mut message = format!("Gateway: OK - {elapsed_secs}s since last status update");
        if let Some(version) = &metrics.version {
            message.push_str(&format!("\nVersion {version}"));
        }
        (ServiceState::Ok, message)
    };

    CheckOutcome {
        state,
        message,
        perfdata: metrics.perfdata(),
    }
}
