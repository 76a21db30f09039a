// Response models for the Gateway Server connection-stats endpoint.
//
// Fields follow the JSON marshaling of the Things Stack protobufs:
// timestamps are RFC 3339 strings, uint64 counters are quoted strings,
// and servers freely omit anything they have no data for. Everything we
// do not model explicitly lands in `extra`.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// Connection statistics for one gateway, as returned by
/// `GET /api/v3/gs/gateways/{gateway_id}/connection/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStats {
    #[serde(default)]
    pub connected_at: Option<String>,
    /// Transport the gateway connected over (`udp`, `mqtt`, `ws`, ...).
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub last_status_received_at: Option<String>,
    #[serde(default)]
    pub last_status: Option<LastStatus>,
    #[serde(default)]
    pub last_uplink_received_at: Option<String>,
    /// Uplinks seen this session. Absent on Gateway Server >= 3.19.1.
    #[serde(default, deserialize_with = "count_field")]
    pub uplink_count: Option<i64>,
    #[serde(default)]
    pub last_downlink_received_at: Option<String>,
    #[serde(default, deserialize_with = "count_field")]
    pub downlink_count: Option<i64>,
    /// Round-trip times, sub-band utilization, and whatever else the
    /// server adds over time.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The most recent status message the gateway reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastStatus {
    /// When the status message was emitted (RFC 3339, up to nanosecond
    /// precision).
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub boot_time: Option<String>,
    /// Component versions keyed by component name
    /// (`ttn-lw-gateway-server`, `fpga`, `hal`, ...).
    #[serde(default)]
    pub versions: HashMap<String, String>,
    /// Packet-forwarder counters (`rxin`, `rxok`, `rxfw`, `ackr`,
    /// `txin`, `txok`, ...). Integral or fractional depending on the
    /// forwarder.
    #[serde(default)]
    pub metrics: HashMap<String, Number>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Protobuf uint64 fields arrive as JSON strings; older servers sent
/// bare numbers. Accept both.
fn count_field<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
