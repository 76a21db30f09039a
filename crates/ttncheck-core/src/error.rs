use thiserror::Error;
use ttncheck_api::ApiError;

/// Errors that end a check run before a verdict can be computed.
///
/// The display strings of the parse variants are part of the plugin's
/// output contract and show up verbatim in alert messages.
#[derive(Debug, Error)]
pub enum CheckError {
    /// `last_status.time` was missing or not a timestamp we can read.
    #[error("Last Status could not be parsed")]
    LastStatus,

    /// A required packet-forwarder metric was missing from the response.
    #[error("Metrics could not be parsed")]
    Metrics,

    /// Failure talking to the Gateway Server.
    #[error(transparent)]
    Api(#[from] ApiError),
}
