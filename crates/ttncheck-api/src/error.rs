use thiserror::Error;

/// Errors produced by the Gateway Server API client.
#[derive(Debug, Error)]
pub enum ApiError {
    // ── Request construction ──
    /// The server address could not be parsed as a URL. The cause
    /// chain carries the parser's detail.
    #[error("invalid server URL")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key contains bytes that cannot go into an HTTP header.
    #[error("invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Transport ──
    /// Underlying HTTP failure (DNS, TCP, TLS, protocol). The cause
    /// chain carries the details.
    #[error("HTTP transport error")]
    Transport(#[from] reqwest::Error),

    // ── Protocol ──
    /// Non-success response from the Gateway Server. `message` and
    /// `code` come from the structured error body when one is present.
    #[error("Gateway Server error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<u32>,
    },

    /// The response body did not match the expected JSON shape.
    #[error("unexpected response: {message}")]
    Decode { message: String },
}
