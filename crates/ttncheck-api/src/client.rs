// HTTP client for the Gateway Server connection-stats endpoint.

use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::models::ConnectionStats;

/// Default Things Stack cluster (European community cluster).
pub const DEFAULT_SERVER: &str = "https://eu1.cloud.thethings.network";

/// Async client scoped to a single gateway on one Things Stack
/// deployment.
///
/// Every request carries `Accept: application/json` and a bearer token;
/// the API key needs the gateway-link right on the target gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    gateway_id: String,
}

impl GatewayClient {
    /// Build a client for `gateway_id` on `server`.
    pub fn new(
        server: &str,
        gateway_id: impl Into<String>,
        api_key: &SecretString,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(server)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| ApiError::InvalidApiKey {
                message: e.to_string(),
            })?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url,
            gateway_id: gateway_id.into(),
        })
    }

    /// Fetch the gateway's current connection statistics
    /// (`Gs.GetGatewayConnectionStats`).
    pub async fn connection_stats(&self) -> Result<ConnectionStats, ApiError> {
        let url = self.stats_url()?;
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        Self::handle_response(response).await
    }

    fn stats_url(&self) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!(
            "{base}/api/v3/gs/gateways/{}/connection/stats",
            self.gateway_id
        );
        Ok(Url::parse(&url)?)
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                ApiError::Decode {
                    message: format!("{e} (body preview: {preview:?})"),
                }
            })
        } else {
            Err(Self::parse_error(status, response).await)
        }
    }

    /// Map a non-success response to an error, preferring the
    /// structured `{"code", "message"}` body Things Stack services
    /// send.
    async fn parse_error(status: StatusCode, response: reqwest::Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let (message, code) = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => (err.message.unwrap_or_else(|| status.to_string()), err.code),
            Err(_) if body.trim().is_empty() => (status.to_string(), None),
            Err(_) => (body.trim().to_owned(), None),
        };
        ApiError::Api {
            status: status.as_u16(),
            message,
            code,
        }
    }
}

/// Error body shape shared by Things Stack services.
#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<u32>,
}
