//! Authenticated HTTP client for the Planning Center Online API.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::error;
use url::Url;

use crate::error::{PcoError, PcoResult};

/// Production API host.
const DEFAULT_BASE_URL: &str = "https://api.planningcenteronline.com";

/// Common inbound parameters forwarded to every list operation: the
/// validated page number and the opaque passthrough pairs (order and
/// duplicates preserved).
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u64>,
    pub passthrough: Vec<(String, String)>,
}

/// Planning Center Online client.
///
/// Wraps a pooled `reqwest::Client` with the shared Basic-auth credential
/// pair. Every operation issues plain GETs — one call per logical request,
/// no retries. No request timeout is configured; the transport default
/// applies.
#[derive(Debug, Clone)]
pub struct PcoClient {
    pub(crate) base_url: String,
    pub(crate) app_id: String,
    pub(crate) secret: String,
    pub(crate) http: Client,
    pub(crate) default_per_page: u64,
}

impl PcoClient {
    /// Create a client against the production host.
    pub fn new(
        app_id: impl Into<String>,
        secret: impl Into<String>,
        default_per_page: u64,
    ) -> PcoResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, app_id, secret, default_per_page)
    }

    /// Create a client against a non-default host. Tests point this at a
    /// mock server.
    pub fn with_base_url(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        secret: impl Into<String>,
        default_per_page: u64,
    ) -> PcoResult<Self> {
        let http = Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| PcoError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            secret: secret.into(),
            http,
            default_per_page,
        })
    }

    /// The configured default page size.
    #[must_use]
    pub fn default_per_page(&self) -> u64 {
        self.default_per_page
    }

    /// A GET request builder carrying `Authorization: Basic
    /// base64(app_id:secret)` and `Accept: application/json`.
    pub(crate) fn get(&self, url: &Url) -> reqwest::RequestBuilder {
        self.http
            .get(url.as_str())
            .basic_auth(&self.app_id, Some(&self.secret))
            .header(header::ACCEPT, "application/json")
    }

    /// Issue a GET and decode the 2xx body as JSON.
    ///
    /// Non-2xx responses are logged with status and raw body and classified
    /// as [`PcoError::UpstreamStatus`]; transport failures propagate.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &'static str,
    ) -> PcoResult<T> {
        let response = self.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            error!(
                context,
                status = status.as_u16(),
                body = %body,
                "Planning Center request failed"
            );
            return Err(PcoError::UpstreamStatus { status: status.as_u16() });
        }

        Ok(response.json().await?)
    }
}

/// Best-effort read of a failed response's body; a read failure yields a
/// placeholder message instead of an error.
async fn read_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(error) => format!("failed to read error body: {error}"),
    }
}
