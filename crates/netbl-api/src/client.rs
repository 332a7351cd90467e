// Hand-crafted async HTTP client for the Network Bandwidth Logger backend.
//
// Base path: /api/
// No authentication, read-only GETs, JSON responses.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{DeviceDetailResponse, DeviceRecord, SummaryResponse, UsageReportResponse};

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the backend's read-only JSON API.
///
/// All endpoints live under `{base}/api/`. The client holds a single
/// connection-pooled `reqwest::Client` and is cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    ///
    /// The base may be the server root (`http://host:5002`) or already
    /// include the `/api` segment; both normalize to the same thing.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL, guaranteeing a trailing `/api/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    /// The normalized base URL (always ends with `/api/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"stats/summary"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        // base_url always ends with `/api/`, so joining relative paths works.
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Request plumbing ─────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    /// Decode a 2xx body as JSON, or surface the backend's `{error}`
    /// message for anything else.
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| status.to_string());
            return Err(Error::Api {
                message,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/stats/summary` — dashboard snapshot: current rates,
    /// totals, 24h hourly series, top devices, and active alerts.
    pub async fn summary(&self) -> Result<SummaryResponse, Error> {
        self.get("stats/summary").await
    }

    /// `GET /api/devices` — every known device with current-month usage.
    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>, Error> {
        self.get("devices").await
    }

    /// `GET /api/devices/{id}` — device info, 30-day usage history, and
    /// device-scoped alerts.
    pub async fn device_detail(&self, id: i64) -> Result<DeviceDetailResponse, Error> {
        self.get(&format!("devices/{id}")).await
    }

    /// `GET /api/reports/usage/{period}` — usage series for `daily`,
    /// `weekly`, or `monthly`.
    pub async fn usage_report(&self, period: &str) -> Result<UsageReportResponse, Error> {
        self.get(&format!("reports/usage/{period}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_api_suffix() {
        let url = ApiClient::normalize_base_url("http://localhost:5002").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5002/api/");
    }

    #[test]
    fn base_url_with_api_is_untouched() {
        let url = ApiClient::normalize_base_url("http://localhost:5002/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5002/api/");

        let url = ApiClient::normalize_base_url("http://localhost:5002/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5002/api/");
    }

    #[test]
    fn base_url_keeps_prefix_path() {
        let url = ApiClient::normalize_base_url("https://example.com/nbl").unwrap();
        assert_eq!(url.as_str(), "https://example.com/nbl/api/");
    }
}
