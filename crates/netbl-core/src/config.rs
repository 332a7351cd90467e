// ── Runtime connection configuration ──
//
// Describes *how* to reach the backend. Built by the CLI/TUI (usually via
// netbl-config) and handed to `Monitor` -- core never reads config files.

use std::time::Duration;

use url::Url;

use netbl_api::transport::TlsMode;

/// Configuration for connecting to a single backend instance.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend base URL (e.g., `http://localhost:5002`).
    pub base_url: Url,
    /// TLS verification strategy (only relevant behind an https proxy).
    pub tls: TlsMode,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Dashboard polling cadence.
    pub refresh_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Backend default bind address.
            base_url: Url::parse("http://localhost:5002").expect("static URL"),
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            refresh_interval: Duration::from_secs(30),
        }
    }
}
