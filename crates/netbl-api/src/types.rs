// Wire types for the backend API.
//
// Field names match the JSON the backend emits exactly: the summary
// endpoint uses camelCase at the top level while device/alert records use
// snake_case. These types never leave this crate's public API as-is --
// netbl-core converts them to domain types.

use serde::Deserialize;

// ── /api/stats/summary ───────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub current_usage: CurrentUsageRecord,
    pub historical_data: HistoricalDataRecord,
    #[serde(default)]
    pub top_devices: Vec<TopDeviceRecord>,
    #[serde(default)]
    pub alerts: Vec<AlertRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUsageRecord {
    /// Current upload rate in bytes/sec.
    pub upload: f64,
    /// Current download rate in bytes/sec.
    pub download: f64,
    pub max_upload: f64,
    pub max_download: f64,
    #[serde(default)]
    pub daily_total: u64,
    #[serde(default)]
    pub monthly_total: u64,
    #[serde(default)]
    pub monthly_limit: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalDataRecord {
    #[serde(default)]
    pub hourly: Vec<HourlyPointRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyPointRecord {
    /// Clock label, e.g. "14:00".
    pub time: String,
    pub download: u64,
    pub upload: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopDeviceRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(rename = "type")]
    pub device_type: String,
    pub usage: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: String,
    pub message: String,
    /// Absent on device-scoped alert listings.
    #[serde(default)]
    pub device_id: Option<i64>,
}

// ── /api/devices and /api/devices/{id} ───────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRecord {
    pub id: i64,
    pub name: String,
    pub mac: String,
    pub ip: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub first_seen: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
    /// Cumulative counters for the current month. The detail endpoint
    /// omits them.
    #[serde(default)]
    pub month_download: u64,
    #[serde(default)]
    pub month_upload: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceDetailResponse {
    pub device: DeviceRecord,
    #[serde(default)]
    pub usage: Vec<UsagePointRecord>,
    #[serde(default)]
    pub alerts: Vec<AlertRecord>,
}

// ── /api/reports/usage/{period} ──────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct UsagePointRecord {
    /// Bucket label: "%H:%M" for daily, weekday name for weekly,
    /// day-of-month for monthly, "%Y-%m-%d" for device usage history.
    pub date: String,
    pub download: u64,
    pub upload: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageReportResponse {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub data: Vec<UsagePointRecord>,
}
