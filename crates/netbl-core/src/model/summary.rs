use serde::Serialize;

use super::{Alert, DeviceType, UsagePoint};

/// Instantaneous rates and rolling totals for the whole network.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUsage {
    /// Current upload rate in bytes/sec.
    pub upload: f64,
    /// Current download rate in bytes/sec.
    pub download: f64,
    /// Provisioned maxima, used to scale the meters.
    pub max_upload: f64,
    pub max_download: f64,
    pub daily_total: u64,
    pub monthly_total: u64,
    pub monthly_limit: u64,
}

impl CurrentUsage {
    /// Upload meter fill as a percentage, clamped to 100.
    pub fn upload_pct(&self) -> f64 {
        pct(self.upload, self.max_upload)
    }

    /// Download meter fill as a percentage, clamped to 100.
    pub fn download_pct(&self) -> f64 {
        pct(self.download, self.max_download)
    }

    /// Monthly usage against the configured limit, clamped to 100.
    #[allow(clippy::cast_precision_loss)]
    pub fn monthly_pct(&self) -> f64 {
        pct(self.monthly_total as f64, self.monthly_limit as f64)
    }
}

fn pct(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).min(100.0)
    }
}

/// A top-consumer entry on the dashboard (7-day window, backend-ranked).
#[derive(Debug, Clone, Serialize)]
pub struct TopDevice {
    pub id: i64,
    pub name: String,
    pub ip: Option<String>,
    pub device_type: DeviceType,
    pub usage: u64,
}

/// Everything the dashboard shows, fetched in one request.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub current: CurrentUsage,
    /// Hourly buckets for the last 24 hours.
    pub hourly: Vec<UsagePoint>,
    pub top_devices: Vec<TopDevice>,
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(upload: f64, max_upload: f64) -> CurrentUsage {
        CurrentUsage {
            upload,
            download: 0.0,
            max_upload,
            max_download: 1.0,
            daily_total: 0,
            monthly_total: 300,
            monthly_limit: 400,
        }
    }

    #[test]
    fn meter_percentages_clamp_at_100() {
        assert!((usage(5.0, 10.0).upload_pct() - 50.0).abs() < f64::EPSILON);
        assert!((usage(20.0, 10.0).upload_pct() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_maximum_reads_as_empty_meter() {
        assert!(usage(5.0, 0.0).upload_pct().abs() < f64::EPSILON);
    }

    #[test]
    fn monthly_pct_uses_limit() {
        assert!((usage(0.0, 1.0).monthly_pct() - 75.0).abs() < f64::EPSILON);
    }
}
