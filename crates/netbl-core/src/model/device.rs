use serde::Serialize;
use strum::Display;

use super::{Alert, UsagePoint};

/// Classification tag assigned by the backend's device tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceType {
    Computer,
    Mobile,
    Entertainment,
    Iot,
    Other,
}

impl DeviceType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "computer" => Self::Computer,
            "mobile" => Self::Mobile,
            "entertainment" => Self::Entertainment,
            "iot" => Self::Iot,
            _ => Self::Other,
        }
    }
}

/// A device known to the backend, with current-month usage counters.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub mac: String,
    pub ip: String,
    pub device_type: DeviceType,
    /// ISO timestamps; absent when the tracker has never seen the device.
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub month_download: u64,
    pub month_upload: u64,
}

impl Device {
    /// Combined monthly usage, the figure shown in the device table.
    pub fn month_total(&self) -> u64 {
        self.month_download + self.month_upload
    }
}

/// Detail view: device info plus 30-day usage history and device alerts.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceDetail {
    pub device: Device,
    pub usage: Vec<UsagePoint>,
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_type_parses_backend_tags() {
        assert_eq!(DeviceType::parse("computer"), DeviceType::Computer);
        assert_eq!(DeviceType::parse("iot"), DeviceType::Iot);
        assert_eq!(DeviceType::parse("printer"), DeviceType::Other);
    }

    #[test]
    fn month_total_sums_both_directions() {
        let device = Device {
            id: 1,
            name: "Gaming PC".into(),
            mac: "00:1A:2B:3C:4D:5E".into(),
            ip: "192.168.1.100".into(),
            device_type: DeviceType::Computer,
            first_seen: None,
            last_seen: None,
            month_download: 80,
            month_upload: 20,
        };
        assert_eq!(device.month_total(), 100);
    }
}
