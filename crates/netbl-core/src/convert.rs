// Wire-record → domain-type conversion.
//
// All parsing of backend tag strings happens here, once, at the API
// boundary. Missing `total` fields are filled in from the component
// directions so consumers never recompute them.

use netbl_api::types::{
    AlertRecord, CurrentUsageRecord, DeviceDetailResponse, DeviceRecord, HourlyPointRecord,
    SummaryResponse, TopDeviceRecord, UsagePointRecord, UsageReportResponse,
};

use crate::model::{
    Alert, AlertSeverity, CurrentUsage, Device, DeviceDetail, DeviceType, NetworkSummary,
    ReportPeriod, TopDevice, UsagePoint, UsageReport,
};

impl From<AlertRecord> for Alert {
    fn from(rec: AlertRecord) -> Self {
        Self {
            id: rec.id,
            timestamp: rec.timestamp,
            category: rec.alert_type,
            severity: AlertSeverity::parse(&rec.severity),
            message: rec.message,
            device_id: rec.device_id,
        }
    }
}

impl From<DeviceRecord> for Device {
    fn from(rec: DeviceRecord) -> Self {
        Self {
            id: rec.id,
            name: rec.name,
            mac: rec.mac,
            ip: rec.ip,
            device_type: DeviceType::parse(&rec.device_type),
            first_seen: rec.first_seen,
            last_seen: rec.last_seen,
            month_download: rec.month_download,
            month_upload: rec.month_upload,
        }
    }
}

impl From<TopDeviceRecord> for TopDevice {
    fn from(rec: TopDeviceRecord) -> Self {
        Self {
            id: rec.id,
            name: rec.name,
            ip: rec.ip,
            device_type: DeviceType::parse(&rec.device_type),
            usage: rec.usage,
        }
    }
}

impl From<UsagePointRecord> for UsagePoint {
    fn from(rec: UsagePointRecord) -> Self {
        let total = if rec.total == 0 {
            rec.download + rec.upload
        } else {
            rec.total
        };
        Self {
            date: rec.date,
            download: rec.download,
            upload: rec.upload,
            total,
        }
    }
}

impl From<HourlyPointRecord> for UsagePoint {
    fn from(rec: HourlyPointRecord) -> Self {
        Self {
            date: rec.time,
            download: rec.download,
            upload: rec.upload,
            total: rec.download + rec.upload,
        }
    }
}

impl From<CurrentUsageRecord> for CurrentUsage {
    fn from(rec: CurrentUsageRecord) -> Self {
        Self {
            upload: rec.upload,
            download: rec.download,
            max_upload: rec.max_upload,
            max_download: rec.max_download,
            daily_total: rec.daily_total,
            monthly_total: rec.monthly_total,
            monthly_limit: rec.monthly_limit,
        }
    }
}

impl From<SummaryResponse> for NetworkSummary {
    fn from(resp: SummaryResponse) -> Self {
        Self {
            current: resp.current_usage.into(),
            hourly: resp
                .historical_data
                .hourly
                .into_iter()
                .map(UsagePoint::from)
                .collect(),
            top_devices: resp.top_devices.into_iter().map(TopDevice::from).collect(),
            alerts: resp.alerts.into_iter().map(Alert::from).collect(),
        }
    }
}

impl From<DeviceDetailResponse> for DeviceDetail {
    fn from(resp: DeviceDetailResponse) -> Self {
        Self {
            device: resp.device.into(),
            usage: resp.usage.into_iter().map(UsagePoint::from).collect(),
            alerts: resp.alerts.into_iter().map(Alert::from).collect(),
        }
    }
}

/// Build a [`UsageReport`] from the wire response plus the period the
/// caller asked for (the response's own `period` echo is advisory).
pub fn usage_report(period: ReportPeriod, resp: UsageReportResponse) -> UsageReport {
    UsageReport {
        period,
        data: resp.data.into_iter().map(UsagePoint::from).collect(),
    }
}
