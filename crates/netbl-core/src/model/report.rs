use serde::Serialize;
use strum::{Display, EnumString};

/// Usage report window, selectable in the Reports view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ReportPeriod {
    /// Path segment for `/api/reports/usage/{period}`.
    pub fn api_path(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Human heading for the chart title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Last 24 Hours",
            Self::Weekly => "Last 7 Days",
            Self::Monthly => "Last 30 Days",
        }
    }

    pub const ALL: [ReportPeriod; 3] = [Self::Daily, Self::Weekly, Self::Monthly];
}

/// One bucket of a usage series.
///
/// `date` is a display label whose shape depends on the period: "HH:MM"
/// for daily, weekday name for weekly, day-of-month for monthly, and
/// "YYYY-MM-DD" in device usage history.
#[derive(Debug, Clone, Serialize)]
pub struct UsagePoint {
    pub date: String,
    pub download: u64,
    pub upload: u64,
    pub total: u64,
}

/// An ordered usage series for a selected period.
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    pub period: ReportPeriod,
    pub data: Vec<UsagePoint>,
}

impl UsageReport {
    pub fn total_download(&self) -> u64 {
        self.data.iter().map(|p| p.download).sum()
    }

    pub fn total_upload(&self) -> u64 {
        self.data.iter().map(|p| p.upload).sum()
    }

    pub fn total(&self) -> u64 {
        self.total_download() + self.total_upload()
    }

    /// Mean usage per bucket; 0 for an empty series.
    pub fn average(&self) -> u64 {
        if self.data.is_empty() {
            0
        } else {
            self.total() / self.data.len() as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn point(download: u64, upload: u64) -> UsagePoint {
        UsagePoint {
            date: "Mon".into(),
            download,
            upload,
            total: download + upload,
        }
    }

    #[test]
    fn period_round_trips_through_strings() {
        assert_eq!(ReportPeriod::from_str("weekly").ok(), Some(ReportPeriod::Weekly));
        assert_eq!(ReportPeriod::from_str("MONTHLY").ok(), Some(ReportPeriod::Monthly));
        assert!(ReportPeriod::from_str("yearly").is_err());
        assert_eq!(ReportPeriod::Daily.api_path(), "daily");
        assert_eq!(ReportPeriod::Daily.to_string(), "daily");
    }

    #[test]
    fn report_totals_and_average() {
        let report = UsageReport {
            period: ReportPeriod::Weekly,
            data: vec![point(10, 2), point(20, 4), point(30, 6)],
        };
        assert_eq!(report.total_download(), 60);
        assert_eq!(report.total_upload(), 12);
        assert_eq!(report.total(), 72);
        assert_eq!(report.average(), 24);
    }

    #[test]
    fn empty_report_average_is_zero() {
        let report = UsageReport {
            period: ReportPeriod::Daily,
            data: Vec::new(),
        };
        assert_eq!(report.average(), 0);
    }
}
