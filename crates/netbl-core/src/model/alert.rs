use serde::Serialize;
use strum::Display;

/// Severity of a usage anomaly computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
    /// Severity string the client doesn't recognize. Kept rather than
    /// rejected -- the backend owns the taxonomy.
    Other,
}

impl AlertSeverity {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "info" => Self::Info,
            "warning" => Self::Warning,
            "critical" => Self::Critical,
            _ => Self::Other,
        }
    }
}

/// A usage anomaly reported by the backend.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: Option<i64>,
    /// ISO timestamp string, formatted for display via `format::format_date`.
    pub timestamp: String,
    /// Category tag, e.g. "usage" or "bandwidth".
    pub category: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub device_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_known_tags() {
        assert_eq!(AlertSeverity::parse("info"), AlertSeverity::Info);
        assert_eq!(AlertSeverity::parse("warning"), AlertSeverity::Warning);
        assert_eq!(AlertSeverity::parse("critical"), AlertSeverity::Critical);
    }

    #[test]
    fn severity_keeps_unknown_tags() {
        assert_eq!(AlertSeverity::parse("fatal"), AlertSeverity::Other);
        assert_eq!(AlertSeverity::parse(""), AlertSeverity::Other);
    }

    #[test]
    fn severity_orders_by_urgency() {
        assert!(AlertSeverity::Info < AlertSeverity::Warning);
        assert!(AlertSeverity::Warning < AlertSeverity::Critical);
    }
}
