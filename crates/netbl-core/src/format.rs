//! Human-readable byte and date formatting shared by the CLI and TUI.

use chrono::{NaiveDate, NaiveDateTime};

const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count with the default two decimal places.
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_prec(bytes, 2)
}

/// Format a byte count using the largest unit (base 1024) that keeps the
/// mantissa in `[1, 1024)`, rounded to `decimals` places with trailing
/// zeros trimmed. Zero is the literal `"0 Bytes"`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_bytes_prec(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".into();
    }

    let exp = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exp as i32);

    let mut mantissa = format!("{value:.decimals$}");
    if mantissa.contains('.') {
        mantissa.truncate(mantissa.trim_end_matches('0').trim_end_matches('.').len());
    }

    format!("{mantissa} {}", UNITS[exp])
}

/// Format a bytes/sec rate for meter labels, e.g. "8.01 MB/s".
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec.max(0.0) as u64))
}

/// Format an ISO timestamp as "Mon D, YYYY, HH:MM".
///
/// The backend emits both offset-free `isoformat()` strings and full
/// RFC 3339; both parse. Absent or unparsable input renders as "N/A".
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return "N/A".into();
    };

    parse_iso(raw).map_or_else(|| "N/A".into(), |dt| dt.format("%b %-d, %Y, %H:%M").to_string())
}

fn parse_iso(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    // Bare dates (device usage history buckets).
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn zero_is_literal() {
        assert_eq!(format_bytes(0), "0 Bytes");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_bytes(1), "1 Bytes");
        assert_eq!(format_bytes(1023), "1023 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1024 * 1024), "1 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn decimals_round_and_trim() {
        assert_eq!(format_bytes_prec(1536, 1), "1.5 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes_prec(1536, 0), "2 KB");
        assert_eq!(format_bytes(1_234_567), "1.18 MB");
    }

    #[test]
    fn trailing_zeros_of_integers_survive() {
        // 102400 bytes = exactly 100 KB; trimming must not eat the zeros.
        assert_eq!(format_bytes(102_400), "100 KB");
    }

    #[test]
    fn rate_appends_per_second() {
        assert_eq!(format_rate(8_400_000.0), "8.01 MB/s");
        assert_eq!(format_rate(-1.0), "0 Bytes/s");
    }

    #[test]
    fn absent_date_is_na() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("not a date")), "N/A");
    }

    #[test]
    fn iso_dates_render_localized() {
        assert_eq!(
            format_date(Some("2026-08-26T14:30:00")),
            "Aug 26, 2026, 14:30"
        );
        assert_eq!(
            format_date(Some("2026-08-26T14:30:00.123456")),
            "Aug 26, 2026, 14:30"
        );
        assert_eq!(
            format_date(Some("2026-01-05T09:05:00Z")),
            "Jan 5, 2026, 09:05"
        );
        assert_eq!(format_date(Some("2026-08-26")), "Aug 26, 2026, 00:00");
    }
}
