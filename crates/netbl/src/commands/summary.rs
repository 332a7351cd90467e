//! Dashboard summary command handler.

use owo_colors::OwoColorize;
use tabled::Tabled;

use netbl_core::format::{format_bytes, format_date, format_rate};
use netbl_core::{Alert, AlertSeverity, Monitor, NetworkSummary, TopDevice};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TopDeviceRow {
    #[tabled(rename = "Device")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "7-Day Usage")]
    usage: String,
}

impl From<&TopDevice> for TopDeviceRow {
    fn from(d: &TopDevice) -> Self {
        Self {
            name: d.name.clone(),
            ip: d.ip.clone().unwrap_or_else(|| "-".into()),
            dtype: d.device_type.to_string(),
            usage: format_bytes(d.usage),
        }
    }
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = monitor.fetch_summary().await?;
    let color = output::should_color(&global.color);

    let rendered = output::render_single(&global.output, &summary, |s| detail(s, color))?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(summary: &NetworkSummary, color: bool) -> String {
    let current = &summary.current;
    let mut lines = vec![
        "Current Usage".to_owned(),
        format!(
            "  Download:  {:>12}  ({:.0}% of {})",
            format_rate(current.download),
            current.download_pct(),
            format_rate(current.max_download),
        ),
        format!(
            "  Upload:    {:>12}  ({:.0}% of {})",
            format_rate(current.upload),
            current.upload_pct(),
            format_rate(current.max_upload),
        ),
        format!("  Today:     {:>12}", format_bytes(current.daily_total)),
        format!(
            "  Month:     {:>12}  ({:.0}% of {})",
            format_bytes(current.monthly_total),
            current.monthly_pct(),
            format_bytes(current.monthly_limit),
        ),
    ];

    if !summary.top_devices.is_empty() {
        lines.push(String::new());
        lines.push("Top Devices (7 days)".to_owned());
        let rows: Vec<TopDeviceRow> = summary.top_devices.iter().map(Into::into).collect();
        lines.push(output::render_table(&rows));
    }

    lines.push(String::new());
    if summary.alerts.is_empty() {
        lines.push("No active alerts".to_owned());
    } else {
        lines.push(format!("Alerts ({})", summary.alerts.len()));
        for alert in &summary.alerts {
            lines.push(format!("  {}", alert_line(alert, color)));
        }
    }

    lines.join("\n")
}

fn alert_line(alert: &Alert, color: bool) -> String {
    let severity = alert.severity.to_string().to_uppercase();
    let severity = if color {
        match alert.severity {
            AlertSeverity::Critical => severity.red().bold().to_string(),
            AlertSeverity::Warning => severity.yellow().to_string(),
            AlertSeverity::Info | AlertSeverity::Other => severity.cyan().to_string(),
        }
    } else {
        severity
    };

    format!(
        "[{severity}] {}  {}",
        format_date(Some(&alert.timestamp)),
        alert.message
    )
}
