//! Device command handlers.

use tabled::Tabled;

use netbl_core::format::{format_bytes, format_date};
use netbl_core::{Device, DeviceDetail, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "This Month")]
    month: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            ip: d.ip.clone(),
            mac: d.mac.clone(),
            dtype: d.device_type.to_string(),
            month: format_bytes(d.month_total()),
            last_seen: format_date(d.last_seen.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct UsageRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Download")]
    download: String,
    #[tabled(rename = "Upload")]
    upload: String,
    #[tabled(rename = "Total")]
    total: String,
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle_list(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = monitor.fetch_devices().await?;
    let rendered = output::render_list(&global.output, &devices, |d| DeviceRow::from(d))?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub async fn handle_detail(monitor: &Monitor, id: i64, global: &GlobalOpts) -> Result<(), CliError> {
    let detail = monitor.fetch_device(id).await?;
    let rendered = output::render_single(&global.output, &detail, detail_text)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail_text(detail: &DeviceDetail) -> String {
    let d = &detail.device;
    let mut lines = vec![
        format!("Name:        {}", d.name),
        format!("ID:          {}", d.id),
        format!("MAC:         {}", d.mac),
        format!("IP:          {}", d.ip),
        format!("Type:        {}", d.device_type),
        format!("First seen:  {}", format_date(d.first_seen.as_deref())),
        format!("Last seen:   {}", format_date(d.last_seen.as_deref())),
        format!(
            "This month:  {} down / {} up",
            format_bytes(d.month_download),
            format_bytes(d.month_upload)
        ),
    ];

    if !detail.usage.is_empty() {
        lines.push(String::new());
        lines.push("Usage (30 days)".to_owned());
        let rows: Vec<UsageRow> = detail
            .usage
            .iter()
            .map(|p| UsageRow {
                date: p.date.clone(),
                download: format_bytes(p.download),
                upload: format_bytes(p.upload),
                total: format_bytes(p.total),
            })
            .collect();
        lines.push(output::render_table(&rows));
    }

    if !detail.alerts.is_empty() {
        lines.push(String::new());
        lines.push(format!("Alerts ({})", detail.alerts.len()));
        for alert in &detail.alerts {
            lines.push(format!(
                "  [{}] {}  {}",
                alert.severity.to_string().to_uppercase(),
                format_date(Some(&alert.timestamp)),
                alert.message
            ));
        }
    }

    lines.join("\n")
}
