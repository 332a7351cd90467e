//! Usage report command handler.

use tabled::Tabled;

use netbl_core::format::format_bytes;
use netbl_core::{Monitor, ReportPeriod, UsageReport};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Download")]
    download: String,
    #[tabled(rename = "Upload")]
    upload: String,
    #[tabled(rename = "Total")]
    total: String,
}

pub async fn handle(
    monitor: &Monitor,
    period: ReportPeriod,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let report = monitor.fetch_report(period).await?;
    let rendered = output::render_single(&global.output, &report, detail_text)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail_text(report: &UsageReport) -> String {
    let mut lines = vec![format!("Usage Report: {}", report.period.label())];

    let rows: Vec<ReportRow> = report
        .data
        .iter()
        .map(|p| ReportRow {
            date: p.date.clone(),
            download: format_bytes(p.download),
            upload: format_bytes(p.upload),
            total: format_bytes(p.total),
        })
        .collect();
    lines.push(output::render_table(&rows));

    lines.push(format!(
        "Totals: {} down / {} up / {} combined (avg {} per bucket)",
        format_bytes(report.total_download()),
        format_bytes(report.total_upload()),
        format_bytes(report.total()),
        format_bytes(report.average()),
    ));

    lines.join("\n")
}
