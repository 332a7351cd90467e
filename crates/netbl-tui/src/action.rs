//! All possible UI actions. Actions are the sole mechanism for state mutation.

use netbl_core::{Device, DeviceDetail, NetworkSummary, ReportPeriod, UsageReport, ViewState};

use crate::screen::ScreenId;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Data Events (from the netbl-core store) ───────────────────
    SummaryUpdated(ViewState<NetworkSummary>),
    DevicesUpdated(ViewState<Vec<Device>>),
    DeviceDetailUpdated(ViewState<DeviceDetail>),
    ReportUpdated(ViewState<UsageReport>),

    // ── Requests (screens asking the app to fetch) ────────────────
    OpenDeviceDetail(i64),
    SetReportPeriod(ReportPeriod),
    Refresh,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,
}
