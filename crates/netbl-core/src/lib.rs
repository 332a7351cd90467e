// netbl-core: Reactive data layer between netbl-api and consumers (CLI/TUI).

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod model;
pub mod monitor;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::MonitorConfig;
pub use error::CoreError;
pub use monitor::Monitor;
pub use store::{DataStore, ViewState};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alert, AlertSeverity, CurrentUsage, Device, DeviceDetail, DeviceType, NetworkSummary,
    ReportPeriod, TopDevice, UsagePoint, UsageReport,
};
