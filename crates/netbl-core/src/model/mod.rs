// Domain types. Converted once from netbl-api wire records and treated as
// read-only snapshots from there on -- the backend owns all invariants.

mod alert;
mod device;
mod report;
mod summary;

pub use alert::{Alert, AlertSeverity};
pub use device::{Device, DeviceDetail, DeviceType};
pub use report::{ReportPeriod, UsagePoint, UsageReport};
pub use summary::{CurrentUsage, NetworkSummary, TopDevice};
