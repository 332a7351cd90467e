//! Screen implementations. Each screen is a top-level Component.

pub mod dashboard;
pub mod device_detail;
pub mod devices;
pub mod reports;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create all screen components.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()),
        ),
        (ScreenId::Devices, Box::new(devices::DevicesScreen::new())),
        (
            ScreenId::DeviceDetail,
            Box::new(device_detail::DeviceDetailScreen::new()),
        ),
        (ScreenId::Reports, Box::new(reports::ReportsScreen::new())),
    ]
}
