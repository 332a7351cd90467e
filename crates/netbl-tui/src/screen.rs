//! Screen trait and screen identifier enum.

use std::fmt;

/// Identifies each TUI screen. Dashboard, Devices, and Reports sit in
/// the tab bar (number keys 1-3); DeviceDetail is reached by selecting
/// a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Devices, // 2
    Reports, // 3
    /// Drill-down from the device list. Not in the tab bar.
    DeviceDetail,
}

impl ScreenId {
    /// All tab-bar screens in order.
    pub const ALL: [ScreenId; 3] = [Self::Dashboard, Self::Devices, Self::Reports];

    /// Numeric key (1-3) for this screen. DeviceDetail has none.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Devices => 2,
            Self::Reports => 3,
            Self::DeviceDetail => 0,
        }
    }

    /// Screen from a numeric key (1-3). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Dashboard),
            2 => Some(Self::Devices),
            3 => Some(Self::Reports),
            _ => None,
        }
    }

    /// Next tab-bar screen (wraps; detail views count as their parent tab).
    pub fn next(self) -> Self {
        let idx = Self::ALL
            .iter()
            .position(|&s| s == self.tab())
            .unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab-bar screen (wraps).
    pub fn prev(self) -> Self {
        let idx = Self::ALL
            .iter()
            .position(|&s| s == self.tab())
            .unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// The tab this screen belongs to (DeviceDetail lives under Devices).
    pub fn tab(self) -> Self {
        match self {
            Self::DeviceDetail => Self::Devices,
            other => other,
        }
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Devices | Self::DeviceDetail => "Devices",
            Self::Reports => "Reports",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn number_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(4), None);
        assert_eq!(ScreenId::from_number(0), None);
    }

    #[test]
    fn tab_cycling_wraps() {
        assert_eq!(ScreenId::Reports.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Reports);
    }

    #[test]
    fn detail_cycles_from_its_parent_tab() {
        assert_eq!(ScreenId::DeviceDetail.next(), ScreenId::Reports);
        assert_eq!(ScreenId::DeviceDetail.prev(), ScreenId::Dashboard);
    }
}
