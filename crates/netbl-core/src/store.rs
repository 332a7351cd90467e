// ── Central reactive view store ──
//
// One watch channel per view. Each fetch publishes a complete
// `ViewState` snapshot; subscribers (the TUI) re-render on change and
// the latest value is always available via `borrow`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::{Device, DeviceDetail, NetworkSummary, UsageReport};

/// Lifecycle of one remotely-fetched view.
///
/// `Ready` wraps the payload in `Arc` so cloning out of a watch borrow
/// is cheap. `Failed` carries a user-facing message, already worded for
/// display.
#[derive(Debug, Default)]
pub enum ViewState<T> {
    #[default]
    Loading,
    Ready(Arc<T>),
    Failed(String),
}

// Manual impl: `derive(Clone)` would bound `T: Clone`, which the Arc
// makes unnecessary.
impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Ready(data) => Self::Ready(Arc::clone(data)),
            Self::Failed(message) => Self::Failed(message.clone()),
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Central reactive store for everything the views display.
///
/// Mutations are broadcast to subscribers via `watch` channels; reads
/// of the current value never block.
pub struct DataStore {
    summary: watch::Sender<ViewState<NetworkSummary>>,
    devices: watch::Sender<ViewState<Vec<Device>>>,
    device_detail: watch::Sender<ViewState<DeviceDetail>>,
    report: watch::Sender<ViewState<UsageReport>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (summary, _) = watch::channel(ViewState::Loading);
        let (devices, _) = watch::channel(ViewState::Loading);
        let (device_detail, _) = watch::channel(ViewState::Loading);
        let (report, _) = watch::channel(ViewState::Loading);
        let (last_refresh, _) = watch::channel(None);

        Self {
            summary,
            devices,
            device_detail,
            report,
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn summary(&self) -> ViewState<NetworkSummary> {
        self.summary.borrow().clone()
    }

    pub fn devices(&self) -> ViewState<Vec<Device>> {
        self.devices.borrow().clone()
    }

    pub fn device_detail(&self) -> ViewState<DeviceDetail> {
        self.device_detail.borrow().clone()
    }

    pub fn report(&self) -> ViewState<UsageReport> {
        self.report.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_summary(&self) -> watch::Receiver<ViewState<NetworkSummary>> {
        self.summary.subscribe()
    }

    pub fn subscribe_devices(&self) -> watch::Receiver<ViewState<Vec<Device>>> {
        self.devices.subscribe()
    }

    pub fn subscribe_device_detail(&self) -> watch::Receiver<ViewState<DeviceDetail>> {
        self.device_detail.subscribe()
    }

    pub fn subscribe_report(&self) -> watch::Receiver<ViewState<UsageReport>> {
        self.report.subscribe()
    }

    // ── Mutators ─────────────────────────────────────────────────────

    pub(crate) fn set_summary(&self, state: ViewState<NetworkSummary>) {
        if matches!(state, ViewState::Ready(_)) {
            let _ = self.last_refresh.send(Some(Utc::now()));
        }
        let _ = self.summary.send(state);
    }

    pub(crate) fn set_devices(&self, state: ViewState<Vec<Device>>) {
        let _ = self.devices.send(state);
    }

    pub(crate) fn set_device_detail(&self, state: ViewState<DeviceDetail>) {
        let _ = self.device_detail.send(state);
    }

    pub(crate) fn set_report(&self, state: ViewState<UsageReport>) {
        let _ = self.report.send(state);
    }

    // ── Metadata ─────────────────────────────────────────────────────

    /// When the dashboard summary last loaded successfully, or `None`
    /// if it never has.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// How long ago the last successful refresh occurred.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_start_loading() {
        let store = DataStore::new();
        assert!(store.summary().is_loading());
        assert!(store.devices().is_loading());
        assert!(store.report().is_loading());
        assert!(store.last_refresh().is_none());
    }

    #[test]
    fn failed_state_exposes_message() {
        let store = DataStore::new();
        store.set_devices(ViewState::Failed("boom".into()));
        assert_eq!(store.devices().error(), Some("boom"));
        assert!(store.devices().data().is_none());
    }

    #[test]
    fn ready_summary_stamps_refresh_time() {
        let store = DataStore::new();
        let summary = NetworkSummary {
            current: crate::model::CurrentUsage {
                upload: 0.0,
                download: 0.0,
                max_upload: 1.0,
                max_download: 1.0,
                daily_total: 0,
                monthly_total: 0,
                monthly_limit: 0,
            },
            hourly: Vec::new(),
            top_devices: Vec::new(),
            alerts: Vec::new(),
        };
        store.set_summary(ViewState::Ready(Arc::new(summary)));
        assert!(store.last_refresh().is_some());
        assert!(store.summary().data().is_some());
    }
}
