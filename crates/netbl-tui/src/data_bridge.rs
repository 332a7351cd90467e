//! Data bridge: forwards store updates from [`Monitor`] into TUI actions.
//!
//! Runs as a background task, selecting over the store's watch channels
//! and re-publishing every change through the action channel. The app
//! loop stays single-threaded; all data arrives as [`Action`]s.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use netbl_core::Monitor;

use crate::action::Action;

/// Forward every store change as an [`Action`] until cancelled.
pub async fn run_data_bridge(
    monitor: Monitor,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let store = monitor.store();
    let mut summary = store.subscribe_summary();
    let mut devices = store.subscribe_devices();
    let mut device_detail = store.subscribe_device_detail();
    let mut report = store.subscribe_report();

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = summary.changed() => {
                let state = summary.borrow_and_update().clone();
                if action_tx.send(Action::SummaryUpdated(state)).is_err() {
                    break;
                }
            }
            Ok(()) = devices.changed() => {
                let state = devices.borrow_and_update().clone();
                if action_tx.send(Action::DevicesUpdated(state)).is_err() {
                    break;
                }
            }
            Ok(()) = device_detail.changed() => {
                let state = device_detail.borrow_and_update().clone();
                if action_tx.send(Action::DeviceDetailUpdated(state)).is_err() {
                    break;
                }
            }
            Ok(()) = report.changed() => {
                let state = report.borrow_and_update().clone();
                if action_tx.send(Action::ReportUpdated(state)).is_err() {
                    break;
                }
            }
        }
    }
}
