// ── Monitor abstraction ──
//
// Owns the API client and the DataStore, and manages the dashboard
// polling loop. One-shot fetch methods serve the CLI; the request_*
// family publishes into the store for the TUI.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use netbl_api::transport::TransportConfig;
use netbl_api::ApiClient;

use crate::config::MonitorConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{Device, DeviceDetail, NetworkSummary, ReportPeriod, UsageReport};
use crate::store::{DataStore, ViewState};

const SUMMARY_FAILED: &str = "Failed to load network data. Please try again later.";
const DEVICES_FAILED: &str = "Failed to load devices. Please try again later.";
const DEVICE_DETAIL_FAILED: &str = "Failed to load device details. Please try again later.";
const REPORT_FAILED: &str = "Failed to load report data. Please try again later.";

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Construction builds the
/// HTTP client but performs no I/O; nothing is fetched until a fetch
/// method is called or polling starts.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    client: ApiClient,
    store: Arc<DataStore>,
    poll: Mutex<Option<PollTask>>,
}

struct PollTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Monitor {
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: config.tls.clone(),
            timeout: config.timeout,
        };
        let client = ApiClient::new(config.base_url.as_str(), &transport)
            .map_err(|e| CoreError::from_api(e, config.timeout))?;

        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                store: Arc::new(DataStore::new()),
                poll: Mutex::new(None),
            }),
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── One-shot fetches (CLI path) ──────────────────────────────

    /// Map a transport error, attaching the configured timeout.
    fn api_err(&self, err: netbl_api::Error) -> CoreError {
        CoreError::from_api(err, self.inner.config.timeout)
    }

    pub async fn fetch_summary(&self) -> Result<NetworkSummary, CoreError> {
        let resp = self
            .inner
            .client
            .summary()
            .await
            .map_err(|e| self.api_err(e))?;
        Ok(resp.into())
    }

    pub async fn fetch_devices(&self) -> Result<Vec<Device>, CoreError> {
        let records = self
            .inner
            .client
            .list_devices()
            .await
            .map_err(|e| self.api_err(e))?;
        Ok(records.into_iter().map(Device::from).collect())
    }

    pub async fn fetch_device(&self, id: i64) -> Result<DeviceDetail, CoreError> {
        match self.inner.client.device_detail(id).await {
            Ok(resp) => Ok(resp.into()),
            Err(e) if e.is_not_found() => Err(CoreError::NotFound {
                entity_type: "Device".into(),
                identifier: id.to_string(),
            }),
            Err(e) => Err(self.api_err(e)),
        }
    }

    pub async fn fetch_report(&self, period: ReportPeriod) -> Result<UsageReport, CoreError> {
        let resp = self
            .inner
            .client
            .usage_report(period.api_path())
            .await
            .map_err(|e| self.api_err(e))?;
        Ok(convert::usage_report(period, resp))
    }

    // ── Store-publishing fetches (TUI path) ──────────────────────
    //
    // Each `request_*` resets the view to `Loading` and spawns an
    // independent fetch; poll ticks reuse `refresh_summary` so a
    // transient failure replaces stale data with an error rather than
    // a spinner.

    pub fn request_summary(&self) {
        self.inner.store.set_summary(ViewState::Loading);
        let monitor = self.clone();
        tokio::spawn(async move { monitor.refresh_summary().await });
    }

    pub fn request_devices(&self) {
        self.inner.store.set_devices(ViewState::Loading);
        let monitor = self.clone();
        tokio::spawn(async move {
            match monitor.fetch_devices().await {
                Ok(devices) => monitor
                    .inner
                    .store
                    .set_devices(ViewState::Ready(Arc::new(devices))),
                Err(e) => {
                    warn!(error = %e, "device list fetch failed");
                    monitor
                        .inner
                        .store
                        .set_devices(ViewState::Failed(DEVICES_FAILED.into()));
                }
            }
        });
    }

    pub fn request_device_detail(&self, id: i64) {
        self.inner.store.set_device_detail(ViewState::Loading);
        let monitor = self.clone();
        tokio::spawn(async move {
            match monitor.fetch_device(id).await {
                Ok(detail) => monitor
                    .inner
                    .store
                    .set_device_detail(ViewState::Ready(Arc::new(detail))),
                Err(e) => {
                    warn!(error = %e, device_id = id, "device detail fetch failed");
                    let message = match e {
                        CoreError::NotFound { .. } => "Device not found.".into(),
                        _ => DEVICE_DETAIL_FAILED.into(),
                    };
                    monitor.inner.store.set_device_detail(ViewState::Failed(message));
                }
            }
        });
    }

    pub fn request_report(&self, period: ReportPeriod) {
        self.inner.store.set_report(ViewState::Loading);
        let monitor = self.clone();
        tokio::spawn(async move {
            match monitor.fetch_report(period).await {
                Ok(report) => monitor
                    .inner
                    .store
                    .set_report(ViewState::Ready(Arc::new(report))),
                Err(e) => {
                    warn!(error = %e, %period, "report fetch failed");
                    monitor
                        .inner
                        .store
                        .set_report(ViewState::Failed(REPORT_FAILED.into()));
                }
            }
        });
    }

    async fn refresh_summary(&self) {
        match self.fetch_summary().await {
            Ok(summary) => self
                .inner
                .store
                .set_summary(ViewState::Ready(Arc::new(summary))),
            Err(e) => {
                warn!(error = %e, "summary fetch failed");
                self.inner
                    .store
                    .set_summary(ViewState::Failed(SUMMARY_FAILED.into()));
            }
        }
    }

    // ── Polling lifecycle ────────────────────────────────────────

    /// Start the periodic summary poll.
    ///
    /// The first fetch fires immediately, then one per refresh
    /// interval. Ticks never wait on each other: each fetch runs as
    /// its own task, and a slow response does not delay or suppress
    /// the next tick. Starting while already polling is a no-op.
    pub fn start_polling(&self) {
        let mut slot = match self.inner.poll.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(task) = slot.as_ref() {
            if !task.handle.is_finished() {
                return;
            }
        }

        let cancel = CancellationToken::new();
        let monitor = self.clone();
        let interval = self.inner.config.refresh_interval;
        let handle = tokio::spawn(poll_task(monitor, interval, cancel.clone()));

        debug!(interval = ?interval, "polling started");
        *slot = Some(PollTask { cancel, handle });
    }

    /// Stop the periodic poll.
    ///
    /// Cancels the tick loop; fetches already in flight run to
    /// completion and may still publish into the store.
    pub fn stop_polling(&self) {
        let mut slot = match self.inner.poll.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(task) = slot.take() {
            task.cancel.cancel();
            debug!("polling stopped");
        }
    }

    pub fn is_polling(&self) -> bool {
        let slot = match self.inner.poll.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.as_ref().is_some_and(|task| !task.handle.is_finished())
    }
}

impl Drop for MonitorInner {
    fn drop(&mut self) {
        if let Ok(slot) = self.poll.get_mut() {
            if let Some(task) = slot.take() {
                task.cancel.cancel();
            }
        }
    }
}

/// Tick loop for the dashboard poll. The interval's first tick fires
/// immediately, giving the initial load.
async fn poll_task(monitor: Monitor, interval: std::time::Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let monitor = monitor.clone();
                tokio::spawn(async move { monitor.refresh_summary().await });
            }
        }
    }
}
