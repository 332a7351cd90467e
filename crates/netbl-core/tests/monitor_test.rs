// Polling lifecycle tests against a mock backend.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netbl_core::{CoreError, Monitor, MonitorConfig, ReportPeriod, ViewState};

fn summary_body() -> serde_json::Value {
    json!({
        "currentUsage": {
            "upload": 2_400_000.0,
            "download": 8_700_000.0,
            "maxUpload": 10_000_000.0,
            "maxDownload": 100_000_000.0,
            "dailyTotal": 5_200_000_000_u64,
            "monthlyTotal": 910_000_000_000_u64,
            "monthlyLimit": 1_000_000_000_000_u64
        },
        "historicalData": {
            "hourly": [
                {"time": "13:00", "download": 450_000_000_u64, "upload": 120_000_000_u64},
                {"time": "14:00", "download": 610_000_000_u64, "upload": 150_000_000_u64}
            ]
        },
        "topDevices": [
            {"id": 1, "name": "Gaming PC", "mac": "00:1A:2B:3C:4D:5E",
             "ip": "192.168.1.100", "type": "computer", "usage": 350_000_000_000_u64}
        ],
        "alerts": []
    })
}

fn monitor_for(server: &MockServer, refresh: Duration) -> Monitor {
    let config = MonitorConfig {
        base_url: Url::parse(&server.uri()).expect("mock server uri"),
        refresh_interval: refresh,
        ..MonitorConfig::default()
    };
    Monitor::new(config).expect("monitor")
}

#[tokio::test]
async fn polling_fetches_immediately_then_on_interval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body()))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server, Duration::from_millis(100));
    let mut rx = monitor.store().subscribe_summary();

    monitor.start_polling();
    assert!(monitor.is_polling());

    // First tick fires immediately.
    rx.changed().await.expect("summary update");
    assert!(rx.borrow().data().is_some());
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 1);

    // Subsequent ticks follow the refresh interval.
    tokio::time::sleep(Duration::from_millis(250)).await;
    let after_wait = server.received_requests().await.unwrap_or_default().len();
    assert!(after_wait >= 2, "expected periodic refetches, got {after_wait}");

    // Stopping halts new requests.
    monitor.stop_polling();
    assert!(!monitor.is_polling());
    tokio::time::sleep(Duration::from_millis(50)).await;
    let at_stop = server.received_requests().await.unwrap_or_default().len();
    tokio::time::sleep(Duration::from_millis(250)).await;
    let after_stop = server.received_requests().await.unwrap_or_default().len();
    assert_eq!(at_stop, after_stop, "requests continued after stop");
}

#[tokio::test]
async fn start_polling_twice_spawns_one_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body()))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server, Duration::from_secs(3600));
    monitor.start_polling();
    monitor.start_polling();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(
        server.received_requests().await.unwrap_or_default().len(),
        1,
        "duplicate start must not double the tick loop"
    );
    monitor.stop_polling();
}

#[tokio::test]
async fn failed_fetch_publishes_error_then_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats/summary"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stats/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body()))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server, Duration::from_millis(100));
    let mut rx = monitor.store().subscribe_summary();
    monitor.start_polling();

    rx.changed().await.expect("first update");
    let first = rx.borrow().clone();
    assert_eq!(
        first.error(),
        Some("Failed to load network data. Please try again later.")
    );

    // Next tick replaces the error with data.
    loop {
        rx.changed().await.expect("subsequent update");
        if let ViewState::Ready(summary) = rx.borrow().clone() {
            assert!((summary.current.upload - 2_400_000.0).abs() < f64::EPSILON);
            break;
        }
    }
    monitor.stop_polling();
}

#[tokio::test]
async fn request_report_publishes_into_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/usage/weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "period": "weekly",
            "data": [
                {"date": "Mon", "download": 100_u64, "upload": 20_u64, "total": 120_u64},
                {"date": "Tue", "download": 200_u64, "upload": 40_u64, "total": 240_u64}
            ]
        })))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server, Duration::from_secs(3600));
    let mut rx = monitor.store().subscribe_report();

    monitor.request_report(ReportPeriod::Weekly);

    loop {
        rx.changed().await.expect("report update");
        match rx.borrow().clone() {
            ViewState::Loading => continue,
            ViewState::Ready(report) => {
                assert_eq!(report.period, ReportPeriod::Weekly);
                assert_eq!(report.total(), 360);
                break;
            }
            ViewState::Failed(message) => panic!("report fetch failed: {message}"),
        }
    }
}

#[tokio::test]
async fn device_detail_not_found_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/devices/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Device not found"})),
        )
        .mount(&server)
        .await;

    let monitor = monitor_for(&server, Duration::from_secs(3600));
    let mut rx = monitor.store().subscribe_device_detail();

    monitor.request_device_detail(99);

    loop {
        rx.changed().await.expect("detail update");
        match rx.borrow().clone() {
            ViewState::Loading => continue,
            ViewState::Failed(message) => {
                assert_eq!(message, "Device not found.");
                break;
            }
            ViewState::Ready(_) => panic!("expected failure"),
        }
    }
}

#[tokio::test]
async fn timeout_error_reports_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats/summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(summary_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = MonitorConfig {
        base_url: Url::parse(&server.uri()).expect("mock server uri"),
        timeout: Duration::from_secs(1),
        ..MonitorConfig::default()
    };
    let monitor = Monitor::new(config).expect("monitor");

    match monitor.fetch_summary().await {
        Err(CoreError::Timeout { timeout_secs }) => assert_eq!(timeout_secs, 1),
        other => panic!("expected a timeout error, got {other:?}"),
    }
}

#[tokio::test]
async fn one_shot_fetches_map_domain_types() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Gaming PC", "mac": "00:1A:2B:3C:4D:5E",
             "ip": "192.168.1.100", "type": "computer",
             "first_seen": "2026-01-15T08:00:00", "last_seen": "2026-08-26T14:30:00",
             "month_download": 300_000_000_000_u64, "month_upload": 50_000_000_000_u64}
        ])))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server, Duration::from_secs(3600));
    let devices = monitor.fetch_devices().await.expect("devices");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "Gaming PC");
    assert_eq!(devices[0].month_total(), 350_000_000_000);
}
