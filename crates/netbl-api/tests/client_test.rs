// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netbl_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_summary() {
    let (server, client) = setup().await;

    let body = json!({
        "currentUsage": {
            "upload": 1_250_000.0,
            "download": 8_400_000.0,
            "maxUpload": 10_000_000.0,
            "maxDownload": 50_000_000.0,
            "dailyTotal": 4_200_000_000u64,
            "monthlyTotal": 180_000_000_000u64,
            "monthlyLimit": 500_000_000_000u64
        },
        "historicalData": {
            "hourly": [
                { "time": "13:00", "download": 5_000_000, "upload": 1_000_000 },
                { "time": "14:00", "download": 7_500_000, "upload": 2_000_000 }
            ]
        },
        "topDevices": [
            { "id": 1, "name": "Gaming PC", "mac": "00:1A:2B:3C:4D:5E",
              "ip": "192.168.1.100", "type": "computer", "usage": 42_000_000_000u64 }
        ],
        "alerts": [
            { "id": 7, "timestamp": "2026-08-26T14:30:00", "type": "usage",
              "severity": "warning", "message": "Monthly usage at 75% of limit",
              "device_id": null }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/stats/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let summary = client.summary().await.unwrap();

    assert_eq!(summary.current_usage.monthly_limit, 500_000_000_000);
    assert_eq!(summary.historical_data.hourly.len(), 2);
    assert_eq!(summary.historical_data.hourly[1].time, "14:00");
    assert_eq!(summary.top_devices[0].device_type, "computer");
    assert_eq!(summary.alerts[0].severity, "warning");
    assert_eq!(summary.alerts[0].device_id, None);
}

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": 1, "name": "Gaming PC", "mac": "00:1A:2B:3C:4D:5E",
          "ip": "192.168.1.100", "type": "computer",
          "first_seen": "2026-07-27T10:00:00", "last_seen": "2026-08-26T14:00:00",
          "month_download": 80_000_000_000u64, "month_upload": 20_000_000_000u64 },
        { "id": 5, "name": "IoT Hub", "mac": "44:5A:6B:7C:8D:9E",
          "ip": "192.168.1.104", "type": "iot",
          "first_seen": null, "last_seen": null,
          "month_download": 0, "month_upload": 0 }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].name, "Gaming PC");
    assert_eq!(devices[0].month_download, 80_000_000_000);
    assert_eq!(devices[1].first_seen, None);
}

#[tokio::test]
async fn test_device_detail() {
    let (server, client) = setup().await;

    let body = json!({
        "device": { "id": 3, "name": "iPhone", "mac": "22:3A:4B:5C:6D:7E",
                    "ip": "192.168.1.102", "type": "mobile",
                    "first_seen": "2026-07-12T08:00:00",
                    "last_seen": "2026-08-26T13:55:00" },
        "usage": [
            { "date": "2026-08-25", "download": 900_000_000, "upload": 150_000_000,
              "total": 1_050_000_000 }
        ],
        "alerts": [
            { "id": 2, "timestamp": "2026-08-20T09:00:00", "type": "bandwidth",
              "severity": "info", "message": "Unusual upload volume" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/devices/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let detail = client.device_detail(3).await.unwrap();

    assert_eq!(detail.device.id, 3);
    assert_eq!(detail.usage[0].total, 1_050_000_000);
    // device-scoped alerts carry no device_id field
    assert_eq!(detail.alerts[0].device_id, None);
}

#[tokio::test]
async fn test_usage_report() {
    let (server, client) = setup().await;

    let body = json!({
        "period": "weekly",
        "data": [
            { "date": "Mon", "download": 12_000_000_000u64,
              "upload": 3_000_000_000u64, "total": 15_000_000_000u64 },
            { "date": "Tue", "download": 9_000_000_000u64,
              "upload": 2_000_000_000u64, "total": 11_000_000_000u64 }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/reports/usage/weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let report = client.usage_report("weekly").await.unwrap();

    assert_eq!(report.period.as_deref(), Some("weekly"));
    assert_eq!(report.data.len(), 2);
    assert_eq!(report.data[0].date, "Mon");
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_device_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Device not found" })),
        )
        .mount(&server)
        .await;

    let err = client.device_detail(999).await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::Api { message, status } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Device not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/stats/summary"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.summary().await.unwrap_err();

    assert!(err.is_transient());
    assert!(matches!(err, Error::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.list_devices().await.unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}
