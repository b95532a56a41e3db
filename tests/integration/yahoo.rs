use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use oppscan::services::{MarketDataProvider, ProviderError, YahooProvider};

fn provider(server: &MockServer) -> YahooProvider {
    YahooProvider::new(Duration::from_secs(2))
        .unwrap()
        .with_base_url(server.uri())
}

fn chart_payload(timestamps: &[i64], closes: &[serde_json::Value]) -> serde_json::Value {
    let filled: Vec<serde_json::Value> = closes.to_vec();
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "TEST" },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": filled,
                        "high": filled,
                        "low": filled,
                        "close": filled,
                        "volume": filled
                    }]
                }
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn parses_a_complete_chart_payload() {
    let server = MockServer::start().await;
    let payload = chart_payload(
        &[1_700_000_000, 1_700_086_400, 1_700_172_800],
        &[json!(10.0), json!(11.0), json!(12.0)],
    );
    Mock::given(method("GET"))
        .and(path("/AAPL"))
        .and(query_param("range", "3mo"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let bars = provider(&server)
        .fetch_history("AAPL", "3mo", "1d")
        .await
        .unwrap();

    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].close, 10.0);
    assert_eq!(bars[2].close, 12.0);
    assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[tokio::test]
async fn rows_with_missing_values_are_dropped() {
    let server = MockServer::start().await;
    let payload = chart_payload(
        &[1_700_000_000, 1_700_086_400, 1_700_172_800],
        &[json!(10.0), json!(null), json!(12.0)],
    );
    Mock::given(method("GET"))
        .and(path("/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let bars = provider(&server)
        .fetch_history("AAPL", "3mo", "1d")
        .await
        .unwrap();

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[1].close, 12.0);
}

#[tokio::test]
async fn api_error_object_maps_to_a_provider_error() {
    let server = MockServer::start().await;
    let payload = json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found" }
        }
    });
    Mock::given(method("GET"))
        .and(path("/UNKNOWN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_history("UNKNOWN", "3mo", "1d")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Api { ref code, .. } if code == "Not Found"));
}

#[tokio::test]
async fn missing_timestamps_mean_an_empty_series() {
    let server = MockServer::start().await;
    let payload = json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "TEST" },
                "indicators": { "quote": [{ "open": [], "high": [], "low": [], "close": [], "volume": [] }] }
            }],
            "error": null
        }
    });
    Mock::given(method("GET"))
        .and(path("/EMPTY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let bars = provider(&server)
        .fetch_history("EMPTY", "3mo", "1d")
        .await
        .unwrap();
    assert!(bars.is_empty());
}

#[tokio::test]
async fn transport_failure_surfaces_as_a_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_history("AAPL", "3mo", "1d")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Request(_)));
}
