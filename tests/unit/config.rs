use oppscan::config::{Config, TickerMapping};

use crate::common::test_config;

#[test]
fn missing_key_fails_deserialization() {
    // No scoring section at all.
    let raw = r#"{ "data_period": "3mo", "data_interval": "1d" }"#;
    assert!(serde_json::from_str::<Config>(raw).is_err());
}

#[test]
fn round_trips_through_json() {
    let config = test_config();
    let raw = serde_json::to_string(&config).unwrap();
    let parsed: Config = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, config);
    assert!(parsed.validate().is_ok());
}

#[test]
fn validation_rejects_zero_windows() {
    let mut config = test_config();
    config.indicators.ma_long_window = 0;
    assert!(config.validate().is_err());
}

#[test]
fn validation_rejects_non_positive_percentages() {
    let mut config = test_config();
    config.targets.stop_loss_pct = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn validation_rejects_zero_concurrency() {
    let mut config = test_config();
    config.fetch_concurrency = 0;
    assert!(config.validate().is_err());
}

#[test]
fn mapping_preserves_file_order() {
    let raw = r#"{
        "ZZZ": { "company": "Zeta", "country": "FR", "index": "CAC 40", "sector": "Energy" },
        "AAA": { "company": "Alpha", "country": "DE", "index": "DAX", "sector": "Tech" },
        "MMM": { "company": "Mid", "country": "US", "index": "S&P 500", "sector": "Industry" }
    }"#;
    let mapping: TickerMapping = serde_json::from_str(raw).unwrap();

    let tickers: Vec<&str> = mapping.entries().iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(tickers, ["ZZZ", "AAA", "MMM"]);
    assert_eq!(mapping.entries()[1].1.company, "Alpha");
}
