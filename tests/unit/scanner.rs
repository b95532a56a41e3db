use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use oppscan::config::TickerMapping;
use oppscan::models::{PriceBar, SkipReason, TickerMeta, Verdict};
use oppscan::scanner::Scanner;
use oppscan::services::{MarketDataProvider, ProviderError};

use crate::common::{bars_from_closes_and_volumes, test_config};

/// Provider serving canned histories. Unknown symbols get an empty
/// series, like a provider with no data for the ticker.
struct CannedProvider {
    histories: HashMap<String, Result<Vec<PriceBar>, String>>,
}

impl CannedProvider {
    fn new() -> Self {
        Self {
            histories: HashMap::new(),
        }
    }

    fn with_history(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.histories.insert(symbol.to_string(), Ok(bars));
        self
    }

    fn with_failure(mut self, symbol: &str, message: &str) -> Self {
        self.histories
            .insert(symbol.to_string(), Err(message.to_string()));
        self
    }
}

#[async_trait]
impl MarketDataProvider for CannedProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        match self.histories.get(symbol) {
            Some(Ok(bars)) => Ok(bars.clone()),
            Some(Err(msg)) => Err(ProviderError::Request(msg.clone())),
            None => Ok(Vec::new()),
        }
    }
}

fn meta(company: &str) -> TickerMeta {
    TickerMeta {
        company: company.to_string(),
        country: "France".to_string(),
        index: "CAC 40".to_string(),
        sector: "Test".to_string(),
    }
}

fn mapping(tickers: &[&str]) -> TickerMapping {
    TickerMapping::from_entries(
        tickers
            .iter()
            .map(|t| (t.to_string(), meta(t)))
            .collect(),
    )
}

/// Rising closes with a volume spike on the last bar: trend and volume
/// rules fire (raw 2, weighted 2.0), RSI saturates so earns nothing.
fn trending_bars() -> Vec<PriceBar> {
    bars_from_closes_and_volumes(
        &[10.0, 11.0, 12.0, 13.0, 14.0],
        &[100.0, 100.0, 100.0, 100.0, 300.0],
    )
}

/// Falling closes with a volume spike: RSI-oversold and volume rules
/// fire (raw 2, weighted 3.0).
fn oversold_bars() -> Vec<PriceBar> {
    bars_from_closes_and_volumes(
        &[20.0, 18.0, 16.0, 14.0, 13.8],
        &[100.0, 100.0, 100.0, 100.0, 300.0],
    )
}

/// Flat series: nothing fires.
fn flat_bars() -> Vec<PriceBar> {
    bars_from_closes_and_volumes(&[10.0; 5], &[100.0; 5])
}

#[tokio::test]
async fn sorts_opportunities_by_weighted_score_descending() {
    let provider = CannedProvider::new()
        .with_history("LOW", trending_bars())
        .with_history("HIGH", oversold_bars());
    let scanner = Scanner::new(Arc::new(provider), test_config());

    let report = scanner.run(&mapping(&["LOW", "HIGH"])).await;

    let tickers: Vec<&str> = report
        .opportunities
        .iter()
        .map(|o| o.ticker.as_str())
        .collect();
    assert_eq!(tickers, ["HIGH", "LOW"]);
    assert!(report.opportunities[0].score.weighted_score > report.opportunities[1].score.weighted_score);
}

#[tokio::test]
async fn equal_weighted_scores_keep_mapping_order() {
    let provider = CannedProvider::new()
        .with_history("ONE", trending_bars())
        .with_history("TWO", trending_bars())
        .with_history("THREE", trending_bars());
    let scanner = Scanner::new(Arc::new(provider), test_config());

    let report = scanner.run(&mapping(&["ONE", "TWO", "THREE"])).await;

    let tickers: Vec<&str> = report
        .opportunities
        .iter()
        .map(|o| o.ticker.as_str())
        .collect();
    assert_eq!(tickers, ["ONE", "TWO", "THREE"]);
}

#[tokio::test]
async fn qualifying_ticker_carries_score_targets_and_verdict() {
    let provider = CannedProvider::new().with_history("UP", trending_bars());
    let scanner = Scanner::new(Arc::new(provider), test_config());

    let report = scanner.run(&mapping(&["UP"])).await;
    assert_eq!(report.opportunities.len(), 1);

    let opp = &report.opportunities[0];
    assert_eq!(opp.price, 14.0);
    assert_eq!(opp.score.raw_score, 2);
    assert_eq!(opp.score.weighted_score, 2.0);
    assert_eq!(opp.score.verdict, Verdict::Overbought);
    assert!(opp.score.ma_bullish);
    assert!(opp.score.volume_boosted);
    assert_eq!(opp.targets.stop_loss, 13.58);
    assert_eq!(opp.targets.target1, 14.7);
    assert_eq!(opp.targets.target2, 15.12);
    assert_eq!(opp.targets.gain_risk_ratio, 1.67);
}

#[tokio::test]
async fn failed_fetch_skips_the_ticker_and_the_run_continues() {
    let provider = CannedProvider::new()
        .with_failure("BAD", "connection refused")
        .with_history("GOOD", trending_bars());
    let scanner = Scanner::new(Arc::new(provider), test_config());

    let report = scanner.run(&mapping(&["BAD", "GOOD"])).await;

    assert_eq!(report.opportunities.len(), 1);
    assert_eq!(report.opportunities[0].ticker, "GOOD");
    assert!(matches!(
        report.skipped.as_slice(),
        [(ticker, SkipReason::FetchFailed(_))] if ticker == "BAD"
    ));
}

#[tokio::test]
async fn empty_history_is_a_skip_not_a_failure() {
    let provider = CannedProvider::new();
    let scanner = Scanner::new(Arc::new(provider), test_config());

    let report = scanner.run(&mapping(&["NODATA"])).await;

    assert!(report.opportunities.is_empty());
    assert_eq!(report.skipped, vec![("NODATA".to_string(), SkipReason::EmptyHistory)]);
}

#[tokio::test]
async fn undersized_history_reports_what_was_needed() {
    let provider = CannedProvider::new().with_history(
        "SHORT",
        bars_from_closes_and_volumes(&[10.0, 11.0, 12.0], &[100.0; 3]),
    );
    let scanner = Scanner::new(Arc::new(provider), test_config());

    let report = scanner.run(&mapping(&["SHORT"])).await;

    assert!(matches!(
        report.skipped.as_slice(),
        [(_, SkipReason::InsufficientHistory { got: 3, need: 5 })]
    ));
}

#[tokio::test]
async fn below_minimum_score_is_recorded_but_not_an_error() {
    let provider = CannedProvider::new().with_history("FLAT", flat_bars());
    let scanner = Scanner::new(Arc::new(provider), test_config());

    let report = scanner.run(&mapping(&["FLAT"])).await;

    assert!(report.opportunities.is_empty());
    assert!(matches!(
        report.skipped.as_slice(),
        [(_, SkipReason::BelowMinScore { score: 0, min: 2 })]
    ));
}

#[tokio::test]
async fn malformed_bars_become_a_computation_skip() {
    let mut bars = trending_bars();
    bars[4].close = f64::INFINITY;
    let provider = CannedProvider::new().with_history("NAN", bars);
    let scanner = Scanner::new(Arc::new(provider), test_config());

    let report = scanner.run(&mapping(&["NAN"])).await;

    assert!(matches!(
        report.skipped.as_slice(),
        [(_, SkipReason::Computation(_))]
    ));
}
