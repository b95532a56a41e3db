//! Run configuration and ticker mapping loading.
//!
//! Every key is required; a missing key is a startup-fatal error
//! surfaced by serde before any ticker is processed.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

use crate::models::TickerMeta;

/// Windows for the indicator engine, in bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub ma_short_window: usize,
    pub ma_long_window: usize,
    pub volume_window: usize,
    pub rsi_period: usize,
}

impl IndicatorConfig {
    /// Smallest series length that yields a snapshot. RSI works on a
    /// difference series, hence the extra bar.
    pub fn min_bars(&self) -> usize {
        self.ma_short_window
            .max(self.ma_long_window)
            .max(self.volume_window)
            .max(self.rsi_period + 1)
    }
}

/// Weights added to the weighted score when a rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub rsi_oversold: f64,
    pub rsi_neutral: f64,
    pub ma_crossover: f64,
    pub volume_boost: f64,
}

/// Thresholds and weights for the scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub rsi_oversold: f64,
    pub rsi_neutral: f64,
    pub rsi_overbought: f64,
    pub volume_boost_multiplier: f64,
    pub weights: ScoreWeights,
}

/// Stop-loss and profit-target fractions (e.g. 0.03 for 3%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub stop_loss_pct: f64,
    pub target1_pct: f64,
    pub target2_pct: f64,
}

/// Full run configuration, loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Requested history span, provider syntax (e.g. "3mo").
    pub data_period: String,
    /// Bar interval, provider syntax (e.g. "1d").
    pub data_interval: String,
    /// Tickers with fewer bars than this are skipped before indicators run.
    pub min_data_points: usize,
    /// Minimum raw score for a ticker to qualify.
    pub min_score: u32,
    /// Concurrent fetch-and-compute pipelines.
    pub fetch_concurrency: usize,
    /// Per-request timeout for the provider, in seconds.
    pub fetch_timeout_seconds: u64,
    pub indicators: IndicatorConfig,
    pub scoring: ScoringConfig,
    pub targets: TargetConfig,
    pub mapping_file: String,
    pub output_file: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub email_subject: String,
    /// Body when opportunities were found; `{count}` is interpolated.
    pub email_body_detected: String,
    /// Body when the run found nothing.
    pub email_body_none: String,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values serde cannot: zero windows, non-positive
    /// percentages, zero concurrency.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ind = &self.indicators;
        if ind.ma_short_window == 0
            || ind.ma_long_window == 0
            || ind.volume_window == 0
            || ind.rsi_period == 0
        {
            return Err("indicator windows must be positive".into());
        }
        let tgt = &self.targets;
        if tgt.stop_loss_pct <= 0.0 || tgt.target1_pct <= 0.0 || tgt.target2_pct <= 0.0 {
            return Err("target percentages must be positive".into());
        }
        if self.scoring.volume_boost_multiplier <= 0.0 {
            return Err("volume_boost_multiplier must be positive".into());
        }
        if self.fetch_concurrency == 0 {
            return Err("fetch_concurrency must be at least 1".into());
        }
        Ok(())
    }
}

/// Ticker symbol -> metadata mapping, preserving file order.
///
/// Insertion order is the tie-break for equal weighted scores, so the
/// mapping deserializes into a vector of entries rather than a hash map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickerMapping {
    entries: Vec<(String, TickerMeta)>,
}

impl TickerMapping {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn from_entries(entries: Vec<(String, TickerMeta)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, TickerMeta)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for TickerMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = TickerMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ticker symbol to metadata")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((ticker, meta)) = map.next_entry::<String, TickerMeta>()? {
                    entries.push((ticker, meta));
                }
                Ok(TickerMapping { entries })
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
