use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::IndicatorSnapshot;

/// RSI-based qualitative verdict attached to every scored ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Oversold,
    Overbought,
    Neutral,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Oversold => write!(f, "RSI oversold"),
            Verdict::Overbought => write!(f, "RSI overbought"),
            Verdict::Neutral => write!(f, "RSI neutral"),
        }
    }
}

/// Outcome of applying the scoring rules to one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Count of satisfied rules.
    pub raw_score: u32,
    /// Sum of configured weights for satisfied rules.
    pub weighted_score: f64,
    pub verdict: Verdict,
    /// Short MA above long MA on the evaluated bar.
    pub ma_bullish: bool,
    /// Current volume above the boosted average.
    pub volume_boosted: bool,
}

/// Price levels derived from the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetLevels {
    pub stop_loss: f64,
    pub target1: f64,
    pub target2: f64,
    pub gain_risk_ratio: f64,
}

/// Per-ticker metadata from the mapping file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerMeta {
    pub company: String,
    pub country: String,
    pub index: String,
    pub sector: String,
}

/// One qualifying ticker for one run. Never mutated after creation and
/// discarded at the end of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub ticker: String,
    pub meta: TickerMeta,
    pub date: NaiveDate,
    pub price: f64,
    pub snapshot: IndicatorSnapshot,
    pub score: ScoreResult,
    pub targets: TargetLevels,
}

/// Why a ticker produced no opportunity. Skips are logged and carried
/// in the run report so they stay inspectable.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Provider error, including request timeouts.
    FetchFailed(String),
    /// Provider returned no bars at all.
    EmptyHistory,
    /// Fewer bars than the configured minimum or the indicator windows need.
    InsufficientHistory { got: usize, need: usize },
    /// Malformed bar data produced a non-finite indicator value.
    Computation(String),
    /// Scored below the configured minimum; informational, not an error.
    BelowMinScore { score: u32, min: u32 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            SkipReason::EmptyHistory => write!(f, "empty price history"),
            SkipReason::InsufficientHistory { got, need } => {
                write!(f, "insufficient history: {} bars, need {}", got, need)
            }
            SkipReason::Computation(msg) => write!(f, "computation error: {}", msg),
            SkipReason::BelowMinScore { score, min } => {
                write!(f, "score {} below minimum {}", score, min)
            }
        }
    }
}
