//! Threshold rules applied to the latest indicator snapshot.

use crate::config::ScoringConfig;
use crate::models::{IndicatorSnapshot, ScoreResult, Verdict};

/// Score one snapshot. Pure function; every rule is evaluated
/// independently, never short-circuited.
///
/// Rules:
/// 1. RSI below the oversold threshold, or failing that below the
///    neutral threshold, each with its own weight.
/// 2. Short MA above long MA.
/// 3. Current volume above `volume_boost_multiplier` times the average.
pub fn score_snapshot(snapshot: &IndicatorSnapshot, config: &ScoringConfig) -> ScoreResult {
    let mut raw_score = 0u32;
    let mut weighted_score = 0.0;

    if snapshot.rsi < config.rsi_oversold {
        raw_score += 1;
        weighted_score += config.weights.rsi_oversold;
    } else if snapshot.rsi < config.rsi_neutral {
        raw_score += 1;
        weighted_score += config.weights.rsi_neutral;
    }

    let ma_bullish = snapshot.ma_short > snapshot.ma_long;
    if ma_bullish {
        raw_score += 1;
        weighted_score += config.weights.ma_crossover;
    }

    let volume_boosted = snapshot.volume > config.volume_boost_multiplier * snapshot.volume_avg;
    if volume_boosted {
        raw_score += 1;
        weighted_score += config.weights.volume_boost;
    }

    let verdict = if snapshot.rsi < config.rsi_oversold {
        Verdict::Oversold
    } else if snapshot.rsi > config.rsi_overbought {
        Verdict::Overbought
    } else {
        Verdict::Neutral
    };

    ScoreResult {
        raw_score,
        weighted_score,
        verdict,
        ma_bullish,
        volume_boosted,
    }
}
