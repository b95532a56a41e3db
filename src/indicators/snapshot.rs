//! Snapshot assembly for the most recent bar of a series.

use crate::config::IndicatorConfig;
use crate::indicators::momentum::relative_strength_index;
use crate::indicators::trend::simple_moving_average;
use crate::indicators::volume::average_volume;
use crate::models::{IndicatorSnapshot, PriceBar};

/// Compute all indicators aligned to the latest bar.
///
/// Returns `None` when the series is shorter than the largest
/// configured window (plus one for the RSI difference series) or when
/// any derived value comes out non-finite, which happens with
/// malformed bar data.
pub fn compute_snapshot(bars: &[PriceBar], config: &IndicatorConfig) -> Option<IndicatorSnapshot> {
    if bars.len() < config.min_bars() {
        return None;
    }

    let latest = bars.last()?;
    let snapshot = IndicatorSnapshot {
        ma_short: simple_moving_average(bars, config.ma_short_window)?,
        ma_long: simple_moving_average(bars, config.ma_long_window)?,
        rsi: relative_strength_index(bars, config.rsi_period)?,
        volume_avg: average_volume(bars, config.volume_window)?,
        close: latest.close,
        volume: latest.volume,
    };

    if !snapshot.is_finite() {
        return None;
    }

    Some(snapshot)
}
