use serde::{Deserialize, Serialize};

/// Indicator values aligned to the most recent bar of a series.
///
/// Built only when the series is long enough for every configured
/// window; shorter series produce no snapshot at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ma_short: f64,
    pub ma_long: f64,
    pub rsi: f64,
    pub volume_avg: f64,
    /// Close of the evaluated bar.
    pub close: f64,
    /// Volume of the evaluated bar.
    pub volume: f64,
}

impl IndicatorSnapshot {
    pub fn is_finite(&self) -> bool {
        self.ma_short.is_finite()
            && self.ma_long.is_finite()
            && self.rsi.is_finite()
            && self.volume_avg.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}
