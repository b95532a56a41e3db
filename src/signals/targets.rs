//! Stop-loss and profit-target levels from the current price.

use crate::config::TargetConfig;
use crate::models::TargetLevels;

/// Compute price levels. Deterministic and pure; prices and the
/// gain/risk ratio are rounded to 2 decimals.
///
/// The ratio is `target1_pct / stop_loss_pct`, so it depends only on
/// the configured percentages, not on the price.
pub fn compute_targets(price: f64, config: &TargetConfig) -> TargetLevels {
    TargetLevels {
        stop_loss: round2(price * (1.0 - config.stop_loss_pct)),
        target1: round2(price * (1.0 + config.target1_pct)),
        target2: round2(price * (1.0 + config.target2_pct)),
        gain_risk_ratio: round2(config.target1_pct / config.stop_loss_pct),
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
