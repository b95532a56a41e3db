//! Trend indicators (simple moving averages)

use crate::models::PriceBar;

/// Arithmetic mean of closing prices over the trailing `window` bars
/// ending at the most recent bar.
///
/// Returns `None` when the series is shorter than the window.
pub fn simple_moving_average(bars: &[PriceBar], window: usize) -> Option<f64> {
    if window == 0 || bars.len() < window {
        return None;
    }

    let sum: f64 = bars[bars.len() - window..].iter().map(|b| b.close).sum();
    Some(sum / window as f64)
}
