//! Volume indicators

use crate::models::PriceBar;

/// Mean volume over the trailing `window` bars ending at the most
/// recent bar, or `None` when the series is shorter than the window.
pub fn average_volume(bars: &[PriceBar], window: usize) -> Option<f64> {
    if window == 0 || bars.len() < window {
        return None;
    }

    let sum: f64 = bars[bars.len() - window..].iter().map(|b| b.volume).sum();
    Some(sum / window as f64)
}
