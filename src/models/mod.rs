//! Shared data models spanning the scanner layers.

pub mod indicators;
pub mod opportunity;
pub mod price;

pub use indicators::IndicatorSnapshot;
pub use opportunity::{Opportunity, ScoreResult, SkipReason, TargetLevels, TickerMeta, Verdict};
pub use price::PriceBar;
