//! Scoring rules and target generation.

pub mod scoring;
pub mod targets;

pub use scoring::score_snapshot;
pub use targets::compute_targets;
