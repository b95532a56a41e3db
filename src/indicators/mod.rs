pub mod momentum;
pub mod snapshot;
pub mod trend;
pub mod volume;

pub use momentum::relative_strength_index;
pub use snapshot::compute_snapshot;
pub use trend::simple_moving_average;
pub use volume::average_volume;
