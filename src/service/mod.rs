pub mod error;
pub mod normalize;
pub mod stats;

pub use error::{ErrorKind, StatsError};
pub use stats::StatsService;
