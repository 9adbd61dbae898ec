pub mod error;
pub mod output;
pub mod parser;
pub mod statistics;
pub mod summary;

pub use error::StatsError;
pub use statistics::{PercentileBoundary, Statistics};
pub use summary::Summary;
