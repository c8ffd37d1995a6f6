//! Domain types for chartwise

pub mod bar;
pub mod ids;
pub mod series;

pub use bar::Bar;
pub use ids::SeriesHash;
pub use series::{DataError, Series};
