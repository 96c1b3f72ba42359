pub mod comparison;
pub mod series;
pub mod snapshot;
