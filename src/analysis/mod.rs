//! Analyses shared by every part family

pub mod derating;
pub mod prediction;
pub mod statistics;
pub mod stress;

pub use derating::OverstressResult;
pub use statistics::{DistributionParams, DistributionType};
