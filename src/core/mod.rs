//! Core module - fundamental types and utilities

pub mod attributes;
pub mod config;
pub mod environment;
pub mod error;
pub mod limits;
pub mod lookup;

pub use attributes::{AttributeValue, Attributes};
pub use config::Config;
pub use environment::Environment;
pub use error::{ReliabilityError, Result};
pub use limits::{LimitNode, StressLimits};
pub use lookup::{get_by_id, LookupContext};
