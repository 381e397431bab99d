//! Command implementations

pub mod derate;
pub mod dist;
pub mod limits;
pub mod predict;
