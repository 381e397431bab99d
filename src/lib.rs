//! Reliability Kit
//!
//! MIL-HDBK-217F hazard rate prediction (parts count and part stress),
//! stress derating analysis and life distribution calculations for
//! resistors, relays, switches and miscellaneous parts.

pub mod analysis;
pub mod cli;
pub mod core;
pub mod families;
