//! Error taxonomy for the calculation engine

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ReliabilityError>;

/// Errors raised by lookups, calculators and analyzers
#[derive(Debug, Error, Diagnostic)]
pub enum ReliabilityError {
    /// A 1-based identifier fell outside its table
    #[error("{operation}: invalid {family} {table} ID {id}; valid IDs are 1..={len}")]
    #[diagnostic(
        code(relk::lookup::range),
        help("identifiers are 1-based and must not exceed the table length")
    )]
    Range {
        family: &'static str,
        operation: &'static str,
        table: &'static str,
        id: u32,
        len: usize,
    },

    /// An identifier has no entry in a fixed symbolic mapping
    #[error("{operation}: unknown {family} {kind} ID {id}")]
    #[diagnostic(code(relk::lookup::unknown_category))]
    UnknownCategory {
        family: &'static str,
        operation: &'static str,
        kind: &'static str,
        id: u32,
    },

    /// An input was present but had the wrong type or sign
    #[error("attribute '{field}' must be {expected}")]
    #[diagnostic(code(relk::attributes::type_mismatch))]
    TypeMismatch { field: String, expected: &'static str },

    /// A required attribute was absent
    #[error("missing required attribute '{key}'")]
    #[diagnostic(
        code(relk::attributes::missing_key),
        help("callers must supply every attribute the selected family requires")
    )]
    MissingKey { key: String },

    /// The stress limit table has no entry at this path
    #[error("no stress limit defined at '{path}'")]
    #[diagnostic(
        code(relk::limits::missing),
        help("run `relk limits show` to inspect the active stress limit table")
    )]
    MissingLimit { path: String },

    /// Unsupported distribution name
    #[error("unsupported distribution type '{dist_type}'")]
    #[diagnostic(
        code(relk::statistics::unsupported),
        help("supported types are exponential, lognormal, normal and weibull")
    )]
    UnsupportedDistribution { dist_type: String },

    /// A numeric parameter is outside its domain
    #[error("invalid {name} {value}: {reason}")]
    #[diagnostic(code(relk::parameter::invalid))]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(relk::io))]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    #[diagnostic(code(relk::yaml))]
    Yaml(#[from] serde_yml::Error),
}

impl ReliabilityError {
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
        }
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }
}
