//! Error taxonomy shared by the distance model, loaders, and solvers.

use thiserror::Error;

/// Errors produced by this crate.
///
/// Search loops themselves never fail: "no eligible candidate" in tabu
/// search and "zero total weight" in ant construction have defined
/// fallbacks. Errors only arise from malformed input or configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// Malformed instance data: empty, non-square, negative or non-finite.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A numeric configuration value outside its domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operator name that does not match any known variant.
    ///
    /// Use the `from_name_or_default` constructors for the forgiving
    /// lookup that falls back to the documented default instead.
    #[error("unknown {kind} `{name}`")]
    UnknownOption {
        /// Which option family was being parsed (e.g. "neighborhood").
        kind: &'static str,
        /// The rejected name.
        name: String,
    },

    /// A line of an instance file could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Reading an instance file failed.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TspError {
    fn from(err: std::io::Error) -> Self {
        TspError::Io(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TspError>;
