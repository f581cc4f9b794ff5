//! Error types for critical configuration.
//!
//! Computation never fails: malformed annotations are simply absent and
//! missing collaborators contribute nothing. Errors only surface while
//! building a [`CriticalConfig`](crate::config::CriticalConfig) from raw
//! parameters.

use crate::source::{BattlerRole, Source};
use thiserror::Error;

/// Errors that can occur while parsing or validating configuration.
///
/// # Examples
///
/// ```rust
/// use critstat::CritError;
///
/// let err = CritError::UnknownStrategy("double".to_string());
/// println!("{}", err); // "Unknown critical damage strategy: double"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CritError {
    /// The strategy name is not one of the supported strategies.
    #[error("Unknown critical damage strategy: {0}")]
    UnknownStrategy(String),

    /// A priority list entry does not name any known source.
    #[error("Unknown critical damage source: {0}")]
    UnknownSource(String),

    /// A known source was listed for a role whose vocabulary excludes it.
    ///
    /// For example, `armor` is not available to enemies.
    #[error("Source {kind} is not available to {role} battlers")]
    SourceNotAllowed { kind: Source, role: BattlerRole },

    /// A source appears more than once in a priority list.
    #[error("Duplicate source in priority list: {0}")]
    DuplicateSource(Source),

    /// A priority list has no entries.
    #[error("Empty priority list for {0} battlers")]
    EmptyPriority(BattlerRole),

    /// The default multiplier is outside the accepted range.
    #[error("Default critical damage {0} is outside 1.0..=100.0")]
    DefaultOutOfRange(f64),

    /// The default multiplier is not a number.
    #[error("Default critical damage is not a number: {0}")]
    InvalidDefault(String),

    /// The configuration document could not be decoded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CritError {
    fn from(err: serde_json::Error) -> Self {
        CritError::Config(err.to_string())
    }
}
