//! Combination strategies.
//!
//! A [`Strategy`] reduces an ordered list of candidate multipliers to one
//! value. Reduction is pure, deterministic and total: every input produces
//! a value, and an empty list always produces the supplied default.

use crate::error::CritError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How candidate multipliers combine into the final multiplier.
///
/// # Examples
///
/// ```rust
/// use critstat::Strategy;
///
/// // Host parameter names are accepted as aliases.
/// assert_eq!("add".parse::<Strategy>().unwrap(), Strategy::Sum);
/// assert_eq!("multiply".parse::<Strategy>().unwrap(), Strategy::Product);
/// assert_eq!("default".parse::<Strategy>().unwrap(), Strategy::Constant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Sum of all candidates.
    #[default]
    Sum,
    /// Product of all candidates.
    Product,
    /// Largest candidate.
    Max,
    /// First candidate in priority order.
    Priority,
    /// Always the default, candidates ignored.
    Constant,
}

impl Strategy {
    /// All strategies.
    pub const ALL: [Strategy; 5] = [
        Strategy::Sum,
        Strategy::Product,
        Strategy::Max,
        Strategy::Priority,
        Strategy::Constant,
    ];

    /// Get the canonical name of this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Sum => "sum",
            Strategy::Product => "product",
            Strategy::Max => "max",
            Strategy::Priority => "priority",
            Strategy::Constant => "constant",
        }
    }

    /// Reduce `values` with this strategy. See [`reduce`].
    pub fn reduce(self, values: &[f64], default: f64) -> f64 {
        reduce(values, self, default)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = CritError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" | "add" => Ok(Strategy::Sum),
            "product" | "multiply" => Ok(Strategy::Product),
            "max" => Ok(Strategy::Max),
            "priority" => Ok(Strategy::Priority),
            "constant" | "default" => Ok(Strategy::Constant),
            _ => Err(CritError::UnknownStrategy(s.trim().to_string())),
        }
    }
}

/// Reduce candidate multipliers to a single value.
///
/// * empty `values` → `default`, whatever the strategy
/// * `Sum` → `0 + v1 + v2 + …`
/// * `Product` → `1 × v1 × v2 × …`
/// * `Max` → largest value
/// * `Priority` → `v1`
/// * `Constant` → `default`
///
/// # Examples
///
/// ```rust
/// use critstat::strategy::{reduce, Strategy};
///
/// assert_eq!(reduce(&[1.5, 0.5], Strategy::Sum, 3.0), 2.0);
/// assert_eq!(reduce(&[2.0, 1.5], Strategy::Product, 3.0), 3.0);
/// assert_eq!(reduce(&[1.2, 5.0], Strategy::Priority, 3.0), 1.2);
/// assert_eq!(reduce(&[], Strategy::Max, 3.0), 3.0);
/// ```
pub fn reduce(values: &[f64], strategy: Strategy, default: f64) -> f64 {
    let Some(&first) = values.first() else {
        return default;
    };
    match strategy {
        Strategy::Sum => values.iter().fold(0.0, |total, value| total + value),
        Strategy::Product => values.iter().fold(1.0, |total, value| total * value),
        Strategy::Max => values.iter().copied().fold(first, f64::max),
        Strategy::Priority => first,
        Strategy::Constant => default,
    }
}
