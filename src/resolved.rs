//! Resolved multiplier results module.
//!
//! Contains [`ResolvedMultiplier`], the final critical damage multiplier
//! together with every candidate that fed into it.

use crate::source::Source;
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};

/// A collected candidate value and the source that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Where the value came from.
    pub source: Source,
    /// The strictly positive multiplier.
    pub value: f64,
}

impl Candidate {
    /// Create a candidate.
    pub fn new(source: Source, value: f64) -> Self {
        Self { source, value }
    }
}

/// A resolved critical damage multiplier with breakdown information.
///
/// # Examples
///
/// ```rust
/// use critstat::{Candidate, ResolvedMultiplier, Source, Strategy};
///
/// let resolved = ResolvedMultiplier::from_candidates(
///     vec![Candidate::new(Source::Weapon, 1.5), Candidate::new(Source::Default, 3.0)],
///     Strategy::Max,
///     3.0,
/// );
/// assert_eq!(resolved.value, 3.0);
/// assert_eq!(resolved.values(), vec![1.5, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMultiplier {
    /// The final multiplier.
    pub value: f64,

    /// The strategy used to combine candidates.
    pub strategy: Strategy,

    /// Candidates in collection order.
    pub candidates: Vec<Candidate>,
}

impl ResolvedMultiplier {
    /// Reduce `candidates` with `strategy`, falling back to `default`.
    pub fn from_candidates(candidates: Vec<Candidate>, strategy: Strategy, default: f64) -> Self {
        let values: Vec<f64> = candidates.iter().map(|c| c.value).collect();
        Self {
            value: strategy.reduce(&values, default),
            strategy,
            candidates,
        }
    }

    /// Candidate values in collection order.
    pub fn values(&self) -> Vec<f64> {
        self.candidates.iter().map(|c| c.value).collect()
    }

    /// Candidate values contributed by one source.
    pub fn values_from(&self, source: Source) -> Vec<f64> {
        self.candidates
            .iter()
            .filter(|c| c.source == source)
            .map(|c| c.value)
            .collect()
    }

    /// Human-readable one-line breakdown, e.g. `sum[weapon=1.50, default=3.00] = 4.50`.
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .candidates
            .iter()
            .map(|c| format!("{}={:.2}", c.source, c.value))
            .collect();
        format!("{}[{}] = {:.2}", self.strategy, parts.join(", "), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_breakdown() {
        let resolved = ResolvedMultiplier::from_candidates(
            vec![
                Candidate::new(Source::State, 1.2),
                Candidate::new(Source::Armor, 1.1),
                Candidate::new(Source::State, 1.3),
            ],
            Strategy::Priority,
            3.0,
        );
        assert_eq!(resolved.value, 1.2);
        assert_eq!(resolved.values_from(Source::State), vec![1.2, 1.3]);
        assert!(resolved.values_from(Source::Job).is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        let resolved = ResolvedMultiplier::from_candidates(Vec::new(), Strategy::Product, 3.0);
        assert_eq!(resolved.value, 3.0);
        assert!(resolved.values().is_empty());
    }

    #[test]
    fn test_describe() {
        let resolved = ResolvedMultiplier::from_candidates(
            vec![
                Candidate::new(Source::Weapon, 1.5),
                Candidate::new(Source::Default, 3.0),
            ],
            Strategy::Sum,
            3.0,
        );
        assert_eq!(resolved.describe(), "sum[weapon=1.50, default=3.00] = 4.50");
    }
}
