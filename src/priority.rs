//! Priority lists.
//!
//! A [`PriorityList`] is the ordered set of sources consulted for one
//! battler role. Order governs both the collection order of candidates and
//! the tie-break of the `priority` strategy.

use crate::error::CritError;
use crate::source::{BattlerRole, Source};
use serde::Serialize;
use std::fmt;

/// Validated, ordered, duplicate-free list of sources for one role.
///
/// # Examples
///
/// ```rust
/// use critstat::{BattlerRole, PriorityList, Source};
///
/// let list = PriorityList::parse(BattlerRole::Enemy, "enemy, weapon, default").unwrap();
/// assert_eq!(list.sources(), &[Source::Enemy, Source::Weapon, Source::Default]);
///
/// assert!(PriorityList::parse(BattlerRole::Enemy, "armor").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityList {
    role: BattlerRole,
    sources: Vec<Source>,
}

impl PriorityList {
    /// Build a list from sources, validating them against the role.
    ///
    /// # Errors
    ///
    /// * `EmptyPriority` if `sources` is empty
    /// * `SourceNotAllowed` if a source is outside the role's vocabulary
    /// * `DuplicateSource` if a source appears twice
    pub fn new(role: BattlerRole, sources: Vec<Source>) -> Result<Self, CritError> {
        if sources.is_empty() {
            return Err(CritError::EmptyPriority(role));
        }
        for (index, &source) in sources.iter().enumerate() {
            if !role.allows(source) {
                return Err(CritError::SourceNotAllowed { kind: source, role });
            }
            if sources[..index].contains(&source) {
                return Err(CritError::DuplicateSource(source));
            }
        }
        Ok(Self { role, sources })
    }

    /// Parse a comma separated list such as `"state,skill,weapon,enemy,default"`.
    ///
    /// Entries are trimmed and matched case-insensitively; empty entries
    /// (e.g. from a trailing comma) are skipped.
    pub fn parse(role: BattlerRole, text: &str) -> Result<Self, CritError> {
        let sources = text
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse::<Source>)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(role, sources)
    }

    /// The built-in order for a role: the role's whole vocabulary.
    ///
    /// Actors: `state, skill, armor, weapon, actor, job, default`.
    /// Enemies: `state, skill, weapon, enemy, default`.
    pub fn default_for(role: BattlerRole) -> Self {
        Self {
            role,
            sources: role.vocabulary().to_vec(),
        }
    }

    /// The role this list was validated for.
    pub fn role(&self) -> BattlerRole {
        self.role
    }

    /// The sources in priority order.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Whether the list consults `source`.
    pub fn contains(&self, source: Source) -> bool {
        self.sources.contains(&source)
    }

    /// Iterate the sources in priority order.
    pub fn iter(&self) -> impl Iterator<Item = Source> + '_ {
        self.sources.iter().copied()
    }
}

impl fmt::Display for PriorityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, source) in self.sources.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", source)?;
        }
        Ok(())
    }
}
