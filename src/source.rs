//! Critical damage sources module.
//!
//! A [`Source`] names where a candidate multiplier may come from. Each
//! battler role has its own closed vocabulary of sources; see
//! [`BattlerRole::vocabulary`].

use crate::error::CritError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Origin of a candidate critical damage multiplier.
///
/// # Examples
///
/// ```rust
/// use critstat::Source;
///
/// let source: Source = "armor".parse().unwrap();
/// assert_eq!(source, Source::Armor);
/// assert_eq!(source.to_string(), "armor");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Active status effects, one candidate per tagged state.
    State,
    /// The skill or item currently resolving.
    Skill,
    /// Worn armor, one candidate per tagged piece.
    Armor,
    /// Wielded weapons (or an enemy's contextual weapon).
    Weapon,
    /// The actor's own definition record.
    Actor,
    /// The actor's current class record.
    Job,
    /// The enemy's own definition record.
    Enemy,
    /// The configured default multiplier.
    Default,
}

impl Source {
    /// All sources, in declaration order.
    pub const ALL: [Source; 8] = [
        Source::State,
        Source::Skill,
        Source::Armor,
        Source::Weapon,
        Source::Actor,
        Source::Job,
        Source::Enemy,
        Source::Default,
    ];

    /// Get the configuration name of this source.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::State => "state",
            Source::Skill => "skill",
            Source::Armor => "armor",
            Source::Weapon => "weapon",
            Source::Actor => "actor",
            Source::Job => "job",
            Source::Enemy => "enemy",
            Source::Default => "default",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = CritError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Source::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CritError::UnknownSource(name.to_string()))
    }
}

/// Role of the battler whose critical damage is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattlerRole {
    /// A party member with equipment slots and a class.
    Actor,
    /// A monster.
    Enemy,
}

impl BattlerRole {
    /// Sources available to this role.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use critstat::{BattlerRole, Source};
    ///
    /// assert!(BattlerRole::Actor.allows(Source::Job));
    /// assert!(!BattlerRole::Enemy.allows(Source::Armor));
    /// ```
    pub fn vocabulary(self) -> &'static [Source] {
        match self {
            BattlerRole::Actor => &[
                Source::State,
                Source::Skill,
                Source::Armor,
                Source::Weapon,
                Source::Actor,
                Source::Job,
                Source::Default,
            ],
            BattlerRole::Enemy => &[
                Source::State,
                Source::Skill,
                Source::Weapon,
                Source::Enemy,
                Source::Default,
            ],
        }
    }

    /// Check whether `source` belongs to this role's vocabulary.
    pub fn allows(self, source: Source) -> bool {
        self.vocabulary().contains(&source)
    }
}

impl fmt::Display for BattlerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattlerRole::Actor => f.write_str("actor"),
            BattlerRole::Enemy => f.write_str("enemy"),
        }
    }
}
