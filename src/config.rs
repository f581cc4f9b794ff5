//! Engine configuration.
//!
//! [`CriticalConfig`] is immutable once built and is handed to the
//! [`CriticalDamage`](crate::facade::CriticalDamage) facade at construction.
//! It is usually built from [`ConfigParams`], the raw string parameters a
//! host loads at boot.

use crate::error::CritError;
use crate::priority::PriorityList;
use crate::source::BattlerRole;
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

/// Multiplier used when nothing else applies.
pub const DEFAULT_CRITICAL_DAMAGE: f64 = 3.0;

/// Smallest accepted default multiplier.
pub const MIN_DEFAULT_CRITICAL_DAMAGE: f64 = 1.0;

/// Largest accepted default multiplier.
pub const MAX_DEFAULT_CRITICAL_DAMAGE: f64 = 100.0;

/// Raw configuration parameters.
///
/// Field names follow the host's parameter names. Missing or blank fields
/// take the built-in defaults.
///
/// # Examples
///
/// ```rust
/// use critstat::config::ConfigParams;
///
/// let params: ConfigParams = serde_json::from_str(r#"{
///     "criticalDamageStrategy": "max",
///     "defaultCriticalDamage": "2.5"
/// }"#).unwrap();
/// assert_eq!(params.strategy.as_deref(), Some("max"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigParams {
    #[serde(rename = "criticalDamageStrategy", default)]
    pub strategy: Option<String>,

    #[serde(rename = "ActorCriticalDamagePriority", default)]
    pub actor_priority: Option<String>,

    #[serde(rename = "EnemyCriticalDamagePriority", default)]
    pub enemy_priority: Option<String>,

    /// Number or numeric string.
    #[serde(rename = "defaultCriticalDamage", default)]
    pub default_critical_damage: Option<Value>,
}

/// Validated critical damage configuration.
///
/// # Examples
///
/// ```rust
/// use critstat::{CriticalConfig, Strategy};
///
/// let config = CriticalConfig::default();
/// assert_eq!(config.strategy(), Strategy::Sum);
/// assert_eq!(config.default_multiplier(), 3.0);
///
/// let config = CriticalConfig::default().with_strategy(Strategy::Max);
/// assert_eq!(config.strategy(), Strategy::Max);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalConfig {
    strategy: Strategy,
    actor_priority: PriorityList,
    enemy_priority: PriorityList,
    default_multiplier: f64,
}

impl Default for CriticalConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            actor_priority: PriorityList::default_for(BattlerRole::Actor),
            enemy_priority: PriorityList::default_for(BattlerRole::Enemy),
            default_multiplier: DEFAULT_CRITICAL_DAMAGE,
        }
    }
}

impl CriticalConfig {
    /// Build a configuration, failing on the first invalid field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use critstat::config::{ConfigParams, CriticalConfig};
    ///
    /// let params = ConfigParams {
    ///     strategy: Some("double".to_string()),
    ///     ..ConfigParams::default()
    /// };
    /// assert!(CriticalConfig::from_params(&params).is_err());
    /// ```
    pub fn from_params(params: &ConfigParams) -> Result<Self, CritError> {
        let defaults = Self::default();
        let config = Self {
            strategy: match present(&params.strategy) {
                Some(name) => name.parse()?,
                None => defaults.strategy,
            },
            actor_priority: match present(&params.actor_priority) {
                Some(text) => PriorityList::parse(BattlerRole::Actor, text)?,
                None => defaults.actor_priority,
            },
            enemy_priority: match present(&params.enemy_priority) {
                Some(text) => PriorityList::parse(BattlerRole::Enemy, text)?,
                None => defaults.enemy_priority,
            },
            default_multiplier: match &params.default_critical_damage {
                Some(value) => parse_default_multiplier(value)?,
                None => defaults.default_multiplier,
            },
        };
        info!(
            strategy = %config.strategy,
            actor_priority = %config.actor_priority,
            enemy_priority = %config.enemy_priority,
            default_multiplier = config.default_multiplier,
            "critical damage configuration accepted"
        );
        Ok(config)
    }

    /// Build a configuration, replacing each invalid field with its
    /// built-in default.
    ///
    /// Every rejected field is logged at `warn`. Never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use critstat::config::{ConfigParams, CriticalConfig};
    /// use critstat::Strategy;
    ///
    /// let params = ConfigParams {
    ///     strategy: Some("max".to_string()),
    ///     default_critical_damage: Some(serde_json::json!(0.5)),
    ///     ..ConfigParams::default()
    /// };
    /// let config = CriticalConfig::from_params_or_fallback(&params);
    /// assert_eq!(config.strategy(), Strategy::Max);
    /// assert_eq!(config.default_multiplier(), 3.0);
    /// ```
    pub fn from_params_or_fallback(params: &ConfigParams) -> Self {
        let mut config = Self::default();

        if let Some(name) = present(&params.strategy) {
            match name.parse() {
                Ok(strategy) => config.strategy = strategy,
                Err(err) => warn!(error = %err, fallback = %config.strategy, "rejected strategy"),
            }
        }
        if let Some(text) = present(&params.actor_priority) {
            match PriorityList::parse(BattlerRole::Actor, text) {
                Ok(list) => config.actor_priority = list,
                Err(err) => {
                    warn!(error = %err, fallback = %config.actor_priority, "rejected actor priority")
                }
            }
        }
        if let Some(text) = present(&params.enemy_priority) {
            match PriorityList::parse(BattlerRole::Enemy, text) {
                Ok(list) => config.enemy_priority = list,
                Err(err) => {
                    warn!(error = %err, fallback = %config.enemy_priority, "rejected enemy priority")
                }
            }
        }
        if let Some(value) = &params.default_critical_damage {
            match parse_default_multiplier(value) {
                Ok(multiplier) => config.default_multiplier = multiplier,
                Err(err) => warn!(
                    error = %err,
                    fallback = config.default_multiplier,
                    "rejected default critical damage"
                ),
            }
        }
        config
    }

    /// Decode [`ConfigParams`] from JSON and build strictly.
    pub fn from_json(json: &str) -> Result<Self, CritError> {
        let params: ConfigParams = serde_json::from_str(json)?;
        Self::from_params(&params)
    }

    /// Decode [`ConfigParams`] from JSON and build with per-field fallback.
    ///
    /// An undecodable document yields the default configuration.
    pub fn from_json_or_fallback(json: &str) -> Self {
        match serde_json::from_str::<ConfigParams>(json) {
            Ok(params) => Self::from_params_or_fallback(&params),
            Err(err) => {
                error!(error = %err, "undecodable critical damage configuration; using defaults");
                Self::default()
            }
        }
    }

    /// Replace the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the priority list of the list's role.
    pub fn with_priority(mut self, priority: PriorityList) -> Self {
        match priority.role() {
            BattlerRole::Actor => self.actor_priority = priority,
            BattlerRole::Enemy => self.enemy_priority = priority,
        }
        self
    }

    /// Replace the default multiplier.
    ///
    /// # Errors
    ///
    /// `DefaultOutOfRange` unless `1.0 <= multiplier <= 100.0`.
    pub fn with_default_multiplier(mut self, multiplier: f64) -> Result<Self, CritError> {
        self.default_multiplier = validate_default_multiplier(multiplier)?;
        Ok(self)
    }

    /// Get the combination strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the actor priority list.
    pub fn actor_priority(&self) -> &PriorityList {
        &self.actor_priority
    }

    /// Get the enemy priority list.
    pub fn enemy_priority(&self) -> &PriorityList {
        &self.enemy_priority
    }

    /// Priority list for a battler role.
    pub fn priority_for(&self, role: BattlerRole) -> &PriorityList {
        match role {
            BattlerRole::Actor => &self.actor_priority,
            BattlerRole::Enemy => &self.enemy_priority,
        }
    }

    /// Get the default multiplier.
    pub fn default_multiplier(&self) -> f64 {
        self.default_multiplier
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_default_multiplier(value: &Value) -> Result<f64, CritError> {
    let multiplier = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| CritError::InvalidDefault(value.to_string()))?;
    validate_default_multiplier(multiplier)
}

fn validate_default_multiplier(multiplier: f64) -> Result<f64, CritError> {
    if (MIN_DEFAULT_CRITICAL_DAMAGE..=MAX_DEFAULT_CRITICAL_DAMAGE).contains(&multiplier) {
        Ok(multiplier)
    } else {
        Err(CritError::DefaultOutOfRange(multiplier))
    }
}
