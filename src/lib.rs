//! # critstat - Deterministic Critical Hit Engine
//!
//! A critical hit calculation engine for turn-based battle systems that
//! provides:
//! - **Multi-source** critical damage multipliers (states, skills,
//!   equipment, battler and class records)
//! - **Configurable** combination strategies (sum, product, max, priority,
//!   constant)
//! - **Clamped** critical rates with per-skill bonuses
//! - **Injected** battler capabilities instead of a fixed host object model
//!
//! ## Core Concepts
//!
//! ### Multiplier Pipeline
//!
//! ```text
//! [AnnotationBag] → [SourceCollector] → [Strategy] → [ResolvedMultiplier]
//! ```
//!
//! 1. **Annotations** carry `<criticalDamage: N>` tags or structured fields
//! 2. **Sources** are consulted in priority order; positive values are kept
//! 3. **Strategies** reduce the candidates to one multiplier
//! 4. **ResolvedMultiplier** contains the final value with full breakdown
//!
//! ## Example
//!
//! ```rust
//! use critstat::*;
//!
//! let engine = CriticalDamage::new(CriticalConfig::default().with_strategy(Strategy::Product));
//!
//! let hero = BattlerRecord::actor()
//!     .with_weapon(AnnotationBag::with_note("<criticalDamage: 1.5>"))
//!     .with_critical_rate(0.1);
//! let slime = BattlerRecord::enemy().with_critical_evasion(0.5);
//! let slash = ActionItem::new("Slash")
//!     .with_annotations(AnnotationBag::with_note("<extCriticalRate: 0.2>"));
//!
//! // 1.5 (weapon) × 3.0 (default)
//! assert_eq!(engine.apply_critical(&hero, Some(&slash), 10.0), 45.0);
//!
//! // (0.1 + 0.2) × (1 − 0.5)
//! let chance = engine.item_critical_chance(&hero, &slime, Some(&slash));
//! assert!((chance - 0.15).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`annotation`] - Annotation bags and tag extraction
//! - [`source`] - Source vocabulary and battler roles
//! - [`priority`] - Validated priority lists
//! - [`battler`] - Battler capability interfaces
//! - [`collector`] - Candidate collection
//! - [`strategy`] - Combination strategies
//! - [`resolved`] - Resolved multiplier results
//! - [`rate`] - Critical hit rate
//! - [`facade`] - The engine entry points
//! - [`config`] - Configuration
//! - [`cache`] - Optional attribute cache
//! - [`error`] - Error types

pub mod annotation;
pub mod battler;
pub mod cache;
pub mod collector;
pub mod config;
pub mod error;
pub mod facade;
pub mod priority;
pub mod rate;
pub mod resolved;
pub mod source;
pub mod strategy;

// Re-export main types for convenience
pub use annotation::{AnnotationBag, AnnotationTag};
pub use battler::{
    ActionItem, BattlerCapability, BattlerRecord, EquipSlot, TacticalExtension, WeaponId,
};
pub use cache::AttributeCache;
pub use collector::SourceCollector;
pub use config::{ConfigParams, CriticalConfig, DEFAULT_CRITICAL_DAMAGE};
pub use error::CritError;
pub use facade::CriticalDamage;
pub use priority::PriorityList;
pub use resolved::{Candidate, ResolvedMultiplier};
pub use source::{BattlerRole, Source};
pub use strategy::{reduce, Strategy};
