//! Critical damage facade.
//!
//! [`CriticalDamage`] ties collection and reduction together and exposes the
//! three entry points a battle system needs: the multiplier applied to a
//! critical hit, the critical chance of an action, and the standalone
//! critical damage attribute shown by stat screens.

use crate::battler::{ActionItem, BattlerCapability, TacticalExtension};
use crate::collector::SourceCollector;
use crate::config::CriticalConfig;
use crate::priority::PriorityList;
use crate::rate;
use crate::resolved::{Candidate, ResolvedMultiplier};
use crate::source::{BattlerRole, Source};
use crate::strategy::Strategy;
use tracing::debug;

/// Sources of the standalone attribute, outside tactical combat.
const ACTOR_ATTRIBUTE_SOURCES: [Source; 4] =
    [Source::Armor, Source::Weapon, Source::Actor, Source::Job];
const ENEMY_ATTRIBUTE_SOURCES: [Source; 2] = [Source::Weapon, Source::Enemy];

/// Sources added to the standalone attribute during tactical combat.
const TACTICAL_ATTRIBUTE_SOURCES: [Source; 2] = [Source::State, Source::Skill];

/// Critical damage and rate engine.
///
/// Stateless apart from its immutable configuration and the optional
/// tactical extension.
///
/// # Examples
///
/// ```rust
/// use critstat::*;
///
/// let engine = CriticalDamage::new(CriticalConfig::default().with_strategy(Strategy::Max));
/// let hero = BattlerRecord::actor()
///     .with_weapon(AnnotationBag::with_note("<criticalDamage: 4.0>"));
///
/// assert_eq!(engine.action_multiplier(&hero, None), 4.0);
/// assert_eq!(engine.apply_critical(&hero, None, 100.0), 400.0);
/// ```
pub struct CriticalDamage {
    config: CriticalConfig,
    tactical: Option<Box<dyn TacticalExtension>>,
}

impl CriticalDamage {
    /// Create an engine without a tactical extension.
    pub fn new(config: CriticalConfig) -> Self {
        Self {
            config,
            tactical: None,
        }
    }

    /// Attach the tactical-combat extension that arms enemies.
    pub fn with_tactical(mut self, tactical: Box<dyn TacticalExtension>) -> Self {
        self.tactical = Some(tactical);
        self
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &CriticalConfig {
        &self.config
    }

    /// A collector sharing this engine's default and extension.
    pub fn collector(&self) -> SourceCollector<'_> {
        SourceCollector::new(self.config.default_multiplier())
            .with_tactical(self.tactical.as_deref())
    }

    /// Multiplier applied to a critical hit by `attacker` using `item`.
    pub fn action_multiplier(
        &self,
        attacker: &dyn BattlerCapability,
        item: Option<&ActionItem>,
    ) -> f64 {
        self.resolve_action(attacker, item).value
    }

    /// [`action_multiplier`](Self::action_multiplier) with its breakdown,
    /// using the configured strategy and the attacker role's priority list.
    pub fn resolve_action(
        &self,
        attacker: &dyn BattlerCapability,
        item: Option<&ActionItem>,
    ) -> ResolvedMultiplier {
        let priority = self.config.priority_for(attacker.role());
        self.resolve_action_with(attacker, item, self.config.strategy(), priority)
    }

    /// Resolve with an explicit strategy and priority list.
    ///
    /// If `priority` does not consult [`Source::Default`], the default is
    /// appended as the last candidate so the reduction never runs on an
    /// empty set.
    pub fn resolve_action_with(
        &self,
        attacker: &dyn BattlerCapability,
        item: Option<&ActionItem>,
        strategy: Strategy,
        priority: &PriorityList,
    ) -> ResolvedMultiplier {
        let default = self.config.default_multiplier();
        let mut candidates = self.collector().collect(attacker, item, priority);
        if !priority.contains(Source::Default) {
            candidates.push(Candidate::new(Source::Default, default));
        }
        let resolved = ResolvedMultiplier::from_candidates(candidates, strategy, default);
        debug!(
            role = %attacker.role(),
            item = item.map(|i| i.name.as_str()).unwrap_or(""),
            breakdown = %resolved.describe(),
            "resolved critical damage multiplier"
        );
        resolved
    }

    /// Standalone critical damage attribute of a battler.
    ///
    /// Always draws on equipment, the base record and (for actors) the
    /// class. States and the battler's queued action item are included only
    /// while [`in_tactical_battle`](BattlerCapability::in_tactical_battle)
    /// holds. The default is always appended last.
    pub fn base_attribute(&self, battler: &dyn BattlerCapability) -> f64 {
        self.resolve_base_attribute(battler).value
    }

    /// [`base_attribute`](Self::base_attribute) with its breakdown.
    pub fn resolve_base_attribute(&self, battler: &dyn BattlerCapability) -> ResolvedMultiplier {
        let collector = self.collector();
        let default = self.config.default_multiplier();
        let sources: &[Source] = match battler.role() {
            BattlerRole::Actor => &ACTOR_ATTRIBUTE_SOURCES[..],
            BattlerRole::Enemy => &ENEMY_ATTRIBUTE_SOURCES[..],
        };

        let mut candidates = collector.collect_sources(battler, None, sources);
        if battler.in_tactical_battle() {
            candidates.extend(collector.collect_sources(
                battler,
                battler.current_action_item(),
                &TACTICAL_ATTRIBUTE_SOURCES,
            ));
        }
        candidates.push(Candidate::new(Source::Default, default));

        ResolvedMultiplier::from_candidates(candidates, self.config.strategy(), default)
    }

    /// Critical damage attribute for stat and UI layers.
    pub fn critical_damage_attribute(&self, battler: &dyn BattlerCapability) -> f64 {
        self.base_attribute(battler)
    }

    /// Scale `raw_damage` by the action multiplier.
    pub fn apply_critical(
        &self,
        attacker: &dyn BattlerCapability,
        item: Option<&ActionItem>,
        raw_damage: f64,
    ) -> f64 {
        let multiplier = self.action_multiplier(attacker, item);
        let damage = raw_damage * multiplier;
        debug!(
            raw_damage,
            multiplier,
            damage,
            strategy = %self.config.strategy(),
            "applied critical damage"
        );
        damage
    }

    /// Probability that `attacker`'s action with `item` lands a critical
    /// hit on `target`.
    ///
    /// Zero when there is no item or the item cannot land critical hits.
    pub fn item_critical_chance(
        &self,
        attacker: &dyn BattlerCapability,
        target: &dyn BattlerCapability,
        item: Option<&ActionItem>,
    ) -> f64 {
        match item {
            Some(item) if item.can_critical => rate::resolve(
                attacker.critical_rate(),
                rate::extra_rate_bonus(Some(item)),
                target.critical_evasion(),
            ),
            _ => 0.0,
        }
    }
}
