//! Candidate collection.
//!
//! [`SourceCollector`] walks a priority list and gathers the
//! `criticalDamage` annotations each source provides. Only strictly
//! positive values are kept; absent and non-positive annotations are
//! dropped silently.

use crate::annotation::{AnnotationBag, AnnotationTag};
use crate::battler::{ActionItem, BattlerCapability, EquipSlot, TacticalExtension};
use crate::priority::PriorityList;
use crate::resolved::Candidate;
use crate::source::{BattlerRole, Source};
use tracing::trace;

/// Gathers candidate multipliers from a battler's sources.
///
/// # Examples
///
/// ```rust
/// use critstat::collector::SourceCollector;
/// use critstat::{AnnotationBag, BattlerRecord, BattlerRole, PriorityList};
///
/// let hero = BattlerRecord::actor()
///     .with_state(AnnotationBag::with_note("<criticalDamage: 1.2>"))
///     .with_weapon(AnnotationBag::with_note("<criticalDamage: 1.5>"));
///
/// let collector = SourceCollector::new(3.0);
/// let priority = PriorityList::default_for(BattlerRole::Actor);
/// assert_eq!(collector.collect_values(&hero, None, &priority), vec![1.2, 1.5, 3.0]);
/// ```
#[derive(Clone, Copy)]
pub struct SourceCollector<'a> {
    default_multiplier: f64,
    tactical: Option<&'a dyn TacticalExtension>,
}

impl<'a> SourceCollector<'a> {
    /// Create a collector without a tactical extension.
    pub fn new(default_multiplier: f64) -> Self {
        Self {
            default_multiplier,
            tactical: None,
        }
    }

    /// Attach a tactical extension used to arm enemies.
    pub fn with_tactical(mut self, tactical: Option<&'a dyn TacticalExtension>) -> Self {
        self.tactical = tactical;
        self
    }

    /// The value produced by [`Source::Default`].
    pub fn default_multiplier(&self) -> f64 {
        self.default_multiplier
    }

    /// Collect candidates in priority order.
    ///
    /// `item` is the skill or item of the resolving action; `None` when
    /// there is no action in flight.
    pub fn collect(
        &self,
        battler: &dyn BattlerCapability,
        item: Option<&ActionItem>,
        priority: &PriorityList,
    ) -> Vec<Candidate> {
        self.collect_sources(battler, item, priority.sources())
    }

    /// Values of [`collect`](Self::collect), without their sources.
    pub fn collect_values(
        &self,
        battler: &dyn BattlerCapability,
        item: Option<&ActionItem>,
        priority: &PriorityList,
    ) -> Vec<f64> {
        self.collect(battler, item, priority)
            .into_iter()
            .map(|c| c.value)
            .collect()
    }

    /// Collect candidates from an arbitrary, unvalidated source sequence.
    pub fn collect_sources(
        &self,
        battler: &dyn BattlerCapability,
        item: Option<&ActionItem>,
        sources: &[Source],
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for &source in sources {
            let values = self.source_values(battler, item, source);
            trace!(%source, count = values.len(), "collected critical damage candidates");
            candidates.extend(values.into_iter().map(|value| Candidate::new(source, value)));
        }
        candidates
    }

    /// Strictly positive values contributed by one source.
    pub fn source_values(
        &self,
        battler: &dyn BattlerCapability,
        item: Option<&ActionItem>,
        source: Source,
    ) -> Vec<f64> {
        let values: Vec<f64> = match source {
            Source::State => battler
                .active_states()
                .into_iter()
                .filter_map(critical_damage)
                .collect(),
            Source::Skill => item
                .and_then(|item| critical_damage(&item.annotations))
                .into_iter()
                .collect(),
            Source::Armor => battler
                .equipped(EquipSlot::Armor)
                .into_iter()
                .filter_map(critical_damage)
                .collect(),
            Source::Weapon => self.weapon_values(battler),
            Source::Actor => record_value(battler, BattlerRole::Actor),
            Source::Enemy => record_value(battler, BattlerRole::Enemy),
            Source::Job => battler
                .class_record()
                .and_then(critical_damage)
                .into_iter()
                .collect(),
            Source::Default => return vec![self.default_multiplier],
        };
        values.into_iter().filter(|value| *value > 0.0).collect()
    }

    fn weapon_values(&self, battler: &dyn BattlerCapability) -> Vec<f64> {
        match battler.role() {
            BattlerRole::Actor => battler
                .equipped(EquipSlot::Weapon)
                .into_iter()
                .filter_map(critical_damage)
                .collect(),
            BattlerRole::Enemy => self
                .tactical
                .and_then(|tactical| {
                    let id = tactical.contextual_weapon_id(battler)?;
                    tactical.weapon_annotations(id)
                })
                .and_then(critical_damage)
                .into_iter()
                .collect(),
        }
    }
}

fn critical_damage(bag: &AnnotationBag) -> Option<f64> {
    bag.read(AnnotationTag::CRITICAL_DAMAGE)
}

fn record_value(battler: &dyn BattlerCapability, role: BattlerRole) -> Vec<f64> {
    if battler.role() != role {
        return Vec::new();
    }
    battler
        .base_record()
        .and_then(critical_damage)
        .into_iter()
        .collect()
}
