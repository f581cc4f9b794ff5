//! Battler capability interfaces.
//!
//! The engine never reaches into a concrete game object. Everything it
//! needs from an attacker is exposed through [`BattlerCapability`], and the
//! optional tactical-combat add-on is injected as a [`TacticalExtension`].
//! [`BattlerRecord`] is a plain-data implementation for hosts that keep
//! battlers as loaded definitions.

use crate::annotation::AnnotationBag;
use crate::source::BattlerRole;
use serde::{Deserialize, Serialize};

/// Equipment slot category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipSlot {
    /// Weapon slots.
    Weapon,
    /// Armor slots (shield, head, body, accessory...).
    Armor,
}

/// Host identifier of a weapon definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponId(pub u32);

/// The skill or item an action is resolving.
///
/// # Examples
///
/// ```rust
/// use critstat::{ActionItem, AnnotationBag};
///
/// let slash = ActionItem::new("Slash")
///     .with_annotations(AnnotationBag::with_note("<extCriticalRate: 0.2>"));
/// assert!(slash.can_critical);
///
/// let heal = ActionItem::new("Heal").without_critical();
/// assert!(!heal.can_critical);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Display name, used only in logs.
    #[serde(default)]
    pub name: String,

    /// Annotations of the skill or item definition.
    #[serde(default)]
    pub annotations: AnnotationBag,

    /// Whether the item's damage definition allows critical hits.
    #[serde(default = "default_can_critical")]
    pub can_critical: bool,
}

fn default_can_critical() -> bool {
    true
}

impl ActionItem {
    /// Create an item that can land critical hits and has no annotations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: AnnotationBag::new(),
            can_critical: true,
        }
    }

    /// Replace the annotations.
    pub fn with_annotations(mut self, annotations: AnnotationBag) -> Self {
        self.annotations = annotations;
        self
    }

    /// Mark the item as unable to land critical hits.
    pub fn without_critical(mut self) -> Self {
        self.can_critical = false;
        self
    }
}

/// What the engine needs to know about a battler.
///
/// Enumeration order of states and equipment must be stable for identical
/// battler state; candidates are collected in that order.
pub trait BattlerCapability: Send + Sync {
    /// Whether this battler is an actor or an enemy.
    fn role(&self) -> BattlerRole;

    /// Annotations of the active status effects, in application order.
    fn active_states(&self) -> Vec<&AnnotationBag>;

    /// Annotations of the equipment in a slot category, in slot order.
    ///
    /// Empty slots are skipped. Enemies normally have no equipment.
    fn equipped(&self, slot: EquipSlot) -> Vec<&AnnotationBag>;

    /// Annotations of the battler's own definition record.
    fn base_record(&self) -> Option<&AnnotationBag>;

    /// Annotations of the current class record.
    fn class_record(&self) -> Option<&AnnotationBag> {
        None
    }

    /// The item of the action the battler is about to take, if any.
    fn current_action_item(&self) -> Option<&ActionItem> {
        None
    }

    /// Whether the battler is fighting in tactical (grid) combat mode.
    fn in_tactical_battle(&self) -> bool {
        false
    }

    /// Base critical hit rate.
    fn critical_rate(&self) -> f64 {
        0.0
    }

    /// Critical evasion rate.
    fn critical_evasion(&self) -> f64 {
        0.0
    }
}

/// Optional tactical-combat add-on that arms enemies with weapons.
pub trait TacticalExtension: Send + Sync {
    /// Weapon wielded by `battler` in the current tactical context.
    fn contextual_weapon_id(&self, battler: &dyn BattlerCapability) -> Option<WeaponId>;

    /// Look up a weapon definition's annotations.
    fn weapon_annotations(&self, id: WeaponId) -> Option<&AnnotationBag>;
}

/// Plain-data battler.
///
/// Equipment slots are `Option`s so empty slots keep their position.
///
/// # Examples
///
/// ```rust
/// use critstat::{AnnotationBag, BattlerCapability, BattlerRecord, EquipSlot};
///
/// let hero = BattlerRecord::actor()
///     .with_weapon(AnnotationBag::with_note("<criticalDamage: 1.5>"))
///     .with_empty_slot(EquipSlot::Armor)
///     .with_armor(AnnotationBag::new());
///
/// assert_eq!(hero.equipped(EquipSlot::Weapon).len(), 1);
/// assert_eq!(hero.equipped(EquipSlot::Armor).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlerRecord {
    /// Actor or enemy.
    pub role: BattlerRole,

    /// Own definition record.
    #[serde(default)]
    pub base: Option<AnnotationBag>,

    /// Current class record (actors).
    #[serde(default)]
    pub class: Option<AnnotationBag>,

    /// Active states in application order.
    #[serde(default)]
    pub states: Vec<AnnotationBag>,

    /// Weapon slots.
    #[serde(default)]
    pub weapons: Vec<Option<AnnotationBag>>,

    /// Armor slots.
    #[serde(default)]
    pub armors: Vec<Option<AnnotationBag>>,

    /// Item of the queued action.
    #[serde(default)]
    pub current_action: Option<ActionItem>,

    /// Tactical combat mode flag.
    #[serde(default)]
    pub tactical_battle: bool,

    /// Base critical hit rate.
    #[serde(default)]
    pub critical_rate: f64,

    /// Critical evasion rate.
    #[serde(default)]
    pub critical_evasion: f64,
}

impl BattlerRecord {
    /// Create an empty record for a role.
    pub fn new(role: BattlerRole) -> Self {
        Self {
            role,
            base: None,
            class: None,
            states: Vec::new(),
            weapons: Vec::new(),
            armors: Vec::new(),
            current_action: None,
            tactical_battle: false,
            critical_rate: 0.0,
            critical_evasion: 0.0,
        }
    }

    /// Create an empty actor record.
    pub fn actor() -> Self {
        Self::new(BattlerRole::Actor)
    }

    /// Create an empty enemy record.
    pub fn enemy() -> Self {
        Self::new(BattlerRole::Enemy)
    }

    /// Set the base (actor or enemy definition) record.
    pub fn with_base(mut self, base: AnnotationBag) -> Self {
        self.base = Some(base);
        self
    }

    /// Set the class record.
    pub fn with_class(mut self, class: AnnotationBag) -> Self {
        self.class = Some(class);
        self
    }

    /// Add an active state.
    pub fn with_state(mut self, state: AnnotationBag) -> Self {
        self.states.push(state);
        self
    }

    /// Equip a weapon in the next slot.
    pub fn with_weapon(mut self, weapon: AnnotationBag) -> Self {
        self.weapons.push(Some(weapon));
        self
    }

    /// Equip an armor piece in the next slot.
    pub fn with_armor(mut self, armor: AnnotationBag) -> Self {
        self.armors.push(Some(armor));
        self
    }

    /// Append an unequipped slot.
    pub fn with_empty_slot(mut self, slot: EquipSlot) -> Self {
        match slot {
            EquipSlot::Weapon => self.weapons.push(None),
            EquipSlot::Armor => self.armors.push(None),
        }
        self
    }

    /// Set the queued action item.
    pub fn with_current_action(mut self, item: ActionItem) -> Self {
        self.current_action = Some(item);
        self
    }

    /// Mark whether a tactical battle is running.
    pub fn with_tactical_battle(mut self, tactical_battle: bool) -> Self {
        self.tactical_battle = tactical_battle;
        self
    }

    /// Set the base critical rate.
    pub fn with_critical_rate(mut self, rate: f64) -> Self {
        self.critical_rate = rate;
        self
    }

    /// Set the critical evasion rate.
    pub fn with_critical_evasion(mut self, evasion: f64) -> Self {
        self.critical_evasion = evasion;
        self
    }
}

impl BattlerCapability for BattlerRecord {
    fn role(&self) -> BattlerRole {
        self.role
    }

    fn active_states(&self) -> Vec<&AnnotationBag> {
        self.states.iter().collect()
    }

    fn equipped(&self, slot: EquipSlot) -> Vec<&AnnotationBag> {
        let slots = match slot {
            EquipSlot::Weapon => &self.weapons,
            EquipSlot::Armor => &self.armors,
        };
        slots.iter().flatten().collect()
    }

    fn base_record(&self) -> Option<&AnnotationBag> {
        self.base.as_ref()
    }

    fn class_record(&self) -> Option<&AnnotationBag> {
        self.class.as_ref()
    }

    fn current_action_item(&self) -> Option<&ActionItem> {
        self.current_action.as_ref()
    }

    fn in_tactical_battle(&self) -> bool {
        self.tactical_battle
    }

    fn critical_rate(&self) -> f64 {
        self.critical_rate
    }

    fn critical_evasion(&self) -> f64 {
        self.critical_evasion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationTag;

    #[test]
    fn test_empty_slots_skipped_in_order() {
        let record = BattlerRecord::actor()
            .with_empty_slot(EquipSlot::Armor)
            .with_armor(AnnotationBag::with_note("<criticalDamage: 1.1>"))
            .with_empty_slot(EquipSlot::Armor)
            .with_armor(AnnotationBag::with_note("<criticalDamage: 1.2>"));

        let armors: Vec<_> = record
            .equipped(EquipSlot::Armor)
            .into_iter()
            .map(|bag| bag.read(AnnotationTag::CRITICAL_DAMAGE))
            .collect();
        assert_eq!(armors, vec![Some(1.1), Some(1.2)]);
        assert!(record.equipped(EquipSlot::Weapon).is_empty());
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "role": "enemy",
            "base": {"note": "<criticalDamage: 2.2>"},
            "states": [{"meta": {"criticalDamage": 1.5}}],
            "critical_rate": 0.05
        }"#;
        let record: BattlerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.role(), BattlerRole::Enemy);
        assert_eq!(record.active_states().len(), 1);
        assert_eq!(
            record.base_record().and_then(|b| b.read(AnnotationTag::CRITICAL_DAMAGE)),
            Some(2.2)
        );
        assert_eq!(record.critical_rate(), 0.05);
        assert!(!record.in_tactical_battle());
    }

    #[test]
    fn test_action_item_defaults_to_critical() {
        let item: ActionItem = serde_json::from_str(r#"{"name": "Fire"}"#).unwrap();
        assert!(item.can_critical);
        assert_eq!(item.annotations, AnnotationBag::new());
    }
}
