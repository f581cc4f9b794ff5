//! Battle example: critical hits between a party member and an armed orc
//!
//! This example demonstrates:
//! - Loading configuration from host parameters
//! - Tagging equipment, states and skills
//! - Arming enemies through a tactical extension
//! - Inspecting the multiplier breakdown

use critstat::*;
use std::collections::HashMap;

struct Armory {
    weapons: HashMap<WeaponId, AnnotationBag>,
}

impl TacticalExtension for Armory {
    fn contextual_weapon_id(&self, battler: &dyn BattlerCapability) -> Option<WeaponId> {
        (battler.role() == BattlerRole::Enemy).then_some(WeaponId(1))
    }

    fn weapon_annotations(&self, id: WeaponId) -> Option<&AnnotationBag> {
        self.weapons.get(&id)
    }
}

fn main() -> Result<(), CritError> {
    let config = CriticalConfig::from_json(
        r#"{
            "criticalDamageStrategy": "multiply",
            "ActorCriticalDamagePriority": "state,skill,weapon,armor,actor,job,default",
            "defaultCriticalDamage": "1.5"
        }"#,
    )?;

    let mut weapons = HashMap::new();
    weapons.insert(WeaponId(1), AnnotationBag::with_note("Rusty axe <criticalDamage: 1.2>"));
    let engine = CriticalDamage::new(config).with_tactical(Box::new(Armory { weapons }));

    let hero = BattlerRecord::actor()
        .with_class(AnnotationBag::with_note("<criticalDamage: 1.1>"))
        .with_weapon(AnnotationBag::new().with_meta("criticalDamage", 1.5))
        .with_state(AnnotationBag::with_note("Focused <criticalDamage: 1.25>"))
        .with_critical_rate(0.08);
    let orc = BattlerRecord::enemy()
        .with_base(AnnotationBag::with_note("<criticalDamage: 1.3>"))
        .with_critical_evasion(0.1);
    let slash = ActionItem::new("Slash")
        .with_annotations(AnnotationBag::with_note("<extCriticalRate: 0.12>"));

    println!("=== Hero attacks ===");
    let resolved = engine.resolve_action(&hero, Some(&slash));
    println!("Breakdown: {}", resolved.describe());
    println!(
        "Critical chance: {:.1}%",
        engine.item_critical_chance(&hero, &orc, Some(&slash)) * 100.0
    );
    println!("Critical damage: {:.1}", engine.apply_critical(&hero, Some(&slash), 120.0));

    println!("\n=== Orc attacks ===");
    let resolved = engine.resolve_action(&orc, None);
    println!("Breakdown: {}", resolved.describe());
    println!("Critical damage: {:.1}", engine.apply_critical(&orc, None, 80.0));

    println!("\n=== Stat screen ===");
    println!("Hero critical damage: {:.2}", engine.critical_damage_attribute(&hero));
    println!("Orc critical damage: {:.2}", engine.critical_damage_attribute(&orc));

    Ok(())
}
