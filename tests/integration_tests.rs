use critstat::*;
use std::collections::HashMap;

fn tagged(value: f64) -> AnnotationBag {
    AnnotationBag::with_note(format!("<criticalDamage: {}>", value))
}

fn engine(strategy: Strategy) -> CriticalDamage {
    CriticalDamage::new(CriticalConfig::default().with_strategy(strategy))
}

/// Tactical extension that arms every enemy with the same weapon.
struct FixedArmory {
    weapon: WeaponId,
    table: HashMap<WeaponId, AnnotationBag>,
}

impl TacticalExtension for FixedArmory {
    fn contextual_weapon_id(&self, battler: &dyn BattlerCapability) -> Option<WeaponId> {
        (battler.role() == BattlerRole::Enemy).then_some(self.weapon)
    }

    fn weapon_annotations(&self, id: WeaponId) -> Option<&AnnotationBag> {
        self.table.get(&id)
    }
}

fn armory(value: f64) -> Box<FixedArmory> {
    let mut table = HashMap::new();
    table.insert(WeaponId(3), tagged(value));
    Box::new(FixedArmory {
        weapon: WeaponId(3),
        table,
    })
}

// ============================================================================
// Reduction scenarios
// ============================================================================

#[test]
fn test_scenario_sum() {
    assert_eq!(reduce(&[1.5, 0.5], Strategy::Sum, 3.0), 2.0);
}

#[test]
fn test_scenario_product() {
    assert_eq!(reduce(&[2.0, 1.5], Strategy::Product, 3.0), 3.0);
}

#[test]
fn test_scenario_priority() {
    assert_eq!(reduce(&[1.2, 5.0], Strategy::Priority, 3.0), 1.2);
}

#[test]
fn test_scenario_max_empty() {
    assert_eq!(reduce(&[], Strategy::Max, 3.0), 3.0);
}

#[test]
fn test_scenario_rate_with_evasion() {
    let rate = rate::resolve(0.1, 0.2, 0.5);
    assert!((rate - 0.15).abs() < 1e-12);
}

#[test]
fn test_scenario_rate_clamped() {
    assert_eq!(rate::resolve(0.9, 0.9, 0.0), 1.0);
}

// ============================================================================
// Action multiplier
// ============================================================================

/// Every actor source contributes in the configured order.
#[test]
fn test_actor_full_breakdown() {
    let hero = BattlerRecord::actor()
        .with_state(tagged(1.1))
        .with_armor(tagged(1.2))
        .with_weapon(tagged(1.3))
        .with_base(tagged(1.4))
        .with_class(tagged(1.5));
    let skill = ActionItem::new("Cleave").with_annotations(tagged(1.6));

    let resolved = engine(Strategy::Priority).resolve_action(&hero, Some(&skill));
    let sources: Vec<Source> = resolved.candidates.iter().map(|c| c.source).collect();
    assert_eq!(
        sources,
        vec![
            Source::State,
            Source::Skill,
            Source::Armor,
            Source::Weapon,
            Source::Actor,
            Source::Job,
            Source::Default,
        ]
    );
    assert_eq!(resolved.value, 1.1);
}

/// A custom priority order changes which source the priority strategy picks.
#[test]
fn test_configured_priority_order() {
    let config = CriticalConfig::from_params(&ConfigParams {
        strategy: Some("priority".to_string()),
        actor_priority: Some("job,weapon,default".to_string()),
        ..ConfigParams::default()
    })
    .unwrap();
    let engine = CriticalDamage::new(config);

    let hero = BattlerRecord::actor()
        .with_state(tagged(9.0))
        .with_weapon(tagged(2.0))
        .with_class(tagged(1.7));
    assert_eq!(engine.action_multiplier(&hero, None), 1.7);

    let classless = BattlerRecord::actor().with_weapon(tagged(2.0));
    assert_eq!(engine.action_multiplier(&classless, None), 2.0);

    let bare = BattlerRecord::actor();
    assert_eq!(engine.action_multiplier(&bare, None), 3.0);
}

/// Several states and armors each contribute one candidate.
#[test]
fn test_multiple_items_per_source() {
    let hero = BattlerRecord::actor()
        .with_state(tagged(1.1))
        .with_state(AnnotationBag::new())
        .with_state(tagged(1.2))
        .with_armor(tagged(1.5))
        .with_empty_slot(EquipSlot::Armor)
        .with_armor(tagged(2.0));

    let resolved = engine(Strategy::Sum).resolve_action(&hero, None);
    assert_eq!(resolved.values_from(Source::State), vec![1.1, 1.2]);
    assert_eq!(resolved.values_from(Source::Armor), vec![1.5, 2.0]);
}

#[test]
fn test_constant_ignores_tags() {
    let hero = BattlerRecord::actor().with_weapon(tagged(10.0));
    assert_eq!(engine(Strategy::Constant).action_multiplier(&hero, None), 3.0);
}

#[test]
fn test_custom_default_multiplier() {
    let config = CriticalConfig::default()
        .with_strategy(Strategy::Max)
        .with_default_multiplier(1.5)
        .unwrap();
    let engine = CriticalDamage::new(config);
    assert_eq!(engine.config().default_multiplier(), 1.5);
    assert_eq!(engine.collector().default_multiplier(), 1.5);
    assert_eq!(engine.action_multiplier(&BattlerRecord::enemy(), None), 1.5);
}

/// A signed tag in a note is skipped and the next well-formed tag is used.
#[test]
fn test_signed_note_tag_falls_through_to_next() {
    let hero = BattlerRecord::actor().with_weapon(AnnotationBag::with_note(
        "<criticalDamage: -1> <criticalDamage: 2>",
    ));
    let resolved = engine(Strategy::Priority).resolve_action(&hero, None);
    assert_eq!(resolved.values_from(Source::Weapon), vec![2.0]);
    assert_eq!(resolved.value, 2.0);

    let plus = BattlerRecord::actor().with_weapon(AnnotationBag::with_note("<criticalDamage: +1.5>"));
    assert_eq!(engine(Strategy::Priority).action_multiplier(&plus, None), 3.0);
}

/// Per-call override of strategy and priority list.
#[test]
fn test_resolve_action_with_override() {
    let hero = BattlerRecord::actor()
        .with_state(tagged(2.0))
        .with_weapon(tagged(1.5));
    let engine = engine(Strategy::Sum);
    let weapon_only = PriorityList::parse(BattlerRole::Actor, "weapon,default").unwrap();

    let resolved = engine.resolve_action_with(&hero, None, Strategy::Max, &weapon_only);
    assert_eq!(resolved.values(), vec![1.5, 3.0]);
    assert_eq!(resolved.value, 3.0);
    assert_eq!(resolved.strategy, Strategy::Max);
}

// ============================================================================
// Enemies
// ============================================================================

#[test]
fn test_enemy_without_tactical_extension() {
    let slime = BattlerRecord::enemy()
        .with_base(tagged(1.25))
        .with_weapon(tagged(9.0));
    let resolved = engine(Strategy::Sum).resolve_action(&slime, None);
    assert_eq!(resolved.values(), vec![1.25, 3.0]);
    assert_eq!(resolved.value, 4.25);
}

#[test]
fn test_enemy_with_tactical_weapon() {
    let engine = engine(Strategy::Product).with_tactical(armory(2.0));
    let orc = BattlerRecord::enemy().with_base(tagged(1.5));

    let resolved = engine.resolve_action(&orc, None);
    assert_eq!(resolved.values_from(Source::Weapon), vec![2.0]);
    assert_eq!(resolved.value, 9.0); // 2.0 × 1.5 × 3.0
}

#[test]
fn test_tactical_extension_does_not_arm_actors() {
    let engine = engine(Strategy::Sum).with_tactical(armory(2.0));
    let hero = BattlerRecord::actor();
    assert!(engine
        .resolve_action(&hero, None)
        .values_from(Source::Weapon)
        .is_empty());
}

// ============================================================================
// Base attribute
// ============================================================================

/// Outside tactical combat the attribute ignores states and skills, while
/// the action multiplier always uses them.
#[test]
fn test_base_attribute_asymmetry() {
    let engine = engine(Strategy::Max);
    let hero = BattlerRecord::actor()
        .with_state(tagged(6.0))
        .with_current_action(ActionItem::new("Bash").with_annotations(tagged(7.0)))
        .with_weapon(tagged(1.5));

    assert_eq!(engine.critical_damage_attribute(&hero), 3.0);
    assert_eq!(engine.action_multiplier(&hero, hero.current_action.as_ref()), 7.0);

    let tactical = hero.clone().with_tactical_battle(true);
    assert_eq!(engine.critical_damage_attribute(&tactical), 7.0);
}

#[test]
fn test_enemy_base_attribute() {
    let engine = engine(Strategy::Sum).with_tactical(armory(1.5));
    let orc = BattlerRecord::enemy()
        .with_base(tagged(0.5))
        .with_state(tagged(4.0));

    let resolved = engine.resolve_base_attribute(&orc);
    assert_eq!(
        resolved.candidates,
        vec![
            Candidate::new(Source::Weapon, 1.5),
            Candidate::new(Source::Enemy, 0.5),
            Candidate::new(Source::Default, 3.0),
        ]
    );
    assert_eq!(resolved.value, 5.0);
}

// ============================================================================
// Damage pipeline
// ============================================================================

#[test]
fn test_apply_critical() {
    let engine = engine(Strategy::Priority);
    let hero = BattlerRecord::actor().with_armor(tagged(2.5));
    assert_eq!(engine.apply_critical(&hero, None, 40.0), 100.0);
}

#[test]
fn test_item_critical_chance_pipeline() {
    let engine = engine(Strategy::Sum);
    let hero = BattlerRecord::actor().with_critical_rate(0.9);
    let slime = BattlerRecord::enemy();
    let shot = ActionItem::new("Snipe")
        .with_annotations(AnnotationBag::new().with_meta("extCriticalRate", 0.9));

    assert_eq!(engine.item_critical_chance(&hero, &slime, Some(&shot)), 1.0);

    let weakened = ActionItem::new("Feeble")
        .with_annotations(AnnotationBag::new().with_meta("extCriticalRate", "-2"));
    assert_eq!(engine.item_critical_chance(&hero, &slime, Some(&weakened)), 0.0);
}

// ============================================================================
// Data loaded from JSON
// ============================================================================

#[test]
fn test_battler_and_config_from_json() {
    let config = CriticalConfig::from_json(
        r#"{
            "criticalDamageStrategy": "add",
            "ActorCriticalDamagePriority": "state,skill,armor,weapon,actor,job,default",
            "EnemyCriticalDamagePriority": "state,skill,weapon,enemy,default",
            "defaultCriticalDamage": "3.00"
        }"#,
    )
    .unwrap();
    assert_eq!(config, CriticalConfig::default());

    let hero: BattlerRecord = serde_json::from_str(
        r#"{
            "role": "actor",
            "weapons": [{"note": "Ancient blade <criticalDamage: 0.75>"}, null],
            "armors": [null, {"meta": {"criticalDamage": "0.25"}}]
        }"#,
    )
    .unwrap();

    let engine = CriticalDamage::new(config);
    assert_eq!(engine.action_multiplier(&hero, None), 4.0);
    assert_eq!(engine.base_attribute(&hero), 4.0);
}
