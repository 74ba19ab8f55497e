use combat_core::{
    Attribute, DVec3, Damage, DamageType, Enchantment, EntityId, EntityType, EquipmentSlot,
    GameMode, Hand, ItemStack, Material,
};
use combat_runtime::{
    CombatEvent, CombatSettings, DamageAdapter, FallSettings, FallStateAdapter,
    FeatureConfiguration, FeatureDefinition, FeatureKind, FeatureRegistry, InMemoryWorld,
    KnockbackAdapter, KnockbackMode, LegacyKnockbackSettings, WorldCommand, WorldEntity,
};

const ATTACKER: EntityId = EntityId(1);
const TARGET: EntityId = EntityId(2);

fn assert_close(actual: DVec3, expected: DVec3) {
    assert!(
        (actual - expected).length() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Damage
// ============================================================================

#[test]
fn breach_weakens_target_armor() {
    let configuration = FeatureRegistry::vanilla()
        .build(&[FeatureKind::Mace])
        .expect("builds");
    let mace = ItemStack::new(Material::Mace).with_enchantment(Enchantment::Breach, 4);
    let mut world = InMemoryWorld::new()
        .with(
            WorldEntity::player(ATTACKER)
                .holding(Hand::Main, mace)
                .attribute(Attribute::AttackDamage, 10.0),
        )
        .with(
            WorldEntity::zombie(TARGET)
                .at(0.0, 0.0, 1.0)
                .attribute(Attribute::Armor, 20.0)
                .attribute(Attribute::ArmorToughness, 8.0),
        );

    configuration.dispatch(
        &CombatEvent::EntityAttack {
            attacker: ATTACKER,
            target: TARGET,
        },
        &mut world,
    );

    // Armor would absorb 70%; Breach IV leaves it 40% effective.
    let hits = world.damage_taken(TARGET);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].amount - 7.2).abs() < 1e-4);
    assert_eq!(hits[0].kind, DamageType::PlayerAttack);
}

#[test]
fn armor_can_be_disabled() {
    let settings = CombatSettings::from_ron_str("(features: [DAMAGE], damage: (armor: false))")
        .expect("parses");
    let configuration = FeatureRegistry::vanilla().configure(settings).expect("builds");
    let damage = configuration.damage().expect("damage");
    let mut world = InMemoryWorld::new().with(
        WorldEntity::zombie(TARGET).attribute(Attribute::Armor, 20.0),
    );

    let hit = Damage::new(DamageType::MobAttack, None, 6.0);
    assert!(damage.apply_damage(&mut world, TARGET, hit));
    assert_eq!(world.damage_taken(TARGET)[0].amount, 6.0);
}

#[test]
fn damage_rejects_invalid_requests() {
    let configuration = FeatureRegistry::vanilla()
        .build(&[FeatureKind::Damage])
        .expect("builds");
    let damage = configuration.damage().expect("damage");
    let creative = EntityId(3);
    let mut world = InMemoryWorld::new()
        .with(WorldEntity::zombie(TARGET))
        .with(WorldEntity::player(creative).game_mode(GameMode::Creative))
        .with(WorldEntity::new(EntityId(4), EntityType::Arrow));

    let hit = |amount| Damage::new(DamageType::Generic, None, amount);
    assert!(!damage.apply_damage(&mut world, TARGET, hit(0.0)));
    assert!(!damage.apply_damage(&mut world, TARGET, hit(-3.0)));
    assert!(!damage.apply_damage(&mut world, TARGET, hit(f32::NAN)));
    assert!(!damage.apply_damage(&mut world, creative, hit(5.0)));
    assert!(!damage.apply_damage(&mut world, EntityId(4), hit(5.0)));
    assert!(!damage.apply_damage(&mut world, EntityId(99), hit(5.0)));
    assert!(world.commands().is_empty());
}

// ============================================================================
// Fall tracking
// ============================================================================

fn fall_configuration(settings: FallSettings) -> FeatureConfiguration {
    let settings = CombatSettings {
        features: vec![FeatureKind::Fall],
        fall: settings,
        ..CombatSettings::default()
    };
    FeatureRegistry::vanilla().configure(settings).expect("builds")
}

fn step(
    configuration: &FeatureConfiguration,
    world: &mut InMemoryWorld,
    dy: f64,
    on_ground: bool,
) {
    configuration.dispatch(
        &CombatEvent::EntityMove {
            entity: TARGET,
            dy,
            on_ground,
        },
        world,
    );
}

#[test]
fn landing_after_long_fall_deals_damage() {
    let configuration = fall_configuration(FallSettings::default());
    let fall = configuration.fall().expect("fall");
    let mut world = InMemoryWorld::new().with(
        WorldEntity::zombie(TARGET)
            .airborne()
            .attribute(Attribute::Armor, 20.0),
    );

    for _ in 0..7 {
        step(&configuration, &mut world, -1.0, false);
    }
    // Upward movement never reduces the tracked distance.
    step(&configuration, &mut world, 0.5, false);
    assert_eq!(fall.fall_distance(TARGET), 7.0);

    step(&configuration, &mut world, 0.0, true);

    // ceil(7 - 3), unaffected by armor.
    let hits = world.damage_taken(TARGET);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, DamageType::Fall);
    assert_eq!(hits[0].amount, 4.0);
    assert_eq!(fall.fall_distance(TARGET), 0.0);
}

#[test]
fn short_fall_is_harmless() {
    let configuration = fall_configuration(FallSettings::default());
    let mut world = InMemoryWorld::new().with(WorldEntity::zombie(TARGET).airborne());

    for _ in 0..3 {
        step(&configuration, &mut world, -1.0, false);
    }
    step(&configuration, &mut world, 0.0, true);

    assert!(world.commands().is_empty());
}

#[test]
fn fall_damage_can_be_disabled() {
    let configuration = fall_configuration(FallSettings {
        fall_damage: false,
        ..FallSettings::default()
    });
    let mut world = InMemoryWorld::new().with(WorldEntity::zombie(TARGET).airborne());

    for _ in 0..10 {
        step(&configuration, &mut world, -1.0, false);
    }
    step(&configuration, &mut world, 0.0, true);

    assert!(world.commands().is_empty());
    assert_eq!(configuration.fall().expect("fall").fall_distance(TARGET), 0.0);
}

#[test]
fn removed_entities_lose_fall_state() {
    let configuration = fall_configuration(FallSettings::default());
    let fall = configuration.fall().expect("fall");
    let mut world = InMemoryWorld::new().with(WorldEntity::zombie(TARGET).airborne());

    step(&configuration, &mut world, -5.0, false);
    fall.set_extra_fall_particles(TARGET, true);
    configuration.dispatch(&CombatEvent::EntityRemoved { entity: TARGET }, &mut world);

    assert_eq!(fall.fall_distance(TARGET), 0.0);
    assert!(!fall.extra_fall_particles(TARGET));
}

// ============================================================================
// Knockback
// ============================================================================

fn duel() -> InMemoryWorld {
    InMemoryWorld::new()
        .with(WorldEntity::player(ATTACKER).moving(DVec3::new(5.0, 0.0, 5.0)))
        .with(WorldEntity::zombie(TARGET).at(3.0, 0.0, 4.0))
}

#[test]
fn vanilla_knockback_follows_attacker_yaw() {
    let configuration = FeatureRegistry::vanilla()
        .build(&[FeatureKind::Knockback])
        .expect("builds");
    let knockback = configuration.knockback().expect("knockback");
    let mut world = duel();

    knockback.apply_attack_knockback(&mut world, ATTACKER, TARGET, 1.0);

    assert_close(
        world.velocity(TARGET).expect("target"),
        DVec3::new(0.0, 8.0, 10.0),
    );
    assert_close(
        world.velocity(ATTACKER).expect("attacker"),
        DVec3::new(3.0, 0.0, 3.0),
    );
}

#[test]
fn full_resistance_cancels_vanilla_knockback() {
    let configuration = FeatureRegistry::vanilla()
        .build(&[FeatureKind::Knockback])
        .expect("builds");
    let knockback = configuration.knockback().expect("knockback");
    let mut world = InMemoryWorld::new()
        .with(WorldEntity::player(ATTACKER))
        .with(WorldEntity::zombie(TARGET).attribute(Attribute::KnockbackResistance, 1.0));

    knockback.apply_attack_knockback(&mut world, ATTACKER, TARGET, 1.0);

    assert!(world.commands().is_empty());
}

#[test]
fn legacy_knockback_pushes_away_from_attacker() {
    let settings = CombatSettings {
        features: vec![FeatureKind::Knockback],
        knockback: KnockbackMode::Legacy(LegacyKnockbackSettings::default()),
        ..CombatSettings::default()
    };
    let configuration = FeatureRegistry::vanilla().configure(settings).expect("builds");
    let knockback = configuration.knockback().expect("knockback");

    let mut world = duel();
    knockback.apply_attack_knockback(&mut world, ATTACKER, TARGET, 1.0);
    // Direction (0.6, 0, 0.8) at 0.4 blocks/tick, lift capped at 0.4.
    assert_close(
        world.velocity(TARGET).expect("target"),
        DVec3::new(4.8, 8.0, 6.4),
    );
    // Legacy knockback leaves the attacker alone.
    assert_eq!(world.velocity(ATTACKER), Some(DVec3::new(5.0, 0.0, 5.0)));

    let mut world = duel();
    knockback.apply_attack_knockback(&mut world, ATTACKER, TARGET, 2.0);
    // One extra level along the attacker's yaw (+Z).
    assert_close(
        world.velocity(TARGET).expect("target"),
        DVec3::new(4.8, 10.0, 16.4),
    );
}

#[test]
fn disabled_knockback_ignores_deltas() {
    let settings = CombatSettings {
        features: vec![FeatureKind::Knockback],
        knockback: KnockbackMode::Disabled,
        ..CombatSettings::default()
    };
    let configuration = FeatureRegistry::vanilla().configure(settings).expect("builds");
    let knockback = configuration.knockback().expect("knockback");
    let mut world = duel();

    knockback.apply_attack_knockback(&mut world, ATTACKER, TARGET, 1.0);
    knockback.apply_velocity_delta(&mut world, TARGET, DVec3::Y);

    assert!(world.commands().is_empty());
}

// ============================================================================
// Item damage
// ============================================================================

#[test]
fn creative_players_keep_item_durability() {
    let configuration = FeatureRegistry::vanilla()
        .build(&[FeatureKind::ItemDamage])
        .expect("builds");
    let item_damage = configuration.item_damage().expect("item damage");
    let builder = EntityId(3);
    let mut world = InMemoryWorld::new()
        .with(WorldEntity::player(ATTACKER))
        .with(WorldEntity::player(builder).game_mode(GameMode::Creative));

    item_damage.damage_equipment(&mut world, ATTACKER, EquipmentSlot::OffHand, 2);
    item_damage.damage_equipment(&mut world, builder, EquipmentSlot::MainHand, 2);
    item_damage.damage_equipment(&mut world, ATTACKER, EquipmentSlot::MainHand, 0);

    assert_eq!(
        world.commands(),
        &[WorldCommand::DamageItem {
            entity: ATTACKER,
            slot: EquipmentSlot::OffHand,
            amount: 2,
        }]
    );
}

#[test]
fn no_op_damage_starves_dependents() {
    let configuration = FeatureRegistry::vanilla()
        .select(&[FeatureKind::Mace])
        .replace(FeatureDefinition::no_op(FeatureKind::Damage))
        .build()
        .expect("builds");
    let mut world = InMemoryWorld::new()
        .with(
            WorldEntity::player(ATTACKER)
                .airborne()
                .holding(Hand::Main, ItemStack::new(Material::Mace)),
        )
        .with(WorldEntity::zombie(TARGET));
    configuration
        .fall()
        .expect("fall")
        .set_fall_distance(ATTACKER, 6.0);

    let landed = configuration
        .mace()
        .expect("mace")
        .on_smash_attack(&mut world, ATTACKER, TARGET);

    assert!(!landed);
    assert!(world.commands().is_empty());
}
