use combat_core::{
    Animation, Condition, DVec3, Damage, DamageType, Enchantment, EntityId, EntityType,
    EquipmentSlot, GameMode, Hand, ItemStack, KineticWeaponProfile, Material, SoundEvent, Tick,
    WorldCommands, WorldQuery,
};
use combat_runtime::{
    CombatEvent, FeatureConfiguration, FeatureDefinition, FeatureKind, FeatureRegistry,
    InMemoryWorld, WorldCommand, WorldEntity,
};

const PLAYER: EntityId = EntityId(1);
const ZOMBIE: EntityId = EntityId(2);

/// Wind-up of 5 ticks, 10 tick contact cooldown, every condition open for
/// 100 ticks. Damage needs the attacker moving forward at 0.1 blocks/tick.
fn profile() -> KineticWeaponProfile {
    KineticWeaponProfile {
        delay_ticks: 5,
        contact_cooldown_ticks: Some(10),
        damage_multiplier: 2.0,
        forward_movement: 0.1,
        dismount: Some(Condition::new(100, 0.0, 0.0)),
        knockback: Some(Condition::new(100, 0.0, 0.0)),
        damage: Some(Condition::new(100, 0.1, 0.0)),
        hit_sound: Some(SoundEvent::SpearHit),
        use_sound: Some(SoundEvent::SpearUse),
    }
}

fn spear_item(profile: KineticWeaponProfile) -> ItemStack {
    ItemStack::new(Material::IronSpear).with_kinetic(profile)
}

/// Player at the origin facing +Z at 10 blocks/s (0.5 blocks/tick), with the
/// spear held in use for `ticks`.
fn charging_player(stack: ItemStack, ticks: u64) -> WorldEntity {
    WorldEntity::player(PLAYER)
        .facing(0.0, 0.0)
        .moving(DVec3::new(0.0, 0.0, 10.0))
        .holding(Hand::Main, stack)
        .using(Hand::Main, ticks)
        .alive_for(100)
}

fn zombie_ahead() -> WorldEntity {
    WorldEntity::zombie(ZOMBIE).at(0.0, 0.0, 2.0)
}

fn configuration() -> FeatureConfiguration {
    FeatureRegistry::vanilla()
        .build(&[FeatureKind::Spear])
        .expect("vanilla spear builds")
}

fn tick(configuration: &FeatureConfiguration, world: &mut InMemoryWorld) {
    configuration.dispatch(&CombatEvent::PlayerTick { player: PLAYER }, world);
}

// ============================================================================
// Stabbing
// ============================================================================

#[test]
fn active_charge_stabs_target_in_reach() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    // 1 base attack damage + floor(0.5 * 2.0)
    let hits = world.damage_taken(ZOMBIE);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].amount, 2.0);
    assert_eq!(hits[0].attacker, Some(PLAYER));

    assert!(world.sounds().contains(&SoundEvent::SpearHit));
    assert!(world.commands().contains(&WorldCommand::Animation {
        entity: PLAYER,
        animation: Animation::SwingMainArm,
    }));

    // Knockback pushes the zombie along the player's look direction.
    let pushed = world.velocity(ZOMBIE).expect("zombie");
    assert!((pushed.z - 10.0).abs() < 1e-9);
    assert!((pushed.y - 8.0).abs() < 1e-9);

    // Attacker slowed to 0.6 by the knockback, then boosted by 0.1 blocks/tick.
    let attacker = world.velocity(PLAYER).expect("player");
    assert!((attacker.z - 8.0).abs() < 1e-6);
}

#[test]
fn off_hand_charge_swings_off_hand() {
    let configuration = configuration();
    let player = WorldEntity::player(PLAYER)
        .facing(0.0, 0.0)
        .moving(DVec3::new(0.0, 0.0, 10.0))
        .holding(Hand::Off, spear_item(profile()))
        .using(Hand::Off, 5)
        .alive_for(100);
    let mut world = InMemoryWorld::new().with(player).with(zombie_ahead());

    tick(&configuration, &mut world);

    assert_eq!(world.damage_taken(ZOMBIE).len(), 1);
    assert!(world.commands().contains(&WorldCommand::Animation {
        entity: PLAYER,
        animation: Animation::SwingOffHand,
    }));
}

#[test]
fn wind_up_ticks_do_nothing() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 4))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    assert!(world.commands().is_empty());
}

#[test]
fn targets_out_of_reach_are_ignored() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(WorldEntity::zombie(ZOMBIE).at(0.0, 0.0, 3.9));

    tick(&configuration, &mut world);

    assert!(world.damage_taken(ZOMBIE).is_empty());
    let spear = configuration.spear().expect("spear");
    assert!(!spear.was_recently_stabbed(&world, PLAYER, ZOMBIE));
}

#[test]
fn contact_cooldown_spans_half_open_interval() {
    let configuration = configuration();
    let spear = configuration.spear().expect("spear");
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());

    let stabbed_at = world.entity(PLAYER).expect("player").alive_ticks;
    spear.remember_stabbed_entity(&world, PLAYER, ZOMBIE);

    for elapsed in 0..10 {
        assert!(
            spear.was_recently_stabbed(&world, PLAYER, ZOMBIE),
            "still cooling down {elapsed} ticks after the stab"
        );
        world.advance_ticks(1);
    }
    assert_eq!(
        world.entity(PLAYER).expect("player").alive_ticks,
        stabbed_at + 10
    );
    assert!(!spear.was_recently_stabbed(&world, PLAYER, ZOMBIE));
}

#[test]
fn same_target_is_hit_again_after_cooldown() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());

    tick(&configuration, &mut world);
    for _ in 0..9 {
        world.advance_ticks(1);
        tick(&configuration, &mut world);
    }
    assert_eq!(world.damage_taken(ZOMBIE).len(), 1);

    world.advance_ticks(1);
    tick(&configuration, &mut world);
    assert_eq!(world.damage_taken(ZOMBIE).len(), 2);
}

#[test]
fn cooldown_follows_current_main_hand_profile() {
    let configuration = configuration();
    let spear = configuration.spear().expect("spear");
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());

    spear.remember_stabbed_entity(&world, PLAYER, ZOMBIE);
    world.advance_ticks(10);
    assert!(!spear.was_recently_stabbed(&world, PLAYER, ZOMBIE));

    // Swapping to a spear with a longer cooldown extends the running one.
    let slow = spear_item(KineticWeaponProfile {
        contact_cooldown_ticks: Some(40),
        ..profile()
    });
    if let Some(player) = world.get_mut(PLAYER) {
        player.main_hand = Some(slow);
    }
    assert!(spear.was_recently_stabbed(&world, PLAYER, ZOMBIE));
}

#[test]
fn fleeing_target_never_yields_negative_relative_speed() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead().moving(DVec3::new(0.0, 0.0, 40.0)));

    tick(&configuration, &mut world);

    // Relative speed clamps at zero, leaving only the base attack damage.
    let hits = world.damage_taken(ZOMBIE);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].amount, 1.0);
}

#[test]
fn dead_and_self_targets_are_skipped() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());
    assert!(world.damage(ZOMBIE, Damage::new(DamageType::Generic, None, 25.0)));
    world.take_commands();

    tick(&configuration, &mut world);

    assert!(world.damage_taken(ZOMBIE).is_empty());
    assert!(world.damage_taken(PLAYER).is_empty());
}

// ============================================================================
// Damage / knockback interaction
// ============================================================================

#[test]
fn rejected_damage_suppresses_knockback_but_keeps_cooldown() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead().invulnerable());

    tick(&configuration, &mut world);

    assert!(world.damage_taken(ZOMBIE).is_empty());
    assert!(!world.moved_entities().contains(&ZOMBIE));
    assert!(!world.sounds().contains(&SoundEvent::SpearHit));
    let spear = configuration.spear().expect("spear");
    assert!(spear.was_recently_stabbed(&world, PLAYER, ZOMBIE));
}

#[test]
fn knockback_without_damage_condition_still_pushes() {
    let configuration = configuration();
    let push_only = KineticWeaponProfile {
        damage: None,
        ..profile()
    };
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(push_only), 5))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    assert!(world.damage_taken(ZOMBIE).is_empty());
    assert!(world.moved_entities().contains(&ZOMBIE));
    assert!(world.sounds().contains(&SoundEvent::SpearHit));
}

#[test]
fn failed_damage_condition_still_allows_knockback() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        // Standing still: damage needs 0.1 blocks/tick forward speed.
        .with(charging_player(spear_item(profile()), 5).moving(DVec3::ZERO))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    assert!(world.damage_taken(ZOMBIE).is_empty());
    assert!(world.moved_entities().contains(&ZOMBIE));
}

#[test]
fn dismount_unseats_riding_target() {
    let configuration = configuration();
    let horse = EntityId(3);
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(WorldEntity::new(horse, EntityType::Horse).at(0.0, 0.0, 10.0))
        .with(zombie_ahead().riding(horse));

    tick(&configuration, &mut world);

    assert!(world.commands().contains(&WorldCommand::Dismount { passenger: ZOMBIE }));
    assert_eq!(world.entity(ZOMBIE).and_then(|z| z.vehicle), None);
}

#[test]
fn passenger_moves_with_root_vehicle() {
    let configuration = configuration();
    let horse = EntityId(3);
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        // The horse is out of reach but gallops towards the player.
        .with(
            WorldEntity::new(horse, EntityType::Horse)
                .at(0.0, 0.0, 10.0)
                .moving(DVec3::new(0.0, 0.0, -20.0)),
        )
        .with(zombie_ahead().riding(horse));

    tick(&configuration, &mut world);

    // relative = 0.5 - (-1.0) = 1.5, damage = 1 + floor(1.5 * 2)
    let hits = world.damage_taken(ZOMBIE);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].amount, 4.0);
}

#[test]
fn player_targets_receive_velocity_sync() {
    let configuration = configuration();
    let victim = EntityId(5);
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(WorldEntity::player(victim).at(0.0, 0.0, 2.0));

    tick(&configuration, &mut world);

    assert_eq!(world.damage_taken(victim).len(), 1);
    assert!(world.commands().contains(&WorldCommand::SyncVelocity { entity: victim }));
}

#[test]
fn creative_targets_are_not_affected() {
    let configuration = configuration();
    let victim = EntityId(5);
    let damage_only = KineticWeaponProfile {
        knockback: None,
        dismount: None,
        ..profile()
    };
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(damage_only), 5))
        .with(
            WorldEntity::player(victim)
                .at(0.0, 0.0, 2.0)
                .game_mode(GameMode::Creative),
        );

    tick(&configuration, &mut world);

    assert!(world.damage_taken(victim).is_empty());
    assert!(!world.commands().contains(&WorldCommand::Animation {
        entity: PLAYER,
        animation: Animation::SwingMainArm,
    }));
}

// ============================================================================
// Lunge
// ============================================================================

#[test]
fn lunge_costs_exhaustion_when_fed() {
    let configuration = configuration();
    let stack = spear_item(profile()).with_enchantment(Enchantment::Lunge, 2);
    let mut world = InMemoryWorld::new()
        .with(charging_player(stack, 5))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    assert!(world.commands().contains(&WorldCommand::Exhaustion {
        entity: PLAYER,
        amount: 8.0,
    }));
    assert!(world.sounds().contains(&SoundEvent::SpearLunge));
    // 6 after slowdown + 0.1 forward + 0.916 lunge, per tick scaled by 20.
    let attacker = world.velocity(PLAYER).expect("player");
    assert!((attacker.z - (6.0 + 2.0 + 0.916 * 20.0)).abs() < 1e-4);
}

#[test]
fn hungry_player_cannot_lunge() {
    let configuration = configuration();
    let stack = spear_item(profile()).with_enchantment(Enchantment::Lunge, 3);
    let mut world = InMemoryWorld::new()
        .with(charging_player(stack, 5).food(5))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    assert_eq!(world.damage_taken(ZOMBIE).len(), 1);
    assert!(
        !world
            .commands()
            .iter()
            .any(|c| matches!(c, WorldCommand::Exhaustion { .. }))
    );
}

// ============================================================================
// Use session lifecycle
// ============================================================================

#[test]
fn begin_use_plays_use_sound() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new().with(charging_player(spear_item(profile()), 0));

    configuration.dispatch(
        &CombatEvent::BeginItemUse {
            player: PLAYER,
            hand: Hand::Main,
        },
        &mut world,
    );

    assert_eq!(world.sounds(), vec![SoundEvent::SpearUse]);
}

#[test]
fn non_spear_items_are_ignored() {
    let configuration = configuration();
    let sword = ItemStack::new(Material::IronSword).with_kinetic(profile());
    let mut world = InMemoryWorld::new()
        .with(charging_player(sword, 5))
        .with(zombie_ahead());

    configuration.dispatch(
        &CombatEvent::BeginItemUse {
            player: PLAYER,
            hand: Hand::Main,
        },
        &mut world,
    );
    tick(&configuration, &mut world);

    assert!(world.commands().is_empty());
}

#[test]
fn spear_without_profile_is_inert() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(ItemStack::new(Material::WoodenSpear), 20))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    assert!(world.commands().is_empty());
}

#[test]
fn attacker_outside_world_skips_search() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5).outside_world())
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    assert!(world.commands().is_empty());
}

#[test]
fn cancel_clears_record_and_wears_spear() {
    let configuration = configuration();
    let spear = configuration.spear().expect("spear");
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());

    tick(&configuration, &mut world);
    assert!(spear.was_recently_stabbed(&world, PLAYER, ZOMBIE));

    configuration.dispatch(
        &CombatEvent::CancelItemUse {
            player: PLAYER,
            hand: Hand::Main,
            ticks_used: 5,
        },
        &mut world,
    );

    assert!(!spear.was_recently_stabbed(&world, PLAYER, ZOMBIE));
    assert!(world.commands().contains(&WorldCommand::DamageItem {
        entity: PLAYER,
        slot: EquipmentSlot::MainHand,
        amount: 1,
    }));
}

#[test]
fn instant_cancel_costs_no_durability() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new().with(charging_player(spear_item(profile()), 0));

    configuration.dispatch(
        &CombatEvent::CancelItemUse {
            player: PLAYER,
            hand: Hand::Main,
            ticks_used: 0,
        },
        &mut world,
    );

    assert!(world.commands().is_empty());
}

#[test]
fn creative_players_keep_durability() {
    let configuration = configuration();
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5).game_mode(GameMode::Creative));

    configuration.dispatch(
        &CombatEvent::CancelItemUse {
            player: PLAYER,
            hand: Hand::Main,
            ticks_used: 5,
        },
        &mut world,
    );

    assert!(world.commands().is_empty());
}

#[test]
fn finish_clears_record_without_wear() {
    let configuration = configuration();
    let spear = configuration.spear().expect("spear");
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());

    spear.remember_stabbed_entity(&world, PLAYER, ZOMBIE);
    configuration.dispatch(
        &CombatEvent::FinishItemUse {
            player: PLAYER,
            hand: Hand::Main,
        },
        &mut world,
    );

    assert_eq!(spear.stab_record(PLAYER).map(|r| r.len()), Some(0));
    assert!(world.commands().is_empty());
}

#[test]
fn stab_record_uses_attacker_clock() {
    let configuration = configuration();
    let spear = configuration.spear().expect("spear");
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    let record = spear.stab_record(PLAYER).expect("record created lazily");
    assert_eq!(record.last_stab(ZOMBIE), Some(Tick(100)));
}

#[test]
fn no_op_spear_ignores_everything() {
    let configuration = FeatureRegistry::vanilla()
        .select(&[FeatureKind::Spear])
        .replace(FeatureDefinition::no_op(FeatureKind::Spear))
        .build()
        .expect("builds");
    let mut world = InMemoryWorld::new()
        .with(charging_player(spear_item(profile()), 5))
        .with(zombie_ahead());

    tick(&configuration, &mut world);

    assert!(world.commands().is_empty());
    assert_eq!(
        world.entity(ZOMBIE).map(|z| z.position),
        Some(DVec3::new(0.0, 0.0, 2.0))
    );
}
