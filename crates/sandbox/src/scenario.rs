//! Scripted encounters run against an in-memory world.
use combat_core::{
    Condition, DVec3, Enchantment, EntityId, Hand, ItemStack, ItemUse, KineticWeaponProfile,
    Material, SoundEvent,
};
use combat_runtime::{
    CombatEvent, FallStateAdapter, FeatureConfiguration, InMemoryWorld, WorldEntity,
};
use tracing::info;

const PLAYER: EntityId = EntityId(1);

/// Outcome of one scripted encounter.
#[derive(Clone, Debug, Default)]
pub struct Report {
    pub hits: usize,
    pub total_damage: f32,
    pub pushed: usize,
    pub sounds: Vec<SoundEvent>,
}

impl Report {
    fn from_world(world: &InMemoryWorld, targets: &[EntityId]) -> Self {
        let mut report = Self {
            sounds: world.sounds(),
            ..Self::default()
        };
        for target in targets {
            for damage in world.damage_taken(*target) {
                report.hits += 1;
                report.total_damage += damage.amount;
            }
        }
        report.pushed = world
            .moved_entities()
            .iter()
            .filter(|id| targets.contains(*id))
            .count();
        report
    }
}

fn iron_spear() -> ItemStack {
    let profile = KineticWeaponProfile {
        delay_ticks: 5,
        contact_cooldown_ticks: Some(10),
        damage_multiplier: 0.95,
        forward_movement: 0.38,
        dismount: Some(Condition::new(70, 0.5, 0.0)),
        knockback: Some(Condition::new(150, 0.1, 0.0)),
        damage: Some(Condition::new(300, 0.0, 0.1)),
        hit_sound: Some(SoundEvent::SpearHit),
        use_sound: Some(SoundEvent::SpearUse),
    };
    ItemStack::new(Material::IronSpear)
        .with_kinetic(profile)
        .with_enchantment(Enchantment::Lunge, 1)
}

/// A sprinting player holds a spear charge through a line of zombies.
pub fn spear_charge(configuration: &FeatureConfiguration, ticks: u64) -> Report {
    let tick_rate = f64::from(configuration.config().tick_rate);
    let velocity = DVec3::new(0.0, 0.0, 8.0);
    let targets: Vec<EntityId> = (10..14).map(EntityId).collect();

    let mut world = InMemoryWorld::new().with(
        WorldEntity::player(PLAYER)
            .facing(0.0, 0.0)
            .moving(velocity)
            .holding(Hand::Main, iron_spear())
            .alive_for(200),
    );
    for (offset, id) in targets.iter().enumerate() {
        world.spawn(WorldEntity::zombie(*id).at(0.0, 0.0, 2.0 + 2.5 * offset as f64));
    }
    for id in std::iter::once(PLAYER).chain(targets.iter().copied()) {
        configuration.dispatch(&CombatEvent::EntitySpawn { entity: id }, &mut world);
    }

    configuration.dispatch(
        &CombatEvent::BeginItemUse {
            player: PLAYER,
            hand: Hand::Main,
        },
        &mut world,
    );
    world.set_item_use(
        PLAYER,
        Some(ItemUse {
            hand: Hand::Main,
            ticks: 0,
        }),
    );

    for _ in 0..ticks {
        configuration.dispatch(&CombatEvent::PlayerTick { player: PLAYER }, &mut world);

        let Some(player) = world.get(PLAYER).map(WorldEntity::snapshot) else {
            break;
        };
        world.set_position(PLAYER, player.position + player.velocity / tick_rate);
        world.advance_ticks(1);
    }

    configuration.dispatch(
        &CombatEvent::CancelItemUse {
            player: PLAYER,
            hand: Hand::Main,
            ticks_used: ticks,
        },
        &mut world,
    );

    let report = Report::from_world(&world, &targets);
    info!(
        hits = report.hits,
        total_damage = report.total_damage,
        pushed = report.pushed,
        sounds = ?report.sounds,
        "spear charge finished"
    );
    report
}

/// A player drops onto a zombie pack with a Wind Burst mace.
pub fn mace_smash(configuration: &FeatureConfiguration, fall_distance: f64) -> Report {
    let target = EntityId(20);
    let bystanders: Vec<EntityId> = (21..25).map(EntityId).collect();
    let mace = ItemStack::new(Material::Mace)
        .with_enchantment(Enchantment::Density, 1)
        .with_enchantment(Enchantment::WindBurst, 1);

    let mut world = InMemoryWorld::new()
        .with(
            WorldEntity::player(PLAYER)
                .at(0.0, 1.0, -0.5)
                .moving(DVec3::new(0.0, -15.0, 0.0))
                .airborne()
                .holding(Hand::Main, mace),
        )
        .with(WorldEntity::zombie(target));
    for (index, id) in bystanders.iter().enumerate() {
        let angle = index as f64 * std::f64::consts::FRAC_PI_2;
        let distance = 1.0 + index as f64;
        let (x, z) = (angle.cos() * distance, angle.sin() * distance);
        world.spawn(WorldEntity::zombie(*id).at(x, 0.0, z));
    }

    if let Ok(fall) = configuration.fall() {
        fall.set_fall_distance(PLAYER, fall_distance);
    }
    configuration.dispatch(
        &CombatEvent::EntityAttack {
            attacker: PLAYER,
            target,
        },
        &mut world,
    );

    let mut everyone = bystanders.clone();
    everyone.push(target);
    let report = Report::from_world(&world, &everyone);
    let remaining_fall = configuration
        .fall()
        .map(|fall| fall.fall_distance(PLAYER))
        .unwrap_or_default();
    info!(
        fall_distance,
        hits = report.hits,
        total_damage = report.total_damage,
        pushed = report.pushed,
        remaining_fall,
        sounds = ?report.sounds,
        attacker_velocity = ?world.velocity(PLAYER),
        "mace smash finished"
    );
    report
}
