//! Mace smash attacks.
//!
//! A mace hit delivered while falling more than
//! [`CombatConfig::SMASH_ATTACK_FALL_THRESHOLD`] blocks is a smash: it gains
//! fall-scaled bonus damage, knocks back bystanders around the target, and
//! stops the attacker's fall.

use std::sync::Arc;

use combat_core::combat::smash;
use combat_core::enchantment::{density, wind_burst};
use combat_core::{
    Attribute, CombatConfig, DVec3, Damage, DamageType, Enchantment, EntityId, EntitySnapshot,
    Hand, SoundEvent, SoundSource, World,
};
use tracing::{debug, trace};

use super::{
    DamageAdapter, DamageFeature, FallFeature, FallStateAdapter, Feature, KnockbackAdapter,
    KnockbackFeature,
};
use crate::events::{CombatEvent, EventKind, EventNode};
use crate::feature::{FeatureConfiguration, FeatureDefinition, FeatureKind};

#[derive(Debug)]
pub enum MaceFeature {
    Vanilla(VanillaMace),
    /// Never smashes; mace hits are plain attacks handled elsewhere.
    NoOp,
}

#[derive(Debug)]
pub struct VanillaMace {
    config: CombatConfig,
    fall: Arc<FallFeature>,
    knockback: Arc<KnockbackFeature>,
    damage: Arc<DamageFeature>,
}

impl VanillaMace {
    pub fn new(
        config: CombatConfig,
        fall: Arc<FallFeature>,
        knockback: Arc<KnockbackFeature>,
        damage: Arc<DamageFeature>,
    ) -> Self {
        Self {
            config,
            fall,
            knockback,
            damage,
        }
    }

    fn can_smash_attack(&self, world: &dyn World, attacker: EntityId) -> bool {
        let gliding = world
            .entity(attacker)
            .is_some_and(|snapshot| snapshot.is_gliding());
        smash::can_smash(self.fall.fall_distance(attacker), gliding)
    }

    fn get_bonus_damage(&self, world: &dyn World, attacker: EntityId) -> f32 {
        if !self.can_smash_attack(world, attacker) {
            return 0.0;
        }
        smash::bonus_damage(self.fall.fall_distance(attacker))
    }

    fn apply_smash_attack_effects(&self, world: &mut dyn World, attacker: EntityId, target: EntityId) {
        if !self.can_smash_attack(&*world, attacker) {
            return;
        }
        let (Some(attacker), Some(target)) = (world.entity(attacker), world.entity(target)) else {
            return;
        };
        let fall_distance = self.fall.fall_distance(attacker.id);

        let target_grounded = target.is_living() && target.is_on_ground();
        if target_grounded {
            self.fall.set_extra_fall_particles(attacker.id, true);
        }
        world.play_sound(
            smash::impact_sound(fall_distance, target_grounded),
            SoundSource::for_entity(attacker.is_player()),
            attacker.id,
        );

        self.area_knockback(world, &attacker, &target, fall_distance);
    }

    /// Pushes every valid bystander within the smash radius of `target`.
    ///
    /// Each bystander's push depends only on its own position and resistance,
    /// so the result does not depend on enumeration order.
    fn area_knockback(
        &self,
        world: &mut dyn World,
        attacker: &EntitySnapshot,
        target: &EntitySnapshot,
        fall_distance: f64,
    ) -> usize {
        if !world.in_world(target.id) {
            return 0;
        }

        let radius = CombatConfig::SMASH_ATTACK_KNOCKBACK_RADIUS;
        let mut nearby = world.nearby_entities(target.position, radius + 1.0);
        nearby.sort_unstable();
        nearby.dedup();

        let mut pushed = 0;
        for id in nearby {
            let Some(bystander) = world.entity(id) else {
                continue;
            };
            if !smash::is_valid_knockback_target(attacker, target, &bystander) {
                continue;
            }

            let offset = bystander.position - target.position;
            let distance = offset.length();
            if distance > radius {
                continue;
            }

            let resistance = world.attribute_value(id, Attribute::KnockbackResistance);
            let power = smash::knockback_power(distance, fall_distance, resistance);
            if power <= 0.0 {
                trace!(target: "combat::mace", bystander = %id, "no knockback left");
                continue;
            }

            let delta = smash::knockback_delta(offset, power);
            self.knockback.apply_velocity_delta(world, id, delta);
            if bystander.is_player() {
                world.sync_velocity(id);
            }
            pushed += 1;
        }

        debug!(
            target: "combat::mace",
            attacker = %attacker.id,
            target = %target.id,
            fall_distance,
            pushed,
            "smash area knockback"
        );
        pushed
    }

    fn wind_burst(&self, world: &mut dyn World, attacker: EntityId, level: i32, fall_distance: f64) {
        if level <= 0 || !wind_burst::triggers(fall_distance) {
            return;
        }
        let lift = self.config.per_second(f64::from(wind_burst::knockback(level)));
        self.knockback
            .apply_velocity_delta(world, attacker, DVec3::new(0.0, lift, 0.0));
        world.play_sound(SoundEvent::WindBurst, SoundSource::Player, attacker);
        debug!(target: "combat::mace", %attacker, level, "wind burst");
    }

    fn post_smash_attack(&self, world: &mut dyn World, attacker: EntityId) {
        if !self.can_smash_attack(&*world, attacker) {
            return;
        }
        let Some(snapshot) = world.entity(attacker) else {
            return;
        };

        let min_rise = self.config.per_second(CombatConfig::SMASH_ATTACK_MIN_RISE);
        let mut velocity = snapshot.velocity;
        velocity.y = velocity.y.max(min_rise);
        world.set_velocity(attacker, velocity);
        if snapshot.is_player() {
            world.sync_velocity(attacker);
        }

        self.fall.reset_fall_distance(attacker);
    }

    fn on_smash_attack(&self, world: &mut dyn World, attacker: EntityId, target: EntityId) -> bool {
        let Some(stack) = world
            .held_item(attacker, Hand::Main)
            .filter(|stack| stack.is_mace())
        else {
            return false;
        };
        let Some(snapshot) = world.entity(attacker) else {
            return false;
        };

        let smashing = self.can_smash_attack(&*world, attacker);
        let fall_distance = self.fall.fall_distance(attacker);
        let mut amount = world.attribute_value(attacker, Attribute::AttackDamage) as f32;
        if smashing {
            amount += self.get_bonus_damage(&*world, attacker);
            amount += density::bonus_damage(
                stack.enchantment_level(Enchantment::Density),
                fall_distance,
            );
        }

        let hit = Damage::new(
            DamageType::attack(snapshot.is_player()),
            Some(attacker),
            amount,
        );
        let landed = self.damage.apply_damage(world, target, hit);
        debug!(
            target: "combat::mace",
            %attacker,
            %target,
            amount,
            fall_distance,
            smashing,
            landed,
            "mace hit"
        );

        if landed && smashing {
            self.apply_smash_attack_effects(world, attacker, target);
            self.wind_burst(
                world,
                attacker,
                stack.enchantment_level(Enchantment::WindBurst),
                fall_distance,
            );
            self.post_smash_attack(world, attacker);
        }
        landed
    }
}

impl MaceFeature {
    pub(super) fn variant_name(&self) -> &'static str {
        match self {
            Self::Vanilla(_) => "vanilla",
            Self::NoOp => "no_op",
        }
    }

    /// Resolves a mace hit: damage first, then (for a landed smash) area
    /// knockback, Wind Burst and fall arrest. Returns whether damage landed.
    pub fn on_smash_attack(&self, world: &mut dyn World, attacker: EntityId, target: EntityId) -> bool {
        match self {
            Self::Vanilla(vanilla) => vanilla.on_smash_attack(world, attacker, target),
            Self::NoOp => false,
        }
    }

    pub fn can_smash_attack(&self, world: &dyn World, attacker: EntityId) -> bool {
        match self {
            Self::Vanilla(vanilla) => vanilla.can_smash_attack(world, attacker),
            Self::NoOp => false,
        }
    }

    pub fn get_bonus_damage(&self, world: &dyn World, attacker: EntityId) -> f32 {
        match self {
            Self::Vanilla(vanilla) => vanilla.get_bonus_damage(world, attacker),
            Self::NoOp => 0.0,
        }
    }

    pub fn apply_smash_attack_effects(&self, world: &mut dyn World, attacker: EntityId, target: EntityId) {
        if let Self::Vanilla(vanilla) = self {
            vanilla.apply_smash_attack_effects(world, attacker, target);
        }
    }

    pub fn post_smash_attack(&self, world: &mut dyn World, attacker: EntityId) {
        if let Self::Vanilla(vanilla) = self {
            vanilla.post_smash_attack(world, attacker);
        }
    }
}

pub(super) fn init(feature: &Arc<MaceFeature>, node: &mut EventNode) {
    if matches!(**feature, MaceFeature::NoOp) {
        return;
    }

    let mace = Arc::clone(feature);
    node.add_listener(EventKind::EntityAttack, move |event, world| {
        if let CombatEvent::EntityAttack { attacker, target } = *event {
            mace.on_smash_attack(world, attacker, target);
        }
    });
}

pub(super) fn definition() -> FeatureDefinition {
    FeatureDefinition::new(FeatureKind::Mace, construct).depends_on([
        FeatureKind::Fall,
        FeatureKind::Knockback,
        FeatureKind::Damage,
    ])
}

fn construct(configuration: &FeatureConfiguration) -> crate::Result<Feature> {
    let vanilla = VanillaMace::new(
        configuration.config().clone(),
        configuration.fall()?,
        configuration.knockback()?,
        configuration.damage()?,
    );
    Ok(Feature::Mace(Arc::new(MaceFeature::Vanilla(vanilla))))
}
