//! Kinetic spear stabs.
//!
//! While a player holds a spear in use, every tick past the weapon's wind-up
//! evaluates the living entities in reach. Each attacker keeps a
//! [`StabRecord`] of when it last stabbed each target so the same pair only
//! connects once per contact cooldown; the record is cleared when the use
//! session ends.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use combat_core::combat::kinetic;
use combat_core::enchantment::lunge;
use combat_core::{
    Animation, Attribute, CombatConfig, DVec3, Damage, DamageType, Enchantment, EntityId,
    EntitySnapshot, Hand, ItemAnimation, ItemStack, SoundEvent, SoundSource, SpearPhase,
    StabConditions, Tick, World,
};
use tracing::{debug, trace};

use super::{
    DamageAdapter, DamageFeature, Feature, ItemDamageFeature, KnockbackAdapter, KnockbackFeature,
};
use crate::events::{CombatEvent, EventKind, EventNode};
use crate::feature::{FeatureConfiguration, FeatureDefinition, FeatureKind};

/// Upper bound on vehicle chains walked when resolving a passenger's motion.
const MAX_VEHICLE_DEPTH: usize = 16;

/// When an attacker last stabbed each target, in the attacker's alive ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StabRecord {
    stabbed: HashMap<EntityId, Tick>,
}

impl StabRecord {
    pub fn last_stab(&self, target: EntityId) -> Option<Tick> {
        self.stabbed.get(&target).copied()
    }

    pub fn len(&self) -> usize {
        self.stabbed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stabbed.is_empty()
    }
}

#[derive(Debug)]
pub enum SpearFeature {
    Vanilla(VanillaSpear),
    NoOp,
}

#[derive(Debug)]
pub struct VanillaSpear {
    config: CombatConfig,
    damage: Arc<DamageFeature>,
    knockback: Arc<KnockbackFeature>,
    item_damage: Arc<ItemDamageFeature>,
    records: Mutex<HashMap<EntityId, StabRecord>>,
}

impl VanillaSpear {
    pub fn new(
        config: CombatConfig,
        damage: Arc<DamageFeature>,
        knockback: Arc<KnockbackFeature>,
        item_damage: Arc<ItemDamageFeature>,
    ) -> Self {
        Self {
            config,
            damage,
            knockback,
            item_damage,
            records: Mutex::new(HashMap::new()),
        }
    }

    fn records(&self) -> MutexGuard<'_, HashMap<EntityId, StabRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Per-tick motion of an entity. Non-player passengers move with their
    /// root vehicle.
    fn motion(&self, world: &dyn World, entity: &EntitySnapshot) -> DVec3 {
        let mut velocity = entity.velocity;
        if !entity.is_player() {
            let mut vehicle = entity.vehicle;
            for _ in 0..MAX_VEHICLE_DEPTH {
                let Some(snapshot) = vehicle.and_then(|id| world.entity(id)) else {
                    break;
                };
                velocity = snapshot.velocity;
                vehicle = snapshot.vehicle;
            }
        }
        velocity / f64::from(self.config.tick_rate)
    }

    fn add_velocity(&self, world: &mut dyn World, entity: EntityId, per_tick: DVec3) {
        if let Some(snapshot) = world.entity(entity) {
            let delta = per_tick * f64::from(self.config.tick_rate);
            world.set_velocity(entity, snapshot.velocity + delta);
        }
    }

    fn handle_spear_tick(
        &self,
        world: &mut dyn World,
        player: EntityId,
        stack: &ItemStack,
        ticks_used: u64,
    ) -> usize {
        let Some(profile) = stack.kinetic.as_ref() else {
            return 0;
        };
        let SpearPhase::Active { ticks_after_delay } =
            SpearPhase::of(Some(ticks_used), profile.delay_ticks)
        else {
            return 0;
        };
        let Some(attacker) = world.entity(player) else {
            return 0;
        };
        if !world.in_world(player) {
            trace!(target: "combat::spear", %player, "attacker outside any world, skipping search");
            return 0;
        }

        let look = attacker.look_direction();
        let attacker_motion = self.motion(&*world, &attacker);
        let attacker_speed = look.dot(attacker_motion);
        let base_damage = world.attribute_value(player, Attribute::AttackDamage);
        let range = world.attribute_value(player, Attribute::EntityInteractionRange);
        let eye = attacker.eye_position();

        let mut affected = 0;
        for id in world.nearby_entities(attacker.position, range + 1.0) {
            if id == player {
                continue;
            }
            let Some(target) = world.entity(id) else {
                continue;
            };
            if !target.is_living() || target.is_gone() {
                continue;
            }
            if eye.distance_squared(target.bounding_box_center()) > range * range {
                continue;
            }
            if self.was_recently_stabbed(&*world, player, id) {
                trace!(target: "combat::spear", %player, target = %id, "contact cooldown");
                continue;
            }
            self.remember(player, id, attacker.alive_ticks);

            let relative_speed =
                kinetic::relative_speed(look, attacker_motion, self.motion(&*world, &target));
            let conditions = profile.evaluate(ticks_after_delay, attacker_speed, relative_speed);
            if !conditions.any() {
                trace!(
                    target: "combat::spear",
                    %player,
                    target = %id,
                    attacker_speed,
                    relative_speed,
                    "no condition met"
                );
                continue;
            }

            let damage = profile.stab_damage(relative_speed, base_damage);
            if self.perform_stab(world, &attacker, &target, damage, conditions) {
                affected += 1;
                if let Some(sound) = profile.hit_sound {
                    world.play_sound(sound, SoundSource::for_entity(attacker.is_player()), player);
                }
                debug!(
                    target: "combat::spear",
                    %player,
                    target = %id,
                    damage,
                    relative_speed,
                    ?conditions,
                    "stab"
                );
            }
        }

        if affected > 0 {
            if profile.forward_movement > 0.0 {
                self.add_velocity(world, player, look * f64::from(profile.forward_movement));
            }
            self.lunge(world, player, stack, look);
            let swing = match attacker.item_use.map(|item_use| item_use.hand) {
                Some(Hand::Off) => Animation::SwingOffHand,
                _ => Animation::SwingMainArm,
            };
            world.broadcast_animation(player, swing);
        }
        affected
    }

    fn perform_stab(
        &self,
        world: &mut dyn World,
        attacker: &EntitySnapshot,
        target: &EntitySnapshot,
        damage: f32,
        conditions: StabConditions,
    ) -> bool {
        let mut affected = false;

        if conditions.dismount && target.vehicle.is_some() {
            world.dismount(target.id);
            affected = true;
        }

        // Knockback never follows a rejected hit, only a landed one or a
        // stab that did not ask for damage at all.
        if conditions.damage && damage > 0.0 {
            let hit = Damage::new(
                DamageType::attack(attacker.is_player()),
                Some(attacker.id),
                damage,
            );
            if self.damage.apply_damage(world, target.id, hit) {
                affected = true;
                if conditions.knockback {
                    self.knockback
                        .apply_attack_knockback(world, attacker.id, target.id, 1.0);
                }
            }
        } else if conditions.knockback && !conditions.damage {
            self.knockback
                .apply_attack_knockback(world, attacker.id, target.id, 1.0);
            affected = true;
        }

        if affected && target.is_player() {
            world.sync_velocity(target.id);
        }
        affected
    }

    fn lunge(&self, world: &mut dyn World, player: EntityId, stack: &ItemStack, look: DVec3) {
        let level = stack.enchantment_level(Enchantment::Lunge);
        if level <= 0 || !lunge::can_lunge(world.food_level(player)) {
            return;
        }
        self.add_velocity(world, player, look * f64::from(lunge::impulse(level)));
        world.add_exhaustion(player, lunge::exhaustion_cost(level));
        world.play_sound(SoundEvent::SpearLunge, SoundSource::Player, player);
        debug!(target: "combat::spear", %player, level, "lunge");
    }

    fn remember(&self, attacker: EntityId, target: EntityId, now: Tick) {
        self.records()
            .entry(attacker)
            .or_default()
            .stabbed
            .insert(target, now);
    }

    fn was_recently_stabbed(&self, world: &dyn World, attacker: EntityId, target: EntityId) -> bool {
        let Some(last) = self
            .records()
            .get(&attacker)
            .and_then(|record| record.last_stab(target))
        else {
            return false;
        };
        let Some(snapshot) = world.entity(attacker) else {
            return false;
        };
        // Cooldown comes from whatever is in the main hand now.
        let cooldown = world
            .kinetic_profile(attacker, Hand::Main)
            .map_or(CombatConfig::DEFAULT_CONTACT_COOLDOWN_TICKS, |profile| {
                profile.contact_cooldown()
            });
        snapshot.alive_ticks.since(last) < u64::from(cooldown)
    }
}

impl SpearFeature {
    pub(super) fn variant_name(&self) -> &'static str {
        match self {
            Self::Vanilla(_) => "vanilla",
            Self::NoOp => "no_op",
        }
    }

    /// Runs the spear for one tick of `player`'s current item use.
    pub fn on_tick(&self, world: &mut dyn World, player: EntityId) {
        let Self::Vanilla(_) = self else {
            return;
        };
        let Some(item_use) = world.entity(player).and_then(|snapshot| snapshot.item_use) else {
            return;
        };
        let Some(stack) = world.held_item(player, item_use.hand) else {
            return;
        };
        if !stack.is_spear() || stack.kinetic.is_none() {
            return;
        }
        self.handle_spear_tick(world, player, &stack, item_use.ticks);
    }

    /// Plays the weapon's use sound when a spear charge starts.
    pub fn on_begin_use(&self, world: &mut dyn World, player: EntityId, hand: Hand) {
        let Self::Vanilla(_) = self else {
            return;
        };
        let Some(stack) = world.held_item(player, hand) else {
            return;
        };
        if stack.material.use_animation() != ItemAnimation::Spear {
            return;
        }
        if let Some(sound) = stack.kinetic.and_then(|profile| profile.use_sound) {
            world.play_sound(sound, SoundSource::Player, player);
        }
    }

    /// Ends the session early; costs one durability if it lasted a tick.
    pub fn on_cancel_use(&self, world: &mut dyn World, player: EntityId, hand: Hand, ticks_used: u64) {
        let Self::Vanilla(vanilla) = self else {
            return;
        };
        if !world.held_item(player, hand).is_some_and(|stack| stack.is_spear()) {
            return;
        }
        self.clear_stabbed_entities(player);
        if ticks_used > 0 {
            vanilla
                .item_damage
                .damage_equipment(world, player, hand.into(), 1);
        }
    }

    pub fn on_finish_use(&self, world: &mut dyn World, player: EntityId, hand: Hand) {
        if world.held_item(player, hand).is_some_and(|stack| stack.is_spear()) {
            self.clear_stabbed_entities(player);
        }
    }

    /// Evaluates targets for one active tick. Returns how many were affected.
    pub fn handle_spear_tick(
        &self,
        world: &mut dyn World,
        player: EntityId,
        stack: &ItemStack,
        ticks_used: u64,
    ) -> usize {
        match self {
            Self::Vanilla(vanilla) => vanilla.handle_spear_tick(world, player, stack, ticks_used),
            Self::NoOp => 0,
        }
    }

    /// Whether `attacker` stabbed `target` within the contact cooldown.
    pub fn was_recently_stabbed(&self, world: &dyn World, attacker: EntityId, target: EntityId) -> bool {
        match self {
            Self::Vanilla(vanilla) => vanilla.was_recently_stabbed(world, attacker, target),
            Self::NoOp => false,
        }
    }

    /// Stamps `target` with the attacker's current alive ticks.
    pub fn remember_stabbed_entity(&self, world: &dyn World, attacker: EntityId, target: EntityId) {
        if let Self::Vanilla(vanilla) = self {
            if let Some(snapshot) = world.entity(attacker) {
                vanilla.remember(attacker, target, snapshot.alive_ticks);
            }
        }
    }

    pub fn clear_stabbed_entities(&self, attacker: EntityId) {
        if let Self::Vanilla(vanilla) = self {
            if let Some(record) = vanilla.records().get_mut(&attacker) {
                record.stabbed.clear();
            }
        }
    }

    /// Copy of the attacker's record, if one exists.
    pub fn stab_record(&self, attacker: EntityId) -> Option<StabRecord> {
        match self {
            Self::Vanilla(vanilla) => vanilla.records().get(&attacker).cloned(),
            Self::NoOp => None,
        }
    }

    pub fn forget(&self, entity: EntityId) {
        if let Self::Vanilla(vanilla) = self {
            vanilla.records().remove(&entity);
        }
    }
}

fn post_init(feature: &Feature, world: &dyn World, entity: EntityId) {
    let Feature::Spear(spear) = feature else {
        return;
    };
    let SpearFeature::Vanilla(vanilla) = spear.as_ref() else {
        return;
    };
    if world.entity(entity).is_some_and(|snapshot| snapshot.is_player()) {
        vanilla.records().insert(entity, StabRecord::default());
    }
}

pub(super) fn init(feature: &Arc<SpearFeature>, node: &mut EventNode) {
    if matches!(**feature, SpearFeature::NoOp) {
        return;
    }

    let spear = Arc::clone(feature);
    node.add_listener(EventKind::BeginItemUse, move |event, world| {
        if let CombatEvent::BeginItemUse { player, hand } = *event {
            spear.on_begin_use(world, player, hand);
        }
    });

    let spear = Arc::clone(feature);
    node.add_listener(EventKind::PlayerTick, move |event, world| {
        if let CombatEvent::PlayerTick { player } = *event {
            spear.on_tick(world, player);
        }
    });

    let spear = Arc::clone(feature);
    node.add_listener(EventKind::CancelItemUse, move |event, world| {
        if let CombatEvent::CancelItemUse {
            player,
            hand,
            ticks_used,
        } = *event
        {
            spear.on_cancel_use(world, player, hand, ticks_used);
        }
    });

    let spear = Arc::clone(feature);
    node.add_listener(EventKind::FinishItemUse, move |event, world| {
        if let CombatEvent::FinishItemUse { player, hand } = *event {
            spear.on_finish_use(world, player, hand);
        }
    });

    let spear = Arc::clone(feature);
    node.add_listener(EventKind::EntityRemoved, move |event, _| {
        if let CombatEvent::EntityRemoved { entity } = *event {
            spear.forget(entity);
        }
    });
}

pub(super) fn definition() -> FeatureDefinition {
    FeatureDefinition::new(FeatureKind::Spear, construct)
        .depends_on([
            FeatureKind::ItemDamage,
            FeatureKind::Knockback,
            FeatureKind::Damage,
        ])
        .with_post_init(post_init)
}

fn construct(configuration: &FeatureConfiguration) -> crate::Result<Feature> {
    let vanilla = VanillaSpear::new(
        configuration.config().clone(),
        configuration.damage()?,
        configuration.knockback()?,
        configuration.item_damage()?,
    );
    Ok(Feature::Spear(Arc::new(SpearFeature::Vanilla(vanilla))))
}
