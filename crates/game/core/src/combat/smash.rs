//! Mace smash attack formulas.
//!
//! A smash attack is a melee hit delivered while falling. Its bonus damage
//! grows with fall distance in three linear tiers, and it knocks back every
//! valid entity within [`CombatConfig::SMASH_ATTACK_KNOCKBACK_RADIUS`] of the
//! struck target, attenuated by distance.

use glam::DVec3;

use crate::config::CombatConfig;
use crate::env::SoundEvent;
use crate::state::EntitySnapshot;

/// Fall-distance tier of a smash attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmashTier {
    /// `d <= 3`: 4 damage per block.
    Light,
    /// `3 < d <= 8`: 2 damage per block above 3.
    Medium,
    /// `d > 8`: 1 damage per block above 8.
    Heavy,
}

impl SmashTier {
    pub fn of(fall_distance: f64) -> Self {
        if fall_distance <= 3.0 {
            Self::Light
        } else if fall_distance <= 8.0 {
            Self::Medium
        } else {
            Self::Heavy
        }
    }
}

/// Fall distance must exceed the threshold and the attacker must not be gliding.
pub fn can_smash(fall_distance: f64, gliding: bool) -> bool {
    fall_distance > CombatConfig::SMASH_ATTACK_FALL_THRESHOLD && !gliding
}

/// Tiered bonus damage for an eligible smash.
///
/// # Formula
///
/// ```text
/// d <= 3      : 4d
/// 3 < d <= 8  : 12 + 2(d - 3)
/// d > 8       : 22 + (d - 8)
/// ```
///
/// The tiers meet at 12 (d = 3) and 22 (d = 8).
pub fn bonus_damage(fall_distance: f64) -> f32 {
    let d = fall_distance;
    let damage = match SmashTier::of(d) {
        SmashTier::Light => 4.0 * d,
        SmashTier::Medium => 12.0 + 2.0 * (d - 3.0),
        SmashTier::Heavy => 22.0 + (d - 8.0),
    };
    damage as f32
}

pub fn is_heavy(fall_distance: f64) -> bool {
    fall_distance > CombatConfig::SMASH_ATTACK_HEAVY_THRESHOLD
}

/// Feedback sound for a smash against a target that is or isn't grounded.
pub fn impact_sound(fall_distance: f64, target_on_ground: bool) -> SoundEvent {
    match (target_on_ground, is_heavy(fall_distance)) {
        (true, true) => SoundEvent::MaceSmashGroundHeavy,
        (true, false) => SoundEvent::MaceSmashGround,
        (false, _) => SoundEvent::MaceSmashAir,
    }
}

/// Knockback power for an entity `distance` blocks from the struck target.
///
/// # Formula
///
/// ```text
/// (3.5 - distance) * 0.7 * (heavy ? 2 : 1) * (1 - knockback_resistance)
/// ```
pub fn knockback_power(distance: f64, fall_distance: f64, knockback_resistance: f64) -> f64 {
    let heavy_multiplier = if is_heavy(fall_distance) { 2.0 } else { 1.0 };
    (CombatConfig::SMASH_ATTACK_KNOCKBACK_RADIUS - distance)
        * CombatConfig::SMASH_ATTACK_KNOCKBACK_POWER
        * heavy_multiplier
        * (1.0 - knockback_resistance)
}

/// Velocity delta pushing an entity away from the struck target.
///
/// Horizontal components come from the normalized offset scaled by `power`;
/// the vertical component is the fixed knockback power.
pub fn knockback_delta(offset: DVec3, power: f64) -> DVec3 {
    let push = offset.normalize_or_zero() * power;
    DVec3::new(push.x, CombatConfig::SMASH_ATTACK_KNOCKBACK_POWER, push.z)
}

/// Whether `nearby` may be pushed by a smash from `attacker` on `target`.
///
/// Excludes the attacker, the primary target, spectators, creative players in
/// flight, and armor stands.
pub fn is_valid_knockback_target(
    attacker: &EntitySnapshot,
    target: &EntitySnapshot,
    nearby: &EntitySnapshot,
) -> bool {
    if nearby.id == attacker.id || nearby.id == target.id {
        return false;
    }
    if !nearby.is_living() || nearby.is_gone() {
        return false;
    }
    if nearby.is_spectator() || nearby.is_creative_flying() {
        return false;
    }
    nearby.entity_type != crate::state::EntityType::ArmorStand
}
