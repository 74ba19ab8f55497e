//! Kinetic (channel-held) weapon formulas.
//!
//! A kinetic weapon deals damage while it is held in use. Damage, knockback
//! and dismount are each gated by a [`Condition`] over how long the weapon has
//! been active and how fast the attacker moves relative to the target along the
//! attacker's look direction.

use glam::DVec3;

use crate::config::CombatConfig;
use crate::env::SoundEvent;

/// Three-clause threshold test gating one kinetic effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    /// Ticks after the wind-up during which the effect can still trigger.
    pub max_duration_ticks: u32,
    /// Minimum attacker speed along its look direction, blocks per tick.
    pub min_speed: f64,
    /// Minimum attacker-minus-target speed along the look direction.
    pub min_relative_speed: f64,
}

impl Condition {
    pub const fn new(max_duration_ticks: u32, min_speed: f64, min_relative_speed: f64) -> Self {
        Self {
            max_duration_ticks,
            min_speed,
            min_relative_speed,
        }
    }

    pub fn test(&self, ticks_after_delay: u64, attacker_speed: f64, relative_speed: f64) -> bool {
        ticks_after_delay <= u64::from(self.max_duration_ticks)
            && attacker_speed >= self.min_speed
            && relative_speed >= self.min_relative_speed
    }
}

/// Kinetic weapon component of a held item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KineticWeaponProfile {
    /// Wind-up ticks before the weapon starts evaluating targets.
    pub delay_ticks: u32,
    /// Per-target cooldown; [`CombatConfig::DEFAULT_CONTACT_COOLDOWN_TICKS`] when absent.
    pub contact_cooldown_ticks: Option<u32>,
    pub damage_multiplier: f32,
    /// Forward boost applied to the attacker after a hit, blocks per tick.
    pub forward_movement: f32,
    pub dismount: Option<Condition>,
    pub knockback: Option<Condition>,
    pub damage: Option<Condition>,
    pub hit_sound: Option<SoundEvent>,
    pub use_sound: Option<SoundEvent>,
}

impl KineticWeaponProfile {
    pub fn contact_cooldown(&self) -> u32 {
        self.contact_cooldown_ticks
            .unwrap_or(CombatConfig::DEFAULT_CONTACT_COOLDOWN_TICKS)
    }

    /// Evaluates the three effect conditions. Absent conditions never hold.
    pub fn evaluate(
        &self,
        ticks_after_delay: u64,
        attacker_speed: f64,
        relative_speed: f64,
    ) -> StabConditions {
        let test = |condition: &Option<Condition>| {
            condition
                .as_ref()
                .is_some_and(|c| c.test(ticks_after_delay, attacker_speed, relative_speed))
        };
        StabConditions {
            dismount: test(&self.dismount),
            knockback: test(&self.knockback),
            damage: test(&self.damage),
        }
    }

    /// Stab damage: `floor(relative_speed * damage_multiplier) + base_damage`.
    pub fn stab_damage(&self, relative_speed: f64, base_damage: f64) -> f32 {
        base_damage as f32 + (relative_speed * f64::from(self.damage_multiplier)).floor() as f32
    }
}

impl Default for KineticWeaponProfile {
    fn default() -> Self {
        Self {
            delay_ticks: 0,
            contact_cooldown_ticks: None,
            damage_multiplier: 1.0,
            forward_movement: 0.0,
            dismount: None,
            knockback: None,
            damage: None,
            hit_sound: None,
            use_sound: None,
        }
    }
}

/// Which kinetic effects hold for one target on one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StabConditions {
    pub dismount: bool,
    pub knockback: bool,
    pub damage: bool,
}

impl StabConditions {
    pub fn any(&self) -> bool {
        self.dismount || self.knockback || self.damage
    }
}

/// Phase of a weapon-use session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpearPhase {
    /// Not using the item.
    Idle,
    /// Using, but the wind-up delay has not elapsed.
    WindingUp { remaining: u64 },
    /// Evaluating targets; `ticks_after_delay` counts from the end of wind-up.
    Active { ticks_after_delay: u64 },
}

impl SpearPhase {
    pub fn of(ticks_used: Option<u64>, delay_ticks: u32) -> Self {
        let Some(ticks) = ticks_used else {
            return Self::Idle;
        };
        let delay = u64::from(delay_ticks);
        if ticks < delay {
            Self::WindingUp {
                remaining: delay - ticks,
            }
        } else {
            Self::Active {
                ticks_after_delay: ticks - delay,
            }
        }
    }
}

/// Attacker speed minus target speed along `look`, clamped at zero.
pub fn relative_speed(look: DVec3, attacker_motion: DVec3, target_motion: DVec3) -> f64 {
    (look.dot(attacker_motion) - look.dot(target_motion)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> KineticWeaponProfile {
        KineticWeaponProfile {
            delay_ticks: 5,
            damage_multiplier: 4.0,
            damage: Some(Condition::new(20, 0.2, 0.3)),
            knockback: Some(Condition::new(10, 0.5, 0.5)),
            ..Default::default()
        }
    }

    #[test]
    fn relative_speed_never_negative() {
        let look = DVec3::Z;
        let slow = DVec3::new(0.0, 0.0, 0.1);
        let fast = DVec3::new(0.0, 0.0, 0.9);
        assert_eq!(relative_speed(look, slow, fast), 0.0);
        assert!((relative_speed(look, fast, slow) - 0.8).abs() < 1e-12);
        // Target running straight at the attacker adds to the closing speed.
        assert!((relative_speed(look, slow, -slow) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn conditions_are_independent() {
        let conditions = profile().evaluate(3, 0.4, 0.4);
        assert!(conditions.damage);
        assert!(!conditions.knockback);
        assert!(!conditions.dismount);
        assert!(conditions.any());
    }

    #[test]
    fn condition_expires_after_max_duration() {
        let condition = Condition::new(10, 0.0, 0.0);
        assert!(condition.test(10, 0.0, 0.0));
        assert!(!condition.test(11, 0.0, 0.0));
    }

    #[test]
    fn missing_conditions_never_hold() {
        let empty = KineticWeaponProfile::default();
        assert!(!empty.evaluate(0, 100.0, 100.0).any());
    }

    #[test]
    fn stab_damage_floors_speed_term() {
        // floor(0.6 * 4.0) + 2.0 = 2 + 2
        assert_eq!(profile().stab_damage(0.6, 2.0), 4.0);
        assert_eq!(profile().stab_damage(0.0, 1.0), 1.0);
    }

    #[test]
    fn phase_transitions() {
        assert_eq!(SpearPhase::of(None, 5), SpearPhase::Idle);
        assert_eq!(
            SpearPhase::of(Some(2), 5),
            SpearPhase::WindingUp { remaining: 3 }
        );
        assert_eq!(
            SpearPhase::of(Some(5), 5),
            SpearPhase::Active {
                ticks_after_delay: 0
            }
        );
    }

    #[test]
    fn default_contact_cooldown() {
        assert_eq!(profile().contact_cooldown(), 10);
        let custom = KineticWeaponProfile {
            contact_cooldown_ticks: Some(4),
            ..profile()
        };
        assert_eq!(custom.contact_cooldown(), 4);
    }
}
