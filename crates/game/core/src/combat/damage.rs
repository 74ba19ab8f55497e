//! Damage descriptors and armor reduction.

use crate::enchantment::breach;
use crate::state::EntityId;

/// Cause of a damage event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    PlayerAttack,
    MobAttack,
    Fall,
    Generic,
}

impl DamageType {
    /// Attack damage type for the given attacker.
    pub fn attack(attacker_is_player: bool) -> Self {
        if attacker_is_player {
            Self::PlayerAttack
        } else {
            Self::MobAttack
        }
    }

    /// Armor does not reduce fall damage.
    pub const fn bypasses_armor(&self) -> bool {
        matches!(self, Self::Fall)
    }
}

/// A single damage application issued to the world model.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    pub kind: DamageType,
    pub attacker: Option<EntityId>,
    pub amount: f32,
}

impl Damage {
    pub fn new(kind: DamageType, attacker: Option<EntityId>, amount: f32) -> Self {
        Self {
            kind,
            attacker,
            amount,
        }
    }

    #[must_use]
    pub fn with_amount(mut self, amount: f32) -> Self {
        self.amount = amount;
        self
    }
}

/// Applies armor reduction to `amount`.
///
/// # Formula
///
/// ```text
/// f = 2 + toughness / 4
/// g = min(max(armor - amount / f, armor * 0.2), 20)
/// k = clamp(g / 25 * breach_effectiveness, 0, 1)
/// final = amount * (1 - k)
/// ```
pub fn armor_reduced_damage(amount: f32, armor: f32, toughness: f32, breach_level: i32) -> f32 {
    if armor <= 0.0 {
        return amount;
    }
    let f = 2.0 + toughness / 4.0;
    let g = (armor - amount / f).max(armor * 0.2).min(20.0);
    let k = (g / 25.0 * breach::armor_effectiveness(breach_level)).clamp(0.0, 1.0);
    amount * (1.0 - k)
}
