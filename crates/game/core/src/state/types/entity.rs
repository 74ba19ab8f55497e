//! Entity snapshots handed to combat mechanics by the world model.

use bitflags::bitflags;
use glam::DVec3;

use super::common::{EntityId, Tick};

bitflags! {
    /// Boolean entity state sampled at snapshot time.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityFlags: u8 {
        const ON_GROUND = 1 << 0;
        /// Gliding with an elytra.
        const GLIDING   = 1 << 1;
        /// Creative-style free flight (players only).
        const FLYING    = 1 << 2;
        const REMOVED   = 1 << 3;
        const DEAD      = 1 << 4;
    }
}

/// Coarse entity classification used by the mechanics' target filters.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityType {
    Player,
    Zombie,
    Skeleton,
    Horse,
    /// Decorative stand; never a combat target.
    ArmorStand,
    /// Dropped item; not living.
    Item,
    /// Projectile; not living.
    Arrow,
}

impl EntityType {
    /// Returns true if this entity has health and can take combat effects.
    pub const fn is_living(&self) -> bool {
        !matches!(self, Self::Item | Self::Arrow)
    }
}

/// Player game mode.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    /// Creative and spectator players ignore damage from other entities.
    pub const fn is_invulnerable(&self) -> bool {
        matches!(self, Self::Creative | Self::Spectator)
    }
}

/// Numeric entity attributes read through the world model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    AttackDamage,
    /// Reach for melee interactions, in blocks.
    EntityInteractionRange,
    KnockbackResistance,
    Armor,
    ArmorToughness,
}

impl Attribute {
    /// Base value used when an entity carries no modifier for the attribute.
    pub const fn default_value(&self) -> f64 {
        match self {
            Self::AttackDamage => 1.0,
            Self::EntityInteractionRange => 3.0,
            Self::KnockbackResistance => 0.0,
            Self::Armor => 0.0,
            Self::ArmorToughness => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hand {
    #[default]
    Main,
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
}

impl From<Hand> for EquipmentSlot {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Main => Self::MainHand,
            Hand::Off => Self::OffHand,
        }
    }
}

/// An in-progress item use (e.g. a held spear charge).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemUse {
    pub hand: Hand,
    /// Ticks elapsed since the use began.
    pub ticks: u64,
}

/// Point-in-time view of an entity.
///
/// Velocity is expressed in blocks per second; mechanics convert it to
/// per-tick motion through [`crate::CombatConfig`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub entity_type: EntityType,
    pub position: DVec3,
    /// Degrees; 0 faces +Z, 90 faces -X.
    pub yaw: f32,
    /// Degrees; positive looks down.
    pub pitch: f32,
    pub velocity: DVec3,
    pub eye_height: f64,
    pub bounding_box_height: f64,
    pub flags: EntityFlags,
    /// Present for players only.
    pub game_mode: Option<GameMode>,
    pub vehicle: Option<EntityId>,
    /// Ticks this entity has been alive; the clock for per-attacker cooldowns.
    pub alive_ticks: Tick,
    pub item_use: Option<ItemUse>,
}

impl EntitySnapshot {
    pub fn is_player(&self) -> bool {
        self.entity_type == EntityType::Player
    }

    pub fn is_living(&self) -> bool {
        self.entity_type.is_living()
    }

    /// Removed from the world or dead.
    pub fn is_gone(&self) -> bool {
        self.flags
            .intersects(EntityFlags::REMOVED | EntityFlags::DEAD)
    }

    pub fn is_on_ground(&self) -> bool {
        self.flags.contains(EntityFlags::ON_GROUND)
    }

    pub fn is_gliding(&self) -> bool {
        self.flags.contains(EntityFlags::GLIDING)
    }

    pub fn is_spectator(&self) -> bool {
        self.game_mode == Some(GameMode::Spectator)
    }

    pub fn is_creative_flying(&self) -> bool {
        self.game_mode == Some(GameMode::Creative) && self.flags.contains(EntityFlags::FLYING)
    }

    pub fn eye_position(&self) -> DVec3 {
        self.position + DVec3::new(0.0, self.eye_height, 0.0)
    }

    pub fn bounding_box_center(&self) -> DVec3 {
        self.position + DVec3::new(0.0, self.bounding_box_height / 2.0, 0.0)
    }

    /// Unit vector the entity is facing, derived from yaw and pitch.
    pub fn look_direction(&self) -> DVec3 {
        let yaw = f64::from(self.yaw).to_radians();
        let pitch = f64::from(self.pitch).to_radians();
        DVec3::new(
            -yaw.sin() * pitch.cos(),
            -pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
    }
}
