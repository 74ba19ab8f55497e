//! Deterministic combat data types and formulas.
//!
//! `combat-core` defines the data model (entity snapshots, held items, kinetic
//! weapon profiles), the pure mechanic formulas (kinetic stabs, mace smashes,
//! armor reduction), the enchantment effect table, and the collaborator traits
//! through which mechanics talk to a host world model. It performs no I/O and
//! holds no state; the `combat-runtime` crate composes these pieces into
//! configurable features.
pub mod combat;
pub mod config;
pub mod enchantment;
pub mod env;
pub mod error;
pub mod state;

pub use combat::{
    Condition, Damage, DamageType, KineticWeaponProfile, SmashTier, SpearPhase, StabConditions,
};
pub use config::CombatConfig;
pub use enchantment::Enchantment;
pub use env::{
    Animation, FeedbackSink, ItemProfileSource, SoundEvent, SoundSource, World, WorldCommands,
    WorldQuery,
};
pub use error::{ErrorSeverity, GameError};
pub use glam::DVec3;
pub use state::{
    Attribute, EnchantmentLevels, EntityFlags, EntityId, EntitySnapshot, EntityType,
    EquipmentSlot, GameMode, Hand, ItemAnimation, ItemStack, ItemUse, Material, Tick,
};
