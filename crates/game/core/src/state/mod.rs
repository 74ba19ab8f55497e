//! Read-only snapshots of world state consumed by combat mechanics.
//!
//! The combat core never owns entities. The host's world model hands out
//! [`EntitySnapshot`] values taken at the start of a mechanic evaluation, and
//! every mutation flows back through the collaborator traits in [`crate::env`].
pub mod types;

pub use types::{
    Attribute, EnchantmentLevels, EntityFlags, EntityId, EntitySnapshot, EntityType,
    EquipmentSlot, GameMode, Hand, ItemAnimation, ItemStack, ItemUse, Material, Tick,
};
