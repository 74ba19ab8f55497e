pub mod common;
pub mod entity;
pub mod item;

// Re-export common types
pub use common::{EntityId, Tick};

// Re-export entity snapshot types
pub use entity::{
    Attribute, EntityFlags, EntitySnapshot, EntityType, EquipmentSlot, GameMode, Hand, ItemUse,
};

// Re-export item types
pub use item::{EnchantmentLevels, ItemAnimation, ItemStack, Material};
