use glam::DVec3;

use super::FeedbackSink;
use crate::combat::{Damage, KineticWeaponProfile};
use crate::state::{Attribute, EntityId, EntitySnapshot, EquipmentSlot, Hand, ItemStack};

/// Read-only queries against the world model.
///
/// All reads are synchronous snapshots; a mechanic samples what it needs at
/// the start of its evaluation and never observes its own writes mid-pass.
pub trait WorldQuery {
    /// Snapshot of an entity, or `None` if it is unknown to the world.
    fn entity(&self, id: EntityId) -> Option<EntitySnapshot>;

    /// Entities whose position lies within `radius` of `center`, in any order.
    fn nearby_entities(&self, center: DVec3, radius: f64) -> Vec<EntityId>;

    /// Current value of an attribute, falling back to [`Attribute::default_value`].
    fn attribute_value(&self, id: EntityId, attribute: Attribute) -> f64;

    /// Whether the entity is placed in a world instance that supports spatial queries.
    fn in_world(&self, id: EntityId) -> bool;

    /// Food points (0-20). Non-players report a full bar.
    fn food_level(&self, id: EntityId) -> u32;
}

/// Read-only access to held items.
pub trait ItemProfileSource {
    fn held_item(&self, id: EntityId, hand: Hand) -> Option<ItemStack>;

    /// Kinetic profile of the item held in `hand`, if it has one.
    fn kinetic_profile(&self, id: EntityId, hand: Hand) -> Option<KineticWeaponProfile> {
        self.held_item(id, hand).and_then(|stack| stack.kinetic)
    }
}

/// Mutations combat mechanics may request from the world model.
pub trait WorldCommands {
    /// Applies damage. Returns `false` when the world rejects it
    /// (e.g. invulnerability frames).
    fn damage(&mut self, target: EntityId, damage: Damage) -> bool;

    /// Replaces an entity's velocity (blocks per second).
    fn set_velocity(&mut self, id: EntityId, velocity: DVec3);

    /// Detaches a passenger from its vehicle.
    fn dismount(&mut self, passenger: EntityId);

    /// Consumes durability from the item in `slot`.
    fn damage_item(&mut self, id: EntityId, slot: EquipmentSlot, amount: u32);

    fn add_exhaustion(&mut self, id: EntityId, amount: f32);

    /// Pushes the entity's current velocity to its client immediately.
    fn sync_velocity(&mut self, id: EntityId);
}

/// The complete collaborator surface handed to features.
pub trait World: WorldQuery + ItemProfileSource + WorldCommands + FeedbackSink {}

impl<T> World for T where T: WorldQuery + ItemProfileSource + WorldCommands + FeedbackSink + ?Sized {}
