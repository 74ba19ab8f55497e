//! The feature kinds hosted by the registry.
//!
//! Every feature is an enum with a `Vanilla` variant carrying its state and
//! captured collaborators, and a `NoOp` variant that ignores every call. The
//! no-op variant is chosen when the configuration is built, so the mechanics
//! never check for a missing collaborator at runtime.
//!
//! The mechanics reach the world model through three narrow adapter traits:
//! [`DamageAdapter`], [`KnockbackAdapter`] and [`FallStateAdapter`].
mod damage;
mod fall;
mod item_damage;
mod knockback;
mod mace;
mod spear;

use std::sync::Arc;

use combat_core::{Damage, DVec3, EntityId, World};

pub use damage::{DamageFeature, VanillaDamage};
pub use fall::{FallFeature, FallState, VanillaFall};
pub use item_damage::ItemDamageFeature;
pub use knockback::KnockbackFeature;
pub use mace::{MaceFeature, VanillaMace};
pub use spear::{SpearFeature, StabRecord, VanillaSpear};

use crate::events::EventNode;
use crate::feature::{FeatureDefinition, FeatureKind};

/// Applies damage on behalf of a mechanic.
pub trait DamageAdapter {
    /// Returns `true` if the world accepted the damage.
    fn apply_damage(&self, world: &mut dyn World, target: EntityId, damage: Damage) -> bool;
}

/// Pushes entities around.
pub trait KnockbackAdapter {
    /// Melee knockback from `attacker` onto `target`, scaled by `multiplier`.
    fn apply_attack_knockback(
        &self,
        world: &mut dyn World,
        attacker: EntityId,
        target: EntityId,
        multiplier: f64,
    );

    /// Adds `delta` (blocks per second) to the target's velocity.
    fn apply_velocity_delta(&self, world: &mut dyn World, target: EntityId, delta: DVec3);
}

/// Per-entity fall tracking.
pub trait FallStateAdapter {
    /// Blocks fallen since the entity was last on the ground.
    fn fall_distance(&self, entity: EntityId) -> f64;

    fn reset_fall_distance(&self, entity: EntityId);

    /// Requests extra landing particles on the entity's next impact.
    fn set_extra_fall_particles(&self, entity: EntityId, enabled: bool);
}

/// A constructed feature instance, one variant per [`FeatureKind`].
#[derive(Clone, Debug)]
pub enum Feature {
    Damage(Arc<DamageFeature>),
    ItemDamage(Arc<ItemDamageFeature>),
    Knockback(Arc<KnockbackFeature>),
    Fall(Arc<FallFeature>),
    Spear(Arc<SpearFeature>),
    Mace(Arc<MaceFeature>),
}

impl Feature {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::Damage(_) => FeatureKind::Damage,
            Self::ItemDamage(_) => FeatureKind::ItemDamage,
            Self::Knockback(_) => FeatureKind::Knockback,
            Self::Fall(_) => FeatureKind::Fall,
            Self::Spear(_) => FeatureKind::Spear,
            Self::Mace(_) => FeatureKind::Mace,
        }
    }

    /// Name of the concrete variant, for logs.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Damage(feature) => feature.variant_name(),
            Self::ItemDamage(feature) => feature.variant_name(),
            Self::Knockback(feature) => feature.variant_name(),
            Self::Fall(feature) => feature.variant_name(),
            Self::Spear(feature) => feature.variant_name(),
            Self::Mace(feature) => feature.variant_name(),
        }
    }

    pub fn is_no_op(&self) -> bool {
        self.variant_name() == "no_op"
    }

    /// Attaches the feature's event listeners.
    pub(crate) fn init(&self, node: &mut EventNode) {
        match self {
            Self::Fall(feature) => fall::init(feature, node),
            Self::Spear(feature) => spear::init(feature, node),
            Self::Mace(feature) => mace::init(feature, node),
            Self::Damage(_) | Self::ItemDamage(_) | Self::Knockback(_) => {}
        }
    }
}

/// Vanilla definitions of every kind, as registered by
/// [`FeatureRegistry::vanilla`](crate::FeatureRegistry::vanilla).
pub(crate) fn vanilla_definitions() -> Vec<FeatureDefinition> {
    vec![
        damage::definition(),
        item_damage::definition(),
        knockback::definition(),
        fall::definition(),
        spear::definition(),
        mace::definition(),
    ]
}
