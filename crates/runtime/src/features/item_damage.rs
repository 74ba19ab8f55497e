use std::sync::Arc;

use combat_core::{EntityId, EquipmentSlot, GameMode, World};
use tracing::trace;

use super::Feature;
use crate::feature::{FeatureConfiguration, FeatureDefinition, FeatureKind};

/// Item durability consumption.
#[derive(Debug)]
pub enum ItemDamageFeature {
    /// Creative players never wear out their items.
    Vanilla,
    NoOp,
}

impl ItemDamageFeature {
    pub(super) fn variant_name(&self) -> &'static str {
        match self {
            Self::Vanilla => "vanilla",
            Self::NoOp => "no_op",
        }
    }

    pub fn damage_equipment(
        &self,
        world: &mut dyn World,
        entity: EntityId,
        slot: EquipmentSlot,
        amount: u32,
    ) {
        if matches!(self, Self::NoOp) || amount == 0 {
            return;
        }
        let creative = world
            .entity(entity)
            .is_some_and(|snapshot| snapshot.game_mode == Some(GameMode::Creative));
        if creative {
            trace!(target: "combat::item_damage", %entity, "creative player, durability kept");
            return;
        }
        world.damage_item(entity, slot, amount);
    }
}

pub(super) fn definition() -> FeatureDefinition {
    FeatureDefinition::new(FeatureKind::ItemDamage, construct)
}

fn construct(_: &FeatureConfiguration) -> crate::Result<Feature> {
    Ok(Feature::ItemDamage(Arc::new(ItemDamageFeature::Vanilla)))
}
