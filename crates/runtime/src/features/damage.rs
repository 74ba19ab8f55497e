use std::sync::Arc;

use combat_core::combat::damage::armor_reduced_damage;
use combat_core::{Attribute, Damage, Enchantment, EntityId, Hand, World};
use tracing::{debug, trace};

use super::{DamageAdapter, Feature};
use crate::feature::{FeatureConfiguration, FeatureDefinition, FeatureKind};
use crate::settings::DamageSettings;

#[derive(Debug)]
pub enum DamageFeature {
    Vanilla(VanillaDamage),
    /// Rejects every damage request.
    NoOp,
}

impl DamageFeature {
    pub(super) fn variant_name(&self) -> &'static str {
        match self {
            Self::Vanilla(_) => "vanilla",
            Self::NoOp => "no_op",
        }
    }
}

impl DamageAdapter for DamageFeature {
    fn apply_damage(&self, world: &mut dyn World, target: EntityId, damage: Damage) -> bool {
        match self {
            Self::Vanilla(vanilla) => vanilla.apply(world, target, damage),
            Self::NoOp => false,
        }
    }
}

/// Armor-aware damage with invulnerability checks.
#[derive(Clone, Copy, Debug)]
pub struct VanillaDamage {
    armor: bool,
}

impl VanillaDamage {
    pub fn new(settings: DamageSettings) -> Self {
        Self {
            armor: settings.armor,
        }
    }

    /// Damage left after the target's armor, weakened by the attacker's Breach.
    pub fn reduced_amount(&self, world: &dyn World, target: EntityId, damage: &Damage) -> f32 {
        if !self.armor || damage.kind.bypasses_armor() {
            return damage.amount;
        }

        let armor = world.attribute_value(target, Attribute::Armor) as f32;
        let toughness = world.attribute_value(target, Attribute::ArmorToughness) as f32;
        let breach = damage
            .attacker
            .and_then(|attacker| world.held_item(attacker, Hand::Main))
            .map_or(0, |stack| stack.enchantment_level(Enchantment::Breach));

        armor_reduced_damage(damage.amount, armor, toughness, breach)
    }

    fn apply(&self, world: &mut dyn World, target: EntityId, damage: Damage) -> bool {
        if !damage.amount.is_finite() || damage.amount <= 0.0 {
            trace!(target: "combat::damage", %target, amount = damage.amount, "non-positive damage ignored");
            return false;
        }

        let Some(snapshot) = world.entity(target) else {
            return false;
        };
        if snapshot.is_gone() || !snapshot.is_living() {
            return false;
        }
        if snapshot.game_mode.is_some_and(|mode| mode.is_invulnerable()) {
            trace!(target: "combat::damage", %target, "invulnerable target");
            return false;
        }

        let amount = self.reduced_amount(world, target, &damage);
        let accepted = world.damage(target, damage.with_amount(amount));
        debug!(
            target: "combat::damage",
            %target,
            kind = %damage.kind,
            requested = damage.amount,
            dealt = amount,
            accepted,
            "damage applied"
        );
        accepted
    }
}

pub(super) fn definition() -> FeatureDefinition {
    FeatureDefinition::new(FeatureKind::Damage, construct)
}

fn construct(configuration: &FeatureConfiguration) -> crate::Result<Feature> {
    let vanilla = VanillaDamage::new(configuration.settings().damage);
    Ok(Feature::Damage(Arc::new(DamageFeature::Vanilla(vanilla))))
}
