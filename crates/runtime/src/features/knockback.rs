use std::sync::Arc;

use combat_core::{Attribute, CombatConfig, DVec3, EntityId, EntitySnapshot, World};
use tracing::{debug, trace};

use super::{Feature, KnockbackAdapter};
use crate::feature::{FeatureConfiguration, FeatureDefinition, FeatureKind};
use crate::settings::{KnockbackMode, LegacyKnockbackSettings};

/// Attack knockback. All arithmetic runs in blocks per tick; velocities are
/// converted through the configured tick rate on the way in and out.
#[derive(Debug)]
pub enum KnockbackFeature {
    Vanilla { config: CombatConfig },
    Legacy {
        config: CombatConfig,
        settings: LegacyKnockbackSettings,
    },
    NoOp,
}

impl KnockbackFeature {
    /// Base strength of a vanilla attack at multiplier 1.
    pub const VANILLA_STRENGTH: f64 = 0.5;
    /// Upper bound on the upward velocity a grounded target receives.
    pub const VANILLA_VERTICAL_LIMIT: f64 = 0.4;
    /// Horizontal velocity the attacker keeps after landing a knockback hit.
    pub const ATTACKER_SLOWDOWN: f64 = 0.6;

    pub(super) fn variant_name(&self) -> &'static str {
        match self {
            Self::Vanilla { .. } => "vanilla",
            Self::Legacy { .. } => "legacy",
            Self::NoOp => "no_op",
        }
    }

    fn vanilla(
        config: &CombatConfig,
        world: &mut dyn World,
        attacker: &EntitySnapshot,
        target: &EntitySnapshot,
        multiplier: f64,
    ) {
        let resistance = world.attribute_value(target.id, Attribute::KnockbackResistance);
        let strength = Self::VANILLA_STRENGTH * multiplier * (1.0 - resistance);
        if strength <= 0.0 {
            trace!(target: "combat::knockback", target = %target.id, "knockback fully resisted");
            return;
        }

        let push = horizontal_push(attacker) * strength;
        let old = target.velocity / f64::from(config.tick_rate);
        let y = if target.is_on_ground() {
            (old.y / 2.0 + strength).min(Self::VANILLA_VERTICAL_LIMIT)
        } else {
            old.y
        };
        let new = DVec3::new(old.x / 2.0 + push.x, y, old.z / 2.0 + push.z);
        world.set_velocity(target.id, new * f64::from(config.tick_rate));

        let slowed = DVec3::new(
            attacker.velocity.x * Self::ATTACKER_SLOWDOWN,
            attacker.velocity.y,
            attacker.velocity.z * Self::ATTACKER_SLOWDOWN,
        );
        world.set_velocity(attacker.id, slowed);

        debug!(
            target: "combat::knockback",
            attacker = %attacker.id,
            target = %target.id,
            strength,
            "vanilla knockback"
        );
    }

    /// Older fixed-strength knockback. A multiplier of 1 is a plain hit; each
    /// unit above 1 adds one level of the extra components.
    fn legacy(
        config: &CombatConfig,
        settings: &LegacyKnockbackSettings,
        world: &mut dyn World,
        attacker: &EntitySnapshot,
        target: &EntitySnapshot,
        multiplier: f64,
    ) {
        let resistance = world.attribute_value(target.id, Attribute::KnockbackResistance);
        let horizontal = settings.horizontal * (1.0 - resistance);

        let offset = target.position - attacker.position;
        let away = DVec3::new(offset.x, 0.0, offset.z)
            .try_normalize()
            .unwrap_or_else(|| horizontal_push(attacker));

        let old = target.velocity / f64::from(config.tick_rate);
        let mut new = DVec3::new(
            old.x / 2.0 + away.x * horizontal,
            (old.y / 2.0 + settings.vertical).min(settings.vertical_limit),
            old.z / 2.0 + away.z * horizontal,
        );

        let extra = (multiplier - 1.0).max(0.0);
        if extra > 0.0 {
            let look = horizontal_push(attacker);
            new += DVec3::new(
                look.x * settings.extra_horizontal * extra,
                settings.extra_vertical,
                look.z * settings.extra_horizontal * extra,
            );
        }

        world.set_velocity(target.id, new * f64::from(config.tick_rate));
        debug!(
            target: "combat::knockback",
            attacker = %attacker.id,
            target = %target.id,
            multiplier,
            "legacy knockback"
        );
    }
}

impl KnockbackAdapter for KnockbackFeature {
    fn apply_attack_knockback(
        &self,
        world: &mut dyn World,
        attacker: EntityId,
        target: EntityId,
        multiplier: f64,
    ) {
        if matches!(self, Self::NoOp) {
            return;
        }
        let (Some(attacker), Some(target)) = (world.entity(attacker), world.entity(target)) else {
            return;
        };

        match self {
            Self::Vanilla { config } => Self::vanilla(config, world, &attacker, &target, multiplier),
            Self::Legacy { config, settings } => {
                Self::legacy(config, settings, world, &attacker, &target, multiplier)
            }
            Self::NoOp => {}
        }
    }

    fn apply_velocity_delta(&self, world: &mut dyn World, target: EntityId, delta: DVec3) {
        if matches!(self, Self::NoOp) {
            return;
        }
        let Some(snapshot) = world.entity(target) else {
            return;
        };
        world.set_velocity(target, snapshot.velocity + delta);
    }
}

/// Unit horizontal vector along the attacker's yaw.
fn horizontal_push(attacker: &EntitySnapshot) -> DVec3 {
    let yaw = f64::from(attacker.yaw).to_radians();
    DVec3::new(-yaw.sin(), 0.0, yaw.cos())
}

pub(super) fn definition() -> FeatureDefinition {
    FeatureDefinition::new(FeatureKind::Knockback, construct)
}

fn construct(configuration: &FeatureConfiguration) -> crate::Result<Feature> {
    let config = configuration.config().clone();
    let feature = match configuration.settings().knockback {
        KnockbackMode::Vanilla => KnockbackFeature::Vanilla { config },
        KnockbackMode::Legacy(settings) => KnockbackFeature::Legacy { config, settings },
        KnockbackMode::Disabled => KnockbackFeature::NoOp,
    };
    Ok(Feature::Knockback(Arc::new(feature)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_follows_yaw() {
        let mut snapshot = crate::world::WorldEntity::player(EntityId(1)).snapshot();
        snapshot.yaw = 0.0;
        assert!((horizontal_push(&snapshot) - DVec3::Z).length() < 1e-9);
        snapshot.yaw = 90.0;
        assert!((horizontal_push(&snapshot) - DVec3::NEG_X).length() < 1e-9);
    }
}
