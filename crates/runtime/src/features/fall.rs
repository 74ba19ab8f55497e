use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use combat_core::{Damage, DamageType, EntityId, World};
use tracing::debug;

use super::{DamageAdapter, DamageFeature, FallStateAdapter, Feature};
use crate::events::{CombatEvent, EventKind, EventNode};
use crate::feature::{FeatureConfiguration, FeatureDefinition, FeatureKind};
use crate::settings::FallSettings;

/// Fall tracking for one entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FallState {
    /// Blocks fallen since last grounded.
    pub distance: f64,
    /// Spawn extra particles on the next landing.
    pub extra_particles: bool,
}

#[derive(Debug)]
pub enum FallFeature {
    Vanilla(VanillaFall),
    /// Reports zero fall distance and ignores movement.
    NoOp,
}

#[derive(Debug)]
pub struct VanillaFall {
    settings: FallSettings,
    damage: Arc<DamageFeature>,
    states: Mutex<HashMap<EntityId, FallState>>,
}

impl VanillaFall {
    pub fn new(settings: FallSettings, damage: Arc<DamageFeature>) -> Self {
        Self {
            settings,
            damage,
            states: Mutex::new(HashMap::new()),
        }
    }

    fn states(&self) -> MutexGuard<'_, HashMap<EntityId, FallState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Damage for landing after `distance` blocks: `ceil(distance - safe)`.
    pub fn landing_damage(&self, distance: f64) -> f32 {
        (distance - self.settings.safe_fall_distance).ceil().max(0.0) as f32
    }

    fn on_movement(&self, world: &mut dyn World, entity: EntityId, dy: f64, on_ground: bool) {
        if !on_ground {
            if dy < 0.0 {
                self.states().entry(entity).or_default().distance -= dy;
            }
            return;
        }

        // Lock released before damage runs; the damage path may read fall state.
        let landed = self.states().remove(&entity).unwrap_or_default();
        if landed.distance <= 0.0 {
            return;
        }

        let amount = self.landing_damage(landed.distance);
        debug!(
            target: "combat::fall",
            %entity,
            distance = landed.distance,
            damage = amount,
            extra_particles = landed.extra_particles,
            "landed"
        );
        if self.settings.fall_damage && amount > 0.0 {
            self.damage
                .apply_damage(world, entity, Damage::new(DamageType::Fall, None, amount));
        }
    }
}

impl FallFeature {
    pub(super) fn variant_name(&self) -> &'static str {
        match self {
            Self::Vanilla(_) => "vanilla",
            Self::NoOp => "no_op",
        }
    }

    /// Accumulates downward movement while airborne; on landing applies
    /// fall damage (if enabled) and resets the entity's state.
    pub fn on_movement(&self, world: &mut dyn World, entity: EntityId, dy: f64, on_ground: bool) {
        if let Self::Vanilla(vanilla) = self {
            vanilla.on_movement(world, entity, dy, on_ground);
        }
    }

    pub fn state(&self, entity: EntityId) -> FallState {
        match self {
            Self::Vanilla(vanilla) => vanilla.states().get(&entity).copied().unwrap_or_default(),
            Self::NoOp => FallState::default(),
        }
    }

    /// Overrides the tracked distance, e.g. after a teleport.
    pub fn set_fall_distance(&self, entity: EntityId, distance: f64) {
        if let Self::Vanilla(vanilla) = self {
            vanilla.states().entry(entity).or_default().distance = distance.max(0.0);
        }
    }

    pub fn extra_fall_particles(&self, entity: EntityId) -> bool {
        self.state(entity).extra_particles
    }

    pub fn forget(&self, entity: EntityId) {
        if let Self::Vanilla(vanilla) = self {
            vanilla.states().remove(&entity);
        }
    }
}

impl FallStateAdapter for FallFeature {
    fn fall_distance(&self, entity: EntityId) -> f64 {
        self.state(entity).distance
    }

    fn reset_fall_distance(&self, entity: EntityId) {
        if let Self::Vanilla(vanilla) = self {
            if let Some(state) = vanilla.states().get_mut(&entity) {
                state.distance = 0.0;
            }
        }
    }

    fn set_extra_fall_particles(&self, entity: EntityId, enabled: bool) {
        if let Self::Vanilla(vanilla) = self {
            vanilla.states().entry(entity).or_default().extra_particles = enabled;
        }
    }
}

pub(super) fn init(feature: &Arc<FallFeature>, node: &mut EventNode) {
    if matches!(**feature, FallFeature::NoOp) {
        return;
    }

    let fall = Arc::clone(feature);
    node.add_listener(EventKind::EntityMove, move |event, world| {
        if let CombatEvent::EntityMove {
            entity,
            dy,
            on_ground,
        } = *event
        {
            fall.on_movement(world, entity, dy, on_ground);
        }
    });

    let fall = Arc::clone(feature);
    node.add_listener(EventKind::EntityRemoved, move |event, _| {
        if let CombatEvent::EntityRemoved { entity } = *event {
            fall.forget(entity);
        }
    });
}

pub(super) fn definition() -> FeatureDefinition {
    FeatureDefinition::new(FeatureKind::Fall, construct).depends_on([FeatureKind::Damage])
}

fn construct(configuration: &FeatureConfiguration) -> crate::Result<Feature> {
    let damage = configuration.damage()?;
    let vanilla = VanillaFall::new(configuration.settings().fall, damage);
    Ok(Feature::Fall(Arc::new(FallFeature::Vanilla(vanilla))))
}
