//! The resolved, immutable set of active features.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use combat_core::{CombatConfig, EntityId, World};
use strum::EnumCount;
use tracing::trace;

use super::{FeatureKind, PostInit};
use crate::error::{FeatureError, Result};
use crate::events::{CombatEvent, EventNode};
use crate::features::{
    DamageFeature, FallFeature, Feature, ItemDamageFeature, KnockbackFeature, MaceFeature,
    SpearFeature,
};
use crate::settings::CombatSettings;

/// Feature instances addressed by [`FeatureKind`], in initialization order.
///
/// Built by [`FeatureSet::build`](super::FeatureSet::build). While it is being
/// built, constructors see a partially filled configuration holding exactly
/// the features that precede them in the order.
pub struct FeatureConfiguration {
    settings: CombatSettings,
    config: CombatConfig,
    features: [Option<Feature>; FeatureKind::COUNT],
    order: Vec<FeatureKind>,
    post_inits: Vec<(FeatureKind, PostInit)>,
    node: EventNode,
    initialized: Mutex<HashSet<EntityId>>,
}

macro_rules! typed_getter {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $name(&self) -> Result<Arc<$ty>> {
            match self.get(FeatureKind::$variant)? {
                Feature::$variant(feature) => Ok(Arc::clone(feature)),
                other => Err(FeatureError::FeatureKindMismatch {
                    expected: FeatureKind::$variant,
                    found: other.kind(),
                }),
            }
        }
    };
}

impl FeatureConfiguration {
    pub(crate) fn new(settings: CombatSettings) -> Self {
        let config = settings.combat_config();
        Self {
            settings,
            config,
            features: std::array::from_fn(|_| None),
            order: Vec::new(),
            post_inits: Vec::new(),
            node: EventNode::new(),
            initialized: Mutex::new(HashSet::new()),
        }
    }

    pub(crate) fn insert(&mut self, feature: Feature, post_init: Option<PostInit>) {
        let kind = feature.kind();
        if let Some(post_init) = post_init {
            self.post_inits.push((kind, post_init));
        }
        self.features[kind.index()] = Some(feature);
        self.order.push(kind);
    }

    /// Attaches every feature's listeners to the event node, in order.
    pub(crate) fn finalize(&mut self) {
        let mut node = EventNode::new();
        for kind in &self.order {
            if let Some(feature) = &self.features[kind.index()] {
                feature.init(&mut node);
            }
        }
        self.node = node;
    }

    pub fn get(&self, kind: FeatureKind) -> Result<&Feature> {
        self.features[kind.index()]
            .as_ref()
            .ok_or(FeatureError::FeatureNotPresent(kind))
    }

    pub fn contains(&self, kind: FeatureKind) -> bool {
        self.features[kind.index()].is_some()
    }

    typed_getter!(damage, Damage, DamageFeature);
    typed_getter!(item_damage, ItemDamage, ItemDamageFeature);
    typed_getter!(knockback, Knockback, KnockbackFeature);
    typed_getter!(fall, Fall, FallFeature);
    typed_getter!(
        /// The spear feature, for hosts that drive it directly.
        spear,
        Spear,
        SpearFeature
    );
    typed_getter!(mace, Mace, MaceFeature);

    /// Kinds in initialization order (dependencies first).
    pub fn order(&self) -> &[FeatureKind] {
        &self.order
    }

    pub fn node(&self) -> &EventNode {
        &self.node
    }

    pub fn settings(&self) -> &CombatSettings {
        &self.settings
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Runs the registered per-entity initializers for `entity`. Only the
    /// first call for a given entity has any effect.
    pub fn init_entity(&self, world: &dyn World, entity: EntityId) {
        let first_time = self
            .initialized
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entity);
        if !first_time {
            return;
        }

        trace!(target: "combat::features", %entity, "initializing entity");
        for (kind, post_init) in &self.post_inits {
            if let Some(feature) = &self.features[kind.index()] {
                post_init(feature, world, entity);
            }
        }
    }

    /// Whether `entity` has been through [`Self::init_entity`].
    pub fn is_initialized(&self, entity: EntityId) -> bool {
        self.initialized
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&entity)
    }

    /// Delivers a host event to every listening feature.
    ///
    /// The event's subject is initialized first if it has not been yet. After
    /// an [`CombatEvent::EntityRemoved`] the entity is forgotten, so a reused
    /// id is initialized afresh.
    pub fn dispatch(&self, event: &CombatEvent, world: &mut dyn World) {
        if let CombatEvent::EntityRemoved { entity } = event {
            self.node.dispatch(event, world);
            self.initialized
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(entity);
            return;
        }

        self.init_entity(&*world, event.subject());
        self.node.dispatch(event, world);
    }
}

impl fmt::Debug for FeatureConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureConfiguration")
            .field("order", &self.order)
            .field("settings", &self.settings)
            .field("listeners", &self.node.listener_count())
            .finish_non_exhaustive()
    }
}
