//! Feature definitions: how a feature kind is constructed and what it needs.

use std::fmt;
use std::sync::Arc;

use combat_core::{EntityId, World};

use super::{FeatureConfiguration, FeatureKind};
use crate::error::Result;
use crate::features::{
    DamageFeature, Feature, FallFeature, ItemDamageFeature, KnockbackFeature, MaceFeature,
    SpearFeature,
};

/// Builds a feature instance.
///
/// The configuration passed in already holds every declared dependency, so a
/// constructor resolves the collaborators it needs with the typed getters
/// (e.g. [`FeatureConfiguration::damage`]) and captures them.
pub type Constructor = fn(&FeatureConfiguration) -> Result<Feature>;

/// Per-entity initializer, run once when an entity is first simulated.
pub type PostInit = fn(&Feature, &dyn World, EntityId);

/// Declarative description of one feature kind.
#[derive(Clone)]
pub struct FeatureDefinition {
    kind: FeatureKind,
    constructor: Constructor,
    post_init: Option<PostInit>,
    dependencies: Vec<FeatureKind>,
}

impl FeatureDefinition {
    pub fn new(kind: FeatureKind, constructor: Constructor) -> Self {
        Self {
            kind,
            constructor,
            post_init: None,
            dependencies: Vec::new(),
        }
    }

    /// Adds dependencies, keeping declaration order and dropping repeats.
    #[must_use]
    pub fn depends_on(mut self, kinds: impl IntoIterator<Item = FeatureKind>) -> Self {
        for kind in kinds {
            if !self.dependencies.contains(&kind) {
                self.dependencies.push(kind);
            }
        }
        self
    }

    #[must_use]
    pub fn with_post_init(mut self, post_init: PostInit) -> Self {
        self.post_init = Some(post_init);
        self
    }

    /// Definition that builds the no-op variant of `kind`. It has no
    /// dependencies, so it can stand in for a feature without dragging in
    /// that feature's collaborators.
    pub fn no_op(kind: FeatureKind) -> Self {
        let constructor: Constructor = match kind {
            FeatureKind::Damage => |_| Ok(Feature::Damage(Arc::new(DamageFeature::NoOp))),
            FeatureKind::ItemDamage => {
                |_| Ok(Feature::ItemDamage(Arc::new(ItemDamageFeature::NoOp)))
            }
            FeatureKind::Knockback => |_| Ok(Feature::Knockback(Arc::new(KnockbackFeature::NoOp))),
            FeatureKind::Fall => |_| Ok(Feature::Fall(Arc::new(FallFeature::NoOp))),
            FeatureKind::Spear => |_| Ok(Feature::Spear(Arc::new(SpearFeature::NoOp))),
            FeatureKind::Mace => |_| Ok(Feature::Mace(Arc::new(MaceFeature::NoOp))),
        };
        Self::new(kind, constructor)
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn constructor(&self) -> Constructor {
        self.constructor
    }

    pub fn post_init(&self) -> Option<PostInit> {
        self.post_init
    }

    pub fn dependencies(&self) -> &[FeatureKind] {
        &self.dependencies
    }
}

impl fmt::Debug for FeatureDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureDefinition")
            .field("kind", &self.kind)
            .field("dependencies", &self.dependencies)
            .field("post_init", &self.post_init.is_some())
            .finish()
    }
}
