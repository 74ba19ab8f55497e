//! Feature composition and mechanics for the combat engine.
//!
//! This crate turns the pure formulas in `combat-core` into configurable,
//! event-driven features. A host builds a [`FeatureConfiguration`] once at
//! startup from a [`FeatureRegistry`] and then forwards its simulation events
//! through [`FeatureConfiguration::dispatch`].
//!
//! Modules are organized by responsibility:
//! - [`feature`] hosts the registry, dependency resolution and the built configuration
//! - [`features`] implements the damage, item damage, knockback, fall, spear and mace kinds
//! - [`events`] defines host events and the dispatch node
//! - [`settings`] loads runtime-tunable settings from RON
//! - [`world`] provides an in-memory world model for tests and the sandbox
pub mod error;
pub mod events;
pub mod feature;
pub mod features;
pub mod settings;
pub mod world;

pub use error::{DependencyPath, FeatureError, Result, SettingsError};
pub use events::{CombatEvent, EventKind, EventNode, Listener};
pub use feature::{
    Constructor, FeatureConfiguration, FeatureDefinition, FeatureKind, FeatureRegistry,
    FeatureSet, PostInit,
};
pub use features::{
    DamageAdapter, DamageFeature, FallFeature, FallState, FallStateAdapter, Feature,
    ItemDamageFeature, KnockbackAdapter, KnockbackFeature, MaceFeature, SpearFeature, StabRecord,
};
pub use settings::{
    CombatSettings, DamageSettings, FallSettings, KnockbackMode, LegacyKnockbackSettings,
};
pub use world::{InMemoryWorld, WorldCommand, WorldEntity};
