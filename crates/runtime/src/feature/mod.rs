//! Dependency-ordered feature composition.
//!
//! A [`FeatureRegistry`] holds one [`FeatureDefinition`] per [`FeatureKind`].
//! Selecting kinds yields a [`FeatureSet`] that can still be edited; building
//! it resolves a dependency-first order, constructs each feature in that order
//! and wires the result into an immutable [`FeatureConfiguration`].
mod configuration;
mod definition;
mod kind;
mod registry;

pub use configuration::FeatureConfiguration;
pub use definition::{Constructor, FeatureDefinition, PostInit};
pub use kind::FeatureKind;
pub use registry::{FeatureRegistry, FeatureSet};
