//! Feature registry and dependency resolution.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::{FeatureConfiguration, FeatureDefinition, FeatureKind};
use crate::error::{DependencyPath, FeatureError, Result};
use crate::features;
use crate::settings::CombatSettings;

/// Process-wide catalogue of feature definitions, one per kind.
///
/// The registry is filled once at startup. Each build selects a subset of
/// kinds; their transitive dependencies are pulled in automatically.
#[derive(Clone, Debug, Default)]
pub struct FeatureRegistry {
    definitions: BTreeMap<FeatureKind, FeatureDefinition>,
}

impl FeatureRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the vanilla definition of every kind.
    pub fn vanilla() -> Self {
        let definitions = features::vanilla_definitions()
            .into_iter()
            .map(|definition| (definition.kind(), definition))
            .collect();
        Self { definitions }
    }

    /// Registers a definition. Fails if its kind is already defined.
    pub fn define(&mut self, definition: FeatureDefinition) -> Result<&mut Self> {
        let kind = definition.kind();
        if self.definitions.contains_key(&kind) {
            return Err(FeatureError::DuplicateFeatureKind(kind));
        }
        self.definitions.insert(kind, definition);
        Ok(self)
    }

    pub fn definition(&self, kind: FeatureKind) -> Option<&FeatureDefinition> {
        self.definitions.get(&kind)
    }

    pub fn is_defined(&self, kind: FeatureKind) -> bool {
        self.definitions.contains_key(&kind)
    }

    /// Starts an editable selection over this registry's definitions.
    pub fn select(&self, selected: &[FeatureKind]) -> FeatureSet {
        FeatureSet {
            definitions: self.definitions.clone(),
            selected: dedup(selected.iter().copied()),
            settings: CombatSettings::default(),
        }
    }

    /// Builds a configuration for `selected` with default settings.
    pub fn build(&self, selected: &[FeatureKind]) -> Result<FeatureConfiguration> {
        self.select(selected).build()
    }

    /// Builds the kinds listed in `settings.features` with those settings.
    pub fn configure(&self, settings: CombatSettings) -> Result<FeatureConfiguration> {
        self.select(&settings.features).with_settings(settings).build()
    }
}

/// A selection of feature kinds plus the definitions that will build them.
///
/// Edits (`add`, `remove`, `replace`) must happen before [`FeatureSet::build`];
/// the built configuration is immutable.
#[derive(Clone, Debug)]
pub struct FeatureSet {
    definitions: BTreeMap<FeatureKind, FeatureDefinition>,
    selected: Vec<FeatureKind>,
    settings: CombatSettings,
}

impl FeatureSet {
    /// Defines and selects a new kind. Fails if the kind is already defined.
    pub fn add(mut self, definition: FeatureDefinition) -> Result<Self> {
        let kind = definition.kind();
        if self.definitions.contains_key(&kind) {
            return Err(FeatureError::DuplicateFeatureKind(kind));
        }
        self.definitions.insert(kind, definition);
        if !self.selected.contains(&kind) {
            self.selected.push(kind);
        }
        Ok(self)
    }

    /// Drops a kind from both the selection and the definitions. Anything
    /// still depending on it fails the build with a missing dependency.
    #[must_use]
    pub fn remove(mut self, kind: FeatureKind) -> Self {
        self.definitions.remove(&kind);
        self.selected.retain(|selected| *selected != kind);
        self
    }

    /// Swaps the definition of an already known kind, e.g. legacy knockback
    /// in place of vanilla. Unknown kinds are simply defined.
    #[must_use]
    pub fn replace(mut self, definition: FeatureDefinition) -> Self {
        let kind = definition.kind();
        if self.definitions.insert(kind, definition).is_some() {
            warn!(
                target: "combat::features",
                feature = %kind,
                "replacing feature definition"
            );
        }
        self
    }

    /// Replaces the settings handed to constructors.
    #[must_use]
    pub fn with_settings(mut self, settings: CombatSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn selected(&self) -> &[FeatureKind] {
        &self.selected
    }

    pub fn settings(&self) -> &CombatSettings {
        &self.settings
    }

    /// Dependency-first initialization order of the selection.
    ///
    /// Roots are visited in selection order and dependencies in declaration
    /// order, so the result is deterministic for a given set of definitions.
    pub fn resolve_order(&self) -> Result<Vec<FeatureKind>> {
        let mut resolver = Resolver {
            definitions: &self.definitions,
            marks: BTreeMap::new(),
            stack: Vec::new(),
            order: Vec::new(),
        };

        for &kind in &self.selected {
            if !self.definitions.contains_key(&kind) {
                return Err(FeatureError::UndefinedFeature(kind));
            }
            resolver.visit(kind)?;
        }

        Ok(resolver.order)
    }

    /// Resolves, constructs and initializes the selected features.
    pub fn build(self) -> Result<FeatureConfiguration> {
        let order = self.resolve_order()?;
        let mut configuration = FeatureConfiguration::new(self.settings);

        for &kind in &order {
            let Some(definition) = self.definitions.get(&kind) else {
                return Err(FeatureError::UndefinedFeature(kind));
            };

            let feature = (definition.constructor())(&configuration)?;
            if feature.kind() != kind {
                return Err(FeatureError::FeatureKindMismatch {
                    expected: kind,
                    found: feature.kind(),
                });
            }

            debug!(
                target: "combat::features",
                feature = %kind,
                variant = feature.variant_name(),
                "feature constructed"
            );
            configuration.insert(feature, definition.post_init());
        }

        configuration.finalize();

        info!(
            target: "combat::features",
            order = ?configuration.order(),
            listeners = configuration.node().listener_count(),
            "feature configuration built"
        );

        Ok(configuration)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

struct Resolver<'a> {
    definitions: &'a BTreeMap<FeatureKind, FeatureDefinition>,
    marks: BTreeMap<FeatureKind, Mark>,
    stack: Vec<FeatureKind>,
    order: Vec<FeatureKind>,
}

impl Resolver<'_> {
    fn visit(&mut self, kind: FeatureKind) -> Result<()> {
        match self.marks.get(&kind) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => return Err(self.cycle_through(kind)),
            None => {}
        }

        let Some(definition) = self.definitions.get(&kind) else {
            return Err(FeatureError::UndefinedFeature(kind));
        };

        self.marks.insert(kind, Mark::Visiting);
        self.stack.push(kind);

        for &dependency in definition.dependencies() {
            if !self.definitions.contains_key(&dependency) {
                return Err(FeatureError::MissingDependency {
                    kind,
                    missing: dependency,
                });
            }
            self.visit(dependency)?;
        }

        self.stack.pop();
        self.marks.insert(kind, Mark::Done);
        self.order.push(kind);
        Ok(())
    }

    fn cycle_through(&self, kind: FeatureKind) -> FeatureError {
        let start = self
            .stack
            .iter()
            .position(|visiting| *visiting == kind)
            .unwrap_or(0);
        let mut path = self.stack[start..].to_vec();
        path.push(kind);
        FeatureError::CyclicDependency(DependencyPath(path))
    }
}

fn dedup(kinds: impl IntoIterator<Item = FeatureKind>) -> Vec<FeatureKind> {
    let mut unique = Vec::new();
    for kind in kinds {
        if !unique.contains(&kind) {
            unique.push(kind);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_op(kind: FeatureKind, dependencies: &[FeatureKind]) -> FeatureDefinition {
        FeatureDefinition::no_op(kind).depends_on(dependencies.iter().copied())
    }

    #[test]
    fn define_rejects_duplicates() {
        let mut registry = FeatureRegistry::new();
        registry
            .define(no_op(FeatureKind::Fall, &[]))
            .expect("first definition");
        let err = registry
            .define(no_op(FeatureKind::Fall, &[]))
            .expect_err("duplicate");
        assert_eq!(err, FeatureError::DuplicateFeatureKind(FeatureKind::Fall));
    }

    #[test]
    fn order_lists_dependencies_first() {
        let mut registry = FeatureRegistry::new();
        registry
            .define(no_op(FeatureKind::Damage, &[]))
            .and_then(|r| r.define(no_op(FeatureKind::Fall, &[FeatureKind::Damage])))
            .and_then(|r| {
                r.define(no_op(
                    FeatureKind::Mace,
                    &[FeatureKind::Fall, FeatureKind::Damage],
                ))
            })
            .expect("definitions");

        let order = registry
            .select(&[FeatureKind::Mace])
            .resolve_order()
            .expect("acyclic");
        assert_eq!(
            order,
            vec![FeatureKind::Damage, FeatureKind::Fall, FeatureKind::Mace]
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let mut registry = FeatureRegistry::new();
        registry
            .define(no_op(FeatureKind::Spear, &[FeatureKind::Spear]))
            .expect("definition");
        let err = registry
            .select(&[FeatureKind::Spear])
            .resolve_order()
            .expect_err("cycle");
        assert_eq!(
            err,
            FeatureError::CyclicDependency(DependencyPath(vec![
                FeatureKind::Spear,
                FeatureKind::Spear
            ]))
        );
    }

    #[test]
    fn selecting_undefined_kind_fails() {
        let err = FeatureRegistry::new()
            .build(&[FeatureKind::Knockback])
            .expect_err("undefined");
        assert_eq!(err, FeatureError::UndefinedFeature(FeatureKind::Knockback));
    }

    #[test]
    fn repeated_selection_is_collapsed() {
        let set = FeatureRegistry::vanilla().select(&[
            FeatureKind::Spear,
            FeatureKind::Spear,
            FeatureKind::Mace,
        ]);
        assert_eq!(set.selected(), &[FeatureKind::Spear, FeatureKind::Mace]);
    }
}
