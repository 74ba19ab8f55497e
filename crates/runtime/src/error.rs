//! Error types surfaced while configuring the combat runtime.
//!
//! Configuration errors are raised once, at startup, while a
//! [`FeatureConfiguration`](crate::FeatureConfiguration) is built. Per-tick
//! mechanics never fail: absent profiles or ineligible attackers simply
//! short-circuit, and rejected damage is reported as a `bool`.
use std::fmt;
use std::path::PathBuf;

use combat_core::{ErrorSeverity, GameError};
use thiserror::Error;

use crate::feature::FeatureKind;

pub type Result<T> = std::result::Result<T, FeatureError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("feature kind {0} is already defined")]
    DuplicateFeatureKind(FeatureKind),

    #[error("feature {0} was selected but never defined")]
    UndefinedFeature(FeatureKind),

    #[error("feature {kind} depends on {missing}, which was never defined")]
    MissingDependency {
        kind: FeatureKind,
        missing: FeatureKind,
    },

    #[error("cyclic feature dependency: {0}")]
    CyclicDependency(DependencyPath),

    #[error("feature {0} is not present in this configuration")]
    FeatureNotPresent(FeatureKind),

    #[error("definition for {expected} constructed a {found} feature")]
    FeatureKindMismatch {
        expected: FeatureKind,
        found: FeatureKind,
    },
}

impl GameError for FeatureError {
    fn severity(&self) -> ErrorSeverity {
        use FeatureError::*;
        match self {
            DuplicateFeatureKind(_)
            | UndefinedFeature(_)
            | MissingDependency { .. }
            | CyclicDependency(_)
            | FeatureKindMismatch { .. } => ErrorSeverity::Fatal,
            FeatureNotPresent(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use FeatureError::*;
        match self {
            DuplicateFeatureKind(_) => "FEATURE_DUPLICATE_KIND",
            UndefinedFeature(_) => "FEATURE_UNDEFINED",
            MissingDependency { .. } => "FEATURE_MISSING_DEPENDENCY",
            CyclicDependency(_) => "FEATURE_CYCLIC_DEPENDENCY",
            FeatureNotPresent(_) => "FEATURE_NOT_PRESENT",
            FeatureKindMismatch { .. } => "FEATURE_KIND_MISMATCH",
        }
    }
}

/// Chain of feature kinds that closes a dependency cycle, first kind repeated last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyPath(pub Vec<FeatureKind>);

impl DependencyPath {
    pub fn kinds(&self) -> &[FeatureKind] {
        &self.0
    }
}

impl fmt::Display for DependencyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, kind) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// Failures while loading [`CombatSettings`](crate::CombatSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings")]
    Parse(#[from] ron::error::SpannedError),
}

impl GameError for SettingsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            SettingsError::Io { .. } => "SETTINGS_IO",
            SettingsError::Parse(_) => "SETTINGS_PARSE",
        }
    }
}
