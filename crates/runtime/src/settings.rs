//! Runtime-tunable combat settings, loadable from RON.
//!
//! ```ron
//! (
//!     features: [SPEAR, MACE],
//!     tick_rate: 20,
//!     knockback: Legacy((horizontal: 0.45)),
//!     fall: (safe_fall_distance: 3.0, fall_damage: false),
//! )
//! ```
//!
//! Every field is optional; omitted fields keep their defaults.

use std::path::Path;

use combat_core::CombatConfig;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::feature::FeatureKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    /// Kinds to build; dependencies are added automatically.
    pub features: Vec<FeatureKind>,
    pub tick_rate: u32,
    pub knockback: KnockbackMode,
    pub damage: DamageSettings,
    pub fall: FallSettings,
}

impl CombatSettings {
    pub fn from_ron_str(source: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(source)?)
    }

    /// Reads and parses a RON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn combat_config(&self) -> CombatConfig {
        CombatConfig::with_tick_rate(self.tick_rate)
    }
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            features: vec![FeatureKind::Spear, FeatureKind::Mace],
            tick_rate: CombatConfig::DEFAULT_TICK_RATE,
            knockback: KnockbackMode::default(),
            damage: DamageSettings::default(),
            fall: FallSettings::default(),
        }
    }
}

/// Which knockback variant the KNOCKBACK feature is built as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum KnockbackMode {
    #[default]
    Vanilla,
    Legacy(LegacyKnockbackSettings),
    /// Builds the no-op variant.
    Disabled,
}

/// Fixed-strength knockback in the style of older game versions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyKnockbackSettings {
    pub horizontal: f64,
    pub vertical: f64,
    /// Cap on the resulting upward velocity, blocks per tick.
    pub vertical_limit: f64,
    /// Added per multiplier level (sprinting, Knockback enchantment).
    pub extra_horizontal: f64,
    pub extra_vertical: f64,
}

impl Default for LegacyKnockbackSettings {
    fn default() -> Self {
        Self {
            horizontal: 0.4,
            vertical: 0.4,
            vertical_limit: 0.4,
            extra_horizontal: 0.5,
            extra_vertical: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageSettings {
    /// Whether armor (and Breach) reduce incoming damage.
    pub armor: bool,
}

impl Default for DamageSettings {
    fn default() -> Self {
        Self { armor: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallSettings {
    pub safe_fall_distance: f64,
    pub fall_damage: bool,
}

impl Default for FallSettings {
    fn default() -> Self {
        Self {
            safe_fall_distance: CombatConfig::DEFAULT_SAFE_FALL_DISTANCE,
            fall_damage: true,
        }
    }
}
