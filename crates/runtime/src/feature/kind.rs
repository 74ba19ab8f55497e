use serde::{Deserialize, Serialize};

/// Mechanic category a feature implements.
///
/// Kinds key the [`FeatureConfiguration`](super::FeatureConfiguration) arena,
/// so every kind maps to exactly one slot via [`FeatureKind::index`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumCount,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FeatureKind {
    /// Applies damage to entities (armor, invulnerability).
    Damage,
    /// Consumes item durability.
    ItemDamage,
    /// Attack knockback and raw velocity pushes.
    Knockback,
    /// Fall distance tracking and fall damage.
    Fall,
    /// Kinetic spear stabs.
    Spear,
    /// Mace smash attacks.
    Mace,
}

impl FeatureKind {
    /// Slot of this kind in the configuration arena.
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn indices_are_dense() {
        for (position, kind) in FeatureKind::iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
        assert_eq!(FeatureKind::COUNT, 6);
    }

    #[test]
    fn parses_names() {
        assert_eq!("item_damage".parse::<FeatureKind>(), Ok(FeatureKind::ItemDamage));
        assert_eq!(FeatureKind::Knockback.to_string(), "knockback");
    }
}
