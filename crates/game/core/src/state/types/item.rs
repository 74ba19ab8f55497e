//! Held item data read by the weapon mechanics.

use strum::EnumCount;

use crate::combat::KineticWeaponProfile;
use crate::enchantment::Enchantment;

/// Item materials the combat mechanics distinguish.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Material {
    WoodenSpear,
    StoneSpear,
    CopperSpear,
    IronSpear,
    GoldenSpear,
    DiamondSpear,
    NetheriteSpear,
    Mace,
    IronSword,
}

impl Material {
    pub const fn is_spear(&self) -> bool {
        matches!(
            self,
            Self::WoodenSpear
                | Self::StoneSpear
                | Self::CopperSpear
                | Self::IronSpear
                | Self::GoldenSpear
                | Self::DiamondSpear
                | Self::NetheriteSpear
        )
    }

    pub const fn is_mace(&self) -> bool {
        matches!(self, Self::Mace)
    }

    /// Animation played while the item is being used.
    pub const fn use_animation(&self) -> ItemAnimation {
        if self.is_spear() {
            ItemAnimation::Spear
        } else {
            ItemAnimation::None
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemAnimation {
    #[default]
    None,
    Block,
    Spear,
}

/// Enchantment levels carried by an item, indexed by [`Enchantment`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnchantmentLevels([u8; Enchantment::COUNT]);

impl EnchantmentLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a level (builder pattern). Level 0 removes the enchantment.
    #[must_use]
    pub fn with(mut self, enchantment: Enchantment, level: u8) -> Self {
        self.0[enchantment as usize] = level;
        self
    }

    pub fn level(&self, enchantment: Enchantment) -> i32 {
        i32::from(self.0[enchantment as usize])
    }
}

/// A stack held in an entity's hand.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub material: Material,
    pub enchantments: EnchantmentLevels,
    /// Kinetic weapon component; absent on ordinary items.
    pub kinetic: Option<KineticWeaponProfile>,
}

impl ItemStack {
    pub fn new(material: Material) -> Self {
        Self {
            material,
            enchantments: EnchantmentLevels::default(),
            kinetic: None,
        }
    }

    #[must_use]
    pub fn with_kinetic(mut self, profile: KineticWeaponProfile) -> Self {
        self.kinetic = Some(profile);
        self
    }

    #[must_use]
    pub fn with_enchantment(mut self, enchantment: Enchantment, level: u8) -> Self {
        self.enchantments = self.enchantments.with(enchantment, level);
        self
    }

    pub fn enchantment_level(&self, enchantment: Enchantment) -> i32 {
        self.enchantments.level(enchantment)
    }

    pub fn is_spear(&self) -> bool {
        self.material.is_spear()
    }

    pub fn is_mace(&self) -> bool {
        self.material.is_mace()
    }
}
