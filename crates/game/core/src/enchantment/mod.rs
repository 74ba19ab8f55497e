//! Enchantment effect table.
//!
//! Pure functions mapping an enchantment level to its numeric effect. Every
//! function returns the neutral value for levels `<= 0`, so callers can pass
//! the raw level read from an item without checking for its presence.
//!
//! | Enchantment | Effect | Consumer |
//! |-------------|--------|----------|
//! | Breach      | armor effectiveness multiplier | damage feature |
//! | Density     | extra smash damage per fallen block | mace |
//! | Lunge       | forward impulse and exhaustion cost | spear |
//! | Wind Burst  | upward launch after a smash | mace |

pub mod breach;
pub mod density;
pub mod lunge;
pub mod wind_burst;

/// Combat enchantments with effect formulas in this table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Enchantment {
    Breach,
    Density,
    Lunge,
    WindBurst,
}

impl Enchantment {
    /// Highest level obtainable without commands.
    pub const fn max_level(&self) -> i32 {
        match self {
            Self::Breach => 4,
            Self::Density => 5,
            Self::Lunge => 3,
            Self::WindBurst => 3,
        }
    }
}
