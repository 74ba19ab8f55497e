//! Combat formulas.
//!
//! This module provides pure functions for the weapon mechanics. Nothing here
//! touches the world model: the runtime features sample entity snapshots,
//! feed them through these functions, and issue the resulting commands.
//!
//! # Core Functions
//!
//! - `kinetic`: relative-speed stab conditions and damage for channel-held weapons
//! - `smash`: fall-distance tiers and radius-attenuated knockback for maces
//! - `damage`: damage descriptors and armor reduction (including Breach)

pub mod damage;
pub mod kinetic;
pub mod smash;

pub use damage::{Damage, DamageType, armor_reduced_damage};
pub use kinetic::{Condition, KineticWeaponProfile, SpearPhase, StabConditions};
pub use smash::SmashTier;
