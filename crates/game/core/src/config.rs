/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Simulation ticks per second. Entity velocities are expressed in
    /// blocks per second and divided by this rate to get per-tick motion.
    pub tick_rate: u32,
}

impl CombatConfig {
    // ===== simulation =====
    pub const TICKS_PER_SECOND: u32 = 20;

    // ===== kinetic weapons =====
    /// Contact cooldown used when the held item carries no kinetic profile.
    pub const DEFAULT_CONTACT_COOLDOWN_TICKS: u32 = 10;

    // ===== smash attacks =====
    pub const SMASH_ATTACK_FALL_THRESHOLD: f64 = 1.5;
    pub const SMASH_ATTACK_HEAVY_THRESHOLD: f64 = 5.0;
    pub const SMASH_ATTACK_KNOCKBACK_RADIUS: f64 = 3.5;
    pub const SMASH_ATTACK_KNOCKBACK_POWER: f64 = 0.7;
    /// Minimum upward speed (blocks/tick) left on the attacker after a smash.
    pub const SMASH_ATTACK_MIN_RISE: f64 = 0.01;

    // ===== falling =====
    pub const DEFAULT_SAFE_FALL_DISTANCE: f64 = 3.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_RATE: u32 = Self::TICKS_PER_SECOND;

    pub fn new() -> Self {
        Self {
            tick_rate: Self::DEFAULT_TICK_RATE,
        }
    }

    pub fn with_tick_rate(tick_rate: u32) -> Self {
        Self {
            tick_rate: tick_rate.max(1),
        }
    }

    /// Converts a per-tick displacement into a velocity in blocks per second.
    #[inline]
    pub fn per_second(&self, per_tick: f64) -> f64 {
        per_tick * f64::from(self.tick_rate)
    }

    /// Converts a velocity in blocks per second into per-tick motion.
    #[inline]
    pub fn per_tick(&self, per_second: f64) -> f64 {
        per_second / f64::from(self.tick_rate)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
