//! Density: extra smash damage per block fallen.

pub const DAMAGE_PER_BLOCK_PER_LEVEL: f32 = 0.5;

pub fn bonus_per_block(level: i32) -> f32 {
    if level <= 0 {
        return 0.0;
    }
    level as f32 * DAMAGE_PER_BLOCK_PER_LEVEL
}

/// Extra smash damage for a fall of `fall_distance` blocks, added on top of
/// the mace's tiered bonus.
pub fn bonus_damage(level: i32, fall_distance: f64) -> f32 {
    (f64::from(bonus_per_block(level)) * fall_distance.max(0.0)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_linearly_with_level_and_distance() {
        assert_eq!(bonus_per_block(1), 0.5);
        assert_eq!(bonus_per_block(5), 2.5);
        assert_eq!(bonus_damage(2, 4.0), 4.0);
        assert_eq!(bonus_damage(0, 10.0), 0.0);
    }
}
