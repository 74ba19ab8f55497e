//! Lunge: propels a spear wielder forward after a successful stab.

pub const IMPULSE_PER_LEVEL: f32 = 0.458;
pub const EXHAUSTION_PER_LEVEL: f32 = 4.0;
/// Food points required before a lunge is allowed (three drumsticks).
pub const MIN_FOOD_LEVEL: u32 = 6;

/// Forward impulse along the look direction, in blocks per tick.
pub fn impulse(level: i32) -> f32 {
    if level <= 0 {
        return 0.0;
    }
    level as f32 * IMPULSE_PER_LEVEL
}

pub fn exhaustion_cost(level: i32) -> f32 {
    if level <= 0 {
        return 0.0;
    }
    level as f32 * EXHAUSTION_PER_LEVEL
}

pub fn can_lunge(food_level: u32) -> bool {
    food_level >= MIN_FOOD_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_and_cost_per_level() {
        assert!((impulse(3) - 1.374).abs() < 1e-5);
        assert_eq!(exhaustion_cost(2), 8.0);
    }

    #[test]
    fn hunger_threshold() {
        assert!(!can_lunge(5));
        assert!(can_lunge(6));
        assert!(can_lunge(20));
    }
}
