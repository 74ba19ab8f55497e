//! Breach: reduces the effectiveness of the target's armor.

/// Armor effectiveness lost per level.
pub const ARMOR_REDUCTION_PER_LEVEL: f32 = 0.15;

/// Multiplier applied to the target's effective armor.
///
/// Level 1 → 0.85, level 4 → 0.40, floored at 0.
pub fn armor_effectiveness(level: i32) -> f32 {
    if level <= 0 {
        return 1.0;
    }
    (1.0 - level as f32 * ARMOR_REDUCTION_PER_LEVEL).max(0.0)
}
