//! Wind Burst: launches the attacker upward after a smash attack.

/// Fall distance the attacker must exceed for the burst to trigger.
pub const MIN_FALL_DISTANCE: f64 = 1.5;

/// Upward launch strength, in blocks per tick.
pub fn knockback(level: i32) -> f32 {
    match level {
        i32::MIN..=0 => 0.0,
        1 => 1.2,
        2 => 1.75,
        3 => 2.2,
        _ => 1.5 + 0.35 * level as f32,
    }
}

pub fn triggers(fall_distance: f64) -> bool {
    fall_distance > MIN_FALL_DISTANCE
}
