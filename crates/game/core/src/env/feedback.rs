use crate::state::EntityId;

/// Sound keys emitted by the combat mechanics.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundEvent {
    #[strum(serialize = "item.mace.smash_air")]
    MaceSmashAir,
    #[strum(serialize = "item.mace.smash_ground")]
    MaceSmashGround,
    #[strum(serialize = "item.mace.smash_ground_heavy")]
    MaceSmashGroundHeavy,
    #[strum(serialize = "item.spear.use")]
    SpearUse,
    #[strum(serialize = "item.spear.hit")]
    SpearHit,
    #[strum(serialize = "item.spear.lunge")]
    SpearLunge,
    #[strum(serialize = "entity.wind_charge.wind_burst")]
    WindBurst,
}

/// Mixer category a sound is played under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundSource {
    Player,
    Hostile,
}

impl SoundSource {
    pub fn for_entity(is_player: bool) -> Self {
        if is_player { Self::Player } else { Self::Hostile }
    }
}

/// Client-visible entity animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Animation {
    SwingMainArm,
    SwingOffHand,
}

/// Sink for sounds and animations shown to an entity's viewers (and itself).
pub trait FeedbackSink {
    fn play_sound(&mut self, sound: SoundEvent, source: SoundSource, emitter: EntityId);

    fn broadcast_animation(&mut self, entity: EntityId, animation: Animation);
}
