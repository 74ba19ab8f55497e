use combat_core::{EntityId, Hand};
use serde::{Deserialize, Serialize};

/// Simulation events the combat features react to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, strum::EnumDiscriminants)]
#[strum_discriminants(name(EventKind), derive(Hash, strum::Display, strum::EnumIter))]
pub enum CombatEvent {
    /// An entity entered the simulation.
    EntitySpawn { entity: EntityId },

    /// An entity left the simulation; per-entity state is dropped.
    EntityRemoved { entity: EntityId },

    /// Once per tick for every player.
    PlayerTick { player: EntityId },

    /// An entity moved vertically by `dy` blocks this tick.
    EntityMove {
        entity: EntityId,
        dy: f64,
        on_ground: bool,
    },

    BeginItemUse { player: EntityId, hand: Hand },

    /// Use was released early. `ticks_used` is how long it was held.
    CancelItemUse {
        player: EntityId,
        hand: Hand,
        ticks_used: u64,
    },

    /// Use ran to completion.
    FinishItemUse { player: EntityId, hand: Hand },

    /// A melee attack landed on `target`.
    EntityAttack { attacker: EntityId, target: EntityId },
}

impl CombatEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from(self)
    }

    /// The entity the event is about (the actor, for attacks).
    pub fn subject(&self) -> EntityId {
        match *self {
            Self::EntitySpawn { entity }
            | Self::EntityRemoved { entity }
            | Self::EntityMove { entity, .. } => entity,
            Self::PlayerTick { player }
            | Self::BeginItemUse { player, .. }
            | Self::CancelItemUse { player, .. }
            | Self::FinishItemUse { player, .. } => player,
            Self::EntityAttack { attacker, .. } => attacker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_subject_is_the_attacker() {
        let event = CombatEvent::EntityAttack {
            attacker: EntityId(1),
            target: EntityId(2),
        };
        assert_eq!(event.subject(), EntityId(1));
        assert_eq!(event.kind(), EventKind::EntityAttack);
        assert_eq!(event.kind().to_string(), "EntityAttack");
    }
}
