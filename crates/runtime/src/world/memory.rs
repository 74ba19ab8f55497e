//! In-memory world model for tests and local runs.

use std::collections::HashMap;

use combat_core::{
    Animation, Attribute, DVec3, Damage, EntityFlags, EntityId, EntitySnapshot, EntityType,
    EquipmentSlot, FeedbackSink, GameMode, Hand, ItemProfileSource, ItemStack, ItemUse,
    SoundEvent, SoundSource, Tick, WorldCommands, WorldQuery,
};

/// Food points of a fully fed entity.
const FULL_FOOD: u32 = 20;

/// A command the world received, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldCommand {
    Damage { target: EntityId, damage: Damage },
    SetVelocity { entity: EntityId, velocity: DVec3 },
    Dismount { passenger: EntityId },
    DamageItem {
        entity: EntityId,
        slot: EquipmentSlot,
        amount: u32,
    },
    Exhaustion { entity: EntityId, amount: f32 },
    SyncVelocity { entity: EntityId },
    Sound {
        sound: SoundEvent,
        source: SoundSource,
        emitter: EntityId,
    },
    Animation {
        entity: EntityId,
        animation: Animation,
    },
}

/// One simulated entity: its snapshot plus the state the world owns.
#[derive(Clone, Debug)]
pub struct WorldEntity {
    snapshot: EntitySnapshot,
    pub health: f32,
    pub food: u32,
    pub attributes: HashMap<Attribute, f64>,
    pub main_hand: Option<ItemStack>,
    pub off_hand: Option<ItemStack>,
    /// Placed in a world instance (spatial queries work).
    pub in_world: bool,
    /// Rejects all damage, like invulnerability frames.
    pub invulnerable: bool,
}

impl WorldEntity {
    pub fn new(id: EntityId, entity_type: EntityType) -> Self {
        let (eye_height, bounding_box_height) = dimensions(entity_type);
        let game_mode = (entity_type == EntityType::Player).then_some(GameMode::Survival);
        Self {
            snapshot: EntitySnapshot {
                id,
                entity_type,
                position: DVec3::ZERO,
                yaw: 0.0,
                pitch: 0.0,
                velocity: DVec3::ZERO,
                eye_height,
                bounding_box_height,
                flags: EntityFlags::ON_GROUND,
                game_mode,
                vehicle: None,
                alive_ticks: Tick::ZERO,
                item_use: None,
            },
            health: 20.0,
            food: FULL_FOOD,
            attributes: HashMap::new(),
            main_hand: None,
            off_hand: None,
            in_world: true,
            invulnerable: false,
        }
    }

    pub fn player(id: EntityId) -> Self {
        Self::new(id, EntityType::Player)
    }

    pub fn zombie(id: EntityId) -> Self {
        Self::new(id, EntityType::Zombie)
    }

    pub fn id(&self) -> EntityId {
        self.snapshot.id
    }

    pub fn snapshot(&self) -> EntitySnapshot {
        self.snapshot.clone()
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.snapshot.position = DVec3::new(x, y, z);
        self
    }

    /// Yaw and pitch in degrees.
    #[must_use]
    pub fn facing(mut self, yaw: f32, pitch: f32) -> Self {
        self.snapshot.yaw = yaw;
        self.snapshot.pitch = pitch;
        self
    }

    /// Velocity in blocks per second.
    #[must_use]
    pub fn moving(mut self, velocity: DVec3) -> Self {
        self.snapshot.velocity = velocity;
        self
    }

    #[must_use]
    pub fn airborne(mut self) -> Self {
        self.snapshot.flags.remove(EntityFlags::ON_GROUND);
        self
    }

    #[must_use]
    pub fn gliding(mut self) -> Self {
        self.snapshot.flags.remove(EntityFlags::ON_GROUND);
        self.snapshot.flags.insert(EntityFlags::GLIDING);
        self
    }

    #[must_use]
    pub fn flying(mut self) -> Self {
        self.snapshot.flags.insert(EntityFlags::FLYING);
        self
    }

    #[must_use]
    pub fn game_mode(mut self, mode: GameMode) -> Self {
        self.snapshot.game_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn holding(mut self, hand: Hand, stack: ItemStack) -> Self {
        match hand {
            Hand::Main => self.main_hand = Some(stack),
            Hand::Off => self.off_hand = Some(stack),
        }
        self
    }

    /// Starts an item use that has already lasted `ticks`.
    #[must_use]
    pub fn using(mut self, hand: Hand, ticks: u64) -> Self {
        self.snapshot.item_use = Some(ItemUse { hand, ticks });
        self
    }

    #[must_use]
    pub fn riding(mut self, vehicle: EntityId) -> Self {
        self.snapshot.vehicle = Some(vehicle);
        self
    }

    #[must_use]
    pub fn attribute(mut self, attribute: Attribute, value: f64) -> Self {
        self.attributes.insert(attribute, value);
        self
    }

    #[must_use]
    pub fn food(mut self, food: u32) -> Self {
        self.food = food;
        self
    }

    #[must_use]
    pub fn alive_for(mut self, ticks: u64) -> Self {
        self.snapshot.alive_ticks = Tick(ticks);
        self
    }

    #[must_use]
    pub fn invulnerable(mut self) -> Self {
        self.invulnerable = true;
        self
    }

    #[must_use]
    pub fn outside_world(mut self) -> Self {
        self.in_world = false;
        self
    }
}

/// Eye height and bounding-box height per entity type.
fn dimensions(entity_type: EntityType) -> (f64, f64) {
    match entity_type {
        EntityType::Player => (1.62, 1.8),
        EntityType::Zombie | EntityType::Skeleton => (1.74, 1.95),
        EntityType::Horse => (1.52, 1.6),
        EntityType::ArmorStand => (1.7775, 1.975),
        EntityType::Item => (0.2125, 0.25),
        EntityType::Arrow => (0.13, 0.5),
    }
}

/// Entities in insertion order plus a log of received commands.
#[derive(Clone, Debug, Default)]
pub struct InMemoryWorld {
    entities: Vec<WorldEntity>,
    commands: Vec<WorldCommand>,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity, replacing any existing one with the same id.
    pub fn spawn(&mut self, entity: WorldEntity) -> EntityId {
        let id = entity.id();
        self.entities.retain(|existing| existing.id() != id);
        self.entities.push(entity);
        id
    }

    #[must_use]
    pub fn with(mut self, entity: WorldEntity) -> Self {
        self.spawn(entity);
        self
    }

    pub fn remove(&mut self, id: EntityId) -> Option<WorldEntity> {
        let index = self.entities.iter().position(|entity| entity.id() == id)?;
        Some(self.entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&WorldEntity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut WorldEntity> {
        self.entities.iter_mut().find(|entity| entity.id() == id)
    }

    /// Advances every entity's clock and in-progress item use.
    pub fn advance_ticks(&mut self, ticks: u64) {
        for entity in &mut self.entities {
            entity.snapshot.alive_ticks = entity.snapshot.alive_ticks + ticks;
            if let Some(item_use) = entity.snapshot.item_use.as_mut() {
                item_use.ticks += ticks;
            }
        }
    }

    /// Moves an entity, keeping every other property.
    pub fn set_position(&mut self, id: EntityId, position: DVec3) {
        if let Some(entity) = self.get_mut(id) {
            entity.snapshot.position = position;
        }
    }

    pub fn set_item_use(&mut self, id: EntityId, item_use: Option<ItemUse>) {
        if let Some(entity) = self.get_mut(id) {
            entity.snapshot.item_use = item_use;
        }
    }

    pub fn velocity(&self, id: EntityId) -> Option<DVec3> {
        self.get(id).map(|entity| entity.snapshot.velocity)
    }

    pub fn health(&self, id: EntityId) -> Option<f32> {
        self.get(id).map(|entity| entity.health)
    }

    pub fn commands(&self) -> &[WorldCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<WorldCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Damage applications the world accepted for `target`.
    pub fn damage_taken(&self, target: EntityId) -> Vec<Damage> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                WorldCommand::Damage { target: hit, damage } if *hit == target => Some(*damage),
                _ => None,
            })
            .collect()
    }

    pub fn sounds(&self) -> Vec<SoundEvent> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                WorldCommand::Sound { sound, .. } => Some(*sound),
                _ => None,
            })
            .collect()
    }

    /// Entities whose velocity was written at least once.
    pub fn moved_entities(&self) -> Vec<EntityId> {
        let mut moved = Vec::new();
        for command in &self.commands {
            if let WorldCommand::SetVelocity { entity, .. } = command {
                if !moved.contains(entity) {
                    moved.push(*entity);
                }
            }
        }
        moved
    }
}

impl WorldQuery for InMemoryWorld {
    fn entity(&self, id: EntityId) -> Option<EntitySnapshot> {
        self.get(id).map(WorldEntity::snapshot)
    }

    fn nearby_entities(&self, center: DVec3, radius: f64) -> Vec<EntityId> {
        let radius_squared = radius * radius;
        self.entities
            .iter()
            .filter(|entity| entity.in_world)
            .filter(|entity| entity.snapshot.position.distance_squared(center) <= radius_squared)
            .map(WorldEntity::id)
            .collect()
    }

    fn attribute_value(&self, id: EntityId, attribute: Attribute) -> f64 {
        self.get(id)
            .and_then(|entity| entity.attributes.get(&attribute).copied())
            .unwrap_or_else(|| attribute.default_value())
    }

    fn in_world(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|entity| entity.in_world)
    }

    fn food_level(&self, id: EntityId) -> u32 {
        self.get(id).map_or(FULL_FOOD, |entity| entity.food)
    }
}

impl ItemProfileSource for InMemoryWorld {
    fn held_item(&self, id: EntityId, hand: Hand) -> Option<ItemStack> {
        let entity = self.get(id)?;
        match hand {
            Hand::Main => entity.main_hand.clone(),
            Hand::Off => entity.off_hand.clone(),
        }
    }
}

impl WorldCommands for InMemoryWorld {
    fn damage(&mut self, target: EntityId, damage: Damage) -> bool {
        let Some(entity) = self.get_mut(target) else {
            return false;
        };
        if entity.invulnerable || entity.snapshot.is_gone() {
            return false;
        }

        entity.health -= damage.amount;
        if entity.health <= 0.0 {
            entity.snapshot.flags.insert(EntityFlags::DEAD);
        }
        self.commands.push(WorldCommand::Damage { target, damage });
        true
    }

    fn set_velocity(&mut self, id: EntityId, velocity: DVec3) {
        if let Some(entity) = self.get_mut(id) {
            entity.snapshot.velocity = velocity;
            self.commands.push(WorldCommand::SetVelocity {
                entity: id,
                velocity,
            });
        }
    }

    fn dismount(&mut self, passenger: EntityId) {
        if let Some(entity) = self.get_mut(passenger) {
            entity.snapshot.vehicle = None;
            self.commands.push(WorldCommand::Dismount { passenger });
        }
    }

    fn damage_item(&mut self, id: EntityId, slot: EquipmentSlot, amount: u32) {
        self.commands.push(WorldCommand::DamageItem {
            entity: id,
            slot,
            amount,
        });
    }

    fn add_exhaustion(&mut self, id: EntityId, amount: f32) {
        self.commands
            .push(WorldCommand::Exhaustion { entity: id, amount });
    }

    fn sync_velocity(&mut self, id: EntityId) {
        self.commands.push(WorldCommand::SyncVelocity { entity: id });
    }
}

impl FeedbackSink for InMemoryWorld {
    fn play_sound(&mut self, sound: SoundEvent, source: SoundSource, emitter: EntityId) {
        self.commands.push(WorldCommand::Sound {
            sound,
            source,
            emitter,
        });
    }

    fn broadcast_animation(&mut self, entity: EntityId, animation: Animation) {
        self.commands
            .push(WorldCommand::Animation { entity, animation });
    }
}
