//! Traits describing the world model the combat mechanics run against.
//!
//! The combat crates never own entities, physics, or networking. A host
//! implements these collaborator traits over its own world representation:
//!
//! - [`WorldQuery`]: synchronous snapshots of entities and attributes
//! - [`ItemProfileSource`]: read-only access to held items and their kinetic profile
//! - [`WorldCommands`]: the mutations mechanics are allowed to request
//! - [`FeedbackSink`]: sounds and animations sent to viewers
//!
//! [`World`] bundles all four so features can take a single `&mut dyn World`.
mod feedback;
mod world;

pub use feedback::{Animation, FeedbackSink, SoundEvent, SoundSource};
pub use world::{ItemProfileSource, World, WorldCommands, WorldQuery};
