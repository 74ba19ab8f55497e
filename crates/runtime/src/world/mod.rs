//! World models the combat features can run against.
//!
//! Hosts implement [`combat_core::World`] over their own simulation. The
//! [`InMemoryWorld`] here is a small self-contained implementation used by
//! the sandbox binary and by tests; it records every command it receives.
mod memory;

pub use memory::{InMemoryWorld, WorldCommand, WorldEntity};
