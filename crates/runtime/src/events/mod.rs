//! Host events and the dispatch node features attach to.
//!
//! The host translates its own simulation events into [`CombatEvent`]s and
//! hands them to [`FeatureConfiguration::dispatch`](crate::FeatureConfiguration::dispatch).
//! Features subscribe per [`EventKind`] while the configuration is built.
mod event;
mod node;

pub use event::{CombatEvent, EventKind};
pub use node::{EventNode, Listener};
