//! Core types for Lanternfall: the world arena, item ownership, and the
//! per-session player context.
//!
//! Locations and items live in a [`World`] built once at startup and
//! addressed through dense handles. Every item has exactly one [`Owner`];
//! [`World::move_item`] keeps owners and their contents in agreement. The
//! [`Context`] owns the world and carries everything else a turn needs.

/// Capability sets and attribute bags.
pub mod capability;
/// The game clock.
pub mod clock;
/// Per-session player context.
pub mod context;
/// Movement directions.
pub mod direction;
/// Error types for the core crate.
pub mod error;
/// Items.
pub mod item;
/// Locations, exits, and guards.
pub mod location;
/// The ordered set of active actors.
pub mod roster;
/// The world arena and item ownership.
pub mod world;

pub use capability::{AttrValue, Attrs, Capability, CapabilitySet};
pub use clock::GameClock;
pub use context::{Candidate, Context, ContextSettings, Pending, Referent, Verbosity};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use item::Item;
pub use location::{Exit, Guard, Location};
pub use roster::{ActorKey, ActorRoster};
pub use world::{ItemId, LocationId, Owner, World};
