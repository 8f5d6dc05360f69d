//! Turn scheduling for Lanternfall.
//!
//! After the player's action consumes a turn, the [`Scheduler`] runs every
//! registered [`Actor`] once, in registration order, collecting narration.
//! The [`machine`] module holds the forward-only state machines that scripted
//! sequences are built from.

/// The actor trait and the per-turn view handed to actors.
pub mod actor;
/// Configuration for the scheduler.
pub mod config;
/// Error types for the scheduling crate.
pub mod error;
/// Reusable forward-only state machines.
pub mod machine;
/// The turn scheduler.
pub mod scheduler;

pub use actor::{Actor, ActorOutcome, Stage, TurnContext};
pub use config::SchedulerConfig;
pub use error::{ScheduleError, ScheduleResult};
pub use machine::{Machine, Transition};
pub use scheduler::{PassReport, Scheduler};
