//! Error types for the engine.

use lf_core::{Capability, CoreError};
use lf_schedule::ScheduleError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Faults raised while running a game.
///
/// None of these are player mistakes: bad input is narrated, not returned as
/// an error. An `EngineError` means the content or the host is broken.
#[derive(Debug, Error)]
pub enum EngineError {
    /// World arena fault.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Scheduler fault.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Two processors claim the same verb, preposition, and capability.
    #[error("processors {existing} and {added} both handle '{verb} .. {preposition}' on {capability}")]
    ProcessorConflict {
        /// Processor already registered.
        existing: &'static str,
        /// Processor being registered.
        added: &'static str,
        /// Shared verb.
        verb: &'static str,
        /// Shared preposition.
        preposition: &'static str,
        /// Shared target capability.
        capability: Capability,
    },

    /// Content wired an item into a role it lacks the capability for.
    #[error("item '{item}' is missing capability {capability}")]
    MissingCapability {
        /// Item key.
        item: String,
        /// Capability the role needs.
        capability: Capability,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O failure reading config or writing a transcript.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
