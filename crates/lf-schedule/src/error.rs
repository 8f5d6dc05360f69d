use lf_core::{ActorKey, CoreError};

/// Alias for `Result<T, ScheduleError>`.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Faults raised while scheduling actors.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The roster names an actor the scheduler does not know.
    #[error("actor not found in scheduler: {0}")]
    UnknownActor(ActorKey),

    /// Two actors were added under the same key.
    #[error("actor already added: {0}")]
    DuplicateActor(ActorKey),

    /// An actor failed in a way it could not narrate.
    #[error("actor {actor} failed: {message}")]
    Actor {
        /// The failing actor.
        actor: ActorKey,
        /// What went wrong.
        message: String,
    },

    /// World or context fault raised inside an actor.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}
