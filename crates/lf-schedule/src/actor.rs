use lf_core::{ActorKey, Context};
use rand::rngs::StdRng;

use crate::error::ScheduleResult;

/// Host state the scheduler runs actors against.
///
/// The engine implements this for its game state so actors can reach both
/// the [`Context`] and whatever else the host owns (location hooks, a speech
/// collaborator).
pub trait Stage {
    /// The player context.
    fn context(&self) -> &Context;

    /// The player context, mutably.
    fn context_mut(&mut self) -> &mut Context;
}

/// What one actor produced on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorOutcome {
    /// Nothing to report.
    Quiet,
    /// Narration to append to the turn.
    Narrate(String),
    /// The player died; the rest of the pass is skipped.
    Death(String),
}

/// Mutable view handed to an actor for one turn.
pub struct TurnContext<'a, S: ?Sized> {
    /// Host state.
    pub stage: &'a mut S,
    /// Deterministic RNG shared by all actors.
    pub rng: &'a mut StdRng,
    /// Turn number being played.
    pub turn: u64,
}

impl<S: Stage + ?Sized> TurnContext<'_, S> {
    /// Shorthand for the player context.
    pub fn ctx(&mut self) -> &mut Context {
        self.stage.context_mut()
    }
}

/// An autonomous world entity that acts once per consumed turn.
///
/// Actors run in registration order. Each one sees the mutations made by
/// the player's action and by actors earlier in the same pass.
pub trait Actor<S: ?Sized>: std::fmt::Debug {
    /// Roster key this actor registers under.
    fn key(&self) -> ActorKey;

    /// Called once per pass while the actor is registered.
    fn act(&mut self, turn: &mut TurnContext<'_, S>) -> ScheduleResult<ActorOutcome>;

    /// Called before every dispatched action, registered or not, whether or
    /// not the action ends up consuming a turn. Clears one-shot per-turn
    /// state.
    fn begin_turn(&mut self) {}

    /// Restore the actor to its initial state after a death.
    fn reset(&mut self) {}

    /// Support downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Support downcasting to concrete types.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
