use lf_core::ActorKey;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::actor::{Actor, ActorOutcome, Stage, TurnContext};
use crate::config::SchedulerConfig;
use crate::error::{ScheduleError, ScheduleResult};

/// What one scheduler pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Narration from each actor that spoke, in run order.
    pub narration: Vec<String>,
    /// Set when an actor killed the player; later actors did not run.
    pub death: Option<String>,
    /// Actors that ran, in order.
    pub ran: Vec<ActorKey>,
}

/// Runs every registered actor once per consumed turn.
///
/// The scheduler owns the actors; the [`Context`](lf_core::Context) roster
/// decides which of them are active. At the start of a pass the roster's
/// queued changes are committed and the active list is snapshotted, so an
/// actor that (un)registers another mid-pass only affects the next pass.
pub struct Scheduler<S: ?Sized> {
    actors: Vec<Box<dyn Actor<S>>>,
    rng: StdRng,
    config: SchedulerConfig,
    passes: u64,
}

impl<S: ?Sized> std::fmt::Debug for Scheduler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("actors", &self.actors.len())
            .field("passes", &self.passes)
            .field("strict", &self.config.strict)
            .finish()
    }
}

impl<S: Stage + ?Sized> Scheduler<S> {
    /// Create an empty scheduler.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            actors: Vec::new(),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            passes: 0,
        }
    }

    /// Make an actor known to the scheduler. It only runs once its key is
    /// registered in the context roster.
    pub fn add_actor<A: Actor<S> + 'static>(&mut self, actor: A) -> ScheduleResult<()> {
        self.add_boxed(Box::new(actor))
    }

    /// [`add_actor`](Self::add_actor) for an actor that is already boxed.
    pub fn add_boxed(&mut self, actor: Box<dyn Actor<S>>) -> ScheduleResult<()> {
        let key = actor.key();
        if self.actors.iter().any(|a| a.key() == key) {
            return Err(ScheduleError::DuplicateActor(key));
        }
        self.actors.push(actor);
        Ok(())
    }

    /// Beginning-of-turn hook: clears one-shot per-turn flags on the context
    /// and on every actor. Runs before each dispatched action, including ones
    /// that turn out not to consume a turn.
    pub fn begin_turn(&mut self, stage: &mut S) {
        stage.context_mut().clear_turn_flags();
        for actor in &mut self.actors {
            actor.begin_turn();
        }
    }

    /// Run one pass over the active actors.
    pub fn run_pass(&mut self, stage: &mut S) -> ScheduleResult<PassReport> {
        let roster = stage.context_mut().roster_mut();
        roster.commit();
        let snapshot: Vec<ActorKey> = roster.active().to_vec();
        let turn = stage.context().moves();
        self.passes += 1;

        let mut report = PassReport::default();
        for key in snapshot {
            let Some(actor) = self.actors.iter_mut().find(|a| a.key() == key) else {
                if self.config.strict {
                    return Err(ScheduleError::UnknownActor(key));
                }
                tracing::warn!(actor = %key, "skipping unknown actor");
                continue;
            };
            let mut turn_ctx = TurnContext {
                stage: &mut *stage,
                rng: &mut self.rng,
                turn,
            };
            let outcome = actor.act(&mut turn_ctx)?;
            report.ran.push(key);
            match outcome {
                ActorOutcome::Quiet => {}
                ActorOutcome::Narrate(text) => {
                    if !text.trim().is_empty() {
                        report.narration.push(text);
                    }
                }
                ActorOutcome::Death(text) => {
                    tracing::info!(actor = %key, turn, "actor killed the player");
                    report.death = Some(text);
                    break;
                }
            }
        }
        tracing::debug!(turn, ran = report.ran.len(), "scheduler pass complete");
        Ok(report)
    }

    /// Restore every actor to its initial state.
    pub fn reset(&mut self) {
        for actor in &mut self.actors {
            actor.reset();
        }
    }

    /// Access an actor by downcasting to a concrete type.
    pub fn get_actor<T: Actor<S> + 'static>(&self) -> Option<&T> {
        self.actors
            .iter()
            .find_map(|a| a.as_any().downcast_ref::<T>())
    }

    /// Access an actor mutably by downcasting to a concrete type.
    pub fn get_actor_mut<T: Actor<S> + 'static>(&mut self) -> Option<&mut T> {
        self.actors
            .iter_mut()
            .find_map(|a| a.as_any_mut().downcast_mut::<T>())
    }

    /// Keys of every known actor, in the order they were added.
    pub fn actor_keys(&self) -> Vec<ActorKey> {
        self.actors.iter().map(|a| a.key()).collect()
    }

    /// Number of passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
