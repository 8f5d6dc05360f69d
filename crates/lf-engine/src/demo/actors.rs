//! Actors of the demo facility.

use std::any::Any;

use lf_core::{ActorKey, ItemId, LocationId, Owner};
use lf_schedule::machine::{
    Ceremony, CeremonyStep, CeremonyTrigger, Countdown, Ladder, Pursuit, PursuitTrigger, Rung,
};
use lf_schedule::{Actor, ActorOutcome, Machine, ScheduleError, ScheduleResult, TurnContext};
use rand::Rng;

use super::keys;
use crate::game::Game;

/// Narration when the player runs back towards the mutants.
pub const BACKTRACK_DEATH: &str = "You stupidly run right into the jaws of the pursuing mutants.";

/// Narration when the player stands still during the chase.
pub const LINGER_DEATH: &str = "You hesitate a moment too long. The mutants are upon you.";

/// Narration when hunger wins.
pub const STARVED: &str = "You collapse, too weak from hunger to go on.";

fn fault(actor: ActorKey, err: impl std::fmt::Display) -> ScheduleError {
    ScheduleError::Actor {
        actor,
        message: err.to_string(),
    }
}

/// The mutants released from the bio lock.
#[derive(Debug)]
pub struct Chase {
    pursuit: Pursuit<LocationId>,
    lab: LocationId,
    bio_lock: LocationId,
    elevator: LocationId,
}

impl Chase {
    /// A chase that starts in the bio lock and ends in the elevator.
    pub fn new(lab: LocationId, bio_lock: LocationId, elevator: LocationId) -> Self {
        Self {
            pursuit: Pursuit::new().allow_once(bio_lock),
            lab,
            bio_lock,
            elevator,
        }
    }

    /// Whether the mutants are still on the player's heels.
    pub fn is_fleeing(&self) -> bool {
        self.pursuit.is_fleeing()
    }
}

impl Actor<Game> for Chase {
    fn key(&self) -> ActorKey {
        keys::CHASE
    }

    fn act(&mut self, turn: &mut TurnContext<'_, Game>) -> ScheduleResult<ActorOutcome> {
        let ctx = turn.ctx();
        if ctx.take_signal(keys::CHASE_BEGIN) {
            self.pursuit.fire(PursuitTrigger::Begin {
                from: Some(self.lab),
                at: self.bio_lock,
            });
            return Ok(ActorOutcome::Quiet);
        }

        let here = ctx.location();
        if here == self.elevator {
            self.pursuit.fire(PursuitTrigger::Escape);
            ctx.unregister_actor(keys::CHASE);
            return Ok(ActorOutcome::Narrate(
                "The mutants hurl themselves at the mesh, but the cage holds.".to_string(),
            ));
        }

        let transition = self.pursuit.fire(PursuitTrigger::Turn(here));
        Ok(match transition.tag {
            Some("backtrack") => ActorOutcome::Death(BACKTRACK_DEATH.to_string()),
            Some("linger") => ActorOutcome::Death(LINGER_DEATH.to_string()),
            Some("grace") => ActorOutcome::Narrate(
                "Claws scrape against the door behind you. Move!".to_string(),
            ),
            Some("fled") => {
                ActorOutcome::Narrate("Howls echo close behind you.".to_string())
            }
            _ => ActorOutcome::Quiet,
        })
    }

    fn reset(&mut self) {
        self.pursuit.reset();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn hunger() -> Ladder {
    Ladder::new(vec![
        Rung::new("sated", 60),
        Rung::new("peckish", 20),
        Rung::new("hungry", 15),
        Rung::new("starving", 10),
        Rung::new("starved", 0),
    ])
}

fn fatigue() -> Ladder {
    Ladder::new(vec![
        Rung::new("rested", 80),
        Rung::new("tired", 20),
        Rung::new("exhausted", 10),
        Rung::new("spent", 0),
    ])
}

/// Hunger and fatigue.
#[derive(Debug)]
pub struct Vitals {
    hunger: Ladder,
    fatigue: Ladder,
    drowsy: Countdown,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hunger: hunger(),
            fatigue: fatigue(),
            drowsy: Countdown::new(),
        }
    }
}

impl Vitals {
    /// Current hunger level ("sated", "hungry").
    pub fn hunger(&self) -> &'static str {
        self.hunger.label()
    }

    /// Current fatigue level ("rested", "tired").
    pub fn fatigue(&self) -> &'static str {
        self.fatigue.label()
    }

    fn rest(&mut self, now: u64) {
        self.hunger.satisfy(now);
        self.fatigue.satisfy(now);
        self.drowsy.reset();
    }
}

impl Actor<Game> for Vitals {
    fn key(&self) -> ActorKey {
        keys::VITALS
    }

    fn act(&mut self, turn: &mut TurnContext<'_, Game>) -> ScheduleResult<ActorOutcome> {
        let ctx = turn.ctx();
        let now = ctx.moves();
        if ctx.take_signal(keys::ATE) {
            self.hunger.satisfy(now);
        }
        if ctx.take_signal(keys::SLEPT) {
            self.rest(now);
        }

        let mut lines = Vec::new();

        if self.drowsy.tick().tag == Some("fired") {
            ctx.clock_mut().skip_minutes(6 * 60);
            ctx.push_forced("You wake some hours later, stiff but rested.");
            self.rest(now);
            tracing::info!(turn = now, "forced sleep");
            return Ok(ActorOutcome::Narrate(
                "You can't keep your eyes open any longer. You curl up on the floor and sleep."
                    .to_string(),
            ));
        }

        let hunger = self.hunger.tick(now);
        match (hunger.tag, self.hunger.label()) {
            (Some("terminal"), _) => return Ok(ActorOutcome::Death(STARVED.to_string())),
            (Some("escalated"), "peckish") => lines.push("Your stomach rumbles."),
            (Some("escalated"), "hungry") => lines.push("You are getting hungry."),
            (Some("escalated"), "starving") => lines.push("You are starving! Find something to eat."),
            _ => {}
        }

        let fatigue = self.fatigue.tick(now);
        match (fatigue.tag, self.fatigue.label()) {
            (Some("terminal"), _) => {
                self.drowsy.start(2);
                lines.push("Your legs feel like lead. You need to sleep, and soon.");
            }
            (Some("escalated"), "tired") => lines.push("You yawn."),
            (Some("escalated"), "exhausted") => lines.push("You can barely keep your eyes open."),
            _ => {}
        }

        if lines.is_empty() {
            return Ok(ActorOutcome::Quiet);
        }
        Ok(ActorOutcome::Narrate(lines.join(" ")))
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Pip, the maintenance robot that tags along.
#[derive(Debug)]
pub struct Companion {
    pip: ItemId,
    wander: Countdown,
    away: Countdown,
    chance: f64,
}

impl Companion {
    /// A companion for the `pip` item that speaks unprompted with
    /// probability `chance` per turn.
    pub fn new(pip: ItemId, chance: f64) -> Self {
        Self {
            pip,
            wander: Countdown::new(),
            away: Countdown::new(),
            chance,
        }
    }

    /// Whether Pip has wandered off.
    pub fn is_away(&self) -> bool {
        self.away.is_running()
    }
}

impl Actor<Game> for Companion {
    fn key(&self) -> ActorKey {
        keys::PIP
    }

    fn act(&mut self, turn: &mut TurnContext<'_, Game>) -> ScheduleResult<ActorOutcome> {
        let key = self.key();
        let here = turn.stage.ctx.location();
        let asked = turn.stage.ctx.take_signal(keys::PIP_TALK);

        if self.away.is_running() {
            if self.away.tick().tag != Some("fired") {
                return Ok(ActorOutcome::Quiet);
            }
            self.away.reset();
            self.wander.reset();
            turn.stage
                .ctx
                .world_mut()
                .move_item(self.pip, Owner::Location(here))
                .map_err(|e| fault(key, e))?;
            return Ok(ActorOutcome::Narrate(
                "Pip trundles back into view, antenna wobbling.".to_string(),
            ));
        }

        if !self.wander.is_running() {
            let turns = turn.rng.random_range(8..=14);
            self.wander.start(turns);
        }
        if self.wander.tick().tag == Some("fired") {
            let turns = turn.rng.random_range(2..=4);
            self.away.start(turns);
            turn.stage
                .ctx
                .world_mut()
                .move_item(self.pip, Owner::Nowhere)
                .map_err(|e| fault(key, e))?;
            return Ok(ActorOutcome::Narrate(
                "Pip beeps and trundles off on some errand of its own.".to_string(),
            ));
        }

        let world = turn.stage.ctx.world();
        let was = world.item(self.pip).map_err(|e| fault(key, e))?.owner();
        let mut lines = Vec::new();
        if was != Owner::Location(here) {
            turn.stage
                .ctx
                .world_mut()
                .move_item(self.pip, Owner::Location(here))
                .map_err(|e| fault(key, e))?;
            lines.push("Pip trundles in after you.".to_string());
        }

        let chatty = asked || turn.rng.random_bool(self.chance);
        if chatty && turn.stage.ctx.flag_once("pip-spoke") {
            let room = turn
                .stage
                .ctx
                .world()
                .location(here)
                .map_err(|e| fault(key, e))?
                .name
                .clone();
            let prompt = format!(
                "You are Pip, a small maintenance robot. You are in the {room} with the player. \
                 Say one short line."
            );
            let line = turn.stage.speak(&prompt);
            if !line.trim().is_empty() {
                lines.push(format!("Pip says, \"{}\"", line.trim()));
            }
        }

        if lines.is_empty() {
            return Ok(ActorOutcome::Quiet);
        }
        Ok(ActorOutcome::Narrate(lines.join(" ")))
    }

    fn reset(&mut self) {
        self.wander.reset();
        self.away.reset();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The elevator ride from the gantry to the roof.
#[derive(Debug)]
pub struct Lift {
    ride: Ceremony,
    cage: LocationId,
    roof: LocationId,
}

/// Points for reaching the roof.
pub const ROOF_POINTS: u32 = 15;

impl Lift {
    /// A ride in `cage` that ends on `roof`.
    pub fn new(cage: LocationId, roof: LocationId) -> Self {
        Self {
            ride: Ceremony::new(vec![
                CeremonyStep::new("doors closing", 1).forgiving(),
                CeremonyStep::new("rising", 2),
                CeremonyStep::new("arriving", 1),
            ]),
            cage,
            roof,
        }
    }

    /// Label of the stage the ride is in.
    pub fn stage(&self) -> Option<&'static str> {
        self.ride.stage_label()
    }

    fn stop(&mut self, game: &mut Game) -> ScheduleResult<()> {
        let key = keys::LIFT;
        game.ctx
            .world_mut()
            .location_mut(self.cage)
            .map_err(|e| fault(key, e))?
            .attrs
            .set_flag(keys::LIFT_RUNNING, false);
        game.ctx.unregister_actor(key);
        self.ride.reset();
        Ok(())
    }
}

impl Actor<Game> for Lift {
    fn key(&self) -> ActorKey {
        keys::LIFT
    }

    fn act(&mut self, turn: &mut TurnContext<'_, Game>) -> ScheduleResult<ActorOutcome> {
        let game = &mut *turn.stage;
        if game.ctx.take_signal(keys::LIFT_BEGIN) {
            self.ride.fire(CeremonyTrigger::Begin);
            return Ok(ActorOutcome::Quiet);
        }

        if game.ctx.take_signal(keys::LIFT_INTERRUPT) {
            let transition = self.ride.fire(CeremonyTrigger::Interrupt);
            if transition.tag == Some("failed") {
                self.stop(game)?;
                return Ok(ActorOutcome::Narrate(
                    "The doors jam open with a screech. The elevator is going nowhere.".to_string(),
                ));
            }
            return Ok(ActorOutcome::Narrate(
                "The doors shudder but keep closing.".to_string(),
            ));
        }

        let transition = self.ride.fire(CeremonyTrigger::Tick);
        match transition.tag {
            Some("advanced") => {
                let text = match self.ride.stage_label() {
                    Some("rising") => "The cage lurches and begins to rise.",
                    Some("arriving") => "The cage slows, grinding against the shaft.",
                    _ => "The cage rattles.",
                };
                Ok(ActorOutcome::Narrate(text.to_string()))
            }
            Some("complete") => {
                self.stop(game)?;
                game.ctx.add_score(ROOF_POINTS);
                let arrival = game.travel(self.roof).map_err(|e| fault(keys::LIFT, e))?;
                tracing::info!(turn = turn.turn, "lift reached the roof");
                Ok(ActorOutcome::Narrate(format!(
                    "The mesh doors slide open.\n\n{arrival}"
                )))
            }
            _ => Ok(ActorOutcome::Quiet),
        }
    }

    fn reset(&mut self) {
        self.ride.reset();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
