//! The reusable enum-state plus countdown idiom behind every scripted
//! sequence.
//!
//! Each machine holds an explicit state, moves forward only, and returns a
//! [`Transition`] from every trigger. Earlier states are reachable only
//! through [`Machine::reset`]. Narration and side effects belong to the
//! content that owns the machine: it inspects the transition (and its tag)
//! and decides what to say and do.

mod ceremony;
mod countdown;
mod ladder;
mod pursuit;

pub use ceremony::{Ceremony, CeremonyState, CeremonyStep, CeremonyTrigger};
pub use countdown::{Countdown, CountdownState};
pub use ladder::{Ladder, Rung};
pub use pursuit::{Caught, Pursuit, PursuitState, PursuitTrigger};

/// The result of firing a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    /// State before the trigger.
    pub from: S,
    /// State after the trigger.
    pub to: S,
    /// Short machine-level tag for what happened ("fired", "grace").
    pub tag: Option<&'static str>,
}

impl<S: PartialEq> Transition<S> {
    /// A transition that left the state where it was.
    pub fn stay(state: S) -> Self
    where
        S: Copy,
    {
        Self {
            from: state,
            to: state,
            tag: None,
        }
    }

    /// Whether the state changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Attach a tag.
    pub fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// A forward-only finite state machine.
pub trait Machine {
    /// The explicit state.
    type State: Copy + PartialEq + std::fmt::Debug;
    /// What drives it.
    type Trigger;

    /// Current state.
    fn state(&self) -> Self::State;

    /// Monotone rank of the current state; never decreases between resets.
    fn progress(&self) -> u64;

    /// Apply a trigger.
    fn fire(&mut self, trigger: Self::Trigger) -> Transition<Self::State>;

    /// Return to the initial state. The only way backwards.
    fn reset(&mut self);

    /// Whether no further trigger can change the state.
    fn is_terminal(&self) -> bool;
}
