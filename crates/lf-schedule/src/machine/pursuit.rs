use std::collections::HashSet;
use std::hash::Hash;

use super::{Machine, Transition};

/// How a pursuit ended badly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caught {
    /// Ran back into the room just left.
    Backtracked,
    /// Stayed put with no grace left.
    Lingered,
}

/// States of a [`Pursuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitState {
    /// Nothing is chasing.
    Idle,
    /// Being chased.
    Fleeing,
    /// Terminal failure.
    Caught(Caught),
    /// Terminal success.
    Escaped,
}

/// Triggers for a [`Pursuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitTrigger<K> {
    /// The chase starts in `at`; `from` is where the player came from and
    /// counts as backtracking.
    Begin {
        /// Room the player just left, if any.
        from: Option<K>,
        /// Room the chase starts in.
        at: K,
    },
    /// End of a turn with the player in this room.
    Turn(K),
    /// The player reached safety.
    Escape,
}

/// Pursue/escape tracker.
///
/// Each turn the backtrack and linger checks run as a precondition, before
/// the trail is advanced. A room may grant one free turn of lingering
/// (a one-time allowance) via [`Pursuit::allow_once`].
#[derive(Debug, Clone)]
pub struct Pursuit<K> {
    state: PursuitState,
    last: Option<K>,
    previous: Option<K>,
    graces: HashSet<K>,
    spent: HashSet<K>,
    turns: u32,
}

impl<K: Copy + Eq + Hash> Pursuit<K> {
    /// An idle pursuit.
    pub fn new() -> Self {
        Self {
            state: PursuitState::Idle,
            last: None,
            previous: None,
            graces: HashSet::new(),
            spent: HashSet::new(),
            turns: 0,
        }
    }

    /// Grant one free turn of lingering in `room`.
    pub fn allow_once(mut self, room: K) -> Self {
        self.graces.insert(room);
        self
    }

    /// Room the player was in at the end of the last turn.
    pub fn last_room(&self) -> Option<K> {
        self.last
    }

    /// Room before that.
    pub fn previous_room(&self) -> Option<K> {
        self.previous
    }

    /// Turns survived since the chase began.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Whether the chase is on.
    pub fn is_fleeing(&self) -> bool {
        self.state == PursuitState::Fleeing
    }

    fn observe(&mut self, room: K) -> Transition<PursuitState> {
        let from = self.state;
        if from != PursuitState::Fleeing {
            return Transition::stay(from);
        }

        // Preconditions first: a disallowed move is itself the transition.
        if Some(room) == self.previous {
            self.state = PursuitState::Caught(Caught::Backtracked);
            return Transition {
                from,
                to: self.state,
                tag: Some("backtrack"),
            };
        }
        if Some(room) == self.last {
            if self.graces.contains(&room) && self.spent.insert(room) {
                self.turns += 1;
                return Transition::stay(from).tagged("grace");
            }
            self.state = PursuitState::Caught(Caught::Lingered);
            return Transition {
                from,
                to: self.state,
                tag: Some("linger"),
            };
        }

        self.previous = self.last;
        self.last = Some(room);
        self.turns += 1;
        Transition::stay(from).tagged("fled")
    }
}

impl<K: Copy + Eq + Hash> Default for Pursuit<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> Machine for Pursuit<K> {
    type State = PursuitState;
    type Trigger = PursuitTrigger<K>;

    fn state(&self) -> PursuitState {
        self.state
    }

    fn progress(&self) -> u64 {
        match self.state {
            PursuitState::Idle => 0,
            PursuitState::Fleeing => 1,
            PursuitState::Caught(_) | PursuitState::Escaped => 2,
        }
    }

    fn fire(&mut self, trigger: PursuitTrigger<K>) -> Transition<PursuitState> {
        let from = self.state;
        match trigger {
            PursuitTrigger::Begin { from: came_from, at } => {
                if from != PursuitState::Idle {
                    return Transition::stay(from);
                }
                self.state = PursuitState::Fleeing;
                self.previous = came_from;
                self.last = Some(at);
                self.turns = 0;
                Transition {
                    from,
                    to: self.state,
                    tag: Some("begin"),
                }
            }
            PursuitTrigger::Turn(room) => self.observe(room),
            PursuitTrigger::Escape => {
                if from != PursuitState::Fleeing {
                    return Transition::stay(from);
                }
                self.state = PursuitState::Escaped;
                Transition {
                    from,
                    to: self.state,
                    tag: Some("escaped"),
                }
            }
        }
    }

    fn reset(&mut self) {
        self.state = PursuitState::Idle;
        self.last = None;
        self.previous = None;
        self.spent.clear();
        self.turns = 0;
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, PursuitState::Caught(_) | PursuitState::Escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chase() -> Pursuit<u8> {
        let mut p = Pursuit::new().allow_once(2);
        p.fire(PursuitTrigger::Begin { from: Some(1), at: 2 });
        p
    }

    #[test]
    fn fleeing_forward_survives() {
        let mut p = chase();
        assert_eq!(p.fire(PursuitTrigger::Turn(3)).tag, Some("fled"));
        assert_eq!(p.fire(PursuitTrigger::Turn(4)).tag, Some("fled"));
        assert!(p.is_fleeing());
        assert_eq!(p.turns(), 2);
        assert_eq!(p.previous_room(), Some(3));
    }

    #[test]
    fn backtracking_is_caught() {
        let mut p = chase();
        p.fire(PursuitTrigger::Turn(3));
        let t = p.fire(PursuitTrigger::Turn(2));
        assert_eq!(t.to, PursuitState::Caught(Caught::Backtracked));
        assert!(p.is_terminal());
    }

    #[test]
    fn backtracking_to_entry_room_is_caught() {
        let mut p = chase();
        let t = p.fire(PursuitTrigger::Turn(1));
        assert_eq!(t.to, PursuitState::Caught(Caught::Backtracked));
    }

    #[test]
    fn grace_allows_one_pause() {
        let mut p = chase();
        assert_eq!(p.fire(PursuitTrigger::Turn(2)).tag, Some("grace"));
        let t = p.fire(PursuitTrigger::Turn(2));
        assert_eq!(t.to, PursuitState::Caught(Caught::Lingered));
    }

    #[test]
    fn lingering_without_grace_is_caught() {
        let mut p = chase();
        p.fire(PursuitTrigger::Turn(3));
        let t = p.fire(PursuitTrigger::Turn(3));
        assert_eq!(t.tag, Some("linger"));
    }

    #[test]
    fn escape_is_terminal() {
        let mut p = chase();
        p.fire(PursuitTrigger::Turn(3));
        assert_eq!(p.fire(PursuitTrigger::Escape).to, PursuitState::Escaped);
        assert!(!p.fire(PursuitTrigger::Turn(2)).changed());
    }

    #[test]
    fn reset_restores_graces() {
        let mut p = chase();
        p.fire(PursuitTrigger::Turn(2));
        p.reset();
        assert_eq!(p.state(), PursuitState::Idle);
        p.fire(PursuitTrigger::Begin { from: None, at: 2 });
        assert_eq!(p.fire(PursuitTrigger::Turn(2)).tag, Some("grace"));
    }
}
