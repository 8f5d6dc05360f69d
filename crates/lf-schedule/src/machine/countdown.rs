use super::{Machine, Transition};

/// States of a [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Not started.
    Idle,
    /// Counting down.
    Running {
        /// Turns left before it fires.
        remaining: u32,
    },
    /// Reached zero.
    Fired,
}

/// Countdown to a single event: forced sleep, a closing door, a bomb.
#[derive(Debug, Clone)]
pub struct Countdown {
    state: CountdownState,
    length: u32,
}

impl Countdown {
    /// An idle countdown.
    pub fn new() -> Self {
        Self {
            state: CountdownState::Idle,
            length: 0,
        }
    }

    /// Start counting `turns` down. Ignored unless idle.
    pub fn start(&mut self, turns: u32) -> Transition<CountdownState> {
        let from = self.state;
        if from != CountdownState::Idle {
            return Transition::stay(from);
        }
        self.length = turns;
        self.state = if turns == 0 {
            CountdownState::Fired
        } else {
            CountdownState::Running { remaining: turns }
        };
        let t = Transition {
            from,
            to: self.state,
            tag: None,
        };
        if self.state == CountdownState::Fired {
            t.tagged("fired")
        } else {
            t.tagged("started")
        }
    }

    /// Count one turn.
    pub fn tick(&mut self) -> Transition<CountdownState> {
        let from = self.state;
        let CountdownState::Running { remaining } = from else {
            return Transition::stay(from);
        };
        if remaining <= 1 {
            self.state = CountdownState::Fired;
            return Transition {
                from,
                to: self.state,
                tag: Some("fired"),
            };
        }
        self.state = CountdownState::Running {
            remaining: remaining - 1,
        };
        Transition {
            from,
            to: self.state,
            tag: None,
        }
    }

    /// Turns left, if running.
    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            CountdownState::Running { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Whether it is counting.
    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    /// Whether it has fired.
    pub fn is_fired(&self) -> bool {
        self.state == CountdownState::Fired
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine for Countdown {
    type State = CountdownState;
    type Trigger = Option<u32>;

    fn state(&self) -> CountdownState {
        self.state
    }

    fn progress(&self) -> u64 {
        match self.state {
            CountdownState::Idle => 0,
            CountdownState::Running { remaining } => 1 + u64::from(self.length - remaining),
            CountdownState::Fired => u64::from(self.length) + 1,
        }
    }

    /// `Some(n)` starts an `n`-turn countdown; `None` ticks.
    fn fire(&mut self, trigger: Option<u32>) -> Transition<CountdownState> {
        match trigger {
            Some(turns) => self.start(turns),
            None => self.tick(),
        }
    }

    fn reset(&mut self) {
        self.state = CountdownState::Idle;
        self.length = 0;
    }

    fn is_terminal(&self) -> bool {
        self.is_fired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_fires_once() {
        let mut cd = Countdown::new();
        cd.start(3);
        assert_eq!(cd.remaining(), Some(3));
        assert_eq!(cd.tick().tag, None);
        assert_eq!(cd.tick().tag, None);
        let fired = cd.tick();
        assert_eq!(fired.tag, Some("fired"));
        assert!(cd.is_fired());
        assert!(!cd.tick().changed());
    }

    #[test]
    fn start_is_ignored_while_running() {
        let mut cd = Countdown::new();
        cd.start(2);
        cd.tick();
        assert!(!cd.start(10).changed());
        assert_eq!(cd.remaining(), Some(1));
    }

    #[test]
    fn zero_length_fires_immediately() {
        let mut cd = Countdown::new();
        assert_eq!(cd.start(0).to, CountdownState::Fired);
    }

    #[test]
    fn reset_is_the_only_way_back() {
        let mut cd = Countdown::new();
        cd.start(1);
        cd.tick();
        assert!(cd.is_fired());
        cd.reset();
        assert_eq!(cd.state(), CountdownState::Idle);
        assert_eq!(cd.start(2).to, CountdownState::Running { remaining: 2 });
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut cd = Countdown::new();
        assert!(!cd.tick().changed());
        assert_eq!(cd.progress(), 0);
    }
}
