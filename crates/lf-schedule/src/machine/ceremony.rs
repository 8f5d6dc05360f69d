use super::{Machine, Transition};

/// One stage of a [`Ceremony`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CeremonyStep {
    /// Name of the stage ("doors closing").
    pub label: &'static str,
    /// Turns the stage lasts.
    pub turns: u32,
    /// Whether one interruption is tolerated during this stage.
    pub allowance: bool,
}

impl CeremonyStep {
    /// A stage lasting `turns` with no allowance.
    pub const fn new(label: &'static str, turns: u32) -> Self {
        Self {
            label,
            turns,
            allowance: false,
        }
    }

    /// Tolerate one interruption during this stage.
    pub const fn forgiving(mut self) -> Self {
        self.allowance = true;
        self
    }
}

/// States of a [`Ceremony`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyState {
    /// Not begun.
    NotStarted,
    /// In the stage at this index.
    Stage(usize),
    /// Finished every stage.
    Complete,
    /// Interrupted with no allowance left.
    Failed,
}

/// Triggers for a [`Ceremony`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyTrigger {
    /// Start the first stage.
    Begin,
    /// One turn passes.
    Tick,
    /// The player did something the current stage forbids.
    Interrupt,
}

/// Multi-stage sequence (airlock cycling, a lift ride) where each stage
/// lasts a number of turns and may forgive a single interruption.
#[derive(Debug, Clone)]
pub struct Ceremony {
    steps: Vec<CeremonyStep>,
    state: CeremonyState,
    remaining: u32,
    spent: Vec<bool>,
}

impl Ceremony {
    /// A ceremony over `steps`, not yet begun.
    pub fn new(steps: Vec<CeremonyStep>) -> Self {
        let spent = vec![false; steps.len()];
        Self {
            steps,
            state: CeremonyState::NotStarted,
            remaining: 0,
            spent,
        }
    }

    /// Label of the current stage.
    pub fn stage_label(&self) -> Option<&'static str> {
        match self.state {
            CeremonyState::Stage(i) => self.steps.get(i).map(|s| s.label),
            _ => None,
        }
    }

    /// Whether a stage is in progress.
    pub fn is_running(&self) -> bool {
        matches!(self.state, CeremonyState::Stage(_))
    }

    fn enter(&mut self, index: usize) {
        match self.steps.get(index) {
            Some(step) if step.turns > 0 => {
                self.state = CeremonyState::Stage(index);
                self.remaining = step.turns;
            }
            Some(_) => self.enter(index + 1),
            None => {
                self.state = CeremonyState::Complete;
                self.remaining = 0;
            }
        }
    }
}

impl Machine for Ceremony {
    type State = CeremonyState;
    type Trigger = CeremonyTrigger;

    fn state(&self) -> CeremonyState {
        self.state
    }

    fn progress(&self) -> u64 {
        let stages = self.steps.len() as u64;
        match self.state {
            CeremonyState::NotStarted => 0,
            CeremonyState::Stage(i) => {
                let total = self.steps.get(i).map_or(0, |s| s.turns);
                (i as u64 + 1) * 1_000 + u64::from(total - self.remaining)
            }
            CeremonyState::Complete | CeremonyState::Failed => (stages + 1) * 1_000,
        }
    }

    fn fire(&mut self, trigger: CeremonyTrigger) -> Transition<CeremonyState> {
        let from = self.state;
        match (trigger, from) {
            (CeremonyTrigger::Begin, CeremonyState::NotStarted) => {
                self.enter(0);
                Transition {
                    from,
                    to: self.state,
                    tag: Some("begin"),
                }
            }
            (CeremonyTrigger::Interrupt, CeremonyState::Stage(i)) => {
                let forgiving = self.steps.get(i).is_some_and(|s| s.allowance);
                match self.spent.get_mut(i) {
                    Some(spent) if forgiving && !*spent => {
                        *spent = true;
                        Transition::stay(from).tagged("allowance")
                    }
                    _ => {
                        self.state = CeremonyState::Failed;
                        Transition {
                            from,
                            to: self.state,
                            tag: Some("failed"),
                        }
                    }
                }
            }
            (CeremonyTrigger::Tick, CeremonyState::Stage(i)) => {
                self.remaining = self.remaining.saturating_sub(1);
                if self.remaining > 0 {
                    return Transition::stay(from);
                }
                self.enter(i + 1);
                let tag = if self.state == CeremonyState::Complete {
                    "complete"
                } else {
                    "advanced"
                };
                Transition {
                    from,
                    to: self.state,
                    tag: Some(tag),
                }
            }
            _ => Transition::stay(from),
        }
    }

    fn reset(&mut self) {
        self.state = CeremonyState::NotStarted;
        self.remaining = 0;
        self.spent.iter_mut().for_each(|s| *s = false);
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, CeremonyState::Complete | CeremonyState::Failed)
    }
}
