use super::{Machine, Transition};

/// One level of an escalating ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rung {
    /// Name of the level ("hungry").
    pub label: &'static str,
    /// Turns spent on this level before escalating. Ignored on the last rung.
    pub lasts: u64,
}

impl Rung {
    /// A rung that escalates after `lasts` turns.
    pub const fn new(label: &'static str, lasts: u64) -> Self {
        Self { label, lasts }
    }
}

/// Escalating-warning ladder: hunger, fatigue, oxygen.
///
/// Climbs at most one rung per tick once the current rung's threshold has
/// passed. The last rung is terminal. [`Ladder::satisfy`] drops back to the
/// bottom (eating, sleeping); nothing else moves it down.
#[derive(Debug, Clone)]
pub struct Ladder {
    rungs: Vec<Rung>,
    level: usize,
    entered_at: u64,
    now: u64,
}

impl Ladder {
    /// A ladder standing on its first rung at time zero.
    pub fn new(rungs: Vec<Rung>) -> Self {
        Self {
            rungs,
            level: 0,
            entered_at: 0,
            now: 0,
        }
    }

    /// Observe the clock; escalate if the current rung has run out.
    pub fn tick(&mut self, now: u64) -> Transition<usize> {
        self.now = now;
        let from = self.level;
        if self.is_terminal() {
            return Transition::stay(from);
        }
        let Some(rung) = self.rungs.get(self.level) else {
            return Transition::stay(from);
        };
        if now < self.entered_at + rung.lasts {
            return Transition::stay(from);
        }
        self.level += 1;
        self.entered_at = now;
        let t = Transition {
            from,
            to: self.level,
            tag: Some("escalated"),
        };
        if self.is_terminal() {
            t.tagged("terminal")
        } else {
            t
        }
    }

    /// Drop back to the first rung and restart its timer at `now`.
    pub fn satisfy(&mut self, now: u64) -> Transition<usize> {
        let from = self.level;
        self.now = now;
        self.level = 0;
        self.entered_at = now;
        Transition {
            from,
            to: 0,
            tag: Some("satisfied"),
        }
    }

    /// Current rung index.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Label of the current rung.
    pub fn label(&self) -> &'static str {
        self.rungs.get(self.level).map_or("", |r| r.label)
    }

    /// Turns until the next escalation, if one is coming.
    pub fn turns_until_next(&self, now: u64) -> Option<u64> {
        if self.is_terminal() {
            return None;
        }
        let rung = self.rungs.get(self.level)?;
        Some((self.entered_at + rung.lasts).saturating_sub(now))
    }
}

impl Machine for Ladder {
    type State = usize;
    type Trigger = u64;

    fn state(&self) -> usize {
        self.level
    }

    fn progress(&self) -> u64 {
        self.level as u64
    }

    fn fire(&mut self, now: u64) -> Transition<usize> {
        self.tick(now)
    }

    fn reset(&mut self) {
        self.level = 0;
        self.entered_at = self.now;
    }

    fn is_terminal(&self) -> bool {
        self.level + 1 >= self.rungs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunger() -> Ladder {
        Ladder::new(vec![
            Rung::new("fed", 10),
            Rung::new("hungry", 5),
            Rung::new("faint", 3),
            Rung::new("starved", 0),
        ])
    }

    #[test]
    fn escalates_on_thresholds() {
        let mut ladder = hunger();
        assert!(!ladder.tick(9).changed());
        assert_eq!(ladder.tick(10).to, 1);
        assert_eq!(ladder.label(), "hungry");
        assert!(!ladder.tick(14).changed());
        assert_eq!(ladder.tick(15).to, 2);
        let last = ladder.tick(18);
        assert_eq!(last.to, 3);
        assert_eq!(last.tag, Some("terminal"));
        assert!(ladder.is_terminal());
    }

    #[test]
    fn climbs_one_rung_per_tick() {
        let mut ladder = hunger();
        assert_eq!(ladder.tick(100).to, 1);
        assert_eq!(ladder.tick(100).to, 1);
        assert_eq!(ladder.tick(105).to, 2);
    }

    #[test]
    fn satisfy_restarts_from_now() {
        let mut ladder = hunger();
        ladder.tick(10);
        ladder.satisfy(12);
        assert_eq!(ladder.level(), 0);
        assert!(!ladder.tick(21).changed());
        assert_eq!(ladder.tick(22).to, 1);
    }

    #[test]
    fn turns_until_next() {
        let mut ladder = hunger();
        assert_eq!(ladder.turns_until_next(4), Some(6));
        ladder.tick(10);
        assert_eq!(ladder.turns_until_next(10), Some(5));
    }

    #[test]
    fn terminal_rung_never_moves() {
        let mut ladder = Ladder::new(vec![Rung::new("dead", 0)]);
        assert!(ladder.is_terminal());
        assert!(!ladder.tick(1000).changed());
    }
}
