/// Tracks game time: a monotonic turn counter and an in-game chronometer.
///
/// Time only moves when a turn is consumed; nothing here reads the wall clock.
#[derive(Debug, Clone)]
pub struct GameClock {
    turn: u64,
    minutes: u64,
    minutes_per_turn: u64,
}

impl GameClock {
    /// Create a clock at turn 0 showing `start_minutes` past midnight.
    pub fn new(start_minutes: u64, minutes_per_turn: u64) -> Self {
        Self {
            turn: 0,
            minutes: start_minutes,
            minutes_per_turn,
        }
    }

    /// Advance by one turn. Returns the new turn number.
    pub fn advance(&mut self) -> u64 {
        self.turn += 1;
        self.minutes += self.minutes_per_turn;
        self.turn
    }

    /// Skip the chronometer forward without consuming turns (sleeping).
    pub fn skip_minutes(&mut self, minutes: u64) {
        self.minutes += minutes;
    }

    /// Turns consumed so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Minutes on the chronometer since the start of day one.
    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Day number, starting at 1.
    pub fn day(&self) -> u64 {
        self.minutes / (24 * 60) + 1
    }

    /// Chronometer reading as `HH:MM`.
    pub fn reading(&self) -> String {
        let of_day = self.minutes % (24 * 60);
        format!("{:02}:{:02}", of_day / 60, of_day % 60)
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(8 * 60, 54)
    }
}
