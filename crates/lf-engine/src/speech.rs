//! Companion speech: the seam where a companion character's lines come
//! from.

use std::fmt;

/// Produces a companion's line for a prompt describing the situation.
///
/// The engine treats the result as opaque text. An empty string means the
/// companion stays quiet this turn.
pub trait CompanionSpeech: fmt::Debug {
    /// A line for `prompt`.
    fn speak(&mut self, prompt: &str) -> String;
}

/// Cycles through a fixed set of lines, ignoring the prompt.
#[derive(Debug, Clone)]
pub struct CannedSpeech {
    lines: Vec<String>,
    next: usize,
}

impl CannedSpeech {
    /// Speech that cycles through `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl Default for CannedSpeech {
    fn default() -> Self {
        Self::new([
            "Beep. This place gives me the creeps.",
            "I detect no immediate danger. Probably.",
            "Have you tried looking at things? Looking is good.",
            "My sensors say it is very quiet. Too quiet.",
            "Whirr. Click. I am ready when you are.",
        ])
    }
}

impl CompanionSpeech for CannedSpeech {
    fn speak(&mut self, _prompt: &str) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let line = self.lines[self.next % self.lines.len()].clone();
        self.next += 1;
        line
    }
}

/// A companion that never says anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl CompanionSpeech for Silent {
    fn speak(&mut self, _prompt: &str) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_lines_cycle() {
        let mut speech = CannedSpeech::new(["one", "two"]);
        assert_eq!(speech.speak("x"), "one");
        assert_eq!(speech.speak("x"), "two");
        assert_eq!(speech.speak("x"), "one");
    }

    #[test]
    fn empty_speech_is_quiet() {
        assert_eq!(CannedSpeech::new(Vec::<String>::new()).speak("x"), "");
        assert_eq!(Silent.speak("x"), "");
    }
}
