//! Session transcript: every input line and the narration it produced.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;

/// One input line and its response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// Moves consumed in the current life when the line was entered.
    pub turn: u64,
    /// What the player typed.
    pub input: String,
    /// What the game answered.
    pub output: String,
    /// When the line was processed.
    pub at: DateTime<Utc>,
}

/// A chronological log of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Session identifier.
    pub session: Uuid,
    /// When the session started.
    pub started: DateTime<Utc>,
    exchanges: Vec<Exchange>,
}

impl Transcript {
    /// An empty transcript for `session`.
    pub fn new(session: Uuid) -> Self {
        Self {
            session,
            started: Utc::now(),
            exchanges: Vec::new(),
        }
    }

    /// Append an exchange stamped with the current time.
    pub fn record(&mut self, turn: u64, input: impl Into<String>, output: impl Into<String>) {
        self.exchanges.push(Exchange {
            turn,
            input: input.into(),
            output: output.into(),
            at: Utc::now(),
        });
    }

    /// All exchanges in order.
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Number of exchanges.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a transcript back from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Plain-text rendering in the style of a play session.
    pub fn export_text(&self) -> String {
        let mut out = format!("Session {} started {}\n", self.session, self.started.to_rfc3339());
        for exchange in &self.exchanges {
            out.push_str(&format!("\n> {}\n{}\n", exchange.input, exchange.output));
        }
        out
    }

    /// Write JSON to `path`, or plain text when the extension is `.txt`.
    pub fn write_to(&self, path: &Path) -> EngineResult<()> {
        let body = if path.extension().is_some_and(|ext| ext == "txt") {
            self.export_text()
        } else {
            self.to_json()?
        };
        std::fs::write(path, body)?;
        tracing::info!(path = %path.display(), exchanges = self.len(), "transcript written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut t = Transcript::new(Uuid::new_v4());
        t.record(0, "look", "Dormitory");
        t.record(1, "n", "Corridor");
        assert_eq!(t.len(), 2);
        assert_eq!(t.exchanges()[1].input, "n");
    }

    #[test]
    fn json_survives_a_round_trip() {
        let mut t = Transcript::new(Uuid::new_v4());
        t.record(3, "take lantern", "Taken.");
        let back = Transcript::from_json(&t.to_json().unwrap()).unwrap();
        assert_eq!(back.session, t.session);
        assert_eq!(back.exchanges(), t.exchanges());
    }

    #[test]
    fn writes_text_or_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = Transcript::new(Uuid::new_v4());
        t.record(0, "wait", "Time passes.");

        let txt = dir.path().join("play.txt");
        t.write_to(&txt).unwrap();
        assert!(std::fs::read_to_string(&txt).unwrap().contains("> wait\nTime passes."));

        let json = dir.path().join("play.json");
        t.write_to(&json).unwrap();
        assert!(Transcript::from_json(&std::fs::read_to_string(&json).unwrap()).is_ok());
    }
}
