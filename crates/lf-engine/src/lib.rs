//! The Lanternfall engine: free-text commands in, narration out.
//!
//! A [`GameSession`] runs one turn per input line. The [`IntentParser`]
//! turns the line into an [`Intent`] (or asks a clarifying question), the
//! [`DispatchChain`] resolves it against global commands, movement, content
//! hooks, and capability defaults, and if the action consumed a turn the
//! scheduler runs every registered actor once. Content packs plug in through
//! [`Content`]; [`demo`] is a complete one.

/// Engine configuration.
pub mod config;
pub mod content;
pub mod demo;
pub mod dispatch;
pub mod error;
/// Game state shared by the dispatch chain and the actors.
pub mod game;
pub mod parser;
pub mod session;
pub mod speech;
pub mod text;
pub mod transcript;

pub use config::EngineConfig;
pub use content::{Content, ItemHook, LocationHook};
pub use dispatch::{DispatchChain, InteractionResult, Miss, ProcessorRegistry, TwoItemProcessor};
pub use error::{EngineError, EngineResult};
pub use game::Game;
pub use parser::{Intent, IntentParser, Parsed};
pub use session::{GameSession, Pack, Turn, TurnOutcome};
pub use speech::{CannedSpeech, CompanionSpeech, Silent};
pub use transcript::{Exchange, Transcript};
