//! Intent parsing: vocabulary, noun resolution, and clarification.

mod intent;
pub mod lexicon;
mod parse;
pub mod resolver;

pub use intent::{GlobalCommand, Intent, IntentKind, SystemCommand};
pub(crate) use parse::ask_to_choose;
pub use parse::{IntentParser, ParseFailure, Parsed};
pub use resolver::Resolution;
