use std::fmt;

use lf_core::{Direction, ItemId, Verbosity};

/// Commands every location understands the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalCommand {
    /// List what the player carries.
    Inventory,
    /// Describe the surroundings in full.
    Look,
    /// Let a turn pass.
    Wait,
    /// Report score and moves.
    Score,
    /// Read the chronometer.
    Time,
    /// Pick up everything takeable in reach.
    TakeAll,
    /// Put down everything carried.
    DropAll,
}

impl GlobalCommand {
    /// The command's name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Look => "look",
            Self::Wait => "wait",
            Self::Score => "score",
            Self::Time => "time",
            Self::TakeAll => "take all",
            Self::DropAll => "drop all",
        }
    }

    /// Recognize a whole input line.
    pub fn parse(words: &[String]) -> Option<Self> {
        match words.join(" ").as_str() {
            "inventory" | "inv" | "i" => Some(Self::Inventory),
            "look" | "l" | "look around" => Some(Self::Look),
            "wait" | "z" => Some(Self::Wait),
            "score" => Some(Self::Score),
            "time" | "check chronometer" | "look at chronometer" => Some(Self::Time),
            "take all" | "get all" | "take everything" | "get everything" => Some(Self::TakeAll),
            "drop all" | "drop everything" => Some(Self::DropAll),
            _ => None,
        }
    }
}

/// Commands about the session rather than the world. They never consume a
/// turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    /// Change room description verbosity.
    Verbosity(Verbosity),
    /// Leave the game.
    Quit,
    /// Start over without counting a death.
    Restart,
    /// Show a short command summary.
    Help,
    /// Save the game (unsupported).
    Save,
    /// Restore a saved game (unsupported).
    Restore,
    /// Repeat the previous command.
    Again,
}

impl SystemCommand {
    /// Recognize a whole input line.
    pub fn parse(words: &[String]) -> Option<Self> {
        match words.join(" ").as_str() {
            "verbose" => Some(Self::Verbosity(Verbosity::Verbose)),
            "brief" => Some(Self::Verbosity(Verbosity::Brief)),
            "superbrief" => Some(Self::Verbosity(Verbosity::Superbrief)),
            "quit" | "q" => Some(Self::Quit),
            "restart" => Some(Self::Restart),
            "help" | "hint" | "hints" | "commands" => Some(Self::Help),
            "save" => Some(Self::Save),
            "restore" | "load" => Some(Self::Restore),
            "again" | "g" => Some(Self::Again),
            _ => None,
        }
    }
}

/// What kind of intent the parser produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    /// A location-independent command.
    Global(GlobalCommand),
    /// Walk in a direction.
    Movement(Direction),
    /// A verb with up to two noun phrases.
    Action,
}

/// A structured command: verb, nouns, and preposition.
///
/// Noun phrases are stored with fillers removed and pronouns already
/// substituted. They are resolved to items by the dispatch chain, unless a
/// clarification already settled which item a phrase means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// What kind of command this is.
    pub kind: IntentKind,
    /// Canonical verb ("take"). Movement uses "go".
    pub verb: String,
    /// Primary noun phrase.
    pub noun: Option<String>,
    /// Preposition joining a second noun phrase.
    pub preposition: Option<String>,
    /// Secondary noun phrase.
    pub second: Option<String>,
    /// The input line as typed.
    pub raw: String,
    /// Item the primary phrase was settled to.
    pub noun_item: Option<ItemId>,
    /// Item the secondary phrase was settled to.
    pub second_item: Option<ItemId>,
}

impl Intent {
    /// An action with only a verb.
    pub fn action(verb: impl Into<String>) -> Self {
        Self {
            kind: IntentKind::Action,
            verb: verb.into(),
            noun: None,
            preposition: None,
            second: None,
            raw: String::new(),
            noun_item: None,
            second_item: None,
        }
    }

    /// A movement intent.
    pub fn movement(direction: Direction) -> Self {
        Self {
            kind: IntentKind::Movement(direction),
            ..Self::action("go")
        }
    }

    /// A global command.
    pub fn global(command: GlobalCommand) -> Self {
        Self {
            kind: IntentKind::Global(command),
            ..Self::action(command.name())
        }
    }

    /// Set the primary noun.
    pub fn with_noun(mut self, noun: impl Into<String>) -> Self {
        self.noun = Some(noun.into());
        self
    }

    /// Set the preposition and secondary noun.
    pub fn with_second(mut self, preposition: impl Into<String>, second: impl Into<String>) -> Self {
        self.preposition = Some(preposition.into());
        self.second = Some(second.into());
        self
    }

    /// Record the raw input.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    /// Settle a noun slot to a specific item.
    pub fn with_item(mut self, primary: bool, item: ItemId) -> Self {
        if primary {
            self.noun_item = Some(item);
        } else {
            self.second_item = Some(item);
        }
        self
    }

    /// The item a noun slot was settled to, if any.
    pub fn item(&self, primary: bool) -> Option<ItemId> {
        if primary { self.noun_item } else { self.second_item }
    }

    /// Direction for movement intents.
    pub fn direction(&self) -> Option<Direction> {
        match self.kind {
            IntentKind::Movement(dir) => Some(dir),
            _ => None,
        }
    }

    /// Whether the intent names two noun phrases.
    pub fn is_two_noun(&self) -> bool {
        self.noun.is_some() && self.second.is_some()
    }

    /// Whether the verb is `verb`.
    pub fn is(&self, verb: &str) -> bool {
        self.verb == verb
    }

    /// Whether the verb is one of `verbs`.
    pub fn is_any(&self, verbs: &[&str]) -> bool {
        verbs.contains(&self.verb.as_str())
    }

    /// Whether the verb is `verb` and the preposition one of `preps`.
    pub fn is_with(&self, verb: &str, preps: &[&str]) -> bool {
        self.verb == verb
            && self
                .preposition
                .as_deref()
                .is_some_and(|p| preps.contains(&p))
    }
}

impl fmt::Display for Intent {
    /// Canonical text: "put flask in locker".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let IntentKind::Movement(dir) = self.kind {
            return write!(f, "go {dir}");
        }
        f.write_str(&self.verb)?;
        if let Some(noun) = &self.noun {
            write!(f, " {noun}")?;
        }
        if let (Some(prep), Some(second)) = (&self.preposition, &self.second) {
            write!(f, " {prep} {second}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn globals_match_whole_lines() {
        assert_eq!(GlobalCommand::parse(&words("i")), Some(GlobalCommand::Inventory));
        assert_eq!(GlobalCommand::parse(&words("get all")), Some(GlobalCommand::TakeAll));
        assert_eq!(GlobalCommand::parse(&words("look at lamp")), None);
    }

    #[test]
    fn system_commands() {
        assert_eq!(
            SystemCommand::parse(&words("superbrief")),
            Some(SystemCommand::Verbosity(Verbosity::Superbrief))
        );
        assert_eq!(SystemCommand::parse(&words("g")), Some(SystemCommand::Again));
    }

    #[test]
    fn display_is_canonical() {
        let intent = Intent::action("put").with_noun("flask").with_second("in", "locker");
        assert_eq!(intent.to_string(), "put flask in locker");
        assert!(intent.is_with("put", &["in", "into"]));
        assert_eq!(Intent::movement(Direction::North).to_string(), "go north");
    }
}
