/// Why no handler claimed an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    /// Nothing in the chain recognized the command.
    Unclaimed,
    /// The noun names nothing in reach.
    NotHere(String),
    /// The noun is here but the verb does nothing to it.
    Pointless {
        /// Canonical verb.
        verb: String,
        /// The item's name with its article ("the spout").
        target: String,
    },
}

impl Miss {
    /// The canonical "nothing happens" narration.
    pub fn narration(&self) -> String {
        match self {
            Self::Unclaimed => "I don't understand that.".to_string(),
            Self::NotHere(noun) => format!("You don't see any {noun} here."),
            Self::Pointless { verb, target } => format!("You can't {verb} {target}."),
        }
    }
}

/// The outcome of running one intent through the dispatch chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionResult {
    /// A handler claimed the intent; the turn is consumed.
    Positive(String),
    /// No handler claimed it; no turn passes.
    NoMatch(Miss),
    /// The player died.
    Death(String),
    /// A handler needs the player to pick one of several things. No turn
    /// passes; the pending clarification is already on the context.
    Disambiguation(String),
}

impl InteractionResult {
    /// A claimed result.
    pub fn positive(text: impl Into<String>) -> Self {
        Self::Positive(text.into())
    }

    /// An unclaimed result.
    pub fn unclaimed() -> Self {
        Self::NoMatch(Miss::Unclaimed)
    }

    /// A death.
    pub fn death(text: impl Into<String>) -> Self {
        Self::Death(text.into())
    }

    /// Whether a handler definitively claimed the intent, ending the chain.
    pub fn is_definitive(&self) -> bool {
        !matches!(self, Self::NoMatch(_))
    }

    /// Whether the result consumes a turn.
    pub fn consumes_turn(&self) -> bool {
        matches!(self, Self::Positive(_) | Self::Death(_))
    }

    /// Narration for the player.
    pub fn narration(&self) -> String {
        match self {
            Self::Positive(text) | Self::Death(text) | Self::Disambiguation(text) => text.clone(),
            Self::NoMatch(miss) => miss.narration(),
        }
    }
}
