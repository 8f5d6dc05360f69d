use lf_core::{Context, CoreResult, Direction, ItemId, Pending};

use super::intent::{GlobalCommand, Intent, SystemCommand};
use super::lexicon;
use super::resolver::{self, Resolution};

/// Why a line could not be turned into an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// The first word is not a verb, direction, or command.
    UnknownVerb(String),
    /// A transitive verb with nothing to act on.
    MissingNoun(String),
    /// "go" with no direction.
    NoDirection,
    /// A disambiguation prompt ran out of retries.
    Dropped,
}

impl ParseFailure {
    /// What to tell the player.
    pub fn narration(&self) -> String {
        match self {
            Self::UnknownVerb(word) => format!("I don't know the word \"{word}\"."),
            Self::MissingNoun(verb) => format!("What do you want to {verb}?"),
            Self::NoDirection => "Where do you want to go?".to_string(),
            Self::Dropped => "Never mind.".to_string(),
        }
    }
}

/// What the parser made of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// A complete command for the dispatch chain.
    Intent(Intent),
    /// A session command.
    System(SystemCommand),
    /// A question back to the player; the context now holds the pending
    /// clarification.
    Clarify(String),
    /// Unrecognized grammar.
    Failure(ParseFailure),
    /// Nothing but whitespace and punctuation.
    Empty,
}

/// Items already settled for the two noun slots of a command being parsed.
#[derive(Debug, Clone, Copy, Default)]
struct Pins {
    noun: Option<ItemId>,
    second: Option<ItemId>,
}

/// Turns raw input into intents.
///
/// The parser is stateless apart from its retry setting: pronoun referents
/// and outstanding clarifications live on the [`Context`], so they are
/// dropped along with everything else on restart.
#[derive(Debug, Clone)]
pub struct IntentParser {
    retries: u32,
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IntentParser {
    /// A parser that re-asks an unanswerable disambiguation prompt up to
    /// `retries` times before dropping it.
    pub fn new(retries: u32) -> Self {
        Self { retries }
    }

    /// Invalid answers tolerated before a prompt is dropped.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Parse one line.
    ///
    /// When a clarification is outstanding the line is first read as its
    /// answer. A line that is itself a recognizable command cancels the
    /// clarification and is parsed fresh.
    pub fn parse(&self, raw: &str, ctx: &mut Context) -> CoreResult<Parsed> {
        let words = lexicon::normalize(raw);
        if words.is_empty() {
            return Ok(Parsed::Empty);
        }
        let parsed = match ctx.take_pending() {
            Some(pending) => self.answer(pending, raw, words, ctx)?,
            None => self.parse_words(raw, words, ctx)?,
        };
        tracing::debug!(input = raw, parsed = ?parsed, "parsed input");
        Ok(parsed)
    }

    fn answer(
        &self,
        pending: Pending,
        raw: &str,
        words: Vec<String>,
        ctx: &mut Context,
    ) -> CoreResult<Parsed> {
        match pending {
            Pending::Referent { template } => {
                let noun: Vec<&str> = words
                    .iter()
                    .map(String::as_str)
                    .filter(|w| !lexicon::is_filler(w))
                    .collect();
                if is_command(&words) || noun.is_empty() {
                    return self.parse_words(raw, words, ctx);
                }
                let command = template.replace("{}", &noun.join(" "));
                self.parse_words(raw, lexicon::normalize(&command), ctx)
            }
            Pending::Choose {
                candidates,
                template,
                primary,
                pinned,
                retries_left,
            } => {
                if let Some(index) = resolver::pick(&candidates, &words) {
                    let chosen = &candidates[index];
                    let pins = if primary {
                        Pins { noun: Some(chosen.item), second: pinned }
                    } else {
                        Pins { noun: pinned, second: Some(chosen.item) }
                    };
                    let command = template.replace("{}", &chosen.label);
                    return self.parse_pinned(raw, lexicon::normalize(&command), pins, ctx);
                }
                if is_command(&words) {
                    return self.parse_words(raw, words, ctx);
                }
                if retries_left == 0 {
                    return Ok(Parsed::Failure(ParseFailure::Dropped));
                }
                let head = candidates
                    .first()
                    .and_then(|c| c.label.split_whitespace().last())
                    .unwrap_or("one")
                    .to_string();
                let prompt = format!("I didn't catch that. {}", resolver::prompt(&head, &candidates));
                ctx.set_pending(Pending::Choose {
                    candidates,
                    template,
                    primary,
                    pinned,
                    retries_left: retries_left - 1,
                });
                Ok(Parsed::Clarify(prompt))
            }
        }
    }

    fn parse_words(&self, raw: &str, words: Vec<String>, ctx: &mut Context) -> CoreResult<Parsed> {
        self.parse_pinned(raw, words, Pins::default(), ctx)
    }

    fn parse_pinned(
        &self,
        raw: &str,
        words: Vec<String>,
        mut pins: Pins,
        ctx: &mut Context,
    ) -> CoreResult<Parsed> {
        let Some(first) = words.first() else {
            return Ok(Parsed::Empty);
        };
        if let Some(command) = SystemCommand::parse(&words) {
            return Ok(Parsed::System(command));
        }
        if let Some(command) = GlobalCommand::parse(&words) {
            return Ok(Parsed::Intent(Intent::global(command).with_raw(raw)));
        }
        if let Some(dir) = Direction::parse(&words.join(" ")) {
            return Ok(Parsed::Intent(Intent::movement(dir).with_raw(raw)));
        }
        if lexicon::MOTION.contains(&first.as_str()) {
            return Ok(match Direction::parse(&words[1..].join(" ")) {
                Some(dir) => Parsed::Intent(Intent::movement(dir).with_raw(raw)),
                None => Parsed::Failure(ParseFailure::NoDirection),
            });
        }

        let Some((mut verb, used)) = lexicon::leading_verb(&words) else {
            return Ok(Parsed::Failure(ParseFailure::UnknownVerb(first.clone())));
        };
        let mut rest: Vec<String> = words[used..].to_vec();
        lexicon::fold_compound_prepositions(&mut rest);

        let mut referent = None;
        if let Some(pos) = rest.iter().position(|w| lexicon::PRONOUNS.contains(&w.as_str())) {
            let fits = ctx
                .referent()
                .filter(|r| rest[pos] == "it" || r.plural)
                .map(|r| (r.noun.clone(), r.item));
            match fits {
                Some((noun, item)) => {
                    referent = Some((noun.clone(), item));
                    let tail = rest.split_off(pos + 1);
                    rest.pop();
                    rest.extend(noun.split_whitespace().map(String::from));
                    rest.extend(tail);
                }
                None => {
                    let mut template = rest.clone();
                    template[pos] = "{}".to_string();
                    ctx.set_pending(Pending::Referent {
                        template: format!("{verb} {}", template.join(" ")),
                    });
                    return Ok(Parsed::Clarify("What are you referring to?".to_string()));
                }
            }
        }

        if rest.len() >= 2 {
            let last = rest[rest.len() - 1].as_str();
            if let Some((_, _, phrasal)) = lexicon::PARTICLES
                .iter()
                .find(|(base, particle, _)| *base == verb && *particle == last)
            {
                verb = *phrasal;
                rest.pop();
            }
        }

        rest.retain(|w| !lexicon::is_filler(w));
        if rest.first().is_some_and(|w| lexicon::is_preposition(w)) {
            rest.remove(0);
        }

        let split = rest.iter().position(|w| lexicon::is_preposition(w));
        let mut intent = Intent::action(verb).with_raw(raw);
        match split {
            Some(i) if i + 1 < rest.len() => {
                intent = intent
                    .with_noun(rest[..i].join(" "))
                    .with_second(rest[i].clone(), rest[i + 1..].join(" "));
            }
            Some(i) => {
                intent = intent.with_noun(rest[..i].join(" "));
            }
            None if !rest.is_empty() => {
                intent = intent.with_noun(rest.join(" "));
            }
            None => {}
        }

        if intent.noun.is_none() && !lexicon::INTRANSITIVE.contains(&verb) {
            return Ok(Parsed::Failure(ParseFailure::MissingNoun(verb.to_string())));
        }

        // A pronoun means the very item its referent resolved to.
        if let Some((noun, item)) = referent {
            if pins.noun.is_none() && intent.noun.as_deref() == Some(noun.as_str()) {
                pins.noun = Some(item);
            } else if pins.second.is_none() && intent.second.as_deref() == Some(noun.as_str()) {
                pins.second = Some(item);
            }
        }
        if intent.noun.is_some() {
            intent.noun_item = pins.noun;
        }
        if intent.second.is_some() {
            intent.second_item = pins.second;
        }

        if let Some(clarify) = self.check_ambiguity(&intent, ctx)? {
            return Ok(clarify);
        }
        Ok(Parsed::Intent(intent))
    }

    /// Ask the player to choose when a noun phrase matches several items in
    /// reach. Nothing is asked in the dark; the dispatch chain answers that.
    fn check_ambiguity(&self, intent: &Intent, ctx: &mut Context) -> CoreResult<Option<Parsed>> {
        if ctx.is_dark_here()? {
            return Ok(None);
        }
        let slots = [(intent.noun.as_deref(), true), (intent.second.as_deref(), false)];
        for (phrase, primary) in slots {
            let Some(phrase) = phrase else { continue };
            if intent.item(primary).is_some() {
                continue;
            }
            let Resolution::Many(ids) = resolver::resolve(ctx, phrase)? else {
                continue;
            };
            let prompt = ask_to_choose(intent, primary, &ids, self.retries, ctx)?;
            return Ok(Some(Parsed::Clarify(prompt)));
        }
        Ok(None)
    }
}

/// Leave a choice pending on the context and return the prompt. `primary`
/// selects which noun slot the answer fills.
pub(crate) fn ask_to_choose(
    intent: &Intent,
    primary: bool,
    ids: &[ItemId],
    retries: u32,
    ctx: &mut Context,
) -> CoreResult<String> {
    let candidates = resolver::candidates(ctx.world(), ids)?;
    let mut template = intent.clone();
    let slot = if primary { &mut template.noun } else { &mut template.second };
    let phrase = slot.replace("{}".to_string()).unwrap_or_default();
    let prompt = resolver::prompt(&phrase, &candidates);
    ctx.set_pending(Pending::Choose {
        candidates,
        template: template.to_string(),
        primary,
        pinned: intent.item(!primary),
        retries_left: retries,
    });
    Ok(prompt)
}

/// Whether a line reads as a fresh command rather than an answer.
fn is_command(words: &[String]) -> bool {
    SystemCommand::parse(words).is_some()
        || GlobalCommand::parse(words).is_some()
        || Direction::parse(&words.join(" ")).is_some()
        || words.first().is_some_and(|w| lexicon::MOTION.contains(&w.as_str()))
        || lexicon::leading_verb(words).is_some()
}
