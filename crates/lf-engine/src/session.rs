//! A playable session: parse, dispatch, schedule, and compose narration.

use lf_core::{Context, LocationId, Verbosity, World};
use lf_schedule::{Actor, Scheduler};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::content::Content;
use crate::dispatch::{DispatchChain, InteractionResult};
use crate::error::EngineResult;
use crate::game::Game;
use crate::parser::{Intent, IntentParser, Parsed, SystemCommand, lexicon};
use crate::speech::CompanionSpeech;
use crate::text::paragraphs;
use crate::transcript::Transcript;

/// Shown after the narration of a fatal turn.
pub const DEATH_BANNER: &str = "*** You have died ***";

const HELP: &str = "Type commands like \"take lantern\", \"open locker\", \
\"put flask in locker\" or \"go north\" (or just \"n\"). Other useful words: \
look, inventory, wait, score, time, again, verbose, brief, superbrief, restart, quit.";

/// Everything needed to start a game: a sealed world, its content, the
/// actors it can register, and where the player starts.
pub struct Pack {
    /// The world, sealed so it can be reset.
    pub world: World,
    /// Hooks, processors, and initial actors.
    pub content: Content,
    /// Every actor the content may register.
    pub actors: Vec<Box<dyn Actor<Game>>>,
    /// Starting location.
    pub start: LocationId,
}

impl std::fmt::Debug for Pack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pack")
            .field("title", &self.content.title)
            .field("actors", &self.actors.len())
            .field("start", &self.start)
            .finish()
    }
}

/// How a line of input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// An intent was claimed and the turn played out.
    Resolved,
    /// The game asked a clarifying question.
    Clarification,
    /// The line could not be parsed.
    ParseFailure,
    /// Nothing claimed the intent.
    NoMatch,
    /// The player died and the game restarted.
    Died,
    /// A system command (verbosity, help, restart).
    System,
    /// The player quit.
    Quit,
}

/// The response to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Composed narration.
    pub narration: String,
    /// Whether a game turn passed.
    pub consumed: bool,
    /// How the line was handled.
    pub outcome: TurnOutcome,
}

impl Turn {
    fn idle(narration: impl Into<String>, outcome: TurnOutcome) -> Self {
        Self {
            narration: narration.into(),
            consumed: false,
            outcome,
        }
    }
}

/// One player's session.
///
/// Each call to [`process`](Self::process) runs exactly one full turn to
/// completion: parse, dispatch, then (if the turn was consumed) a scheduler
/// pass.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    game: Game,
    parser: IntentParser,
    chain: DispatchChain,
    scheduler: Scheduler<Game>,
    last: Option<Intent>,
    transcript: Transcript,
    finished: bool,
}

impl GameSession {
    /// Start a session over `pack`.
    pub fn new(pack: Pack, config: &EngineConfig, speech: impl CompanionSpeech + 'static) -> EngineResult<Self> {
        let ctx = Context::new(pack.world, pack.start, config.context_settings())?;
        let title = pack.content.title.clone();
        let game = Game::new(ctx, pack.content, speech)?;
        let mut scheduler = Scheduler::new(config.scheduler_config());
        for actor in pack.actors {
            scheduler.add_boxed(actor)?;
        }
        let id = Uuid::new_v4();
        tracing::info!(session = %id, %title, seed = config.seed, "session started");
        Ok(Self {
            id,
            game,
            parser: IntentParser::new(config.disambiguation_retries),
            chain: DispatchChain::new(config.disambiguation_retries),
            scheduler,
            last: None,
            transcript: Transcript::new(id),
            finished: false,
        })
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The game being played, mutably.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// The scheduler and its actors.
    pub fn scheduler(&self) -> &Scheduler<Game> {
        &self.scheduler
    }

    /// Everything said so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether the player has quit.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Title, intro, and the first room description.
    pub fn opening(&self) -> EngineResult<String> {
        let content = self.game.content();
        Ok(paragraphs([
            content.title.clone(),
            content.intro.clone(),
            self.game.look_around(true)?,
        ]))
    }

    /// Process one line of input.
    ///
    /// A line holding several sentences ("take lamp. n") runs them one after
    /// another as separate turns, stopping early at a death or a quit. The
    /// narrations are joined with blank lines.
    pub fn process(&mut self, input: &str) -> EngineResult<Turn> {
        let sentences = lexicon::sentences(input);
        if sentences.len() < 2 {
            return self.sentence(input.trim());
        }
        let mut turns = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            let turn = self.sentence(sentence)?;
            let stop = matches!(turn.outcome, TurnOutcome::Died | TurnOutcome::Quit);
            turns.push(turn);
            if stop {
                break;
            }
        }
        tracing::debug!(sentences = turns.len(), "multi-sentence input");
        Ok(Turn {
            narration: paragraphs(turns.iter().map(|t| t.narration.as_str())),
            consumed: turns.iter().any(|t| t.consumed),
            outcome: turns.last().map_or(TurnOutcome::ParseFailure, |t| t.outcome),
        })
    }

    fn sentence(&mut self, input: &str) -> EngineResult<Turn> {
        let turn = self.step(input)?;
        self.transcript
            .record(self.game.ctx.moves(), input, turn.narration.clone());
        Ok(turn)
    }

    fn step(&mut self, input: &str) -> EngineResult<Turn> {
        if self.finished {
            return Ok(Turn::idle("The game is over.", TurnOutcome::Quit));
        }
        let parsed = self.parser.parse(input, &mut self.game.ctx)?;
        tracing::debug!(?parsed, "parsed input");
        match parsed {
            Parsed::Empty => Ok(Turn::idle("I beg your pardon?", TurnOutcome::ParseFailure)),
            Parsed::Failure(failure) => Ok(Turn::idle(failure.narration(), TurnOutcome::ParseFailure)),
            Parsed::Clarify(prompt) => Ok(Turn::idle(prompt, TurnOutcome::Clarification)),
            Parsed::System(command) => self.system(command),
            Parsed::Intent(intent) => self.play(intent),
        }
    }

    fn system(&mut self, command: SystemCommand) -> EngineResult<Turn> {
        let text = match command {
            SystemCommand::Verbosity(verbosity) => {
                self.game.ctx.set_verbosity(verbosity);
                match verbosity {
                    Verbosity::Verbose => "Maximum verbosity.",
                    Verbosity::Brief => "Brief descriptions.",
                    Verbosity::Superbrief => "Superbrief descriptions.",
                }
                .to_string()
            }
            SystemCommand::Quit => {
                self.finished = true;
                tracing::info!(session = %self.id, "player quit");
                return Ok(Turn::idle("Goodbye.", TurnOutcome::Quit));
            }
            SystemCommand::Restart => {
                self.restart()?;
                paragraphs(["Restarting.".to_string(), self.game.look_around(true)?])
            }
            SystemCommand::Help => HELP.to_string(),
            SystemCommand::Save | SystemCommand::Restore => {
                "Saving and restoring are not supported.".to_string()
            }
            SystemCommand::Again => {
                return match self.last.clone() {
                    Some(intent) => self.play(intent),
                    None => Ok(Turn::idle("There is nothing to repeat.", TurnOutcome::NoMatch)),
                };
            }
        };
        Ok(Turn::idle(text, TurnOutcome::System))
    }

    /// Dispatch an intent and, if it consumed a turn, run the actors.
    fn play(&mut self, intent: Intent) -> EngineResult<Turn> {
        self.scheduler.begin_turn(&mut self.game);
        let forced = self.game.ctx.drain_forced();
        let score_before = self.game.ctx.score();

        let result = self.chain.resolve(&intent, &mut self.game)?;
        if !result.consumes_turn() {
            for text in forced {
                self.game.ctx.push_forced(text);
            }
            let outcome = match result {
                InteractionResult::Disambiguation(_) => TurnOutcome::Clarification,
                _ => TurnOutcome::NoMatch,
            };
            return Ok(Turn::idle(result.narration(), outcome));
        }

        self.last = Some(intent);
        let mut parts = forced;
        match result {
            InteractionResult::Death(text) => return self.die(parts, text),
            other => parts.push(other.narration()),
        }

        let turn = self.game.ctx.clock_mut().advance();
        let report = self.scheduler.run_pass(&mut self.game)?;
        parts.extend(report.narration);
        if let Some(text) = report.death {
            return self.die(parts, text);
        }
        tracing::debug!(turn, "turn complete");

        let gained = self.game.ctx.score().saturating_sub(score_before);
        if gained > 0 {
            let unit = if gained == 1 { "point" } else { "points" };
            parts.push(format!("[Your score has gone up by {gained} {unit}.]"));
        }
        Ok(Turn {
            narration: paragraphs(parts),
            consumed: true,
            outcome: TurnOutcome::Resolved,
        })
    }

    fn die(&mut self, mut parts: Vec<String>, text: String) -> EngineResult<Turn> {
        parts.push(text);
        parts.push(DEATH_BANNER.to_string());
        self.game.ctx.record_death();
        tracing::info!(session = %self.id, deaths = self.game.ctx.deaths(), "player died");
        self.restart()?;
        parts.push(self.game.look_around(true)?);
        Ok(Turn {
            narration: paragraphs(parts),
            consumed: true,
            outcome: TurnOutcome::Died,
        })
    }

    fn restart(&mut self) -> EngineResult<()> {
        self.game.restart()?;
        self.scheduler.reset();
        self.last = None;
        Ok(())
    }
}
