//! The dispatch chain: ordered resolution of an intent.
//!
//! Stages run in a fixed order and the first definitive result wins:
//!
//! 1. global commands
//! 2. movement
//! 3. the darkness gate
//! 4. the current location's hook
//! 5. item hooks, in visibility order
//! 6. capability defaults (one noun) or two-item processors (two nouns)
//! 7. the fallback miss

mod global;
mod items;
mod movement;
mod processors;
mod result;

use lf_core::{ItemId, Referent};

use crate::error::EngineResult;
use crate::game::Game;
use crate::parser::{Intent, IntentKind, Resolution, ask_to_choose, resolver};

pub(crate) use items::take as take_item;
pub use processors::{ProcessorRegistry, TwoItemProcessor};
pub use result::{InteractionResult, Miss};

/// Narration for any action attempted in the dark.
pub const TOO_DARK: &str = "It's too dark to see a thing.";

/// Narration when a light goes out around the player.
pub const NOW_DARK: &str = "It is now pitch black.";

/// Default narration for verbs that need no object.
const INTRANSITIVE_DEFAULTS: &[(&str, &str)] = &[
    ("sleep", "You're not tired enough to sleep here."),
    ("listen", "You hear nothing unusual."),
    ("jump", "You jump on the spot, fruitlessly."),
    ("yell", "Aaaarrrrgggghhhh!"),
    ("pray", "If anyone is listening, they keep it to themselves."),
    ("wave", "You wave. Nobody waves back."),
    ("smell", "You smell nothing unusual."),
];

/// Resolves intents against a [`Game`].
///
/// Holds no state between intents; everything a stage needs is on the
/// game's context.
#[derive(Debug, Clone)]
pub struct DispatchChain {
    retries: u32,
}

impl Default for DispatchChain {
    fn default() -> Self {
        Self::new(1)
    }
}

/// A noun phrase after resolution.
enum Target {
    Item(ItemId),
    Absent,
    Ask(InteractionResult),
}

impl DispatchChain {
    /// A chain whose disambiguation prompts tolerate `retries` bad answers.
    pub fn new(retries: u32) -> Self {
        Self { retries }
    }

    /// Run `intent` through every stage.
    ///
    /// When a claimed action changes the light in the room the player is
    /// standing in, the change is narrated after the action's own text.
    pub fn resolve(&self, intent: &Intent, game: &mut Game) -> EngineResult<InteractionResult> {
        let here = game.ctx.location();
        let was_dark = game.ctx.is_dark_here()?;
        let result = self.run(intent, game)?;
        tracing::debug!(intent = %intent, definitive = result.is_definitive(), "intent dispatched");

        let InteractionResult::Positive(text) = result else {
            return Ok(result);
        };
        if game.ctx.location() != here {
            return Ok(InteractionResult::Positive(text));
        }
        let dark_now = game.ctx.is_dark_here()?;
        let text = match (was_dark, dark_now) {
            (true, false) => format!("{text}\n\n{}", game.look_around(true)?),
            (false, true) => format!("{text}\n\n{NOW_DARK}"),
            _ => text,
        };
        Ok(InteractionResult::Positive(text))
    }

    fn run(&self, intent: &Intent, game: &mut Game) -> EngineResult<InteractionResult> {
        match intent.kind {
            IntentKind::Global(command) => return global::respond(command, game),
            IntentKind::Movement(dir) => return movement::go(dir, game),
            IntentKind::Action => {}
        }
        if intent.is_any(&["enter", "exit", "climb"]) {
            let result = movement::named(intent, game)?;
            if result.is_definitive() {
                return Ok(result);
            }
        }

        if game.ctx.is_dark_here()? && !lights_the_way(intent, game)? {
            return Ok(InteractionResult::positive(TOO_DARK));
        }

        let primary = match intent.noun.as_deref() {
            Some(noun) => self.target(intent, noun, true, game)?,
            None => Target::Absent,
        };
        if let Target::Ask(prompt) = primary {
            return Ok(prompt);
        }

        let here = game.ctx.location();
        if let Some(hook) = game.content.location_hook(here) {
            let result = hook.respond(intent, &mut game.ctx)?;
            if result.is_definitive() {
                tracing::debug!(%here, "location hook claimed intent");
                return Ok(result);
            }
        }

        for id in game.ctx.visible_items()? {
            if let Some(hook) = game.content.item_hook(id) {
                let result = hook.respond(id, intent, &mut game.ctx)?;
                if result.is_definitive() {
                    tracing::debug!(item = %id, "item hook claimed intent");
                    return Ok(result);
                }
            }
        }

        let Some(noun) = intent.noun.as_deref() else {
            return Ok(intransitive(intent));
        };
        let Target::Item(first) = primary else {
            return Ok(InteractionResult::NoMatch(Miss::NotHere(noun.to_string())));
        };

        match (intent.preposition.as_deref(), intent.second.as_deref()) {
            (Some(preposition), Some(phrase)) => {
                let second = match self.target(intent, phrase, false, game)? {
                    Target::Item(id) => id,
                    Target::Ask(prompt) => return Ok(prompt),
                    Target::Absent => {
                        return Ok(InteractionResult::NoMatch(Miss::NotHere(phrase.to_string())));
                    }
                };
                self.process(intent, preposition, first, second, game)
            }
            _ => items::respond(first, intent, &mut game.ctx),
        }
    }

    /// Resolve one noun slot. A unique primary noun becomes the referent for
    /// "it" and "them". A slot settled by a clarification keeps its item
    /// while that item is still in reach.
    fn target(&self, intent: &Intent, phrase: &str, primary: bool, game: &mut Game) -> EngineResult<Target> {
        let settled = match intent.item(primary) {
            Some(id) => game.ctx.visible_items()?.contains(&id).then_some(id),
            None => None,
        };
        let resolution = match settled {
            Some(id) => Resolution::One(id),
            None => resolver::resolve(&game.ctx, phrase)?,
        };
        match resolution {
            Resolution::One(id) => {
                if primary {
                    let plural = game.ctx.world().item(id)?.plural;
                    game.ctx.set_referent(Referent {
                        noun: phrase.to_string(),
                        item: id,
                        plural,
                    });
                }
                Ok(Target::Item(id))
            }
            Resolution::Many(ids) => {
                let prompt = ask_to_choose(intent, primary, &ids, self.retries, &mut game.ctx)?;
                Ok(Target::Ask(InteractionResult::Disambiguation(prompt)))
            }
            Resolution::Nothing => Ok(Target::Absent),
        }
    }

    fn process(
        &self,
        intent: &Intent,
        preposition: &str,
        first: ItemId,
        second: ItemId,
        game: &mut Game,
    ) -> EngineResult<InteractionResult> {
        let processor = {
            let caps = &game.ctx.world().item(second)?.caps;
            game.content.processors().find(&intent.verb, preposition, caps)
        };
        if let Some(processor) = processor {
            tracing::debug!(processor = processor.name(), "two-item processor claimed intent");
            return processor.apply(first, second, &mut game.ctx);
        }
        let world = game.ctx.world();
        Ok(InteractionResult::NoMatch(Miss::Pointless {
            verb: intent.verb.clone(),
            target: format!("{} {preposition} {}", world.item(first)?.the(), world.item(second)?.the()),
        }))
    }
}

/// In the dark only nounless verbs and handling a carried light source get
/// through.
fn lights_the_way(intent: &Intent, game: &Game) -> EngineResult<bool> {
    let Some(noun) = intent.noun.as_deref() else {
        return Ok(true);
    };
    let world = game.ctx.world();
    let carried = world.visible_carried()?;
    if let Some(id) = intent.noun_item {
        return Ok(carried.contains(&id) && world.is_light_source(id));
    }
    Ok(match resolver::resolve_among(world, &carried, noun)? {
        Resolution::One(id) => world.is_light_source(id),
        _ => false,
    })
}

fn intransitive(intent: &Intent) -> InteractionResult {
    INTRANSITIVE_DEFAULTS
        .iter()
        .find(|(verb, _)| intent.is(verb))
        .map_or_else(InteractionResult::unclaimed, |(_, text)| InteractionResult::positive(*text))
}
