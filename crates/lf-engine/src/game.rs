use lf_core::{Capability, Context, LocationId, Verbosity};
use lf_schedule::Stage;

use crate::content::Content;
use crate::error::EngineResult;
use crate::speech::CompanionSpeech;
use crate::text::{capitalize, paragraphs, prose_list};

/// What the player sees in a dark room without a light.
pub const DARKNESS: &str = "It is pitch black. You can't see a thing.";

/// Game state shared by the dispatch chain and the actors: the player
/// context, the content hooks, and the companion's speech source.
#[derive(Debug)]
pub struct Game {
    pub(crate) ctx: Context,
    pub(crate) content: Content,
    speech: Box<dyn CompanionSpeech>,
}

impl Stage for Game {
    fn context(&self) -> &Context {
        &self.ctx
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }
}

impl Game {
    /// Start a game and register the content's initial actors.
    pub fn new(mut ctx: Context, content: Content, speech: impl CompanionSpeech + 'static) -> EngineResult<Self> {
        for key in content.initial_actors() {
            ctx.register_actor(*key);
        }
        let start = ctx.location();
        ctx.world_mut().location_mut(start)?.visits += 1;
        Ok(Self {
            ctx,
            content,
            speech: Box::new(speech),
        })
    }

    /// The player context.
    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    /// The player context, mutably.
    pub fn ctx_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    /// The content hooks.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Ask the companion for a line.
    pub fn speak(&mut self, prompt: &str) -> String {
        self.speech.speak(prompt)
    }

    /// Move the player to `to`, running the exit hook of the old location
    /// and the entry hooks of the new one, and describe the arrival.
    pub fn travel(&mut self, to: LocationId) -> EngineResult<String> {
        let from = self.ctx.location();
        let mut parts = Vec::new();

        if let Some(hook) = self.content.location_hook(from) {
            parts.extend(hook.on_leave(&mut self.ctx)?);
        }
        self.ctx.place_player(to)?;
        self.ctx.clear_referent();
        self.ctx.world_mut().location_mut(to)?.visits += 1;
        tracing::info!(%from, %to, "player moved");

        if let Some(hook) = self.content.location_hook(to) {
            parts.extend(hook.before_enter(&mut self.ctx)?);
        }
        let visits = self.ctx.world().location(to)?.visits;
        let full = match self.ctx.verbosity() {
            Verbosity::Verbose => true,
            Verbosity::Brief => visits == 1,
            Verbosity::Superbrief => false,
        };
        parts.push(self.look_around(full)?);
        if let Some(hook) = self.content.location_hook(to) {
            parts.extend(hook.after_enter(&mut self.ctx)?);
        }
        Ok(paragraphs(parts))
    }

    /// Describe where the player is. `full` includes the long description.
    pub fn look_around(&self, full: bool) -> EngineResult<String> {
        let ctx = &self.ctx;
        if ctx.is_dark_here()? {
            return Ok(DARKNESS.to_string());
        }
        let world = ctx.world();
        let here = world.location(ctx.location())?;

        let mut lines = Vec::new();
        match ctx.inside() {
            Some(sub) => lines.push(format!(
                "{}, in the {}",
                here.name,
                world.location(sub)?.name.to_lowercase()
            )),
            None => lines.push(here.name.clone()),
        }
        if full && !here.description.is_empty() {
            lines.push(here.description.clone());
        }

        let mut loose = Vec::new();
        let mut holders = Vec::new();
        let mut floor: Vec<_> = here.items().to_vec();
        if let Some(sub) = ctx.inside() {
            floor.extend_from_slice(world.location(sub)?.items());
        }
        for id in floor {
            let item = world.item(id)?;
            if !item.scenery {
                loose.push(item.a());
            }
            if item.has(Capability::Holder) && item.reveals_contents() && !item.contents().is_empty() {
                let inside: Vec<String> = item
                    .contents()
                    .iter()
                    .map(|c| world.item(*c).map(|i| i.a()))
                    .collect::<Result<_, _>>()?;
                holders.push(format!("{} contains {}.", capitalize(&item.the()), prose_list(&inside)));
            }
        }
        if !loose.is_empty() {
            lines.push(format!("You can see {} here.", prose_list(&loose)));
        }
        lines.extend(holders);
        Ok(lines.join("\n"))
    }

    /// Replace the context with a fresh one at the restart location and
    /// register the initial actors again.
    pub fn restart(&mut self) -> EngineResult<()> {
        let start = self.content.restart_location();
        self.ctx.restart(start)?;
        for key in self.content.initial_actors() {
            self.ctx.register_actor(*key);
        }
        self.ctx.world_mut().location_mut(start)?.visits += 1;
        Ok(())
    }
}
