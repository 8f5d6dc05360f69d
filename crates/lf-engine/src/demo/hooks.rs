//! Location and item hooks of the demo facility.

use lf_core::{AttrValue, Context, ItemId, LocationId, Owner};

use super::keys;
use crate::content::{ItemHook, LocationHook};
use crate::dispatch::{InteractionResult, take_item};
use crate::error::EngineResult;
use crate::parser::resolver::{self, Resolution};
use crate::parser::Intent;

const UNDER: &[&str] = &["under", "beneath", "below", "underneath"];

/// Whether `phrase` names `item`.
fn names(ctx: &Context, phrase: Option<&str>, item: ItemId) -> EngineResult<bool> {
    let Some(phrase) = phrase else {
        return Ok(false);
    };
    let it = ctx.world().item(item)?;
    Ok(resolver::phrase_matches(it, &resolver::phrase_words(phrase)))
}

fn fluid(ctx: &Context, flask: ItemId) -> EngineResult<String> {
    Ok(ctx
        .world()
        .item(flask)?
        .attrs
        .text("fluid")
        .unwrap_or_default()
        .to_string())
}

/// Sleeping in the bunk.
#[derive(Debug)]
pub struct Dormitory {
    pub(crate) bunk: LocationId,
}

impl LocationHook for Dormitory {
    fn respond(&self, intent: &Intent, ctx: &mut Context) -> EngineResult<InteractionResult> {
        if !intent.is("sleep") {
            return Ok(InteractionResult::unclaimed());
        }
        let in_bunk = ctx.inside() == Some(self.bunk);
        let names_bunk = match intent.noun.as_deref() {
            Some(noun) => ctx.world().location(self.bunk)?.answers_to(noun),
            None => false,
        };
        if !in_bunk && !names_bunk {
            return Ok(InteractionResult::positive(
                "The floor is no place to sleep. Try the bunk.",
            ));
        }
        if !in_bunk {
            ctx.enter_sublocation(self.bunk)?;
        }
        ctx.clock_mut().skip_minutes(8 * 60);
        ctx.post(keys::SLEPT);
        Ok(InteractionResult::positive(
            "You stretch out on the thin mattress and sleep for hours.",
        ))
    }
}

/// The spout, the buttons, and the flask that can sit under the spout.
#[derive(Debug)]
pub struct MachineShop {
    pub(crate) here: LocationId,
    pub(crate) flask: ItemId,
    pub(crate) spout: ItemId,
}

impl MachineShop {
    fn flask_under_spout(&self, ctx: &Context) -> EngineResult<bool> {
        let world = ctx.world();
        Ok(world.location(self.here)?.attrs.flag(keys::FLASK_UNDER_SPOUT)
            && world.item(self.flask)?.owner() == Owner::Location(self.here))
    }

    fn set_under_spout(&self, ctx: &mut Context, on: bool) -> EngineResult<()> {
        ctx.world_mut()
            .location_mut(self.here)?
            .attrs
            .set_flag(keys::FLASK_UNDER_SPOUT, on);
        Ok(())
    }

    fn place_flask(&self, ctx: &mut Context) -> EngineResult<InteractionResult> {
        if !ctx.world().is_held(self.flask) {
            return Ok(InteractionResult::positive("You don't have the glass flask."));
        }
        ctx.world_mut().move_item(self.flask, Owner::Location(self.here))?;
        self.set_under_spout(ctx, true)?;
        Ok(InteractionResult::positive(
            "The glass flask is now sitting under the spout.",
        ))
    }

    fn press(&self, button: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult> {
        let (color, shape) = {
            let attrs = &ctx.world().item(button)?.attrs;
            (attrs.text("color").map(str::to_string), attrs.text("shape").map(str::to_string))
        };
        if let Some(color) = color {
            if !self.flask_under_spout(ctx)? {
                return Ok(InteractionResult::positive(format!(
                    "Milky {color} fluid gushes from the spout and drains away through the grating."
                )));
            }
            ctx.world_mut()
                .item_mut(self.flask)?
                .attrs
                .set("fluid", AttrValue::Text(color.clone()));
            let shop = &mut ctx.world_mut().location_mut(self.here)?.attrs;
            let first = !shop.flag(keys::FLASK_FILLED);
            shop.set_flag(keys::FLASK_FILLED, true);
            if first {
                ctx.add_score(5);
            }
            tracing::debug!(%color, "flask filled");
            return Ok(InteractionResult::positive(format!(
                "Milky {color} fluid gushes from the spout and fills the glass flask."
            )));
        }
        let text = match shape.as_deref() {
            Some("round") => "The pipes overhead shudder and groan, then fall silent.",
            Some("square") => "A hatch in the ceiling snaps open and shut again.",
            _ => return Ok(InteractionResult::unclaimed()),
        };
        Ok(InteractionResult::positive(text))
    }
}

impl LocationHook for MachineShop {
    fn respond(&self, intent: &Intent, ctx: &mut Context) -> EngineResult<InteractionResult> {
        if intent.is_with("put", UNDER)
            && names(ctx, intent.noun.as_deref(), self.flask)?
            && names(ctx, intent.second.as_deref(), self.spout)?
        {
            return self.place_flask(ctx);
        }

        if intent.is("take") && intent.second.is_none() && names(ctx, intent.noun.as_deref(), self.flask)? {
            if !self.flask_under_spout(ctx)? {
                return Ok(InteractionResult::unclaimed());
            }
            let result = take_item(self.flask, ctx)?;
            if ctx.world().is_carried(self.flask) {
                self.set_under_spout(ctx, false)?;
                return Ok(InteractionResult::positive(
                    "You take the glass flask from under the spout.",
                ));
            }
            return Ok(result);
        }

        if intent.is("press") {
            if let Some(noun) = intent.noun.as_deref() {
                if let Resolution::One(button) = resolver::resolve(ctx, noun)? {
                    return self.press(button, ctx);
                }
            }
        }
        Ok(InteractionResult::unclaimed())
    }
}

/// What the flask holds.
#[derive(Debug)]
pub struct Flask;

impl ItemHook for Flask {
    fn respond(&self, item: ItemId, intent: &Intent, ctx: &mut Context) -> EngineResult<InteractionResult> {
        if intent.second.is_some() || !names(ctx, intent.noun.as_deref(), item)? {
            return Ok(InteractionResult::unclaimed());
        }
        let contents = fluid(ctx, item)?;
        match intent.verb.as_str() {
            "examine" => {
                let description = ctx.world().item(item)?.description.clone();
                let state = if contents.is_empty() {
                    "It is empty.".to_string()
                } else {
                    format!("It is full of a milky {contents} fluid.")
                };
                Ok(InteractionResult::positive(format!("{description} {state}")))
            }
            "empty" if contents.is_empty() => Ok(InteractionResult::positive("The glass flask is already empty.")),
            "empty" => {
                ctx.world_mut()
                    .item_mut(item)?
                    .attrs
                    .set("fluid", AttrValue::Text(String::new()));
                Ok(InteractionResult::positive("You pour the fluid away."))
            }
            "drink" if !contents.is_empty() => Ok(InteractionResult::positive(
                "One sniff of the fluid convinces you otherwise.",
            )),
            _ => Ok(InteractionResult::unclaimed()),
        }
    }
}

/// The keypad beside the bio lock door.
#[derive(Debug)]
pub struct Lab {
    pub(crate) here: LocationId,
}

/// Code that opens the bio lock.
pub const BIO_LOCK_CODE: &str = "372";

impl LocationHook for Lab {
    fn respond(&self, intent: &Intent, ctx: &mut Context) -> EngineResult<InteractionResult> {
        if !intent.is_any(&["type", "press"]) {
            return Ok(InteractionResult::unclaimed());
        }
        let digits: String = intent
            .noun
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return Ok(InteractionResult::unclaimed());
        }
        let attrs = &mut ctx.world_mut().location_mut(self.here)?.attrs;
        if attrs.flag(keys::BIO_LOCK_OPEN) {
            return Ok(InteractionResult::positive("The bio lock door is already open."));
        }
        if digits != BIO_LOCK_CODE {
            return Ok(InteractionResult::positive("The keypad buzzes. Nothing happens."));
        }
        attrs.set_flag(keys::BIO_LOCK_OPEN, true);
        Ok(InteractionResult::positive(
            "The keypad chirps and the bio lock door hisses open.",
        ))
    }
}

/// Entering the bio lock sets the mutants loose.
#[derive(Debug)]
pub struct BioLock {
    pub(crate) here: LocationId,
}

impl LocationHook for BioLock {
    fn before_enter(&self, ctx: &mut Context) -> EngineResult<Option<String>> {
        let attrs = &mut ctx.world_mut().location_mut(self.here)?.attrs;
        if attrs.flag(keys::CHASE_STARTED) {
            return Ok(None);
        }
        attrs.set_flag(keys::CHASE_STARTED, true);
        ctx.register_actor(keys::CHASE);
        ctx.post(keys::CHASE_BEGIN);
        Ok(Some(
            "As you step inside, something in the lab behind you begins to howl.".to_string(),
        ))
    }
}

/// Stepping into the elevator starts the ride.
#[derive(Debug)]
pub struct Elevator {
    pub(crate) here: LocationId,
}

impl LocationHook for Elevator {
    fn respond(&self, intent: &Intent, ctx: &mut Context) -> EngineResult<InteractionResult> {
        let running = ctx.world().location(self.here)?.attrs.flag(keys::LIFT_RUNNING);
        if running && intent.is_any(&["open", "press", "pull", "attack"]) {
            ctx.post(keys::LIFT_INTERRUPT);
            return Ok(InteractionResult::positive("You rattle the mesh doors."));
        }
        Ok(InteractionResult::unclaimed())
    }

    fn after_enter(&self, ctx: &mut Context) -> EngineResult<Option<String>> {
        let attrs = &mut ctx.world_mut().location_mut(self.here)?.attrs;
        if attrs.flag(keys::LIFT_RUNNING) {
            return Ok(None);
        }
        attrs.set_flag(keys::LIFT_RUNNING, true);
        ctx.register_actor(keys::LIFT);
        ctx.post(keys::LIFT_BEGIN);
        Ok(Some("The mesh doors rattle and begin to slide shut.".to_string()))
    }
}

/// Talking to Pip.
#[derive(Debug)]
pub struct Pip;

impl ItemHook for Pip {
    fn respond(&self, item: ItemId, intent: &Intent, ctx: &mut Context) -> EngineResult<InteractionResult> {
        if !intent.is("talk") || !names(ctx, intent.noun.as_deref(), item)? {
            return Ok(InteractionResult::unclaimed());
        }
        ctx.post(keys::PIP_TALK);
        Ok(InteractionResult::positive("Pip tilts its antenna towards you."))
    }
}
