//! Movement along guarded exits and in and out of sub-locations.

use lf_core::{Direction, LocationId};

use super::result::InteractionResult;
use crate::error::EngineResult;
use crate::game::Game;
use crate::parser::Intent;

/// Try to walk in `dir`. Every refusal is still a consumed turn.
pub(crate) fn go(dir: Direction, game: &mut Game) -> EngineResult<InteractionResult> {
    game.ctx.clear_referent();
    let here = game.ctx.location();

    if let Some(sub) = game.ctx.inside() {
        let name = sub_name(game, sub)?;
        if dir == Direction::Out {
            game.ctx.leave_sublocation();
            return Ok(InteractionResult::positive(format!("You get out of the {name}.")));
        }
        return Ok(InteractionResult::positive(format!(
            "You'll have to get out of the {name} first."
        )));
    }

    let world = game.ctx.world();
    let location = world.location(here)?;
    if dir == Direction::In && !location.exits.contains_key(&dir) {
        if let Some(sub) = location.sublocation {
            return climb_in(sub, game);
        }
    }
    let Some(exit) = location.exits.get(&dir).cloned() else {
        return Ok(InteractionResult::positive("You can't go that way."));
    };

    if game.ctx.is_dark_here()? {
        let lit_ahead = !world.location(exit.target)?.dark || world.has_lit_item_in(exit.target)?;
        if !lit_ahead {
            return Ok(InteractionResult::positive(
                "You stumble around in the dark but can't find the way.",
            ));
        }
    }
    if let Some(guard) = &exit.guard {
        if !guard.allows(&game.ctx) {
            tracing::debug!(%here, direction = %dir, "exit guard refused");
            let failure = exit.failure.as_deref().unwrap_or("The way is blocked.");
            return Ok(InteractionResult::positive(failure));
        }
    }
    if let Some(limit) = exit.weight_limit {
        if world.carried_weight()? > limit {
            let failure = exit
                .weight_failure
                .as_deref()
                .unwrap_or("You are carrying too much to fit through.");
            return Ok(InteractionResult::positive(failure));
        }
    }
    Ok(InteractionResult::positive(game.travel(exit.target)?))
}

/// "enter bunk" and "exit bunk": verbs that name the sub-location.
pub(crate) fn named(intent: &Intent, game: &mut Game) -> EngineResult<InteractionResult> {
    let Some(noun) = intent.noun.as_deref() else {
        return Ok(InteractionResult::unclaimed());
    };
    let here = game.ctx.world().location(game.ctx.location())?;
    let Some(sub) = here.sublocation else {
        return Ok(InteractionResult::unclaimed());
    };
    if !game.ctx.world().location(sub)?.answers_to(noun) {
        return Ok(InteractionResult::unclaimed());
    }
    let inside = game.ctx.inside() == Some(sub);
    match (intent.verb.as_str(), inside) {
        ("enter" | "climb", false) => climb_in(sub, game),
        ("enter" | "climb", true) => Ok(InteractionResult::positive(format!(
            "You're already in the {}.",
            sub_name(game, sub)?
        ))),
        ("exit", true) => go(Direction::Out, game),
        ("exit", false) => Ok(InteractionResult::positive(format!(
            "You're not in the {}.",
            sub_name(game, sub)?
        ))),
        _ => Ok(InteractionResult::unclaimed()),
    }
}

fn climb_in(sub: LocationId, game: &mut Game) -> EngineResult<InteractionResult> {
    game.ctx.enter_sublocation(sub)?;
    Ok(InteractionResult::positive(format!(
        "You get into the {}.",
        sub_name(game, sub)?
    )))
}

fn sub_name(game: &Game, sub: LocationId) -> EngineResult<String> {
    Ok(game.ctx.world().location(sub)?.name.to_lowercase())
}
