//! Commands that need no location or item context.

use lf_core::{Capability, ItemId};

use super::items;
use super::result::InteractionResult;
use crate::error::EngineResult;
use crate::game::{DARKNESS, Game};
use crate::parser::GlobalCommand;
use crate::text::capitalize;

pub(crate) fn respond(command: GlobalCommand, game: &mut Game) -> EngineResult<InteractionResult> {
    let text = match command {
        GlobalCommand::Inventory => inventory(game)?,
        GlobalCommand::Look => game.look_around(true)?,
        GlobalCommand::Wait => "Time passes.".to_string(),
        GlobalCommand::Score => format!(
            "Your score is {}, in {} moves.",
            game.ctx.score(),
            game.ctx.moves()
        ),
        GlobalCommand::Time => format!("The chronometer reads {}.", game.ctx.clock().reading()),
        GlobalCommand::TakeAll => take_all(game)?,
        GlobalCommand::DropAll => drop_all(game)?,
    };
    Ok(InteractionResult::positive(text))
}

fn inventory(game: &Game) -> EngineResult<String> {
    let world = game.ctx.world();
    let carried = game.ctx.inventory();
    if carried.is_empty() {
        return Ok("You are empty-handed.".to_string());
    }
    let mut lines = vec!["You are carrying:".to_string()];
    for id in carried {
        let item = world.item(*id)?;
        let worn = if item.worn { " (being worn)" } else { "" };
        lines.push(format!("  {}{worn}", item.a()));
    }
    Ok(lines.join("\n"))
}

fn take_all(game: &mut Game) -> EngineResult<String> {
    if game.ctx.is_dark_here()? {
        return Ok(DARKNESS.to_string());
    }
    let world = game.ctx.world();
    let targets: Vec<ItemId> = game
        .ctx
        .visible_items()?
        .into_iter()
        .filter(|id| !world.is_carried(*id))
        .filter(|id| {
            world
                .item(*id)
                .is_ok_and(|i| i.has(Capability::Takeable) && !i.scenery)
        })
        .collect();
    if targets.is_empty() {
        return Ok("There is nothing here to take.".to_string());
    }
    each(game, targets, items::take)
}

fn drop_all(game: &mut Game) -> EngineResult<String> {
    let targets = game.ctx.inventory().to_vec();
    if targets.is_empty() {
        return Ok("You are empty-handed.".to_string());
    }
    each(game, targets, |id, ctx| {
        let intent = crate::parser::Intent::action("drop");
        items::respond(id, &intent, ctx)
    })
}

/// Apply `act` to each item, one "name: result" line apiece.
fn each<F>(game: &mut Game, targets: Vec<ItemId>, mut act: F) -> EngineResult<String>
where
    F: FnMut(ItemId, &mut lf_core::Context) -> EngineResult<InteractionResult>,
{
    let mut lines = Vec::with_capacity(targets.len());
    for id in targets {
        let name = capitalize(&game.ctx.world().item(id)?.name);
        let result = act(id, &mut game.ctx)?;
        lines.push(format!("{name}: {}", result.narration()));
    }
    Ok(lines.join("\n"))
}
