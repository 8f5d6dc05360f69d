//! Capability-driven default behavior for single-item verbs.

use lf_core::{Capability, Context, ItemId, Owner};

use super::result::{InteractionResult, Miss};
use crate::error::EngineResult;
use crate::parser::Intent;
use crate::text::{capitalize, prose_list};

/// Default response of `item` to `intent`, or a no-match when its
/// capabilities say nothing about the verb.
pub(crate) fn respond(item: ItemId, intent: &Intent, ctx: &mut Context) -> EngineResult<InteractionResult> {
    match intent.verb.as_str() {
        "examine" => examine(item, ctx),
        "take" => take(item, ctx),
        "drop" => put_down(item, ctx),
        "open" => open(item, ctx, true),
        "close" => open(item, ctx, false),
        "read" => read(item, ctx),
        "wear" => wear(item, ctx),
        "remove" => remove(item, ctx),
        "turn on" => switch(item, ctx, true),
        "turn off" => switch(item, ctx, false),
        "eat" => consume(item, ctx, Capability::Edible),
        "drink" => consume(item, ctx, Capability::Drinkable),
        "smell" => {
            let the = ctx.world().item(item)?.the();
            Ok(InteractionResult::positive(format!("It smells just like {the}.")))
        }
        _ => pointless(item, intent, ctx),
    }
}

fn pointless(item: ItemId, intent: &Intent, ctx: &Context) -> EngineResult<InteractionResult> {
    Ok(InteractionResult::NoMatch(Miss::Pointless {
        verb: intent.verb.clone(),
        target: ctx.world().item(item)?.the(),
    }))
}

fn examine(item: ItemId, ctx: &Context) -> EngineResult<InteractionResult> {
    let world = ctx.world();
    let it = world.item(item)?;
    let mut lines = Vec::new();
    if it.description.is_empty() {
        lines.push(format!("You see nothing special about {}.", it.the()));
    } else {
        lines.push(it.description.clone());
    }
    if it.has(Capability::Switchable) {
        let state = if it.on { "on" } else { "off" };
        lines.push(format!("It is switched {state}."));
    }
    if it.has(Capability::Holder) {
        if it.reveals_contents() {
            let contents: Vec<String> = it
                .contents()
                .iter()
                .map(|id| world.item(*id).map(|c| c.a()))
                .collect::<Result<_, _>>()?;
            if contents.is_empty() {
                lines.push(format!("{} is empty.", capitalize(&it.the())));
            } else {
                lines.push(format!("{} contains {}.", capitalize(&it.the()), prose_list(&contents)));
            }
        } else {
            lines.push(format!("{} is closed.", capitalize(&it.the())));
        }
    }
    Ok(InteractionResult::positive(lines.join(" ")))
}

/// Pick an item up: weight checked, points awarded on the first take.
pub(crate) fn take(item: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult> {
    let world = ctx.world();
    let it = world.item(item)?;
    if world.is_carried(item) {
        return Ok(InteractionResult::positive("You already have that."));
    }
    if !it.has(Capability::Takeable) {
        return Ok(InteractionResult::positive(format!("You can't take {}.", it.the())));
    }
    if let Owner::Item(holder) = it.owner() {
        let holder = world.item(holder)?;
        if !holder.is_accessible() {
            return Ok(InteractionResult::positive(format!(
                "{} is closed.",
                capitalize(&holder.the())
            )));
        }
    }
    // Anything already inside a carried holder is part of the load.
    let added = if world.is_held(item) { 0 } else { world_weight(ctx, item)? };
    let load = world.carried_weight()? + added;
    if load > ctx.max_carry_weight() {
        return Ok(InteractionResult::positive("Your load is too heavy."));
    }

    let first_take = !it.taken;
    let points = it.points;
    ctx.take(item)?;
    ctx.world_mut().item_mut(item)?.taken = true;
    if first_take && points > 0 {
        ctx.add_score(points);
        tracing::debug!(%item, points, "points for first take");
    }
    Ok(InteractionResult::positive("Taken."))
}

/// Weight of an item plus everything inside it.
fn world_weight(ctx: &Context, item: ItemId) -> EngineResult<u32> {
    let world = ctx.world();
    let it = world.item(item)?;
    let mut total = it.weight;
    for inner in it.contents() {
        total += world_weight(ctx, *inner)?;
    }
    Ok(total)
}

fn put_down(item: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult> {
    let it = ctx.world().item(item)?;
    if !ctx.world().is_held(item) {
        return Ok(InteractionResult::positive(format!("You don't have {}.", it.the())));
    }
    ctx.drop_here(item)?;
    ctx.world_mut().item_mut(item)?.worn = false;
    Ok(InteractionResult::positive("Dropped."))
}

fn open(item: ItemId, ctx: &mut Context, opening: bool) -> EngineResult<InteractionResult> {
    let world = ctx.world();
    let it = world.item(item)?;
    if !it.has(Capability::Openable) {
        return pointless_verb(item, if opening { "open" } else { "close" }, ctx);
    }
    if it.open == opening {
        let state = if opening { "open" } else { "closed" };
        return Ok(InteractionResult::positive(format!("It is already {state}.")));
    }
    if !opening {
        ctx.world_mut().item_mut(item)?.open = false;
        return Ok(InteractionResult::positive("Closed."));
    }

    // Opening a holder shows what was hidden inside, unless it was visible
    // all along.
    let revealed: Vec<String> = if it.has(Capability::Transparent) {
        Vec::new()
    } else {
        it.contents()
            .iter()
            .map(|id| world.item(*id).map(|c| c.a()))
            .collect::<Result<_, _>>()?
    };
    let the = it.the();
    ctx.world_mut().item_mut(item)?.open = true;
    if revealed.is_empty() {
        Ok(InteractionResult::positive("Opened."))
    } else {
        Ok(InteractionResult::positive(format!(
            "Opening {the} reveals {}.",
            prose_list(&revealed)
        )))
    }
}

fn pointless_verb(item: ItemId, verb: &str, ctx: &Context) -> EngineResult<InteractionResult> {
    Ok(InteractionResult::NoMatch(Miss::Pointless {
        verb: verb.to_string(),
        target: ctx.world().item(item)?.the(),
    }))
}

fn read(item: ItemId, ctx: &Context) -> EngineResult<InteractionResult> {
    let it = ctx.world().item(item)?;
    match &it.text {
        Some(text) if it.has(Capability::Readable) => Ok(InteractionResult::positive(text.clone())),
        _ => Ok(InteractionResult::positive(format!(
            "There's nothing written on {}.",
            it.the()
        ))),
    }
}

fn wear(item: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult> {
    let it = ctx.world().item(item)?;
    if !it.has(Capability::Wearable) {
        return pointless_verb(item, "wear", ctx);
    }
    if it.worn {
        return Ok(InteractionResult::positive(format!("You are already wearing {}.", it.the())));
    }
    let the = it.the();
    if !ctx.world().is_carried(item) {
        let taken = take(item, ctx)?;
        if !ctx.world().is_carried(item) {
            return Ok(taken);
        }
    }
    ctx.world_mut().item_mut(item)?.worn = true;
    Ok(InteractionResult::positive(format!("You are now wearing {the}.")))
}

fn remove(item: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult> {
    let it = ctx.world().item(item)?;
    if !it.worn {
        return Ok(InteractionResult::positive(format!("You aren't wearing {}.", it.the())));
    }
    let the = it.the();
    ctx.world_mut().item_mut(item)?.worn = false;
    Ok(InteractionResult::positive(format!("You take off {the}.")))
}

fn switch(item: ItemId, ctx: &mut Context, on: bool) -> EngineResult<InteractionResult> {
    let it = ctx.world().item(item)?;
    if !it.has(Capability::Switchable) {
        return pointless_verb(item, if on { "turn on" } else { "turn off" }, ctx);
    }
    let state = if on { "on" } else { "off" };
    if it.on == on {
        return Ok(InteractionResult::positive(format!("It's already {state}.")));
    }
    let the = capitalize(&it.the());
    ctx.world_mut().item_mut(item)?.on = on;
    Ok(InteractionResult::positive(format!("{the} is now {state}.")))
}

fn consume(item: ItemId, ctx: &mut Context, cap: Capability) -> EngineResult<InteractionResult> {
    let (verb, signal) = match cap {
        Capability::Drinkable => ("drink", "drank"),
        _ => ("eat", "ate"),
    };
    let it = ctx.world().item(item)?;
    if !it.has(cap) {
        return pointless_verb(item, verb, ctx);
    }
    if !ctx.world().is_held(item) {
        return Ok(InteractionResult::positive(format!("You'd need to be holding {} first.", it.the())));
    }
    let the = it.the();
    ctx.world_mut().move_item(item, Owner::Nowhere)?;
    ctx.post(signal);
    Ok(InteractionResult::positive(format!("You {verb} {the}. That hit the spot.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::{ContextSettings, Item, Location, World};

    struct Fixture {
        ctx: Context,
        locker: ItemId,
        bar: ItemId,
        cloak: ItemId,
        lamp: ItemId,
        anvil: ItemId,
    }

    fn fixture() -> Fixture {
        let mut world = World::new();
        let room = world.add_location(Location::new("room", "Room")).unwrap();
        let locker = world
            .add_item(
                Item::new("locker", "locker").holding(2).with(Capability::Openable),
                Owner::Location(room),
            )
            .unwrap();
        let bar = world
            .add_item(
                Item::new("bar", "ration bar")
                    .with(Capability::Takeable)
                    .with(Capability::Edible)
                    .points(3),
                Owner::Item(locker),
            )
            .unwrap();
        let cloak = world
            .add_item(
                Item::new("cloak", "red cloak")
                    .with(Capability::Takeable)
                    .with(Capability::Wearable),
                Owner::Location(room),
            )
            .unwrap();
        let lamp = world
            .add_item(
                Item::new("lamp", "brass lantern")
                    .with(Capability::Takeable)
                    .with(Capability::Switchable)
                    .with(Capability::LightSource),
                Owner::Location(room),
            )
            .unwrap();
        let anvil = world
            .add_item(
                Item::new("anvil", "anvil").with(Capability::Takeable).weight(50),
                Owner::Location(room),
            )
            .unwrap();
        world.seal();
        Fixture {
            ctx: Context::new(world, room, ContextSettings::default()).unwrap(),
            locker,
            bar,
            cloak,
            lamp,
            anvil,
        }
    }

    fn verb(v: &str) -> Intent {
        Intent::action(v).with_noun("x")
    }

    fn say(result: InteractionResult) -> String {
        result.narration()
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut f = fixture();
        let open = verb("open");
        let close = verb("close");
        assert_eq!(
            say(respond(f.locker, &open, &mut f.ctx).unwrap()),
            "Opening the locker reveals a ration bar."
        );
        assert_eq!(say(respond(f.locker, &open, &mut f.ctx).unwrap()), "It is already open.");
        assert_eq!(say(respond(f.locker, &close, &mut f.ctx).unwrap()), "Closed.");
        assert_eq!(say(respond(f.locker, &close, &mut f.ctx).unwrap()), "It is already closed.");
    }

    #[test]
    fn closed_holder_blocks_take() {
        let mut f = fixture();
        assert_eq!(say(take(f.bar, &mut f.ctx).unwrap()), "The locker is closed.");
        f.ctx.world_mut().item_mut(f.locker).unwrap().open = true;
        assert_eq!(say(take(f.bar, &mut f.ctx).unwrap()), "Taken.");
        assert_eq!(f.ctx.score(), 3);
    }

    #[test]
    fn points_only_on_first_take() {
        let mut f = fixture();
        f.ctx.world_mut().item_mut(f.locker).unwrap().open = true;
        take(f.bar, &mut f.ctx).unwrap();
        respond(f.bar, &verb("drop"), &mut f.ctx).unwrap();
        take(f.bar, &mut f.ctx).unwrap();
        assert_eq!(f.ctx.score(), 3);
    }

    #[test]
    fn too_heavy_to_take() {
        let mut f = fixture();
        assert_eq!(say(take(f.anvil, &mut f.ctx).unwrap()), "Your load is too heavy.");
        assert!(!f.ctx.world().is_carried(f.anvil));
    }

    #[test]
    fn taking_out_of_a_carried_sack_adds_no_weight() {
        let mut world = World::new();
        let room = world.add_location(Location::new("room", "Room")).unwrap();
        let sack = world
            .add_item(
                Item::new("sack", "canvas sack").holding(8).with(Capability::Takeable),
                Owner::Player,
            )
            .unwrap();
        let rock = world
            .add_item(
                Item::new("rock", "rock").with(Capability::Takeable).weight(6),
                Owner::Item(sack),
            )
            .unwrap();
        world.seal();
        let mut ctx = Context::new(world, room, ContextSettings::default()).unwrap();
        assert_eq!(ctx.world().carried_weight().unwrap(), 7);

        assert_eq!(say(take(rock, &mut ctx).unwrap()), "Taken.");
        assert!(ctx.world().is_carried(rock));
        assert_eq!(ctx.world().carried_weight().unwrap(), 7);
    }

    #[test]
    fn wearing_picks_up_first() {
        let mut f = fixture();
        assert_eq!(
            say(respond(f.cloak, &verb("wear"), &mut f.ctx).unwrap()),
            "You are now wearing the red cloak."
        );
        assert!(f.ctx.world().is_carried(f.cloak));
        assert_eq!(
            say(respond(f.cloak, &verb("remove"), &mut f.ctx).unwrap()),
            "You take off the red cloak."
        );
    }

    #[test]
    fn switching_reports_state() {
        let mut f = fixture();
        assert_eq!(
            say(respond(f.lamp, &verb("turn on"), &mut f.ctx).unwrap()),
            "The brass lantern is now on."
        );
        assert_eq!(say(respond(f.lamp, &verb("turn on"), &mut f.ctx).unwrap()), "It's already on.");
    }

    #[test]
    fn eating_posts_a_signal() {
        let mut f = fixture();
        f.ctx.world_mut().item_mut(f.locker).unwrap().open = true;
        take(f.bar, &mut f.ctx).unwrap();
        respond(f.bar, &verb("eat"), &mut f.ctx).unwrap();
        assert!(f.ctx.take_signal("ate"));
        assert_eq!(f.ctx.world().item(f.bar).unwrap().owner(), Owner::Nowhere);
    }

    #[test]
    fn unsupported_verb_is_a_miss() {
        let mut f = fixture();
        assert_eq!(
            respond(f.lamp, &verb("eat"), &mut f.ctx).unwrap(),
            InteractionResult::NoMatch(Miss::Pointless {
                verb: "eat".into(),
                target: "the brass lantern".into()
            })
        );
    }
}
