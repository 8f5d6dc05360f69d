//! End-to-end play through the demo pack.

use lf_core::{Capability, Item, ItemId, Location, Owner, World};
use lf_engine::demo::{actors, keys};
use lf_engine::session::DEATH_BANNER;
use lf_engine::{Content, EngineConfig, GameSession, Pack, Silent, Turn, TurnOutcome, demo};

fn session() -> GameSession {
    GameSession::new(demo::build().unwrap(), &EngineConfig::default(), Silent).unwrap()
}

/// A one-room game with two identical ration bars.
fn pantry(dark: bool) -> (GameSession, Vec<ItemId>) {
    let mut world = World::new();
    let room = Location::new("pantry", "Pantry").describe("Shelves, mostly bare.");
    let room = world.add_location(if dark { room.dark() } else { room }).unwrap();
    let bars: Vec<ItemId> = ["bar_a", "bar_b"]
        .into_iter()
        .map(|key| {
            world
                .add_item(Item::new(key, "ration bar").with(Capability::Takeable), Owner::Location(room))
                .unwrap()
        })
        .collect();
    world.seal();
    let pack = Pack {
        world,
        content: Content::new("Pantry", room),
        actors: Vec::new(),
        start: room,
    };
    let session = GameSession::new(pack, &EngineConfig::default(), Silent).unwrap();
    (session, bars)
}

fn play(session: &mut GameSession, lines: &[&str]) -> Vec<Turn> {
    lines.iter().map(|line| session.process(line).unwrap()).collect()
}

fn say(session: &mut GameSession, line: &str) -> String {
    session.process(line).unwrap().narration
}

/// Walk from the dormitory into the bio lock, which sets the mutants loose.
fn into_the_bio_lock(s: &mut GameSession) -> String {
    play(s, &["n", "open door", "n", "type 372"]);
    say(s, "e")
}

// ---------------------------------------------------------------------------
// parser round trips
// ---------------------------------------------------------------------------

#[test]
fn ambiguous_cloak_is_settled_by_the_next_line() {
    let mut s = session();
    let ask = s.process("take cloak").unwrap();
    assert_eq!(ask.outcome, TurnOutcome::Clarification);
    assert!(!ask.consumed);
    assert_eq!(ask.narration, "Which cloak do you mean, the red cloak or the blue cloak?");

    let taken = s.process("the blue one").unwrap();
    assert_eq!(taken.narration, "Taken.");
    assert_eq!(s.game().ctx().moves(), 1);

    let red = s.game().ctx().world().item_by_key(keys::RED_CLOAK).unwrap();
    let blue = s.game().ctx().world().item_by_key(keys::BLUE_CLOAK).unwrap();
    assert!(s.game().ctx().world().is_carried(blue));
    assert!(!s.game().ctx().world().is_carried(red));
}

#[test]
fn a_fresh_command_supersedes_the_prompt() {
    let mut s = session();
    say(&mut s, "take cloak");
    assert_eq!(say(&mut s, "take lantern"), "Taken.");
    assert!(s.game().ctx().pending().is_none());
}

#[test]
fn gibberish_answers_are_reprompted_then_dropped() {
    let mut s = session();
    say(&mut s, "wear cloak");
    let again = say(&mut s, "purple");
    assert!(again.starts_with("I didn't catch that. Which cloak"));
    assert_eq!(say(&mut s, "purple"), "Never mind.");
    assert_eq!(s.game().ctx().moves(), 0);
}

#[test]
fn pronouns_follow_the_last_noun() {
    let mut s = session();
    assert_eq!(say(&mut s, "take red cloak"), "Taken.");
    assert_eq!(say(&mut s, "wear it"), "You are now wearing the red cloak.");
    let inventory = say(&mut s, "i");
    assert!(inventory.contains("a red cloak (being worn)"));
}

#[test]
fn a_pronoun_without_a_referent_asks_first() {
    let mut s = session();
    let ask = s.process("take it").unwrap();
    assert_eq!(ask.narration, "What are you referring to?");
    assert!(!ask.consumed);
    assert_eq!(say(&mut s, "lantern"), "Taken.");
}

#[test]
fn movement_forgets_the_referent() {
    let mut s = session();
    say(&mut s, "take lantern");
    say(&mut s, "n");
    assert_eq!(say(&mut s, "drop it"), "What are you referring to?");
}

#[test]
fn identical_twins_are_picked_by_position() {
    let (mut s, bars) = pantry(false);
    let ask = s.process("take bar").unwrap();
    assert_eq!(ask.outcome, TurnOutcome::Clarification);
    assert_eq!(
        ask.narration,
        "Which bar do you mean, the first ration bar or the second ration bar?"
    );
    assert_eq!(say(&mut s, "first"), "Taken.");
    assert!(s.game().ctx().world().is_carried(bars[0]));
    assert!(!s.game().ctx().world().is_carried(bars[1]));

    // One bar in hand and one on the shelf still share a name.
    say(&mut s, "drop bar");
    assert_eq!(say(&mut s, "2"), "Dropped.");
    assert!(!s.game().ctx().world().is_carried(bars[0]));
    assert_eq!(s.game().ctx().moves(), 2);
}

#[test]
fn the_dark_names_nothing() {
    let (mut s, _) = pantry(true);
    let turn = s.process("take bar").unwrap();
    assert_eq!(turn.narration, "It's too dark to see a thing.");
    assert!(!turn.narration.contains("ration"));
    assert!(s.game().ctx().pending().is_none());
}

#[test]
fn the_dark_cellar_asks_nothing_about_carried_twins() {
    let mut s = session();
    play(&mut s, &["take red cloak", "take blue cloak", "d"]);
    assert_eq!(say(&mut s, "wear cloak"), "It's too dark to see a thing.");
    assert!(s.game().ctx().pending().is_none());
}

// ---------------------------------------------------------------------------
// turns
// ---------------------------------------------------------------------------

#[test]
fn periods_chain_commands_into_separate_turns() {
    let mut s = session();
    let turn = s.process("take lantern. open locker").unwrap();
    assert_eq!(turn.narration, "Taken.\n\nOpening the locker reveals a ration bar.");
    assert!(turn.consumed);
    assert_eq!(s.game().ctx().moves(), 2);
    let inputs: Vec<&str> = s.transcript().exchanges().iter().map(|e| e.input.as_str()).collect();
    assert_eq!(inputs, ["take lantern", "open locker"]);
}

#[test]
fn a_chained_answer_settles_the_prompt() {
    let mut s = session();
    let turn = s.process("take cloak. the red one").unwrap();
    assert!(turn.narration.starts_with("Which cloak do you mean"));
    assert!(turn.narration.ends_with("Taken."));
    let red = s.game().ctx().world().item_by_key(keys::RED_CLOAK).unwrap();
    assert!(s.game().ctx().world().is_carried(red));
}

#[test]
fn a_death_ends_the_chain() {
    let mut s = session();
    into_the_bio_lock(&mut s);
    let turn = s.process("w. wait. wait").unwrap();
    assert_eq!(turn.outcome, TurnOutcome::Died);
    assert!(turn.narration.contains(DEATH_BANNER));
    assert!(!turn.narration.contains("Time passes."));
    assert_eq!(s.game().ctx().moves(), 0);
}

#[test]
fn per_turn_flags_clear_before_every_dispatched_action() {
    let mut s = session();
    assert!(s.game_mut().ctx_mut().flag_once("remarked"));
    let miss = s.process("take unicorn").unwrap();
    assert_eq!(miss.outcome, TurnOutcome::NoMatch);
    assert!(!s.game().ctx().turn_flag("remarked"));

    assert!(s.game_mut().ctx_mut().flag_once("remarked"));
    s.process("xyzzy").unwrap();
    assert!(s.game().ctx().turn_flag("remarked"));
}

#[test]
fn only_resolved_actions_consume_turns() {
    let mut s = session();
    let turns = play(
        &mut s,
        &["xyzzy", "take", "take cloak", "red", "verbose", "help", "", "take unicorn"],
    );
    let consumed: Vec<bool> = turns.iter().map(|t| t.consumed).collect();
    assert_eq!(consumed, [false, false, false, true, false, false, false, false]);
    assert_eq!(turns[0].outcome, TurnOutcome::ParseFailure);
    assert_eq!(turns[7].narration, "You don't see any unicorn here.");
    assert_eq!(s.game().ctx().moves(), 1);
}

#[test]
fn the_chronometer_advances_per_turn() {
    let mut s = session();
    assert_eq!(say(&mut s, "time"), "The chronometer reads 08:00.");
    assert_eq!(say(&mut s, "time"), "The chronometer reads 08:54.");
    assert_eq!(say(&mut s, "score"), "Your score is 0, in 2 moves.");
}

#[test]
fn again_repeats_the_last_action() {
    let mut s = session();
    say(&mut s, "open locker");
    assert_eq!(say(&mut s, "again"), "It is already open.");
    assert_eq!(s.game().ctx().moves(), 2);
}

#[test]
fn open_and_close_are_idempotent() {
    let mut s = session();
    assert_eq!(say(&mut s, "open locker"), "Opening the locker reveals a ration bar.");
    assert_eq!(say(&mut s, "open locker"), "It is already open.");
    assert_eq!(say(&mut s, "close locker"), "Closed.");
    assert_eq!(say(&mut s, "shut locker"), "It is already closed.");
}

#[test]
fn brief_mode_shortens_a_second_visit() {
    let mut s = session();
    let first = say(&mut s, "n");
    assert!(first.contains("flickering panels"));
    say(&mut s, "s");
    let second = say(&mut s, "n");
    assert!(second.contains("Corridor"));
    assert!(!second.contains("flickering panels"));
}

// ---------------------------------------------------------------------------
// light
// ---------------------------------------------------------------------------

#[test]
fn the_cellar_is_dark_without_a_light() {
    let mut s = session();
    assert!(say(&mut s, "d").contains("It is pitch black."));
    assert_eq!(say(&mut s, "take crate"), "It's too dark to see a thing.");
    assert!(say(&mut s, "u").contains("Dormitory"));
}

#[test]
fn switching_on_the_lantern_reveals_the_cellar() {
    let mut s = session();
    play(&mut s, &["take lantern", "d"]);
    let lit = say(&mut s, "turn on lamp");
    assert!(lit.starts_with("The brass lantern is now on."));
    assert!(lit.contains("The wooden crate contains a fuse."));

    let fuse = say(&mut s, "take fuse");
    assert!(fuse.contains("[Your score has gone up by 10 points.]"));
    let dark = say(&mut s, "turn off lantern");
    assert!(dark.ends_with("It is now pitch black."));
}

#[test]
fn a_lamp_inside_a_glass_case_lights_storage() {
    let mut s = session();
    say(&mut s, "n");
    let storage = say(&mut s, "w");
    assert!(storage.contains("Storage"));
    assert!(storage.contains("The glass case contains a glow lamp."));
}

#[test]
fn the_crawlspace_has_a_weight_limit() {
    let mut s = session();
    play(&mut s, &["take lantern", "n", "w", "take wrench"]);
    assert_eq!(
        say(&mut s, "e"),
        "You can't squeeze through the crawlspace carrying all that."
    );
    say(&mut s, "drop wrench");
    assert!(say(&mut s, "e").contains("Corridor"));
}

// ---------------------------------------------------------------------------
// puzzles
// ---------------------------------------------------------------------------

#[test]
fn flask_under_the_spout_fills_with_the_chosen_color() {
    let mut s = session();
    play(&mut s, &["n", "e", "take flask"]);
    assert_eq!(
        say(&mut s, "put flask under spout"),
        "The glass flask is now sitting under the spout."
    );
    let filled = say(&mut s, "press yellow button");
    assert!(filled.starts_with("Milky yellow fluid gushes from the spout and fills the glass flask."));
    assert!(filled.contains("[Your score has gone up by 5 points.]"));

    assert_eq!(say(&mut s, "take flask"), "You take the glass flask from under the spout.");
    assert!(say(&mut s, "examine flask").ends_with("It is full of a milky yellow fluid."));
    assert_eq!(say(&mut s, "empty flask"), "You pour the fluid away.");
    assert!(say(&mut s, "x flask").ends_with("It is empty."));
}

#[test]
fn buttons_without_the_flask_drain_away() {
    let mut s = session();
    play(&mut s, &["n", "e"]);
    assert_eq!(
        say(&mut s, "push red button"),
        "Milky red fluid gushes from the spout and drains away through the grating."
    );
    assert!(say(&mut s, "press button").starts_with("Which button do you mean"));
}

#[test]
fn the_keypad_opens_the_bio_lock() {
    let mut s = session();
    play(&mut s, &["n", "open door", "n"]);
    assert!(say(&mut s, "e").starts_with("The bio lock door is sealed."));
    assert_eq!(say(&mut s, "type 123"), "The keypad buzzes. Nothing happens.");
    assert_eq!(
        say(&mut s, "type three seven two"),
        "The keypad chirps and the bio lock door hisses open."
    );
    assert_eq!(say(&mut s, "type 372"), "The bio lock door is already open.");
}

#[test]
fn sleeping_needs_the_bunk() {
    let mut s = session();
    assert_eq!(say(&mut s, "sleep"), "The floor is no place to sleep. Try the bunk.");
    assert!(say(&mut s, "sleep in bunk").starts_with("You stretch out"));
    assert_eq!(say(&mut s, "n"), "You'll have to get out of the bunk first.");
    assert_eq!(say(&mut s, "out"), "You get out of the bunk.");
}

// ---------------------------------------------------------------------------
// chase and death
// ---------------------------------------------------------------------------

#[test]
fn backtracking_in_the_chase_kills_and_resets() {
    let mut s = session();
    say(&mut s, "take lantern");
    assert!(into_the_bio_lock(&mut s).contains("begins to howl"));
    assert!(s.game().ctx().roster().is_active(keys::CHASE));

    let death = s.process("w").unwrap();
    assert_eq!(death.outcome, TurnOutcome::Died);
    assert!(death.narration.contains(actors::BACKTRACK_DEATH));
    assert!(death.narration.contains(DEATH_BANNER));
    assert!(death.narration.ends_with(&s.game().look_around(true).unwrap()));

    let ctx = s.game().ctx();
    let dormitory = ctx.world().location_by_key(keys::DORMITORY).unwrap();
    let lab = ctx.world().location_by_key(keys::LAB).unwrap();
    assert_eq!(ctx.location(), dormitory);
    assert_eq!(ctx.deaths(), 1);
    assert_eq!(ctx.moves(), 0);
    assert_eq!(ctx.score(), 0);
    assert!(ctx.inventory().is_empty());
    assert!(!ctx.roster().is_active(keys::CHASE));
    assert!(!ctx.world().location(lab).unwrap().attrs.flag(keys::BIO_LOCK_OPEN));

    let calm = s.process("wait").unwrap();
    assert_eq!(calm.outcome, TurnOutcome::Resolved);
    assert!(calm.narration.starts_with("Time passes."));
}

#[test]
fn lingering_spends_the_grace_turn_then_kills() {
    let mut s = session();
    into_the_bio_lock(&mut s);
    assert!(say(&mut s, "wait").contains("Claws scrape against the door behind you."));
    let death = s.process("wait").unwrap();
    assert_eq!(death.outcome, TurnOutcome::Died);
    assert!(death.narration.contains(actors::LINGER_DEATH));
}

#[test]
fn the_elevator_ends_the_chase_and_rides_to_the_roof() {
    let mut s = session();
    into_the_bio_lock(&mut s);
    assert!(say(&mut s, "n").contains("Gantry"));
    let cage = say(&mut s, "n");
    assert!(cage.contains("The mesh doors rattle and begin to slide shut."));
    assert!(cage.contains("the cage holds"));
    assert!(!s.game().ctx().roster().will_be_active(keys::CHASE));

    let rattle = say(&mut s, "open doors");
    assert!(rattle.starts_with("You rattle the mesh doors."));
    assert!(rattle.contains("The doors shudder but keep closing."));
    let stuck = say(&mut s, "s");
    assert!(stuck.starts_with("The mesh doors are shut."));
    assert!(stuck.contains("begins to rise"));

    let mut last = String::new();
    for _ in 0..4 {
        last = say(&mut s, "wait");
        let roof = s.game().ctx().world().location_by_key(keys::ROOF).unwrap();
        if s.game().ctx().location() == roof {
            break;
        }
    }
    assert!(last.contains("You made it out."));
    assert!(last.contains("[Your score has gone up by 15 points.]"));
}

// ---------------------------------------------------------------------------
// actors
// ---------------------------------------------------------------------------

#[test]
fn hunger_warns_and_eating_resets_it() {
    let mut s = session();
    let mut warned = false;
    for _ in 0..61 {
        warned |= say(&mut s, "wait").contains("Your stomach rumbles.");
    }
    assert!(warned);
    let vitals = s.scheduler().get_actor::<actors::Vitals>().unwrap();
    assert_eq!(vitals.hunger(), "peckish");

    play(&mut s, &["open locker", "take bar", "eat bar"]);
    let vitals = s.scheduler().get_actor::<actors::Vitals>().unwrap();
    assert_eq!(vitals.hunger(), "sated");
}

#[test]
fn pip_follows_the_player() {
    let mut s = session();
    let arrival = say(&mut s, "n");
    let pip = s.game().ctx().world().item_by_key(keys::PIP_ITEM).unwrap();
    let corridor = s.game().ctx().world().location_by_key(keys::CORRIDOR).unwrap();
    assert!(arrival.contains("Pip trundles in after you."));
    assert_eq!(
        s.game().ctx().world().item(pip).unwrap().owner(),
        lf_core::Owner::Location(corridor)
    );
    assert_eq!(say(&mut s, "talk to pip"), "Pip tilts its antenna towards you.");
}

#[test]
fn the_transcript_records_every_line() {
    let mut s = session();
    play(&mut s, &["look", "take cloak", "red"]);
    let transcript = s.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.exchanges()[2].input, "red");
    assert_eq!(transcript.exchanges()[2].output, "Taken.");
    assert_eq!(transcript.session, s.id());
}

#[test]
fn quitting_finishes_the_session() {
    let mut s = session();
    assert_eq!(s.process("quit").unwrap().outcome, TurnOutcome::Quit);
    assert!(s.is_finished());
    assert_eq!(say(&mut s, "look"), "The game is over.");
}
