use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::clock::GameClock;
use crate::error::CoreResult;
use crate::roster::{ActorKey, ActorRoster};
use crate::world::{ItemId, LocationId, Owner, World};

/// How much of a room description to print on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Always the full description.
    Verbose,
    /// Full description on the first visit, the name afterwards.
    #[default]
    Brief,
    /// Only ever the name.
    Superbrief,
}

/// The noun of the most recently resolved command, for "it"/"them".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referent {
    /// Noun phrase that resolved ("red cloak").
    pub noun: String,
    /// The item it resolved to.
    pub item: ItemId,
    /// Whether "them" may refer to it.
    pub plural: bool,
}

/// One item offered in a disambiguation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The item.
    pub item: ItemId,
    /// Its full noun phrase ("red cloak").
    pub label: String,
    /// Words that pick this candidate out ("red").
    pub distinguishing: Vec<String>,
}

/// An outstanding clarification. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// Several items matched a noun; the next input should pick one.
    Choose {
        /// Items that matched.
        candidates: Vec<Candidate>,
        /// The command with `{}` where the chosen noun phrase goes.
        template: String,
        /// Whether the answer fills the primary noun slot.
        primary: bool,
        /// Item already settled for the other noun slot.
        pinned: Option<ItemId>,
        /// Invalid answers still tolerated before the prompt is dropped.
        retries_left: u32,
    },
    /// A pronoun had nothing to refer to; the next input names it.
    Referent {
        /// The command with `{}` where the named noun goes.
        template: String,
    },
}

/// Settings that survive a restart.
#[derive(Debug, Clone)]
pub struct ContextSettings {
    /// Chronometer minutes at the start of the game.
    pub start_minutes: u64,
    /// Chronometer minutes added per consumed turn.
    pub minutes_per_turn: u64,
    /// Heaviest load the player can carry.
    pub max_carry_weight: u32,
    /// Room description verbosity.
    pub verbosity: Verbosity,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            start_minutes: 8 * 60,
            minutes_per_turn: 54,
            max_carry_weight: 10,
            verbosity: Verbosity::Brief,
        }
    }
}

/// Per-session player state, threaded through every handler and actor.
///
/// Owns the [`World`] arena. On death the context is replaced wholesale by
/// [`Context::restart`]; only the death tally and the settings carry over.
#[derive(Debug)]
pub struct Context {
    world: World,
    location: LocationId,
    inside: Option<LocationId>,
    score: u32,
    clock: GameClock,
    roster: ActorRoster,
    pending: Option<Pending>,
    referent: Option<Referent>,
    deaths: u32,
    turn_flags: HashSet<String>,
    signals: Vec<String>,
    forced: Vec<String>,
    settings: ContextSettings,
}

impl Context {
    /// Start a session with the player at `start`.
    pub fn new(world: World, start: LocationId, settings: ContextSettings) -> CoreResult<Self> {
        world.location(start)?;
        Ok(Self {
            world,
            location: start,
            inside: None,
            score: 0,
            clock: GameClock::new(settings.start_minutes, settings.minutes_per_turn),
            roster: ActorRoster::new(),
            pending: None,
            referent: None,
            deaths: 0,
            turn_flags: HashSet::new(),
            signals: Vec::new(),
            forced: Vec::new(),
            settings,
        })
    }

    /// Replace this context wholesale after a death or restart: the world is
    /// restored to its sealed baseline and everything else starts fresh,
    /// except the death tally and the settings.
    pub fn restart(&mut self, start: LocationId) -> CoreResult<()> {
        self.world.location(start)?;
        let mut world = std::mem::take(&mut self.world);
        if let Err(err) = world.reset() {
            self.world = world;
            return Err(err);
        }
        let mut fresh = Self::new(world, start, self.settings.clone())?;
        fresh.deaths = self.deaths;
        *self = fresh;
        tracing::info!(deaths = self.deaths, %start, "context restarted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // World and position
    // -----------------------------------------------------------------------

    /// The world arena.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world arena, mutably.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The location the player stands in.
    pub fn location(&self) -> LocationId {
        self.location
    }

    /// The sub-location the player is inside, if any.
    pub fn inside(&self) -> Option<LocationId> {
        self.inside
    }

    /// Put the player somewhere without running any entry hooks.
    pub fn place_player(&mut self, location: LocationId) -> CoreResult<()> {
        self.world.location(location)?;
        self.location = location;
        self.inside = None;
        Ok(())
    }

    /// Step into a sub-location of the current location.
    pub fn enter_sublocation(&mut self, sub: LocationId) -> CoreResult<()> {
        self.world.location(sub)?;
        self.inside = Some(sub);
        Ok(())
    }

    /// Step back out of the current sub-location.
    pub fn leave_sublocation(&mut self) -> Option<LocationId> {
        self.inside.take()
    }

    /// Items the player can see: the room (and sub-location) first, then
    /// what they carry.
    pub fn visible_items(&self) -> CoreResult<Vec<ItemId>> {
        let mut items = self.world.visible_in(self.location)?;
        if let Some(sub) = self.inside {
            items.extend(self.world.visible_in(sub)?);
        }
        items.extend(self.world.visible_carried()?);
        Ok(items)
    }

    /// Whether the player can see by some light.
    pub fn has_light(&self) -> CoreResult<bool> {
        if !self.world.location(self.location)?.dark {
            return Ok(true);
        }
        Ok(self.world.carries_light()? || self.world.has_lit_item_in(self.location)?)
    }

    /// Whether the current location is dark with no light present.
    pub fn is_dark_here(&self) -> CoreResult<bool> {
        Ok(!self.has_light()?)
    }

    /// Move an item into the player's inventory.
    pub fn take(&mut self, item: ItemId) -> CoreResult<()> {
        self.world.move_item(item, Owner::Player)
    }

    /// Put an item down in the current location.
    pub fn drop_here(&mut self, item: ItemId) -> CoreResult<()> {
        let here = self.inside.unwrap_or(self.location);
        self.world.move_item(item, Owner::Location(here))
    }

    /// Items carried directly.
    pub fn inventory(&self) -> &[ItemId] {
        self.world.carried()
    }

    // -----------------------------------------------------------------------
    // Score and time
    // -----------------------------------------------------------------------

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add points to the score.
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Turns consumed in this life.
    pub fn moves(&self) -> u64 {
        self.clock.turn()
    }

    /// The game clock.
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// The game clock, mutably.
    pub fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    /// Deaths across every life in this session.
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Count one more death.
    pub fn record_death(&mut self) {
        self.deaths += 1;
    }

    /// Heaviest load the player can carry.
    pub fn max_carry_weight(&self) -> u32 {
        self.settings.max_carry_weight
    }

    /// Current verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.settings.verbosity
    }

    /// Change verbosity.
    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.settings.verbosity = verbosity;
    }

    // -----------------------------------------------------------------------
    // Actors
    // -----------------------------------------------------------------------

    /// The active-actor roster.
    pub fn roster(&self) -> &ActorRoster {
        &self.roster
    }

    /// The active-actor roster, mutably.
    pub fn roster_mut(&mut self) -> &mut ActorRoster {
        &mut self.roster
    }

    /// Register an actor; takes effect at the start of the next scheduler pass.
    pub fn register_actor(&mut self, key: ActorKey) {
        if self.roster.register(key) {
            tracing::info!(actor = %key, "actor registered");
        }
    }

    /// Unregister an actor; takes effect at the start of the next scheduler pass.
    pub fn unregister_actor(&mut self, key: ActorKey) {
        if self.roster.unregister(key) {
            tracing::info!(actor = %key, "actor unregistered");
        }
    }

    // -----------------------------------------------------------------------
    // Clarification and pronouns
    // -----------------------------------------------------------------------

    /// The outstanding clarification, if any.
    pub fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    /// Replace any outstanding clarification with `pending`.
    pub fn set_pending(&mut self, pending: Pending) {
        if self.pending.is_some() {
            tracing::debug!("superseding outstanding clarification");
        }
        self.pending = Some(pending);
    }

    /// Remove and return the outstanding clarification.
    pub fn take_pending(&mut self) -> Option<Pending> {
        self.pending.take()
    }

    /// The last resolved noun.
    pub fn referent(&self) -> Option<&Referent> {
        self.referent.as_ref()
    }

    /// Remember the noun of a resolved command.
    pub fn set_referent(&mut self, referent: Referent) {
        self.referent = Some(referent);
    }

    /// Forget the last resolved noun.
    pub fn clear_referent(&mut self) {
        self.referent = None;
    }

    // -----------------------------------------------------------------------
    // Per-turn flags, signals, forced text
    // -----------------------------------------------------------------------

    /// Set a one-shot flag for this turn. Returns `true` only the first time.
    pub fn flag_once(&mut self, flag: &str) -> bool {
        self.turn_flags.insert(flag.to_string())
    }

    /// Whether a one-shot flag was set this turn.
    pub fn turn_flag(&self, flag: &str) -> bool {
        self.turn_flags.contains(flag)
    }

    /// Clear every one-shot flag. Called at the beginning of each turn.
    pub fn clear_turn_flags(&mut self) {
        self.turn_flags.clear();
    }

    /// Post a named signal for an actor to consume.
    pub fn post(&mut self, signal: impl Into<String>) {
        self.signals.push(signal.into());
    }

    /// Consume a posted signal. Returns whether it was present.
    pub fn take_signal(&mut self, signal: &str) -> bool {
        match self.signals.iter().position(|s| s == signal) {
            Some(pos) => {
                self.signals.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Queue text to open the next turn's narration.
    pub fn push_forced(&mut self, text: impl Into<String>) {
        self.forced.push(text.into());
    }

    /// Take all queued opening text.
    pub fn drain_forced(&mut self) -> Vec<String> {
        std::mem::take(&mut self.forced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;
    use crate::item::Item;
    use crate::location::Location;

    fn test_context() -> Context {
        let mut world = World::new();
        let hall = world.add_location(Location::new("hall", "Hall")).unwrap();
        let cellar = world
            .add_location(Location::new("cellar", "Cellar").dark())
            .unwrap();
        world
            .add_item(
                Item::new("lantern", "brass lantern")
                    .with(Capability::Takeable)
                    .with(Capability::LightSource)
                    .with(Capability::Switchable),
                Owner::Location(hall),
            )
            .unwrap();
        world
            .add_item(Item::new("crate", "crate").holding(2), Owner::Location(cellar))
            .unwrap();
        world.seal();
        Context::new(world, hall, ContextSettings::default()).unwrap()
    }

    fn cellar(ctx: &Context) -> LocationId {
        ctx.world().location_by_key("cellar").unwrap()
    }

    fn lantern(ctx: &Context) -> ItemId {
        ctx.world().item_by_key("lantern").unwrap()
    }

    #[test]
    fn lit_location_has_light() {
        let ctx = test_context();
        assert!(ctx.has_light().unwrap());
    }

    #[test]
    fn dark_location_without_light() {
        let mut ctx = test_context();
        let cellar = cellar(&ctx);
        ctx.place_player(cellar).unwrap();
        assert!(ctx.is_dark_here().unwrap());
    }

    #[test]
    fn carried_lantern_lights_only_when_on() {
        let mut ctx = test_context();
        let lantern = lantern(&ctx);
        ctx.take(lantern).unwrap();
        let cellar = cellar(&ctx);
        ctx.place_player(cellar).unwrap();
        assert!(ctx.is_dark_here().unwrap());
        ctx.world_mut().item_mut(lantern).unwrap().on = true;
        assert!(ctx.has_light().unwrap());
    }

    #[test]
    fn lit_lantern_in_open_crate_lights_room() {
        let mut ctx = test_context();
        let lantern = lantern(&ctx);
        let crate_id = ctx.world().item_by_key("crate").unwrap();
        ctx.world_mut().item_mut(lantern).unwrap().on = true;
        ctx.world_mut()
            .move_item(lantern, Owner::Item(crate_id))
            .unwrap();
        let cellar = cellar(&ctx);
        ctx.place_player(cellar).unwrap();
        assert!(ctx.has_light().unwrap());
    }

    #[test]
    fn drop_places_item_here() {
        let mut ctx = test_context();
        let lantern = lantern(&ctx);
        ctx.take(lantern).unwrap();
        let cellar = cellar(&ctx);
        ctx.place_player(cellar).unwrap();
        ctx.drop_here(lantern).unwrap();
        assert!(ctx.inventory().is_empty());
        assert_eq!(
            ctx.world().item(lantern).unwrap().owner(),
            Owner::Location(cellar)
        );
    }

    #[test]
    fn restart_keeps_only_cross_life_counters() {
        let mut ctx = test_context();
        let lantern = lantern(&ctx);
        let hall = ctx.location();
        ctx.take(lantern).unwrap();
        ctx.add_score(5);
        ctx.clock_mut().advance();
        ctx.record_death();
        ctx.set_verbosity(Verbosity::Verbose);
        ctx.register_actor(ActorKey("chase"));
        ctx.restart(hall).unwrap();
        assert_eq!(ctx.score(), 0);
        assert_eq!(ctx.moves(), 0);
        assert_eq!(ctx.deaths(), 1);
        assert_eq!(ctx.verbosity(), Verbosity::Verbose);
        assert!(ctx.inventory().is_empty());
        assert!(!ctx.roster().will_be_active(ActorKey("chase")));
    }

    #[test]
    fn flag_once_is_turn_scoped() {
        let mut ctx = test_context();
        assert!(ctx.flag_once("commented"));
        assert!(!ctx.flag_once("commented"));
        ctx.clear_turn_flags();
        assert!(ctx.flag_once("commented"));
    }

    #[test]
    fn pending_slot_replaces_rather_than_stacks() {
        let mut ctx = test_context();
        ctx.set_pending(Pending::Referent {
            template: "take {}".into(),
        });
        ctx.set_pending(Pending::Referent {
            template: "drop {}".into(),
        });
        assert_eq!(
            ctx.take_pending(),
            Some(Pending::Referent {
                template: "drop {}".into()
            })
        );
        assert!(ctx.pending().is_none());
    }

    #[test]
    fn signals_are_consumed_once() {
        let mut ctx = test_context();
        ctx.post("ate");
        assert!(ctx.take_signal("ate"));
        assert!(!ctx.take_signal("ate"));
    }
}
