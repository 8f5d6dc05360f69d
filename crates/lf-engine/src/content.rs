//! Content registry: per-location and per-item hooks, two-item processors,
//! and the actors a game starts with.

use std::collections::HashMap;
use std::fmt;

use lf_core::{ActorKey, Context, ItemId, LocationId};

use crate::dispatch::{InteractionResult, ProcessorRegistry, TwoItemProcessor};
use crate::error::EngineResult;
use crate::parser::Intent;

/// Custom behavior for one location.
///
/// Hooks hold no state of their own; anything that must change over a game
/// lives in location or item attributes, so a restart resets it.
pub trait LocationHook: fmt::Debug {
    /// Claim an intent before any item gets to see it. Two-noun intents come
    /// here first too, so a location can own phrasings like "put flask
    /// under spout".
    fn respond(&self, _intent: &Intent, _ctx: &mut Context) -> EngineResult<InteractionResult> {
        Ok(InteractionResult::unclaimed())
    }

    /// The player is about to leave.
    fn on_leave(&self, _ctx: &mut Context) -> EngineResult<Option<String>> {
        Ok(None)
    }

    /// The player is arriving; runs before the room is described.
    fn before_enter(&self, _ctx: &mut Context) -> EngineResult<Option<String>> {
        Ok(None)
    }

    /// The player has arrived and seen the room.
    fn after_enter(&self, _ctx: &mut Context) -> EngineResult<Option<String>> {
        Ok(None)
    }
}

/// Custom behavior for one item, consulted before its capability defaults.
pub trait ItemHook: fmt::Debug {
    /// Claim an intent. `item` is the hooked item, which may or may not be
    /// the one the intent names.
    fn respond(&self, item: ItemId, intent: &Intent, ctx: &mut Context) -> EngineResult<InteractionResult>;
}

/// Everything a game adds on top of its world.
#[derive(Debug)]
pub struct Content {
    /// Game title.
    pub title: String,
    /// Text shown once before the first room description.
    pub intro: String,
    restart: LocationId,
    initial_actors: Vec<ActorKey>,
    location_hooks: HashMap<LocationId, Box<dyn LocationHook>>,
    item_hooks: HashMap<ItemId, Box<dyn ItemHook>>,
    processors: ProcessorRegistry,
}

impl Content {
    /// Content with the default two-item processors and no hooks.
    pub fn new(title: impl Into<String>, restart: LocationId) -> Self {
        Self {
            title: title.into(),
            intro: String::new(),
            restart,
            initial_actors: Vec::new(),
            location_hooks: HashMap::new(),
            item_hooks: HashMap::new(),
            processors: ProcessorRegistry::with_defaults(),
        }
    }

    /// Set the intro text.
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = intro.into();
        self
    }

    /// Attach a hook to a location, replacing any earlier one.
    pub fn on_location(&mut self, location: LocationId, hook: impl LocationHook + 'static) {
        self.location_hooks.insert(location, Box::new(hook));
    }

    /// Attach a hook to an item, replacing any earlier one.
    pub fn on_item(&mut self, item: ItemId, hook: impl ItemHook + 'static) {
        self.item_hooks.insert(item, Box::new(hook));
    }

    /// Register another two-item processor.
    pub fn add_processor(&mut self, processor: impl TwoItemProcessor + 'static) -> EngineResult<()> {
        self.processors.register(processor)
    }

    /// Register an actor at the start of every life.
    pub fn start_actor(&mut self, key: ActorKey) {
        if !self.initial_actors.contains(&key) {
            self.initial_actors.push(key);
        }
    }

    /// Hook for a location.
    pub fn location_hook(&self, location: LocationId) -> Option<&dyn LocationHook> {
        self.location_hooks.get(&location).map(|h| h.as_ref())
    }

    /// Hook for an item.
    pub fn item_hook(&self, item: ItemId) -> Option<&dyn ItemHook> {
        self.item_hooks.get(&item).map(|h| h.as_ref())
    }

    /// Two-item processors.
    pub fn processors(&self) -> &ProcessorRegistry {
        &self.processors
    }

    /// Where the player starts and restarts.
    pub fn restart_location(&self) -> LocationId {
        self.restart
    }

    /// Actors registered at the start of every life.
    pub fn initial_actors(&self) -> &[ActorKey] {
        &self.initial_actors
    }
}
