//! Two-item processors: generic handlers for "verb X prep Y" keyed by the
//! verb, the preposition, and a capability of the second item.

use std::fmt;

use lf_core::{Capability, CapabilitySet, Context, ItemId, Owner};

use super::items;
use super::result::InteractionResult;
use crate::error::{EngineError, EngineResult};
use crate::text::capitalize;

/// Handles one family of two-noun phrasings.
pub trait TwoItemProcessor: fmt::Debug {
    /// Name used in conflict reports.
    fn name(&self) -> &'static str;

    /// Canonical verb.
    fn verb(&self) -> &'static str;

    /// Prepositions accepted between the nouns.
    fn prepositions(&self) -> &'static [&'static str];

    /// Capability the second item must have.
    fn requires(&self) -> Capability;

    /// Act on `first` with respect to `second`.
    fn apply(&self, first: ItemId, second: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult>;
}

/// The registered processors. No two may claim the same verb, preposition,
/// and capability, so lookup never has to choose.
#[derive(Debug, Default)]
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn TwoItemProcessor>>,
}

impl ProcessorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in processors: putting into holders, taking out of them,
    /// and attacking with weapons.
    pub fn with_defaults() -> Self {
        Self {
            processors: vec![Box::new(PutIn), Box::new(TakeFrom), Box::new(AttackWith)],
        }
    }

    /// Add a processor, refusing one that overlaps an existing processor.
    pub fn register(&mut self, processor: impl TwoItemProcessor + 'static) -> EngineResult<()> {
        for existing in &self.processors {
            if existing.verb() != processor.verb() || existing.requires() != processor.requires() {
                continue;
            }
            if let Some(prep) = processor
                .prepositions()
                .iter()
                .find(|p| existing.prepositions().contains(*p))
            {
                return Err(EngineError::ProcessorConflict {
                    existing: existing.name(),
                    added: processor.name(),
                    verb: processor.verb(),
                    preposition: *prep,
                    capability: processor.requires(),
                });
            }
        }
        tracing::debug!(processor = processor.name(), "registered two-item processor");
        self.processors.push(Box::new(processor));
        Ok(())
    }

    /// The processor for this phrasing whose capability the second item has.
    pub fn find(&self, verb: &str, preposition: &str, caps: &CapabilitySet) -> Option<&dyn TwoItemProcessor> {
        self.processors
            .iter()
            .find(|p| p.verb() == verb && p.prepositions().contains(&preposition) && caps.has(p.requires()))
            .map(|p| p.as_ref())
    }

    /// Whether any processor knows this verb and preposition.
    pub fn handles(&self, verb: &str, preposition: &str) -> bool {
        self.processors
            .iter()
            .any(|p| p.verb() == verb && p.prepositions().contains(&preposition))
    }

    /// Number of registered processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether no processors are registered.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

/// "put X in Y" for holders.
#[derive(Debug)]
struct PutIn;

impl TwoItemProcessor for PutIn {
    fn name(&self) -> &'static str {
        "put-in"
    }

    fn verb(&self) -> &'static str {
        "put"
    }

    fn prepositions(&self) -> &'static [&'static str] {
        &["in", "into", "inside", "on", "onto"]
    }

    fn requires(&self) -> Capability {
        Capability::Holder
    }

    fn apply(&self, first: ItemId, second: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult> {
        let world = ctx.world();
        let item = world.item(first)?;
        let holder = world.item(second)?;

        if first == second || world.is_within(second, first) {
            return Ok(InteractionResult::positive(format!(
                "You can't put {} inside itself.",
                item.the()
            )));
        }
        if !world.is_held(first) {
            return Ok(InteractionResult::positive(format!("You don't have {}.", item.the())));
        }
        if !holder.is_accessible() {
            return Ok(InteractionResult::positive(format!(
                "{} is closed.",
                capitalize(&holder.the())
            )));
        }
        if holder.accepts.as_ref().is_some_and(|ok| !ok.contains(&first)) {
            return Ok(InteractionResult::positive(format!(
                "{} won't go in {}.",
                capitalize(&item.the()),
                holder.the()
            )));
        }
        if world.used_capacity(second)? + item.size > holder.capacity {
            return Ok(InteractionResult::positive(format!(
                "There's no more room in {}.",
                holder.the()
            )));
        }

        let world = ctx.world_mut();
        world.move_item(first, Owner::Item(second))?;
        world.item_mut(first)?.worn = false;
        Ok(InteractionResult::positive("Done."))
    }
}

/// "take X from Y" for holders.
#[derive(Debug)]
struct TakeFrom;

impl TwoItemProcessor for TakeFrom {
    fn name(&self) -> &'static str {
        "take-from"
    }

    fn verb(&self) -> &'static str {
        "take"
    }

    fn prepositions(&self) -> &'static [&'static str] {
        &["from", "in", "inside", "off"]
    }

    fn requires(&self) -> Capability {
        Capability::Holder
    }

    fn apply(&self, first: ItemId, second: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult> {
        let world = ctx.world();
        let item = world.item(first)?;
        let holder = world.item(second)?;
        if !holder.is_accessible() {
            return Ok(InteractionResult::positive(format!(
                "{} is closed.",
                capitalize(&holder.the())
            )));
        }
        if item.owner() != Owner::Item(second) {
            return Ok(InteractionResult::positive(format!(
                "{} isn't in {}.",
                capitalize(&item.the()),
                holder.the()
            )));
        }
        items::take(first, ctx)
    }
}

/// "attack X with Y" for weapons.
#[derive(Debug)]
struct AttackWith;

impl TwoItemProcessor for AttackWith {
    fn name(&self) -> &'static str {
        "attack-with"
    }

    fn verb(&self) -> &'static str {
        "attack"
    }

    fn prepositions(&self) -> &'static [&'static str] {
        &["with"]
    }

    fn requires(&self) -> Capability {
        Capability::Weapon
    }

    fn apply(&self, first: ItemId, second: ItemId, ctx: &mut Context) -> EngineResult<InteractionResult> {
        let world = ctx.world();
        let weapon = world.item(second)?;
        if !world.is_held(second) {
            return Ok(InteractionResult::positive(format!("You don't have {}.", weapon.the())));
        }
        let target = world.item(first)?;
        Ok(InteractionResult::positive(format!(
            "You take a swing at {} with {}. Nothing much happens.",
            target.the(),
            weapon.the()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::{ContextSettings, Item, Location, World};

    #[derive(Debug)]
    struct Pour;

    impl TwoItemProcessor for Pour {
        fn name(&self) -> &'static str {
            "pour-into"
        }
        fn verb(&self) -> &'static str {
            "put"
        }
        fn prepositions(&self) -> &'static [&'static str] {
            &["into"]
        }
        fn requires(&self) -> Capability {
            Capability::Holder
        }
        fn apply(&self, _: ItemId, _: ItemId, _: &mut Context) -> EngineResult<InteractionResult> {
            Ok(InteractionResult::positive("Poured."))
        }
    }

    fn locker_room() -> (Context, ItemId, ItemId, ItemId) {
        let mut world = World::new();
        let room = world.add_location(Location::new("room", "Room")).unwrap();
        let locker = world
            .add_item(
                Item::new("locker", "locker").holding(1).with(Capability::Openable),
                Owner::Location(room),
            )
            .unwrap();
        let bar = world
            .add_item(Item::new("bar", "ration bar").with(Capability::Takeable), Owner::Player)
            .unwrap();
        let fuse = world
            .add_item(Item::new("fuse", "fuse").with(Capability::Takeable), Owner::Player)
            .unwrap();
        world.seal();
        let ctx = Context::new(world, room, ContextSettings::default()).unwrap();
        (ctx, locker, bar, fuse)
    }

    #[test]
    fn overlapping_processor_is_rejected() {
        let mut registry = ProcessorRegistry::with_defaults();
        assert!(matches!(
            registry.register(Pour),
            Err(EngineError::ProcessorConflict {
                existing: "put-in",
                preposition: "into",
                ..
            })
        ));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn lookup_needs_the_capability() {
        let registry = ProcessorRegistry::with_defaults();
        let holder = CapabilitySet::new().with(Capability::Holder);
        assert_eq!(registry.find("put", "in", &holder).map(|p| p.name()), Some("put-in"));
        assert!(registry.find("put", "in", &CapabilitySet::new()).is_none());
        assert!(registry.handles("put", "in"));
        assert!(!registry.handles("put", "under"));
    }

    #[test]
    fn put_in_respects_open_state_and_capacity() {
        let (mut ctx, locker, bar, fuse) = locker_room();
        let put = PutIn;
        assert_eq!(
            put.apply(bar, locker, &mut ctx).unwrap(),
            InteractionResult::positive("The locker is closed.")
        );
        ctx.world_mut().item_mut(locker).unwrap().open = true;
        assert_eq!(put.apply(bar, locker, &mut ctx).unwrap(), InteractionResult::positive("Done."));
        assert_eq!(ctx.world().item(bar).unwrap().owner(), Owner::Item(locker));
        assert_eq!(
            put.apply(fuse, locker, &mut ctx).unwrap(),
            InteractionResult::positive("There's no more room in the locker.")
        );
    }

    #[test]
    fn take_from_checks_the_holder() {
        let (mut ctx, locker, bar, fuse) = locker_room();
        ctx.world_mut().item_mut(locker).unwrap().open = true;
        PutIn.apply(bar, locker, &mut ctx).unwrap();
        assert_eq!(
            TakeFrom.apply(fuse, locker, &mut ctx).unwrap(),
            InteractionResult::positive("The fuse isn't in the locker.")
        );
        assert_eq!(TakeFrom.apply(bar, locker, &mut ctx).unwrap(), InteractionResult::positive("Taken."));
        assert!(ctx.world().is_carried(bar));
    }
}
