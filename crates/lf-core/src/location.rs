//! Locations and their guarded movement edges.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::capability::Attrs;
use crate::context::Context;
use crate::direction::Direction;
use crate::world::{ItemId, LocationId};

/// A predicate that must hold before an exit can be used.
#[derive(Clone)]
pub enum Guard {
    /// The item (usually a door) must be open.
    ItemOpen(ItemId),
    /// The player must be carrying the item.
    Carrying(ItemId),
    /// The player must not be carrying the item.
    NotCarrying(ItemId),
    /// A location flag must be set.
    Flag {
        /// Location holding the flag.
        location: LocationId,
        /// Attribute key of the flag.
        key: String,
    },
    /// Arbitrary content-supplied predicate.
    Custom(Arc<dyn Fn(&Context) -> bool + Send + Sync>),
}

impl Guard {
    /// Evaluate the guard against the current context.
    pub fn allows(&self, ctx: &Context) -> bool {
        let world = ctx.world();
        match self {
            Self::ItemOpen(item) => world.item(*item).is_ok_and(|i| i.open),
            Self::Carrying(item) => world.is_carried(*item),
            Self::NotCarrying(item) => !world.is_carried(*item),
            Self::Flag { location, key } => world.location(*location).is_ok_and(|l| l.attrs.flag(key)),
            Self::Custom(pred) => pred(ctx),
        }
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemOpen(item) => f.debug_tuple("ItemOpen").field(item).finish(),
            Self::Carrying(item) => f.debug_tuple("Carrying").field(item).finish(),
            Self::NotCarrying(item) => f.debug_tuple("NotCarrying").field(item).finish(),
            Self::Flag { location, key } => f
                .debug_struct("Flag")
                .field("location", location)
                .field("key", key)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One movement edge out of a location.
#[derive(Debug, Clone)]
pub struct Exit {
    /// Where the edge leads.
    pub target: LocationId,
    /// Optional predicate that must hold to pass.
    pub guard: Option<Guard>,
    /// Narration when the guard refuses; a generic line is used otherwise.
    pub failure: Option<String>,
    /// Maximum carried weight allowed through this edge.
    pub weight_limit: Option<u32>,
    /// Narration when the weight limit refuses.
    pub weight_failure: Option<String>,
}

impl Exit {
    /// An unguarded edge to `target`.
    pub fn to(target: LocationId) -> Self {
        Self {
            target,
            guard: None,
            failure: None,
            weight_limit: None,
            weight_failure: None,
        }
    }

    /// Require `guard` to pass, narrating `failure` when it does not.
    pub fn guarded(mut self, guard: Guard, failure: impl Into<String>) -> Self {
        self.guard = Some(guard);
        self.failure = Some(failure.into());
        self
    }

    /// Refuse passage when carrying more than `limit`.
    pub fn with_weight_limit(mut self, limit: u32, failure: impl Into<String>) -> Self {
        self.weight_limit = Some(limit);
        self.weight_failure = Some(failure.into());
        self
    }
}

/// A place the player can be.
#[derive(Debug, Clone)]
pub struct Location {
    pub(crate) id: LocationId,
    /// Stable lookup key used by content code.
    pub key: String,
    /// Display name, shown as the room heading.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Nouns naming this location when it is entered as a sub-location.
    pub nouns: Vec<String>,
    /// Whether the location needs a light source to see anything.
    pub dark: bool,
    /// Movement edges.
    pub exits: BTreeMap<Direction, Exit>,
    /// Optional nested spot inside this location (a bunk, a booth).
    pub sublocation: Option<LocationId>,
    /// How many times the player has entered.
    pub visits: u32,
    /// Content-specific state.
    pub attrs: Attrs,
    pub(crate) items: Vec<ItemId>,
}

impl Location {
    /// Create a lit location with no exits.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: LocationId::PLACEHOLDER,
            key: key.into(),
            name: name.into(),
            description: String::new(),
            nouns: Vec::new(),
            dark: false,
            exits: BTreeMap::new(),
            sublocation: None,
            visits: 0,
            attrs: Attrs::default(),
            items: Vec::new(),
        }
    }

    /// Set the description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Mark the location as dark.
    pub fn dark(mut self) -> Self {
        self.dark = true;
        self
    }

    /// Set the nouns a sub-location answers to.
    pub fn nouns<I, S>(mut self, nouns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nouns = nouns.into_iter().map(Into::into).collect();
        self
    }

    /// This location's handle.
    pub fn id(&self) -> LocationId {
        self.id
    }

    /// Items lying directly in this location.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Whether `noun` names this location.
    pub fn answers_to(&self, noun: &str) -> bool {
        let noun = noun.to_lowercase();
        self.nouns.iter().any(|n| *n == noun) || self.name.to_lowercase() == noun
    }
}
