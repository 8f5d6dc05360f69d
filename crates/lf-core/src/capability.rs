//! Per-entity capability sets and free-form attributes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named behavioral contract an item may or may not implement.
///
/// Handlers ask "does this item have capability X" instead of relying on
/// a type hierarchy, so two items of the same shape can differ per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Can be picked up and dropped.
    Takeable,
    /// Can hold other items.
    Holder,
    /// Can be opened and closed.
    Openable,
    /// Contents are visible even while closed.
    Transparent,
    /// Has text to read.
    Readable,
    /// Can be worn and removed.
    Wearable,
    /// Can be turned on and off.
    Switchable,
    /// Gives off light (always, or while switched on if also switchable).
    LightSource,
    /// Can be eaten.
    Edible,
    /// Can be drunk.
    Drinkable,
    /// Can be used to attack.
    Weapon,
}

impl Capability {
    /// Lowercase display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Takeable => "takeable",
            Self::Holder => "holder",
            Self::Openable => "openable",
            Self::Transparent => "transparent",
            Self::Readable => "readable",
            Self::Wearable => "wearable",
            Self::Switchable => "switchable",
            Self::LightSource => "light source",
            Self::Edible => "edible",
            Self::Drinkable => "drinkable",
            Self::Weapon => "weapon",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of capabilities one entity carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// An empty set: the item can only be examined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability, builder style.
    pub fn with(mut self, cap: Capability) -> Self {
        self.0.insert(cap);
        self
    }

    /// Add a capability in place.
    pub fn insert(&mut self, cap: Capability) {
        self.0.insert(cap);
    }

    /// Remove a capability in place.
    pub fn remove(&mut self, cap: Capability) {
        self.0.remove(&cap);
    }

    /// Whether the set contains `cap`.
    pub fn has(&self, cap: Capability) -> bool {
        self.0.contains(&cap)
    }

    /// Iterate the capabilities in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A flexible attribute value for content-specific state (puzzle flags,
/// fluid colors, counters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A boolean flag.
    Flag(bool),
    /// A signed counter.
    Number(i64),
    /// A text value.
    Text(String),
}

/// String-keyed attribute bag carried by locations and items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attrs(BTreeMap<String, AttrValue>);

impl Attrs {
    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
        self.0.insert(key.into(), value);
    }

    /// Read an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Read a flag; missing or non-flag values are `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(AttrValue::Flag(true)))
    }

    /// Set a flag.
    pub fn set_flag(&mut self, key: impl Into<String>, on: bool) {
        self.set(key, AttrValue::Flag(on));
    }

    /// Read a text attribute.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(AttrValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Read a numeric attribute; missing values are zero.
    pub fn number(&self, key: &str) -> i64 {
        match self.0.get(key) {
            Some(AttrValue::Number(n)) => *n,
            _ => 0,
        }
    }

    /// Remove an attribute.
    pub fn clear(&mut self, key: &str) {
        self.0.remove(key);
    }
}
