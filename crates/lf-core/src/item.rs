//! Items: long-lived objects with exactly one owner.

use crate::capability::{Attrs, Capability, CapabilitySet};
use crate::world::{ItemId, Owner};

/// A long-lived object in the world.
///
/// Ownership fields are private; move items with
/// [`World::move_item`](crate::world::World::move_item) so the owner and its
/// contents stay in agreement.
#[derive(Debug, Clone)]
pub struct Item {
    pub(crate) id: ItemId,
    /// Stable lookup key used by content code.
    pub key: String,
    /// Display name ("glass flask").
    pub name: String,
    /// Head nouns the item answers to ("flask").
    pub nouns: Vec<String>,
    /// Modifiers that narrow a match ("glass", "red").
    pub adjectives: Vec<String>,
    /// Examine text.
    pub description: String,
    /// What the item can do.
    pub caps: CapabilitySet,
    /// Open state for openable holders and doors.
    pub open: bool,
    /// Switch state for switchable items.
    pub on: bool,
    /// Whether the player is wearing it.
    pub worn: bool,
    /// Whether it has ever been taken; first take awards points.
    pub taken: bool,
    /// Space it occupies inside a holder.
    pub size: u32,
    /// Contribution to carried weight.
    pub weight: u32,
    /// Total size a holder can take.
    pub capacity: u32,
    /// Score awarded on first take.
    pub points: u32,
    /// Whether "them" can refer to it.
    pub plural: bool,
    /// Fixtures described by the room text and left out of item listings.
    pub scenery: bool,
    /// Text shown by "read".
    pub text: Option<String>,
    /// When set, the only items this holder accepts.
    pub accepts: Option<Vec<ItemId>>,
    /// Content-specific state.
    pub attrs: Attrs,
    pub(crate) owner: Owner,
    pub(crate) contents: Vec<ItemId>,
}

impl Item {
    /// Create an item that can only be examined.
    ///
    /// The last word of the name becomes its noun and the preceding words its
    /// adjectives; override either with [`Item::nouns`] and [`Item::adjectives`].
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let words: Vec<String> = name.to_lowercase().split_whitespace().map(String::from).collect();
        let (nouns, adjectives) = match words.split_last() {
            Some((last, rest)) => (vec![last.clone()], rest.to_vec()),
            None => (Vec::new(), Vec::new()),
        };
        Self {
            id: ItemId::PLACEHOLDER,
            key: key.into(),
            name,
            nouns,
            adjectives,
            description: String::new(),
            caps: CapabilitySet::new(),
            open: false,
            on: false,
            worn: false,
            taken: false,
            size: 1,
            weight: 1,
            capacity: 0,
            points: 0,
            plural: false,
            scenery: false,
            text: None,
            accepts: None,
            attrs: Attrs::default(),
            owner: Owner::Nowhere,
            contents: Vec::new(),
        }
    }

    /// Replace the nouns.
    pub fn nouns<I, S>(mut self, nouns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nouns = nouns.into_iter().map(|s| s.into().to_lowercase()).collect();
        self
    }

    /// Replace the adjectives.
    pub fn adjectives<I, S>(mut self, adjectives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adjectives = adjectives.into_iter().map(|s| s.into().to_lowercase()).collect();
        self
    }

    /// Set the examine text.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Add a capability.
    pub fn with(mut self, cap: Capability) -> Self {
        self.caps.insert(cap);
        self
    }

    /// Make this a holder with the given capacity.
    pub fn holding(mut self, capacity: u32) -> Self {
        self.caps.insert(Capability::Holder);
        self.capacity = capacity;
        self
    }

    /// Start open.
    pub fn opened(mut self) -> Self {
        self.open = true;
        self
    }

    /// Start switched on.
    pub fn switched_on(mut self) -> Self {
        self.on = true;
        self
    }

    /// Set the readable text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.caps.insert(Capability::Readable);
        self.text = Some(text.into());
        self
    }

    /// Set the carried weight.
    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Set the size inside holders.
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Award points on first take.
    pub fn points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    /// Mark as plural so "them" can refer to it.
    pub fn plural(mut self) -> Self {
        self.plural = true;
        self
    }

    /// Leave out of room listings.
    pub fn scenery(mut self) -> Self {
        self.scenery = true;
        self
    }

    /// This item's handle.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Current owner.
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Items directly inside this one.
    pub fn contents(&self) -> &[ItemId] {
        &self.contents
    }

    /// Whether the item has a capability.
    pub fn has(&self, cap: Capability) -> bool {
        self.caps.has(cap)
    }

    /// Whether its contents can be seen and reached.
    pub fn reveals_contents(&self) -> bool {
        self.has(Capability::Holder)
            && (self.open || !self.has(Capability::Openable) || self.has(Capability::Transparent))
    }

    /// Whether items can currently be put in or taken out.
    pub fn is_accessible(&self) -> bool {
        self.has(Capability::Holder) && (self.open || !self.has(Capability::Openable))
    }

    /// Whether it currently gives off light.
    pub fn is_lit(&self) -> bool {
        self.has(Capability::LightSource) && (!self.has(Capability::Switchable) || self.on)
    }

    /// Name with an article: "the glass flask".
    pub fn the(&self) -> String {
        format!("the {}", self.name)
    }

    /// Name with an indefinite article: "a glass flask", "some rations".
    pub fn a(&self) -> String {
        if self.plural {
            return format!("some {}", self.name);
        }
        let article = match self.name.chars().next() {
            Some(c) if "aeiouAEIOU".contains(c) => "an",
            _ => "a",
        };
        format!("{article} {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_splits_into_noun_and_adjectives() {
        let item = Item::new("flask", "glass flask");
        assert_eq!(item.nouns, vec!["flask"]);
        assert_eq!(item.adjectives, vec!["glass"]);
    }

    #[test]
    fn articles() {
        assert_eq!(Item::new("lantern", "brass lantern").a(), "a brass lantern");
        assert_eq!(Item::new("orb", "amber orb").a(), "an amber orb");
        assert_eq!(Item::new("gloves", "gloves").plural().a(), "some gloves");
        assert_eq!(Item::new("fuse", "fuse").the(), "the fuse");
    }

    #[test]
    fn closed_transparent_holder_reveals_but_blocks() {
        let case = Item::new("case", "glass case")
            .holding(2)
            .with(Capability::Openable)
            .with(Capability::Transparent);
        assert!(case.reveals_contents());
        assert!(!case.is_accessible());
    }

    #[test]
    fn switchable_light_needs_power() {
        let lamp = Item::new("lamp", "lamp")
            .with(Capability::LightSource)
            .with(Capability::Switchable);
        assert!(!lamp.is_lit());
        assert!(lamp.switched_on().is_lit());
    }
}
