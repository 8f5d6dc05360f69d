use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};
use crate::item::Item;
use crate::location::{Exit, Location};

/// Dense handle to a [`Location`] in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(u32);

impl LocationId {
    pub(crate) const PLACEHOLDER: Self = Self(u32::MAX);

    /// Position in the world's location arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loc#{}", self.0)
    }
}

/// Dense handle to an [`Item`] in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    pub(crate) const PLACEHOLDER: Self = Self(u32::MAX);

    /// Position in the world's item arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// The single owner of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Lying in a location.
    Location(LocationId),
    /// Inside or on another item.
    Item(ItemId),
    /// Carried by the player.
    Player,
    /// Out of play.
    Nowhere,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location(id) => write!(f, "{id}"),
            Self::Item(id) => write!(f, "{id}"),
            Self::Player => write!(f, "player"),
            Self::Nowhere => write!(f, "nowhere"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Handle {
    Location(LocationId),
    Item(ItemId),
}

#[derive(Debug, Clone)]
struct Baseline {
    locations: Vec<Location>,
    items: Vec<Item>,
    carried: Vec<ItemId>,
}

/// Arena of every location and item in a game.
///
/// Built once at startup, then [`sealed`](World::seal). Handles stay valid for
/// the whole session; [`reset`](World::reset) restores the sealed state in
/// place instead of rebuilding.
#[derive(Debug, Clone, Default)]
pub struct World {
    locations: Vec<Location>,
    items: Vec<Item>,
    carried: Vec<ItemId>,
    keys: HashMap<String, Handle>,
    baseline: Option<Box<Baseline>>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Add a location. Returns its handle.
    pub fn add_location(&mut self, mut location: Location) -> CoreResult<LocationId> {
        let id = LocationId(self.locations.len() as u32);
        self.claim_key(&location.key, Handle::Location(id))?;
        location.id = id;
        self.locations.push(location);
        Ok(id)
    }

    /// Add an item under `owner`. Returns its handle.
    pub fn add_item(&mut self, mut item: Item, owner: Owner) -> CoreResult<ItemId> {
        self.check_owner(owner)?;
        let id = ItemId(self.items.len() as u32);
        self.claim_key(&item.key, Handle::Item(id))?;
        item.id = id;
        item.owner = Owner::Nowhere;
        item.contents.clear();
        self.items.push(item);
        self.attach(id, owner)?;
        Ok(id)
    }

    /// Add a one-way edge from `from` in direction `dir`.
    pub fn connect(&mut self, from: LocationId, dir: Direction, exit: Exit) -> CoreResult<()> {
        self.location(exit.target)?;
        self.location_mut(from)?.exits.insert(dir, exit);
        Ok(())
    }

    /// Add plain edges both ways between two locations.
    pub fn link(&mut self, a: LocationId, dir: Direction, b: LocationId) -> CoreResult<()> {
        self.connect(a, dir, Exit::to(b))?;
        self.connect(b, dir.opposite(), Exit::to(a))
    }

    /// Nest `inner` inside `outer` as its sub-location.
    pub fn nest(&mut self, outer: LocationId, inner: LocationId) -> CoreResult<()> {
        self.location(inner)?;
        self.location_mut(outer)?.sublocation = Some(inner);
        Ok(())
    }

    fn claim_key(&mut self, key: &str, handle: Handle) -> CoreResult<()> {
        if self.keys.contains_key(key) {
            return Err(CoreError::DuplicateKey(key.to_string()));
        }
        self.keys.insert(key.to_string(), handle);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a location by handle.
    pub fn location(&self, id: LocationId) -> CoreResult<&Location> {
        self.locations
            .get(id.index())
            .ok_or(CoreError::LocationNotFound(id))
    }

    /// Get a location mutably by handle.
    pub fn location_mut(&mut self, id: LocationId) -> CoreResult<&mut Location> {
        self.locations
            .get_mut(id.index())
            .ok_or(CoreError::LocationNotFound(id))
    }

    /// Get an item by handle.
    pub fn item(&self, id: ItemId) -> CoreResult<&Item> {
        self.items.get(id.index()).ok_or(CoreError::ItemNotFound(id))
    }

    /// Get an item mutably by handle.
    pub fn item_mut(&mut self, id: ItemId) -> CoreResult<&mut Item> {
        self.items
            .get_mut(id.index())
            .ok_or(CoreError::ItemNotFound(id))
    }

    /// Look up a location by its content key.
    pub fn location_by_key(&self, key: &str) -> CoreResult<LocationId> {
        match self.keys.get(key) {
            Some(Handle::Location(id)) => Ok(*id),
            _ => Err(CoreError::UnknownKey(key.to_string())),
        }
    }

    /// Look up an item by its content key.
    pub fn item_by_key(&self, key: &str) -> CoreResult<ItemId> {
        match self.keys.get(key) {
            Some(Handle::Item(id)) => Ok(*id),
            _ => Err(CoreError::UnknownKey(key.to_string())),
        }
    }

    /// All locations in creation order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// All items in creation order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Number of items in the arena.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    // -----------------------------------------------------------------------
    // Ownership
    // -----------------------------------------------------------------------

    /// Items directly held by `owner`.
    pub fn contents(&self, owner: Owner) -> CoreResult<&[ItemId]> {
        match owner {
            Owner::Location(id) => Ok(&self.location(id)?.items),
            Owner::Item(id) => Ok(&self.item(id)?.contents),
            Owner::Player => Ok(&self.carried),
            Owner::Nowhere => Ok(&[]),
        }
    }

    /// Items the player carries directly.
    pub fn carried(&self) -> &[ItemId] {
        &self.carried
    }

    /// Whether the player holds the item directly.
    pub fn is_carried(&self, item: ItemId) -> bool {
        self.carried.contains(&item)
    }

    /// Whether the item is inside something the player carries, at any depth.
    pub fn is_held(&self, item: ItemId) -> bool {
        let mut owner = self.items.get(item.index()).map(|i| i.owner);
        while let Some(current) = owner {
            match current {
                Owner::Player => return true,
                Owner::Item(parent) => owner = self.items.get(parent.index()).map(|i| i.owner),
                _ => return false,
            }
        }
        false
    }

    /// Move an item to a new owner. Detaches before attaching.
    pub fn move_item(&mut self, item: ItemId, to: Owner) -> CoreResult<()> {
        self.check_owner(to)?;
        if let Owner::Item(target) = to {
            if target == item || self.is_within(target, item) {
                return Err(CoreError::OwnershipCycle { item, target: to });
            }
        }
        self.detach(item)?;
        self.attach(item, to)
    }

    /// Whether `item` sits inside `ancestor`, at any depth.
    pub fn is_within(&self, item: ItemId, ancestor: ItemId) -> bool {
        let mut owner = self.items.get(item.index()).map(|i| i.owner);
        while let Some(Owner::Item(parent)) = owner {
            if parent == ancestor {
                return true;
            }
            owner = self.items.get(parent.index()).map(|i| i.owner);
        }
        false
    }

    fn check_owner(&self, owner: Owner) -> CoreResult<()> {
        match owner {
            Owner::Location(id) => self.location(id).map(|_| ()),
            Owner::Item(id) => self.item(id).map(|_| ()),
            Owner::Player | Owner::Nowhere => Ok(()),
        }
    }

    fn detach(&mut self, item: ItemId) -> CoreResult<()> {
        let owner = self.item(item)?.owner;
        let list = match owner {
            Owner::Location(id) => &mut self.location_mut(id)?.items,
            Owner::Item(id) => &mut self.item_mut(id)?.contents,
            Owner::Player => &mut self.carried,
            Owner::Nowhere => return Ok(()),
        };
        let Some(pos) = list.iter().position(|i| *i == item) else {
            return Err(CoreError::OwnershipMismatch { item, owner });
        };
        list.remove(pos);
        self.item_mut(item)?.owner = Owner::Nowhere;
        Ok(())
    }

    fn attach(&mut self, item: ItemId, owner: Owner) -> CoreResult<()> {
        match owner {
            Owner::Location(id) => self.location_mut(id)?.items.push(item),
            Owner::Item(id) => self.item_mut(id)?.contents.push(item),
            Owner::Player => self.carried.push(item),
            Owner::Nowhere => {}
        }
        self.item_mut(item)?.owner = owner;
        Ok(())
    }

    /// Verify that every item's owner lists it exactly once and that every
    /// listed item points back at its lister.
    pub fn check_ownership(&self) -> CoreResult<()> {
        for item in &self.items {
            let held = self.contents(item.owner)?;
            let count = held.iter().filter(|i| **i == item.id).count();
            if item.owner != Owner::Nowhere && count != 1 {
                return Err(CoreError::OwnershipMismatch {
                    item: item.id,
                    owner: item.owner,
                });
            }
        }
        let listings = self
            .locations
            .iter()
            .map(|l| (Owner::Location(l.id), &l.items))
            .chain(self.items.iter().map(|i| (Owner::Item(i.id), &i.contents)))
            .chain(std::iter::once((Owner::Player, &self.carried)));
        for (owner, list) in listings {
            for id in list {
                if self.item(*id)?.owner != owner {
                    return Err(CoreError::OwnershipMismatch { item: *id, owner });
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Visibility and load
    // -----------------------------------------------------------------------

    /// Items visible in a location: those lying there plus the contents of
    /// open or transparent holders, depth first, in placement order.
    pub fn visible_in(&self, location: LocationId) -> CoreResult<Vec<ItemId>> {
        let mut out = Vec::new();
        for id in &self.location(location)?.items {
            self.collect_visible(*id, &mut out)?;
        }
        Ok(out)
    }

    /// Items the player can see on their person, nested holders included.
    pub fn visible_carried(&self) -> CoreResult<Vec<ItemId>> {
        let mut out = Vec::new();
        for id in &self.carried {
            self.collect_visible(*id, &mut out)?;
        }
        Ok(out)
    }

    fn collect_visible(&self, id: ItemId, out: &mut Vec<ItemId>) -> CoreResult<()> {
        out.push(id);
        let item = self.item(id)?;
        if item.reveals_contents() {
            for inner in &item.contents {
                self.collect_visible(*inner, out)?;
            }
        }
        Ok(())
    }

    /// Total weight of everything the player carries, nested contents included.
    pub fn carried_weight(&self) -> CoreResult<u32> {
        let mut total = 0;
        let mut stack: Vec<ItemId> = self.carried.clone();
        while let Some(id) = stack.pop() {
            let item = self.item(id)?;
            total += item.weight;
            stack.extend(item.contents.iter().copied());
        }
        Ok(total)
    }

    /// Space already used inside a holder.
    pub fn used_capacity(&self, holder: ItemId) -> CoreResult<u32> {
        let mut used = 0;
        for id in &self.item(holder)?.contents {
            used += self.item(*id)?.size;
        }
        Ok(used)
    }

    /// Whether any visible item in the location gives off light.
    pub fn has_lit_item_in(&self, location: LocationId) -> CoreResult<bool> {
        for id in self.visible_in(location)? {
            if self.item(id)?.is_lit() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether the player carries something that gives off light.
    pub fn carries_light(&self) -> CoreResult<bool> {
        for id in self.visible_carried()? {
            if self.item(id)?.is_lit() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether the item is a light source the player could use.
    pub fn is_light_source(&self, item: ItemId) -> bool {
        self.item(item)
            .is_ok_and(|i| i.has(Capability::LightSource))
    }

    // -----------------------------------------------------------------------
    // Baseline
    // -----------------------------------------------------------------------

    /// Record the current state as the baseline for [`World::reset`].
    pub fn seal(&mut self) {
        self.baseline = Some(Box::new(Baseline {
            locations: self.locations.clone(),
            items: self.items.clone(),
            carried: self.carried.clone(),
        }));
    }

    /// Whether a baseline has been recorded.
    pub fn is_sealed(&self) -> bool {
        self.baseline.is_some()
    }

    /// Restore every location and item to the sealed baseline, in place.
    pub fn reset(&mut self) -> CoreResult<()> {
        let baseline = self.baseline.as_ref().ok_or(CoreError::NotSealed)?;
        self.locations.clone_from(&baseline.locations);
        self.items.clone_from(&baseline.items);
        self.carried.clone_from(&baseline.carried);
        tracing::debug!(
            locations = self.locations.len(),
            items = self.items.len(),
            "world reset to baseline"
        );
        Ok(())
    }
}
