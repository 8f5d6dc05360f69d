use crate::world::{ItemId, LocationId, Owner};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Faults raised by the world arena and the context.
///
/// These are invariant violations, never ordinary game outcomes: a locked
/// door or a full container is narrated, not returned as an error.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The location handle does not belong to this world.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// The item handle does not belong to this world.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// No location or item is registered under this key.
    #[error("unknown key: \"{0}\"")]
    UnknownKey(String),

    /// Two entities were registered under the same key.
    #[error("duplicate key: \"{0}\"")]
    DuplicateKey(String),

    /// Reparenting would place an item inside itself.
    #[error("cannot place {item} inside {target}: it would contain itself")]
    OwnershipCycle {
        /// The item being moved.
        item: ItemId,
        /// The requested new owner.
        target: Owner,
    },

    /// An item's owner does not list it among its contents.
    #[error("ownership mismatch for {item}: owner {owner} does not hold it")]
    OwnershipMismatch {
        /// The inconsistent item.
        item: ItemId,
        /// The owner it claims.
        owner: Owner,
    },

    /// The world was reset before a baseline was sealed.
    #[error("world has no sealed baseline to reset to")]
    NotSealed,
}
