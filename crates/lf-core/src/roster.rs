use std::fmt;

/// Identifies one autonomous actor. Each actor type registers under a single
/// key, so registering the same key twice is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorKey(pub &'static str);

impl fmt::Display for ActorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Register(ActorKey),
    Unregister(ActorKey),
}

/// The ordered set of active actors.
///
/// Registration changes are queued and only become visible in
/// [`active`](ActorRoster::active) after [`commit`](ActorRoster::commit),
/// which the scheduler calls at the start of each pass. An actor that
/// registers another mid-pass therefore never makes it run in that pass.
#[derive(Debug, Clone, Default)]
pub struct ActorRoster {
    active: Vec<ActorKey>,
    queued: Vec<Change>,
}

impl ActorRoster {
    /// An empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue registration. Returns `false` when the actor is already
    /// (or already about to be) registered.
    pub fn register(&mut self, key: ActorKey) -> bool {
        if self.will_be_active(key) {
            return false;
        }
        self.queued.push(Change::Register(key));
        true
    }

    /// Queue removal. Returns `false` when the actor is already
    /// (or already about to be) gone.
    pub fn unregister(&mut self, key: ActorKey) -> bool {
        if !self.will_be_active(key) {
            return false;
        }
        self.queued.push(Change::Unregister(key));
        true
    }

    /// Whether the actor will be active once queued changes are committed.
    pub fn will_be_active(&self, key: ActorKey) -> bool {
        self.queued
            .iter()
            .rev()
            .find_map(|change| match change {
                Change::Register(k) if *k == key => Some(true),
                Change::Unregister(k) if *k == key => Some(false),
                _ => None,
            })
            .unwrap_or_else(|| self.active.contains(&key))
    }

    /// Whether the actor is in the committed active set.
    pub fn is_active(&self, key: ActorKey) -> bool {
        self.active.contains(&key)
    }

    /// Apply queued changes in the order they were made. Returns how many
    /// changes took effect.
    pub fn commit(&mut self) -> usize {
        let mut applied = 0;
        for change in self.queued.drain(..) {
            match change {
                Change::Register(key) if !self.active.contains(&key) => {
                    self.active.push(key);
                    applied += 1;
                }
                Change::Unregister(key) => {
                    if let Some(pos) = self.active.iter().position(|k| *k == key) {
                        self.active.remove(pos);
                        applied += 1;
                    }
                }
                Change::Register(_) => {}
            }
        }
        applied
    }

    /// Committed actors in registration order.
    pub fn active(&self) -> &[ActorKey] {
        &self.active
    }

    /// Whether changes are waiting for the next commit.
    pub fn has_pending(&self) -> bool {
        !self.queued.is_empty()
    }
}
