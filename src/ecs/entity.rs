//! Entity identity and allocation

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RegistryError;

/// Opaque entity handle backed by a signed 64-bit integer.
///
/// Entities carry no data of their own; components are attached to them
/// through a [`Registry`](super::Registry). Equality, ordering and hashing
/// are structural over the wrapped integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// The unset sentinel.
    pub const INVALID: EntityId = EntityId(-1);

    /// Wrap a raw integer. Any value is accepted, including negative sentinels.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn invalid() -> Self {
        Self::INVALID
    }

    pub const fn as_integer(self) -> i64 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<i64> for EntityId {
    fn from(raw: i64) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Entity allocator
///
/// Hands out strictly increasing ids and never reuses one. Allocation goes
/// through `&self` so a shared registry can issue ids without a lock.
#[derive(Debug)]
pub struct EntityAllocator {
    next_id: AtomicI64,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Start counting at `first_id`. Negative starting points are clamped to 0.
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            next_id: AtomicI64::new(first_id.max(0)),
        }
    }

    /// Issue the next id.
    ///
    /// Once `i64::MAX` has been handed out every further call fails; the
    /// counter never wraps.
    pub fn allocate(&self) -> Result<EntityId, RegistryError> {
        let mut issued = None;
        let result = self
            .next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                // i64::MIN marks exhaustion since the counter never goes negative
                if current == i64::MIN {
                    return None;
                }
                issued = Some(current);
                Some(current.checked_add(1).unwrap_or(i64::MIN))
            });

        match (result, issued) {
            (Ok(_), Some(id)) => Ok(EntityId(id)),
            _ => {
                warn!("entity id space exhausted");
                Err(RegistryError::IdSpaceExhausted { last: i64::MAX })
            }
        }
    }

    /// The id the next successful `allocate` would return, if any remain.
    pub fn peek(&self) -> Option<EntityId> {
        match self.next_id.load(Ordering::Relaxed) {
            i64::MIN => None,
            next => Some(EntityId(next)),
        }
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
