//! Process-wide default registry
//!
//! Most code should own a [`Registry`] and pass it where it is needed. This
//! instance exists for callers that want entity handles to reach their
//! components without threading a registry through. It is created on first
//! use and lives until process exit; no drop order is guaranteed relative to
//! other statics.

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;

use super::{Component, EntityId, Registry};

static GLOBAL: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));

/// The process-wide registry.
pub fn global() -> &'static Mutex<Registry> {
    &GLOBAL
}

/// Run `f` with exclusive access to the process-wide registry.
///
/// A panic inside an earlier closure does not make the registry unusable;
/// the lock is recovered and the registry is handed out as it was left.
pub fn with_global<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut guard = lock();
    f(&mut guard)
}

fn lock() -> MutexGuard<'static, Registry> {
    GLOBAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl EntityId {
    /// Read this entity's `T` from the process-wide registry, creating a
    /// default one if it has none.
    ///
    /// Returns a copy because the registry lock is released before returning.
    pub fn get_global<T: Component + Clone>(self) -> T {
        with_global(|registry| registry.get::<T>(self).clone())
    }

    /// Write this entity's `T` in the process-wide registry.
    pub fn set_global<T: Component>(self, value: T) {
        with_global(|registry| registry.set(self, value));
    }
}
