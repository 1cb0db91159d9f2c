//! Registry - owns every component store, keyed by component type

use std::any::TypeId;
use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::entity::EntityAllocator;
use super::{Component, ComponentStorage, EntityId, TypedComponentStorage};
use crate::config::RegistryConfig;
use crate::error::RegistryError;

/// Registry holds all components, one store per component type.
///
/// Stores are created the first time a type is written or lazily read, and
/// live until the registry is dropped. The type-to-store table is private;
/// every public accessor is generic over the component type.
pub struct Registry {
    entities: EntityAllocator,
    stores: HashMap<TypeId, Box<dyn ComponentStorage>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            stores: HashMap::new(),
        }
    }

    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            entities: EntityAllocator::starting_at(config.first_id),
            stores: HashMap::new(),
        }
    }

    /// Build a registry from a YAML or JSON config file.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let config = RegistryConfig::load(path)?;
        Ok(Self::with_config(&config))
    }

    /// Issue a fresh entity id. Ids are never reused.
    pub fn next_id(&self) -> Result<EntityId, RegistryError> {
        self.entities.allocate()
    }

    /// Get the entity's `T` component, creating a default one if it has none.
    ///
    /// Note this is not a pure read: after calling `get::<T>(e)`,
    /// `has::<T>(e)` is true. Use [`Registry::try_get`] to look without
    /// attaching anything.
    pub fn get<T: Component>(&mut self, entity: EntityId) -> &mut T {
        self.store_or_insert::<T>().get_or_default(entity)
    }

    /// Attach `value` as the entity's `T` component, replacing any previous one.
    pub fn set<T: Component>(&mut self, entity: EntityId, value: T) {
        self.store_or_insert::<T>().insert(entity, value);
    }

    /// Check if entity has a component
    pub fn has<T: Component>(&self, entity: EntityId) -> bool {
        self.storage::<T>()
            .is_some_and(|storage| storage.contains(entity))
    }

    /// Detach the entity's `T` component. Returns whether it existed.
    pub fn remove<T: Component>(&mut self, entity: EntityId) -> bool {
        self.storage_mut::<T>()
            .and_then(|storage| storage.remove(entity))
            .is_some()
    }

    /// Detach every component the entity owns, across all known types.
    ///
    /// Returns how many components were dropped.
    pub fn remove_entity(&mut self, entity: EntityId) -> usize {
        let removed = self
            .stores
            .values_mut()
            .map(|storage| storage.remove_entity(entity))
            .filter(|&existed| existed)
            .count();
        debug!(%entity, removed, "removed entity components");
        removed
    }

    /// Look up a component without creating it.
    pub fn try_get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    pub fn try_get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Get storage for a component type
    pub fn storage<T: Component>(&self) -> Option<&TypedComponentStorage<T>> {
        self.stores
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<TypedComponentStorage<T>>()
    }

    /// Get mutable storage for a component type
    pub fn storage_mut<T: Component>(&mut self) -> Option<&mut TypedComponentStorage<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<TypedComponentStorage<T>>()
    }

    /// Number of distinct component types that have a store.
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Drop every component while keeping the stores and the id counter.
    pub fn clear(&mut self) {
        for storage in self.stores.values_mut() {
            storage.clear();
        }
    }

    fn store_or_insert<T: Component>(&mut self) -> &mut TypedComponentStorage<T> {
        let storage = self.stores.entry(TypeId::of::<T>()).or_insert_with(|| {
            debug!(component = std::any::type_name::<T>(), "created component store");
            Box::new(TypedComponentStorage::<T>::new())
        });

        match storage.as_any_mut().downcast_mut::<TypedComponentStorage<T>>() {
            Some(storage) => storage,
            // the entry for TypeId::of::<T>() is only ever a store of T
            None => unreachable!("component store registered under the wrong type"),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counter(i32);

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Name(String);

    #[test]
    fn test_get_creates_default_component() {
        let mut registry = Registry::new();
        let entity = EntityId::new(1);

        assert!(!registry.has::<Counter>(entity));
        assert_eq!(*registry.get::<Counter>(entity), Counter(0));
        assert!(registry.has::<Counter>(entity));
    }

    #[test]
    fn test_has_and_try_get_do_not_create() {
        let mut registry = Registry::new();
        let entity = EntityId::new(1);

        assert!(!registry.has::<Counter>(entity));
        assert!(registry.try_get::<Counter>(entity).is_none());
        assert!(registry.try_get_mut::<Counter>(entity).is_none());
        assert!(!registry.remove::<Counter>(entity));
        assert_eq!(registry.store_count(), 0);
    }

    #[test]
    fn test_get_returns_mutable_reference() {
        let mut registry = Registry::new();
        let entity = EntityId::new(1);

        *registry.get::<Counter>(entity) = Counter(7);
        registry.get::<Counter>(entity).0 += 1;
        assert_eq!(registry.try_get::<Counter>(entity), Some(&Counter(8)));
    }

    #[test]
    fn test_set_overwrites() {
        let mut registry = Registry::new();
        let entity = EntityId::new(1);

        registry.set(entity, Counter(5));
        registry.set(entity, Counter(6));
        assert_eq!(*registry.get::<Counter>(entity), Counter(6));
        assert_eq!(registry.storage::<Counter>().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_remove_reports_once() {
        let mut registry = Registry::new();
        let entity = EntityId::new(1);
        registry.set(entity, Counter(5));
        registry.set(entity, Name("a".into()));

        assert!(registry.remove::<Counter>(entity));
        assert!(!registry.remove::<Counter>(entity));
        assert!(!registry.has::<Counter>(entity));
        assert!(registry.has::<Name>(entity));
    }

    #[test]
    fn test_remove_entity_across_types() {
        let mut registry = Registry::new();
        let doomed = EntityId::new(1);
        let survivor = EntityId::new(2);

        registry.set(doomed, Counter(1));
        registry.set(doomed, Name("doomed".into()));
        registry.set(survivor, Counter(2));

        assert_eq!(registry.remove_entity(doomed), 2);
        assert!(!registry.has::<Counter>(doomed));
        assert!(!registry.has::<Name>(doomed));
        assert_eq!(registry.try_get::<Counter>(survivor), Some(&Counter(2)));
        assert_eq!(registry.remove_entity(doomed), 0);
    }

    #[test]
    fn test_invalid_entity_is_an_ordinary_key() {
        let mut registry = Registry::new();

        registry.set(EntityId::INVALID, Counter(3));
        assert_eq!(*registry.get::<Counter>(EntityId::invalid()), Counter(3));
        assert!(registry.remove::<Counter>(EntityId::INVALID));
    }

    #[test]
    fn test_config_sets_first_id() {
        let config = RegistryConfig {
            first_id: 100,
            ..RegistryConfig::default()
        };
        let registry = Registry::with_config(&config);

        assert_eq!(registry.next_id().unwrap(), EntityId::new(100));
        assert_eq!(registry.next_id().unwrap(), EntityId::new(101));
    }

    #[test]
    fn test_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yaml");
        std::fs::write(&path, "first_id: 7\n").unwrap();

        let registry = Registry::from_config_file(&path).unwrap();
        assert_eq!(registry.next_id().unwrap().as_integer(), 7);

        std::fs::write(&path, "first_id: -1\n").unwrap();
        assert!(matches!(
            Registry::from_config_file(&path),
            Err(RegistryError::Config(_))
        ));
    }

    #[test]
    fn test_clear_keeps_stores() {
        let mut registry = Registry::new();
        registry.set(EntityId::new(1), Counter(1));
        registry.set(EntityId::new(1), Name::default());

        registry.clear();
        assert_eq!(registry.store_count(), 2);
        assert!(!registry.has::<Counter>(EntityId::new(1)));
    }
}
