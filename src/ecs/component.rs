//! Per-type component storage

use std::any::{type_name, Any};
use std::collections::HashMap;

use super::EntityId;

/// Trait for components
///
/// Anything that is default-constructible, thread-safe and `'static` can be
/// attached to an entity. A type without `Default` is rejected when it is
/// used as a component:
///
/// ```compile_fail
/// use component_registry::{EntityId, Registry};
///
/// struct NoDefault(u32);
///
/// let mut registry = Registry::new();
/// registry.get::<NoDefault>(EntityId::new(0));
/// ```
pub trait Component: Default + Send + Sync + 'static {}

impl<T: Default + Send + Sync + 'static> Component for T {}

/// Type-erased component storage
pub trait ComponentStorage: Send + Sync {
    /// Drop the entity's component, reporting whether one existed.
    fn remove_entity(&mut self, entity_id: EntityId) -> bool;
    fn contains(&self, entity_id: EntityId) -> bool;
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Name of the stored component type, for diagnostics.
    fn component_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Concrete storage for a specific component type
///
/// Components are keyed by entity rather than packed by insertion order, so
/// inserting for one entity never moves another entity's value.
pub struct TypedComponentStorage<T: Component> {
    data: HashMap<EntityId, T>,
}

impl<T: Component> TypedComponentStorage<T> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Fetch the entity's component, default-constructing it on first access.
    pub fn get_or_default(&mut self, entity_id: EntityId) -> &mut T {
        self.data.entry(entity_id).or_default()
    }

    /// Insert or overwrite, returning the previous value.
    pub fn insert(&mut self, entity_id: EntityId, component: T) -> Option<T> {
        self.data.insert(entity_id, component)
    }

    pub fn remove(&mut self, entity_id: EntityId) -> Option<T> {
        self.data.remove(&entity_id)
    }

    pub fn get(&self, entity_id: EntityId) -> Option<&T> {
        self.data.get(&entity_id)
    }

    pub fn get_mut(&mut self, entity_id: EntityId) -> Option<&mut T> {
        self.data.get_mut(&entity_id)
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.data.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.data.iter().map(|(id, comp)| (*id, comp))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.data.iter_mut().map(|(id, comp)| (*id, comp))
    }
}

impl<T: Component> Default for TypedComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentStorage for TypedComponentStorage<T> {
    fn remove_entity(&mut self, entity_id: EntityId) -> bool {
        self.data.remove(&entity_id).is_some()
    }

    fn contains(&self, entity_id: EntityId) -> bool {
        self.data.contains_key(&entity_id)
    }

    fn clear(&mut self) {
        self.data.clear();
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn component_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
