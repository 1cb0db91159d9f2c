//! Entity-Component storage
//!
//! Entities are plain integer handles; components live in a [`Registry`]
//! that keeps one keyed store per component type and creates missing
//! components on first access.

pub mod component;
pub mod entity;
pub mod global;
pub mod registry;

pub use component::{Component, ComponentStorage, TypedComponentStorage};
pub use entity::{EntityAllocator, EntityId};
pub use global::{global, with_global};
pub use registry::Registry;
