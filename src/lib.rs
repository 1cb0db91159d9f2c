//! Entity-Component registry: integer entity handles plus type-keyed
//! component storage with lazy default creation.

pub mod config;
pub mod ecs;
pub mod error;

pub use config::{ConfigError, LoggingConfig, RegistryConfig};
pub use ecs::{global, with_global, Component, EntityId, Registry, TypedComponentStorage};
pub use error::RegistryError;
