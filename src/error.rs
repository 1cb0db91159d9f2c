use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Every entity id up to `last` has been issued; issuing another would
    /// repeat one.
    #[error("entity id space exhausted after issuing {last}")]
    IdSpaceExhausted { last: i64 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
