//! Registry error type.

use thiserror::Error;

use er_core::ResourceId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("resource {0} not found in registry")]
    UnknownResource(ResourceId),

    #[error("resource {0} is already assigned")]
    AlreadyAssigned(ResourceId),

    #[error("resource name {0:?} registered twice")]
    DuplicateName(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
