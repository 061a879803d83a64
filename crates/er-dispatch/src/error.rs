use er_core::CoreError;
use er_registry::RegistryError;
use er_routing::AnnotateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dispatch configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("resource assignment failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("route annotation failed: {0}")]
    Annotate(#[from] AnnotateError),
}

pub type EngineResult<T> = Result<T, DispatchError>;
