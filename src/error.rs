use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllocatorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Kubernetes error: {0}")]
    KubernetesError(String),

    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AllocatorError>;
