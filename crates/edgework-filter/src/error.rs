//! Error types for edgework-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] edgework_core::Error),

    /// Invalid kernel (zero extent or mismatched data)
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Gradient method tag not recognised
    #[error("unsupported gradient method: {0}")]
    UnsupportedMethod(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
