//! Dispatch errors
//!
//! The implicit dispatch path never fails: it falls back to the scalar variant.
//! Errors only come from asking for a specific variant.

use thiserror::Error;

use crate::backend::BackendType;
use crate::features::TargetSet;

/// Result type for explicit backend selection
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Why a requested backend variant cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The variant was not built into this binary (cargo feature or target arch)
    #[error("backend {backend} is not compiled into this build")]
    NotCompiled {
        /// Requested backend
        backend: BackendType,
    },

    /// The CPU lacks extensions the variant requires
    #[error("backend {backend} requires {missing}, which this CPU does not support")]
    Unsupported {
        /// Requested backend
        backend: BackendType,
        /// Required extensions the CPU lacks
        missing: TargetSet,
    },
}
