//! Boundary error types
//!
//! The extraction core itself has no fatal error class: malformed containers
//! and payloads degrade to fewer fields or a note on the record. Errors only
//! exist at the file-reading boundary around the core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors at the boundary that feeds buffers into the engine.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for boundary operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
