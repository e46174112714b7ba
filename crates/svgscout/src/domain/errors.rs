//! Domain-specific errors.

use std::path::PathBuf;

use thiserror::Error;

/// The only scan condition that propagates to callers. Everything else
/// (missing ignore file, unreadable source files, malformed markup) resolves
/// internally.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("project root inaccessible: {}", .0.display())]
    RootInaccessible(PathBuf),
}
