//! Error types for qbuild.

use thiserror::Error;

/// Result type alias for qbuild operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors produced at the crate's recoverable boundaries.
///
/// Misuse of the builder API itself (a placeholder without a matching
/// argument, or the reverse) is a programmer error and panics at the
/// offending call instead of returning one of these.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A dialect name (from configuration) did not match any known dialect.
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),
}
