//! Error taxonomy shared by every collection in the crate.

use thiserror::Error;

/// Precondition violations signalled by collection operations.
///
/// Every variant is raised before any mutation happens, so a failed call
/// leaves the collection exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Index outside the valid bound for the operation.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// A required argument was missing or not usable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// First/last element requested from an empty collection.
    #[error("collection is empty")]
    EmptyState,
}

pub type Result<T> = core::result::Result<T, CollectionError>;
