//! Error types for family construction.

use thiserror::Error;

/// Errors raised while building subsets and families.
///
/// Solving itself never fails: an incomplete covering is reported through
/// [`Family::uncovered_count`](crate::family::Family::uncovered_count) and a
/// missing decision witness through `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverError {
    /// A subset cost was negative, NaN, or infinite.
    #[error("invalid subset cost: {0}")]
    InvalidCost(f64),

    /// A subset member lies outside the family's universe.
    #[error("index {index} outside universe of size {universe_size}")]
    IndexOutOfRange { index: usize, universe_size: usize },

    /// A cost index lies outside the family's cost-index space.
    #[error("cost index {index} outside cost-index space of size {cost_index_count}")]
    CostIndexOutOfRange {
        index: usize,
        cost_index_count: usize,
    },

    /// Two families with different universes were combined.
    #[error("universe size mismatch: expected {expected}, found {found}")]
    UniverseMismatch { expected: usize, found: usize },
}

/// Result alias for fallible family operations.
pub type Result<T> = std::result::Result<T, CoverError>;
