//! Problem transformations around a [`CoverStrategy`](crate::strategy::CoverStrategy).
//!
//! Each wrapper turns a variant of set cover into a plain call of the
//! wrapped strategy and maps the answer back:
//!
//! | Wrapper | Variant |
//! |---------|---------|
//! | [`SizeBoundedSolver`] | at most `k` subsets |
//! | [`PartialCoverageAdapter`] | universe not fully coverable |
//! | [`DecisionWrapper`] | full covering cheaper than a limit? |
//!
//! Wrappers compose, e.g.
//! `DecisionWrapper::new(PartialCoverageAdapter::new(GreedyCover::default()))`.

mod bounded;
mod decision;
mod partial;

pub use bounded::SizeBoundedSolver;
pub use decision::DecisionWrapper;
pub use partial::PartialCoverageAdapter;
