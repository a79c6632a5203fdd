//! Local search improvement of covers.
//!
//! [`LocalSearchCover`] wraps any [`CoverStrategy`](crate::strategy::CoverStrategy)
//! and improves its answer with two moves, both priced through
//! [`Family::add_cost`](crate::family::Family::add_cost) and
//! [`Family::remove_cost`](crate::family::Family::remove_cost):
//!
//! | Move | Effect |
//! |------|--------|
//! | remove and complete | drop subsets covering few indices alone, re-cover greedily |
//! | add one | insert one subset, drop the subsets it makes redundant |
//!
//! A move is accepted only if it leaves fewer indices uncovered or lowers
//! the cost. Wrap the local search inside a
//! [`SizeBoundedSolver`](crate::transform::SizeBoundedSolver), not around
//! it, so the moves see the size penalty.

mod config;
mod runner;

pub use config::LocalSearchConfig;
pub use runner::LocalSearchCover;
