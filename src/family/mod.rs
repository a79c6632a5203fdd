//! Subsets and families of subsets.
//!
//! A [`Family`] is the working data structure of every cover strategy: a
//! deduplicated collection of [`Subset`]s over a fixed universe
//! `[0, universe_size)` that maintains per-index coverage counts and its cost
//! incrementally.
//!
//! # Cost structure
//!
//! | Family kind | `cost()` |
//! |-------------|----------|
//! | plain | sum of subset costs |
//! | size-bounded, over the bound | sum + `size * max_subset_cost` |
//! | cost model, [`IndexAggregation::Sum`] | plain + model cost |
//! | cost model, [`IndexAggregation::Quotient`] | plain / (max model cost - model cost) |
//!
//! [`Family::add_cost`] and [`Family::remove_cost`] return the exact change
//! of `cost()` an insertion or removal would cause.

mod collection;
mod stats;
mod subset;

pub use collection::{Family, IndexAggregation, MAX_COST_FACTOR};
pub use stats::{CostIndexStats, FamilyStats};
pub use subset::Subset;
