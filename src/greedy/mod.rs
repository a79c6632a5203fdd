//! Greedy set cover heuristics.
//!
//! [`GreedyCover`] is the classic cost-effectiveness greedy: it repeatedly
//! adds the subset with the lowest marginal cost per newly covered index.
//! Marginal costs come from [`Family::add_cost`](crate::family::Family::add_cost),
//! so size bounds and cost-index models are honored without special cases.
//!
//! [`IteratedGreedyCover`] repeats the greedy with multiplicative noise on
//! the ratios and keeps the best result.
//!
//! # References
//!
//! - Chvátal, V. (1979). "A Greedy Heuristic for the Set-Covering Problem",
//!   *Mathematics of Operations Research* 4(3), 233-235.

mod config;
mod runner;

pub use config::{GreedyConfig, IteratedGreedyConfig};
pub use runner::{GreedyCover, IteratedGreedyCover};
pub(crate) use runner::{candidates, rehomed, remove_redundant_subsets};
