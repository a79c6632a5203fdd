//! Cost-index models.
//!
//! A cost-index model prices a covering by how often each index of a
//! secondary "cost index" space is covered, independent of the scalar
//! costs of the subsets themselves. Three models are provided:
//!
//! - [`FixedExistentCosts`]: existence costs with exact fixed-point sums.
//! - [`FloatingExistentCosts`]: existence costs with `f64` sums.
//! - [`FrequencyCosts`]: power-law costs in the coverage frequency, with
//!   either summation mode.
//!
//! All three satisfy the incremental contract documented on
//! [`CostIndexModel`].

mod existent;
mod frequency;
mod types;

pub use existent::{FixedExistentCosts, FloatingExistentCosts};
pub use frequency::{FrequencyConfig, FrequencyCosts, DEFAULT_FREQUENCY_EXPONENT};
pub use types::{fixed_point_sum, floating_sum, CostIndexModel, Summation, MAX_DECIMAL_DIGITS};
