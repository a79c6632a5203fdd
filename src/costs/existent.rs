//! Existence costs: a cost index contributes its cost once it is covered at
//! least once, independent of how often.

use super::types::{from_units, to_units, CostIndexModel, Summation};
use crate::family::Subset;

/// Existence costs added up in fixed-point arithmetic.
///
/// Each index cost is rounded to the configured number of decimal digits and
/// stored as a scaled integer, so every sum is exact and independent of the
/// order in which subsets were inserted. A negative digit count falls back
/// to floating summation.
///
/// # Examples
///
/// ```
/// use u_setcover::costs::{CostIndexModel, FixedExistentCosts};
///
/// let costs = FixedExistentCosts::new(&[1.5, 2.5], 1);
/// assert_eq!(costs.family_cost(&[1, 0]), 1.5);
/// assert_eq!(costs.family_cost(&[1, 1]), 4.0);
/// assert_eq!(costs.family_cost(&[3, 2]), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct FixedExistentCosts {
    index_costs: Vec<f64>,
    /// Index costs times `scale`; empty under floating summation.
    index_units: Vec<i64>,
    scale: Option<i64>,
}

impl FixedExistentCosts {
    /// Creates the model. `decimal_digits < 0` selects floating summation.
    pub fn new(index_costs: &[f64], decimal_digits: i32) -> Self {
        let scale = Summation::from_decimal_digits(decimal_digits).scale();
        let index_units = match scale {
            Some(scale) => index_costs.iter().map(|&c| to_units(c, scale)).collect(),
            None => Vec::new(),
        };
        Self {
            index_costs: index_costs.to_vec(),
            index_units,
            scale,
        }
    }

    /// The summation mode in use.
    pub fn summation(&self) -> Summation {
        match self.scale {
            None => Summation::Floating,
            Some(scale) => Summation::Fixed {
                decimal_digits: scale.ilog10(),
            },
        }
    }

    fn sum_where<I, F>(&self, indices: I, include: F) -> f64
    where
        I: Iterator<Item = usize>,
        F: Fn(usize) -> bool,
    {
        match self.scale {
            Some(scale) => {
                let units: i64 = indices
                    .filter(|&i| include(i))
                    .map(|i| self.index_units[i])
                    .sum();
                from_units(units, scale)
            }
            None => indices
                .filter(|&i| include(i))
                .map(|i| self.index_costs[i])
                .sum(),
        }
    }
}

impl CostIndexModel for FixedExistentCosts {
    fn cost_index_count(&self) -> usize {
        self.index_costs.len()
    }

    fn family_cost(&self, coverage: &[usize]) -> f64 {
        self.sum_where(0..coverage.len(), |i| coverage[i] > 0)
    }

    fn add_cost(&self, subset: &Subset, coverage: &[usize]) -> f64 {
        // only indices covered for the first time
        self.sum_where(subset.cost_indices().iter().copied(), |i| coverage[i] == 0)
    }

    fn remove_cost(&self, subset: &Subset, coverage: &[usize]) -> f64 {
        // only indices covered by this subset alone
        self.sum_where(subset.cost_indices().iter().copied(), |i| coverage[i] == 1)
    }
}

/// Existence costs added up in `f64`.
///
/// Simplest and fastest model; equivalent insertion sequences may differ in
/// the last bits of the result.
#[derive(Debug, Clone)]
pub struct FloatingExistentCosts {
    index_costs: Vec<f64>,
}

impl FloatingExistentCosts {
    /// Creates the model from per-index costs.
    pub fn new(index_costs: &[f64]) -> Self {
        Self {
            index_costs: index_costs.to_vec(),
        }
    }

    fn sum_over<I: Iterator<Item = usize>>(&self, indices: I) -> f64 {
        indices.map(|i| self.index_costs[i]).sum()
    }
}

impl CostIndexModel for FloatingExistentCosts {
    fn cost_index_count(&self) -> usize {
        self.index_costs.len()
    }

    fn family_cost(&self, coverage: &[usize]) -> f64 {
        self.sum_over((0..coverage.len()).filter(|&i| coverage[i] > 0))
    }

    fn add_cost(&self, subset: &Subset, coverage: &[usize]) -> f64 {
        self.sum_over(subset.cost_indices().iter().copied().filter(|&i| coverage[i] == 0))
    }

    fn remove_cost(&self, subset: &Subset, coverage: &[usize]) -> f64 {
        self.sum_over(subset.cost_indices().iter().copied().filter(|&i| coverage[i] == 1))
    }
}
