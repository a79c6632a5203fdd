//! Frequency-weighted costs.
//!
//! The contribution of cost index `i` covered `c` times is
//!
//! ```text
//! index_cost[i] * c^exponent    for c > 0
//! 0                             for c = 0
//! ```
//!
//! With `exponent > 1` redundant covering is increasingly penalized, with
//! `0 < exponent < 1` the extra cost of each further covering shrinks, and
//! with `exponent = 0` only the existence of a covering counts.

use std::cell::RefCell;

use super::types::{from_units, to_units, CostIndexModel, Summation};
use crate::family::Subset;

/// Exponent used when none is configured.
pub const DEFAULT_FREQUENCY_EXPONENT: f64 = 0.5;

/// Configuration for [`FrequencyCosts`].
///
/// # Examples
///
/// ```
/// use u_setcover::costs::{FrequencyConfig, Summation};
///
/// let config = FrequencyConfig::default()
///     .with_exponent(2.0)
///     .with_summation(Summation::Fixed { decimal_digits: 4 });
/// assert_eq!(config.exponent, 2.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyConfig {
    /// Power applied to the coverage count of each cost index.
    pub exponent: f64,
    /// Summation mode for all sums.
    pub summation: Summation,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_FREQUENCY_EXPONENT,
            summation: Summation::Floating,
        }
    }
}

impl FrequencyConfig {
    /// Sets the exponent.
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    /// Sets the summation mode.
    pub fn with_summation(mut self, summation: Summation) -> Self {
        self.summation = summation;
        self
    }

    /// Sets the summation mode from a signed digit count; negative selects
    /// floating summation.
    pub fn with_decimal_digits(mut self, decimal_digits: i32) -> Self {
        self.summation = Summation::from_decimal_digits(decimal_digits);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.exponent.is_finite() {
            return Err("exponent must be finite".into());
        }
        if let Summation::Fixed { decimal_digits } = self.summation {
            if decimal_digits > super::MAX_DECIMAL_DIGITS {
                return Err(format!(
                    "decimal_digits must be at most {}",
                    super::MAX_DECIMAL_DIGITS
                ));
            }
        }
        Ok(())
    }
}

/// Frequency-weighted cost model.
///
/// Powers `basis^exponent` are memoized in a table that is rebuilt in full,
/// with room for `2 * basis + 1` entries, whenever a larger basis is
/// requested. The table is a pure cache: [`clear_cache`](Self::clear_cache)
/// never changes a result.
///
/// The cache sits behind a [`RefCell`], so a model must not be shared
/// between threads.
///
/// # Examples
///
/// ```
/// use u_setcover::costs::{CostIndexModel, FrequencyCosts, DEFAULT_FREQUENCY_EXPONENT};
///
/// let costs = FrequencyCosts::floating(&[2.0]);
/// assert_eq!(costs.family_cost(&[0]), 0.0);
/// assert_eq!(costs.family_cost(&[2]), 2.0 * 2f64.powf(DEFAULT_FREQUENCY_EXPONENT));
/// ```
#[derive(Debug)]
pub struct FrequencyCosts {
    index_costs: Vec<f64>,
    exponent: f64,
    summation: Summation,
    powers: RefCell<Vec<f64>>,
}

impl FrequencyCosts {
    /// Creates the model.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn new(index_costs: &[f64], config: &FrequencyConfig) -> Self {
        config.validate().expect("invalid FrequencyConfig");
        Self {
            index_costs: index_costs.to_vec(),
            exponent: config.exponent,
            summation: config.summation,
            powers: RefCell::new(Vec::new()),
        }
    }

    /// Creates the model with the default exponent and floating summation.
    pub fn floating(index_costs: &[f64]) -> Self {
        Self::new(index_costs, &FrequencyConfig::default())
    }

    /// Creates the model with the default exponent and the given signed
    /// digit count.
    pub fn with_decimal_digits(index_costs: &[f64], decimal_digits: i32) -> Self {
        Self::new(
            index_costs,
            &FrequencyConfig::default().with_decimal_digits(decimal_digits),
        )
    }

    /// The exponent in use.
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// The summation mode in use.
    pub fn summation(&self) -> Summation {
        self.summation
    }

    /// Drops the memoized power table.
    pub fn clear_cache(&self) {
        self.powers.borrow_mut().clear();
    }

    /// `basis^exponent`, with `0` mapped to `0` for every exponent.
    fn power(&self, basis: usize) -> f64 {
        let mut powers = self.powers.borrow_mut();
        if basis >= powers.len() {
            let exponent = self.exponent;
            *powers = (0..2 * basis + 1)
                .map(|b| if b == 0 { 0.0 } else { (b as f64).powf(exponent) })
                .collect();
        }
        powers[basis]
    }

    fn term(&self, index: usize, count: usize) -> f64 {
        self.index_costs[index] * self.power(count)
    }

    /// Sum over `indices` of `term(i, to(c)) - term(i, from(c))`.
    ///
    /// Under fixed summation each term is rounded before taking the
    /// difference, so the result matches the difference of two
    /// [`family_cost`](CostIndexModel::family_cost) values exactly.
    fn delta<F, G>(&self, subset: &Subset, coverage: &[usize], from: F, to: G) -> f64
    where
        F: Fn(usize) -> usize,
        G: Fn(usize) -> usize,
    {
        let indices = subset.cost_indices().iter().copied();
        match self.summation.scale() {
            Some(scale) => {
                let units: i64 = indices
                    .map(|i| {
                        let c = coverage[i];
                        to_units(self.term(i, to(c)), scale) - to_units(self.term(i, from(c)), scale)
                    })
                    .sum();
                from_units(units, scale)
            }
            None => indices
                .map(|i| {
                    let c = coverage[i];
                    self.term(i, to(c)) - self.term(i, from(c))
                })
                .sum(),
        }
    }
}

impl CostIndexModel for FrequencyCosts {
    fn cost_index_count(&self) -> usize {
        self.index_costs.len()
    }

    fn family_cost(&self, coverage: &[usize]) -> f64 {
        match self.summation.scale() {
            Some(scale) => {
                let units: i64 = coverage
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| to_units(self.term(i, c), scale))
                    .sum();
                from_units(units, scale)
            }
            None => coverage
                .iter()
                .enumerate()
                .map(|(i, &c)| self.term(i, c))
                .sum(),
        }
    }

    fn add_cost(&self, subset: &Subset, coverage: &[usize]) -> f64 {
        self.delta(subset, coverage, |c| c, |c| c + 1)
    }

    fn remove_cost(&self, subset: &Subset, coverage: &[usize]) -> f64 {
        self.delta(subset, coverage, |c| c.saturating_sub(1), |c| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_indices(cost_indices: &[usize]) -> Subset {
        Subset::unit([0]).with_cost_indices(cost_indices.iter().copied())
    }

    #[test]
    fn test_frequency_default_exponent() {
        let costs = FrequencyCosts::floating(&[2.0]);
        assert_eq!(costs.exponent(), DEFAULT_FREQUENCY_EXPONENT);
        assert_eq!(costs.summation(), Summation::Floating);
        assert_eq!(costs.family_cost(&[0]), 0.0);
        assert_eq!(costs.family_cost(&[1]), 2.0);
        assert_eq!(
            costs.family_cost(&[2]),
            2.0 * 2f64.powf(DEFAULT_FREQUENCY_EXPONENT)
        );
    }

    #[test]
    fn test_zero_exponent_ignores_frequency() {
        let config = FrequencyConfig::default().with_exponent(0.0);
        let costs = FrequencyCosts::new(&[1.5, 2.5], &config);
        assert_eq!(costs.family_cost(&[0, 0]), 0.0);
        assert_eq!(costs.family_cost(&[1, 0]), 1.5);
        assert_eq!(costs.family_cost(&[7, 0]), 1.5);
        assert_eq!(costs.family_cost(&[3, 9]), 4.0);
    }

    #[test]
    fn test_linear_exponent() {
        let config = FrequencyConfig::default()
            .with_exponent(1.0)
            .with_decimal_digits(2);
        let costs = FrequencyCosts::new(&[0.5, 1.0], &config);
        assert_eq!(costs.family_cost(&[4, 3]), 5.0);

        let s = with_indices(&[0, 1]);
        assert_eq!(costs.add_cost(&s, &[4, 3]), 1.5);
        assert_eq!(costs.remove_cost(&s, &[4, 3]), 1.5);
    }

    #[test]
    fn test_add_from_zero_is_full_term() {
        let config = FrequencyConfig::default().with_exponent(2.0);
        let costs = FrequencyCosts::new(&[3.0], &config);
        let s = with_indices(&[0]);
        assert_eq!(costs.add_cost(&s, &[0]), 3.0);
        assert_eq!(costs.add_cost(&s, &[1]), 9.0);
        assert_eq!(costs.remove_cost(&s, &[1]), 3.0);
        assert_eq!(costs.remove_cost(&s, &[2]), 9.0);
    }

    #[test]
    fn test_remove_is_positive_for_positive_exponent() {
        let costs = FrequencyCosts::floating(&[1.0, 2.0]);
        let s = with_indices(&[0, 1]);
        assert!(costs.remove_cost(&s, &[1, 3]) > 0.0);
        assert!(costs.add_cost(&s, &[1, 3]) > 0.0);
    }

    #[test]
    fn test_power_table_grows_and_rebuilds() {
        let costs = FrequencyCosts::floating(&[1.0]);
        assert_eq!(costs.power(3), 3f64.powf(DEFAULT_FREQUENCY_EXPONENT));
        assert_eq!(costs.powers.borrow().len(), 7);
        // smaller basis reuses the table
        assert_eq!(costs.power(5), 5f64.powf(DEFAULT_FREQUENCY_EXPONENT));
        assert_eq!(costs.powers.borrow().len(), 7);
        assert_eq!(costs.power(10), 10f64.powf(DEFAULT_FREQUENCY_EXPONENT));
        assert_eq!(costs.powers.borrow().len(), 21);
        assert_eq!(costs.power(0), 0.0);

        costs.clear_cache();
        assert!(costs.powers.borrow().is_empty());
        assert_eq!(costs.family_cost(&[4]), 4f64.powf(DEFAULT_FREQUENCY_EXPONENT));
    }

    #[test]
    fn test_fixed_contract_exact() {
        let config = FrequencyConfig::default().with_decimal_digits(4);
        let costs = FrequencyCosts::new(&[0.3, 0.7, 1.1], &config);
        let s = with_indices(&[0, 2]);
        let before = [2, 1, 0];
        let after = [3, 1, 1];
        let add = costs.add_cost(&s, &before);
        let remove = costs.remove_cost(&s, &after);
        assert_eq!(
            to_units(costs.family_cost(&before), 10_000) + to_units(add, 10_000),
            to_units(costs.family_cost(&after), 10_000)
        );
        assert_eq!(add, remove);
    }

    #[test]
    fn test_config_validate() {
        assert!(FrequencyConfig::default().validate().is_ok());
        assert!(FrequencyConfig::default()
            .with_exponent(f64::NAN)
            .validate()
            .is_err());
        assert!(FrequencyConfig::default()
            .with_summation(Summation::Fixed { decimal_digits: 40 })
            .validate()
            .is_err());
    }

    #[test]
    #[should_panic(expected = "invalid FrequencyConfig")]
    fn test_invalid_config_panics() {
        let config = FrequencyConfig::default().with_exponent(f64::INFINITY);
        FrequencyCosts::new(&[1.0], &config);
    }
}
