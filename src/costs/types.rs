//! Core trait for cost-index models and the summation helpers they share.

use std::fmt;

use crate::family::Subset;

/// Largest supported number of fixed-point decimal digits.
///
/// Beyond this the scale factor no longer fits the 53-bit mantissa used when
/// converting costs to scaled integers.
pub const MAX_DECIMAL_DIGITS: u32 = 15;

/// Aggregates cost contributions over a secondary "cost index" space.
///
/// A model never inspects subset membership costs; it only derives scalar
/// costs from how often each cost index is covered. Coverage slices are
/// borrowed read-only.
///
/// # Contract
///
/// For every subset `s` and coverage vector `c`:
///
/// ```text
/// family_cost(c) + add_cost(s, c)    == family_cost(c + s)
/// family_cost(c) - remove_cost(s, c) == family_cost(c - s)
/// ```
///
/// This lets a heuristic evaluate a candidate in `O(|s.cost_indices|)`
/// instead of recomputing the whole family cost.
///
/// Indices are not bounds-checked here. Passing a coverage slice shorter
/// than [`cost_index_count`](Self::cost_index_count) or a subset with cost
/// indices outside that range panics.
pub trait CostIndexModel: fmt::Debug {
    /// Number of cost indices this model was configured for.
    fn cost_index_count(&self) -> usize;

    /// Cost of a partial covering given per-index coverage counts.
    ///
    /// Cost indices covered zero times contribute nothing.
    fn family_cost(&self, coverage: &[usize]) -> f64;

    /// Marginal cost of inserting `subset` into a covering with `coverage`.
    fn add_cost(&self, subset: &Subset, coverage: &[usize]) -> f64;

    /// Marginal cost of removing `subset` from a covering with `coverage`.
    ///
    /// `subset` is expected to be part of the covering, so every one of its
    /// cost indices has a count of at least one.
    fn remove_cost(&self, subset: &Subset, coverage: &[usize]) -> f64;
}

/// How per-index cost contributions are added up.
///
/// # Examples
///
/// ```
/// use u_setcover::costs::Summation;
///
/// assert_eq!(Summation::from_decimal_digits(-1), Summation::Floating);
/// assert_eq!(
///     Summation::from_decimal_digits(3),
///     Summation::Fixed { decimal_digits: 3 }
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Summation {
    /// Plain `f64` addition. Fast, but the result may depend on the order
    /// of the terms.
    #[default]
    Floating,

    /// Each term is rounded to `decimal_digits` digits and added as a scaled
    /// integer. Exact and order independent.
    Fixed {
        /// Number of decimal digits kept after the point.
        decimal_digits: u32,
    },
}

impl Summation {
    /// Maps a signed digit count to a summation mode.
    ///
    /// Negative values select floating summation.
    pub fn from_decimal_digits(decimal_digits: i32) -> Self {
        if decimal_digits < 0 {
            Summation::Floating
        } else {
            Summation::Fixed {
                decimal_digits: decimal_digits as u32,
            }
        }
    }

    /// Scale factor `10^decimal_digits` for fixed summation.
    pub(crate) fn scale(self) -> Option<i64> {
        match self {
            Summation::Floating => None,
            Summation::Fixed { decimal_digits } => Some(ten_pow(decimal_digits)),
        }
    }

    /// Adds up `values` according to this mode.
    pub fn sum(self, values: &[f64]) -> f64 {
        match self {
            Summation::Floating => floating_sum(values),
            Summation::Fixed { decimal_digits } => fixed_point_sum(values, decimal_digits),
        }
    }
}

pub(crate) fn ten_pow(decimal_digits: u32) -> i64 {
    assert!(
        decimal_digits <= MAX_DECIMAL_DIGITS,
        "at most {MAX_DECIMAL_DIGITS} decimal digits supported, got {decimal_digits}"
    );
    10_i64.pow(decimal_digits)
}

/// Converts a cost to scaled integer units.
pub(crate) fn to_units(value: f64, scale: i64) -> i64 {
    (value * scale as f64).round() as i64
}

pub(crate) fn from_units(units: i64, scale: i64) -> f64 {
    units as f64 / scale as f64
}

/// Sum of `values` in `f64`.
///
/// The result may depend on the order of the values.
pub fn floating_sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Exact sum of `values`, each rounded to `decimal_digits` digits first.
///
/// The result does not depend on the order of the values. All values and
/// the sum must stay below `i64::MAX / 10^decimal_digits`.
///
/// # Examples
///
/// ```
/// use u_setcover::costs::fixed_point_sum;
///
/// assert_eq!(fixed_point_sum(&[0.1, 0.2], 1), 0.3);
/// assert_eq!(fixed_point_sum(&[1.26, 1.0], 1), 2.3);
/// ```
pub fn fixed_point_sum(values: &[f64], decimal_digits: u32) -> f64 {
    let scale = ten_pow(decimal_digits);
    let units: i64 = values.iter().map(|&v| to_units(v, scale)).sum();
    from_units(units, scale)
}
