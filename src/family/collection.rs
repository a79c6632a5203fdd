//! Families of subsets with incremental coverage and cost bookkeeping.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

use super::stats::{CostIndexStats, FamilyStats};
use super::subset::Subset;
use crate::costs::CostIndexModel;
use crate::error::{CoverError, Result};

/// Slack applied to the total index cost of a quotient family so the
/// denominator stays positive when every cost index is covered.
pub const MAX_COST_FACTOR: f64 = 1.000001;

/// How the cost-index cost is combined with the plain subset costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexAggregation {
    /// `plain + index_cost`.
    #[default]
    Sum,

    /// `plain / (max_index_cost - index_cost)`: covering more cost indices
    /// makes the same subsets more expensive. Intended for existence-cost
    /// models.
    Quotient,
}

#[derive(Debug, Clone)]
struct CostIndexState {
    model: Rc<dyn CostIndexModel>,
    aggregation: IndexAggregation,
    coverage: Vec<usize>,
    index_cost: f64,
    total_frequency: usize,
    max_plus: f64,
}

impl CostIndexState {
    fn new(model: Rc<dyn CostIndexModel>, aggregation: IndexAggregation) -> Self {
        let count = model.cost_index_count();
        let total = model.family_cost(&vec![1; count]);
        let max_plus = if total == 0.0 {
            1.0
        } else {
            total * MAX_COST_FACTOR
        };
        Self {
            model,
            aggregation,
            coverage: vec![0; count],
            index_cost: 0.0,
            total_frequency: 0,
            max_plus,
        }
    }

    fn empty_like(&self) -> Self {
        Self {
            model: Rc::clone(&self.model),
            aggregation: self.aggregation,
            coverage: vec![0; self.coverage.len()],
            index_cost: 0.0,
            total_frequency: 0,
            max_plus: self.max_plus,
        }
    }

    fn quotient_denominator(&self, index_cost: f64) -> f64 {
        let diff = self.max_plus - index_cost;
        if diff > 0.0 {
            diff
        } else {
            warn!(
                max_plus = self.max_plus,
                index_cost, "quotient denominator not positive, clamping"
            );
            f64::MIN_POSITIVE.sqrt()
        }
    }

    fn aggregate(&self, simple: f64, index_cost: f64) -> f64 {
        match self.aggregation {
            IndexAggregation::Sum => simple + index_cost,
            IndexAggregation::Quotient => simple / self.quotient_denominator(index_cost),
        }
    }
}

/// A family of subsets over the universe `[0, universe_size)`.
///
/// The family keeps, for every universe index, the number of member subsets
/// covering it, and updates these counts on every insertion and removal.
/// Structurally equal subsets (same members) are stored at most once;
/// iteration follows insertion order.
///
/// # Cost
///
/// A plain family costs the sum of its subset costs. A family built with
/// [`with_cost_model`](Self::with_cost_model) additionally tracks coverage
/// of the cost-index space and combines the model's cost with the plain
/// cost according to its [`IndexAggregation`].
///
/// A family may carry a size bound `(max_subsets, max_subset_cost)`, set by
/// [`clone_bounded`](Self::clone_bounded). While it holds more than
/// `max_subsets` subsets, each subset is charged an extra
/// `max_subset_cost`, which steers a heuristic working on it towards
/// smaller solutions.
///
/// # Examples
///
/// ```
/// use u_setcover::family::{Family, Subset};
///
/// let mut family = Family::new(4);
/// family.insert(Subset::new([0, 1], 2.0)?)?;
/// family.insert(Subset::new([1, 2], 1.0)?)?;
/// assert_eq!(family.size(), 2);
/// assert_eq!(family.cost(), 3.0);
/// assert_eq!(family.uncovered_count(), 1);
/// assert!(!family.index_is_covered(3));
/// # Ok::<(), u_setcover::CoverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Family {
    universe_size: usize,
    subsets: Vec<Subset>,
    positions: HashMap<Vec<usize>, usize>,
    coverage: Vec<usize>,
    uncovered: usize,
    single_covered: usize,
    multi_covered: usize,
    plain_cost: f64,
    total_frequency: usize,
    max_subsets: usize,
    max_subset_cost: f64,
    cost_indices: Option<CostIndexState>,
}

impl Family {
    /// Creates an empty plain family.
    pub fn new(universe_size: usize) -> Self {
        Self {
            universe_size,
            subsets: Vec::new(),
            positions: HashMap::new(),
            coverage: vec![0; universe_size],
            uncovered: universe_size,
            single_covered: 0,
            multi_covered: 0,
            plain_cost: 0.0,
            total_frequency: 0,
            max_subsets: 0,
            max_subset_cost: 0.0,
            cost_indices: None,
        }
    }

    /// Creates an empty family whose cost includes a cost-index model.
    ///
    /// The model is shared with every family derived from this one.
    pub fn with_cost_model(
        universe_size: usize,
        model: Rc<dyn CostIndexModel>,
        aggregation: IndexAggregation,
    ) -> Self {
        let mut family = Self::new(universe_size);
        family.cost_indices = Some(CostIndexState::new(model, aggregation));
        family
    }

    /// Returns an empty family with the same universe, size bound, and
    /// cost model.
    pub fn empty_like(&self) -> Self {
        let mut family = Self::new(self.universe_size);
        family.max_subsets = self.max_subsets;
        family.max_subset_cost = self.max_subset_cost;
        family.cost_indices = self.cost_indices.as_ref().map(CostIndexState::empty_like);
        family
    }

    /// Returns a copy with every subset, carrying the size bound
    /// `(max_count, max_cost)`.
    ///
    /// `max_cost` is only the penalty; no subset is dropped, whatever its
    /// own cost. `max_count == 0` means unbounded, so
    /// `clone_bounded(0, f64::INFINITY)` is an unrestricted copy.
    pub fn clone_bounded(&self, max_count: usize, max_cost: f64) -> Self {
        let mut family = self.empty_like();
        family.max_subsets = max_count;
        family.max_subset_cost = max_cost;
        for subset in &self.subsets {
            family.insert_unchecked(subset.clone());
        }
        family
    }

    /// Size of the universe.
    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    /// Number of subsets in the family.
    pub fn size(&self) -> usize {
        self.subsets.len()
    }

    /// Returns `true` if the family holds no subset.
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }

    /// The subsets in insertion order.
    pub fn subsets(&self) -> &[Subset] {
        &self.subsets
    }

    /// Iterates over the subsets in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Subset> {
        self.subsets.iter()
    }

    /// Returns `true` if a subset with the same members is present.
    pub fn contains(&self, subset: &Subset) -> bool {
        self.positions.contains_key(subset.members())
    }

    /// Maximum subset count of the size bound, `0` when unbounded.
    pub fn max_subsets(&self) -> usize {
        self.max_subsets
    }

    /// Per-subset penalty charged while the size bound is exceeded.
    pub fn max_subset_cost(&self) -> f64 {
        self.max_subset_cost
    }

    /// The shared cost-index model, if any.
    pub fn cost_model(&self) -> Option<&Rc<dyn CostIndexModel>> {
        self.cost_indices.as_ref().map(|state| &state.model)
    }

    /// Inserts a subset.
    ///
    /// Returns `Ok(false)` without change when a subset with the same
    /// members is already present.
    ///
    /// # Errors
    ///
    /// [`CoverError::IndexOutOfRange`] if a member lies outside the
    /// universe, [`CoverError::CostIndexOutOfRange`] if a cost index lies
    /// outside the cost model's space.
    pub fn insert(&mut self, subset: Subset) -> Result<bool> {
        if self.contains(&subset) {
            return Ok(false);
        }
        if let Some(index) = subset.max_member() {
            if index >= self.universe_size {
                return Err(CoverError::IndexOutOfRange {
                    index,
                    universe_size: self.universe_size,
                });
            }
        }
        if let (Some(state), Some(index)) = (&self.cost_indices, subset.max_cost_index()) {
            if index >= state.coverage.len() {
                return Err(CoverError::CostIndexOutOfRange {
                    index,
                    cost_index_count: state.coverage.len(),
                });
            }
        }
        Ok(self.insert_unchecked(subset))
    }

    /// Inserts a subset known to fit this family's universe and cost-index
    /// space.
    pub(crate) fn insert_unchecked(&mut self, subset: Subset) -> bool {
        if self.contains(&subset) {
            return false;
        }
        for &index in subset.members() {
            match self.coverage[index] {
                0 => {
                    self.uncovered -= 1;
                    self.single_covered += 1;
                }
                1 => {
                    self.single_covered -= 1;
                    self.multi_covered += 1;
                }
                _ => {}
            }
            self.coverage[index] += 1;
        }
        if let Some(state) = &mut self.cost_indices {
            for &index in subset.cost_indices() {
                state.coverage[index] += 1;
            }
            state.total_frequency += subset.cost_indices().len();
            state.index_cost = state.model.family_cost(&state.coverage);
        }
        self.plain_cost += subset.cost();
        self.total_frequency += subset.len();
        self.positions
            .insert(subset.members().to_vec(), self.subsets.len());
        self.subsets.push(subset);
        true
    }

    /// Inserts every subset of `subsets`, returning how many were new.
    ///
    /// Stops at the first invalid subset; earlier insertions are kept.
    pub fn extend<I: IntoIterator<Item = Subset>>(&mut self, subsets: I) -> Result<usize> {
        let mut added = 0;
        for subset in subsets {
            if self.insert(subset)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Inserts copies of all subsets of `other`, returning how many were
    /// new.
    ///
    /// # Errors
    ///
    /// [`CoverError::UniverseMismatch`] if the universes differ.
    pub fn merge(&mut self, other: &Family) -> Result<usize> {
        if other.universe_size != self.universe_size {
            return Err(CoverError::UniverseMismatch {
                expected: self.universe_size,
                found: other.universe_size,
            });
        }
        self.extend(other.subsets.iter().cloned())
    }

    /// Removes the subset with the same members as `subset`, if present.
    pub fn remove(&mut self, subset: &Subset) -> Option<Subset> {
        let position = self.positions.remove(subset.members())?;
        let removed = self.subsets.remove(position);
        for s in &self.subsets[position..] {
            if let Some(p) = self.positions.get_mut(s.members()) {
                *p -= 1;
            }
        }
        for &index in removed.members() {
            match self.coverage[index] {
                2 => {
                    self.multi_covered -= 1;
                    self.single_covered += 1;
                }
                1 => {
                    self.single_covered -= 1;
                    self.uncovered += 1;
                }
                _ => {}
            }
            self.coverage[index] -= 1;
        }
        if let Some(state) = &mut self.cost_indices {
            for &index in removed.cost_indices() {
                state.coverage[index] -= 1;
            }
            state.total_frequency -= removed.cost_indices().len();
            state.index_cost = state.model.family_cost(&state.coverage);
        }
        // resummed so the cost never drifts from the stored subsets
        self.plain_cost = self.subsets.iter().map(Subset::cost).sum();
        self.total_frequency -= removed.len();
        Some(removed)
    }

    /// Removes all subsets, keeping universe, bound, and cost model.
    pub fn clear(&mut self) {
        *self = self.empty_like();
    }

    /// Returns `true` if no size bound is set and all subsets cost the same.
    ///
    /// Families with a cost model are never uniform.
    pub fn costs_are_uniform(&self) -> bool {
        if self.cost_indices.is_some() {
            return false;
        }
        if self.subsets.is_empty() {
            return true;
        }
        if self.max_subsets > 0 {
            return false;
        }
        let first = self.subsets[0].cost();
        self.subsets.iter().all(|s| s.cost() == first)
    }

    /// Returns `true` if the family cost is the plain sum of subset costs.
    ///
    /// Families with a cost model are never linear.
    pub fn costs_are_linear(&self) -> bool {
        self.cost_indices.is_none() && (self.subsets.is_empty() || self.max_subsets == 0)
    }

    /// Sum of subset costs plus the size-bound penalty.
    fn simple_cost(&self) -> f64 {
        let size = self.subsets.len();
        if self.max_subsets == 0 || size <= self.max_subsets {
            self.plain_cost
        } else {
            self.plain_cost + size as f64 * self.max_subset_cost
        }
    }

    fn simple_add_cost(&self, subset: &Subset) -> f64 {
        let size = self.subsets.len();
        if self.max_subsets == 0 || size < self.max_subsets {
            subset.cost()
        } else if size == self.max_subsets {
            subset.cost() + (size + 1) as f64 * self.max_subset_cost
        } else {
            subset.cost() + self.max_subset_cost
        }
    }

    fn simple_remove_cost(&self, subset: &Subset) -> f64 {
        let size = self.subsets.len();
        if self.max_subsets == 0 || size <= self.max_subsets {
            subset.cost()
        } else if size - 1 == self.max_subsets {
            subset.cost() + size as f64 * self.max_subset_cost
        } else {
            subset.cost() + self.max_subset_cost
        }
    }

    /// Current family cost.
    pub fn cost(&self) -> f64 {
        match &self.cost_indices {
            None => self.simple_cost(),
            Some(state) => state.aggregate(self.simple_cost(), state.index_cost),
        }
    }

    /// Sum of the subset costs alone, without penalty or cost-index terms.
    pub fn plain_cost(&self) -> f64 {
        self.plain_cost
    }

    /// The cost-index model's cost of the current covering, `0` without a
    /// model.
    pub fn index_cost(&self) -> f64 {
        self.cost_indices.as_ref().map_or(0.0, |state| state.index_cost)
    }

    /// Increase of [`cost`](Self::cost) if `subset` were inserted.
    ///
    /// Zero if the subset is already present.
    pub fn add_cost(&self, subset: &Subset) -> f64 {
        if self.contains(subset) {
            return 0.0;
        }
        let simple_add = self.simple_add_cost(subset);
        match &self.cost_indices {
            None => simple_add,
            Some(state) => {
                let index_add = state.model.add_cost(subset, &state.coverage);
                match state.aggregation {
                    IndexAggregation::Sum => simple_add + index_add,
                    IndexAggregation::Quotient => {
                        let after = state.aggregate(
                            self.simple_cost() + simple_add,
                            state.index_cost + index_add,
                        );
                        after - self.cost()
                    }
                }
            }
        }
    }

    /// Decrease of [`cost`](Self::cost) if `subset` were removed.
    ///
    /// Zero if the subset is not present.
    pub fn remove_cost(&self, subset: &Subset) -> f64 {
        if !self.contains(subset) {
            return 0.0;
        }
        let simple_remove = self.simple_remove_cost(subset);
        match &self.cost_indices {
            None => simple_remove,
            Some(state) => {
                let index_remove = state.model.remove_cost(subset, &state.coverage);
                match state.aggregation {
                    IndexAggregation::Sum => simple_remove + index_remove,
                    IndexAggregation::Quotient => {
                        let after = state.aggregate(
                            self.simple_cost() - simple_remove,
                            state.index_cost - index_remove,
                        );
                        self.cost() - after
                    }
                }
            }
        }
    }

    /// Number of subsets covering `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` lies outside the universe.
    pub fn coverage_count(&self, index: usize) -> usize {
        self.coverage[index]
    }

    /// Per-index coverage counts.
    pub fn coverage(&self) -> &[usize] {
        &self.coverage
    }

    /// Per-cost-index coverage counts, if the family has a cost model.
    pub fn cost_index_coverage(&self) -> Option<&[usize]> {
        self.cost_indices.as_ref().map(|state| state.coverage.as_slice())
    }

    /// Returns `true` if at least one subset covers `index`.
    pub fn index_is_covered(&self, index: usize) -> bool {
        self.coverage[index] > 0
    }

    /// Number of universe indices covered by no subset.
    pub fn uncovered_count(&self) -> usize {
        self.uncovered
    }

    /// Number of universe indices covered by at least one subset.
    pub fn covered_count(&self) -> usize {
        self.universe_size - self.uncovered
    }

    /// Number of universe indices covered by exactly one subset.
    pub fn single_covered_count(&self) -> usize {
        self.single_covered
    }

    /// Number of universe indices covered by more than one subset.
    pub fn multi_covered_count(&self) -> usize {
        self.multi_covered
    }

    /// Covered universe indices in ascending order.
    pub fn covered_indices(&self) -> Vec<usize> {
        (0..self.universe_size)
            .filter(|&i| self.coverage[i] > 0)
            .collect()
    }

    /// Uncovered universe indices in ascending order.
    pub fn uncovered_indices(&self) -> Vec<usize> {
        (0..self.universe_size)
            .filter(|&i| self.coverage[i] == 0)
            .collect()
    }

    /// Number of members of `subset` no subset of the family covers yet.
    pub fn newly_covered_count(&self, subset: &Subset) -> usize {
        subset
            .members()
            .iter()
            .filter(|&&i| self.coverage[i] == 0)
            .count()
    }

    /// Number of members of `subset` covered exactly once.
    ///
    /// For a subset of the family these are the indices it covers alone.
    pub fn uniquely_covered_count(&self, subset: &Subset) -> usize {
        subset
            .members()
            .iter()
            .filter(|&&i| self.coverage[i] == 1)
            .count()
    }

    /// Returns `true` if `subset` is in the family and covers some index no
    /// other subset covers.
    pub fn is_necessary(&self, subset: &Subset) -> bool {
        self.contains(subset) && self.uniquely_covered_count(subset) > 0
    }

    /// Subsets that could be removed without uncovering any index.
    pub fn redundant_subsets(&self) -> Vec<&Subset> {
        self.subsets
            .iter()
            .filter(|s| self.uniquely_covered_count(s) == 0)
            .collect()
    }

    /// Summary statistics of the family.
    pub fn stats(&self) -> FamilyStats {
        let size = self.subsets.len();
        let mean_frequency = if self.universe_size == 0 {
            0.0
        } else {
            self.total_frequency as f64 / self.universe_size as f64
        };
        let (mean_subset_len, density) = if size == 0 {
            (0.0, 0.0)
        } else {
            (
                self.total_frequency as f64 / size as f64,
                mean_frequency / size as f64,
            )
        };
        FamilyStats {
            universe_size: self.universe_size,
            size,
            cost: self.cost(),
            plain_cost: self.plain_cost,
            max_subsets: self.max_subsets,
            max_subset_cost: self.max_subset_cost,
            necessary: size - self.redundant_subsets().len(),
            uncovered: self.uncovered,
            single_covered: self.single_covered,
            multi_covered: self.multi_covered,
            mean_frequency,
            mean_subset_len,
            density,
            cost_indices: self.cost_indices.as_ref().map(|state| CostIndexStats {
                count: state.coverage.len(),
                covered: state.coverage.iter().filter(|&&c| c > 0).count(),
                index_cost: state.index_cost,
                total_frequency: state.total_frequency,
            }),
        }
    }
}

impl<'a> IntoIterator for &'a Family {
    type Item = &'a Subset;
    type IntoIter = std::slice::Iter<'a, Subset>;

    fn into_iter(self) -> Self::IntoIter {
        self.subsets.iter()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, subset) in self.subsets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{subset}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::{FixedExistentCosts, FrequencyConfig, FrequencyCosts};

    fn subset(members: &[usize], cost: f64) -> Subset {
        Subset::new(members.iter().copied(), cost).unwrap()
    }

    fn sample() -> Family {
        let mut family = Family::new(6);
        family.insert(subset(&[2, 3, 5], 1.0)).unwrap();
        family.insert(subset(&[0, 1, 3, 5], 2.0)).unwrap();
        family.insert(subset(&[2, 4], 0.5)).unwrap();
        family
    }

    #[test]
    fn test_insert_updates_coverage() {
        let family = sample();
        assert_eq!(family.size(), 3);
        assert_eq!(family.coverage(), &[1, 1, 2, 2, 1, 2]);
        assert_eq!(family.uncovered_count(), 0);
        assert_eq!(family.single_covered_count(), 3);
        assert_eq!(family.multi_covered_count(), 3);
        assert_eq!(family.cost(), 3.5);
    }

    #[test]
    fn test_duplicate_is_ignored() {
        let mut family = sample();
        let added = family.insert(subset(&[5, 3, 2], 9.0)).unwrap();
        assert!(!added);
        assert_eq!(family.size(), 3);
        assert_eq!(family.cost(), 3.5);
    }

    #[test]
    fn test_insert_rejects_out_of_range() {
        let mut family = Family::new(3);
        let err = family.insert(subset(&[1, 3], 1.0)).unwrap_err();
        assert_eq!(
            err,
            CoverError::IndexOutOfRange {
                index: 3,
                universe_size: 3
            }
        );
        assert!(family.is_empty());
        assert_eq!(family.uncovered_count(), 3);
    }

    #[test]
    fn test_remove_restores_counts() {
        let mut family = sample();
        let removed = family.remove(&Subset::unit([0, 1, 3, 5])).unwrap();
        assert_eq!(removed.cost(), 2.0);
        assert_eq!(family.coverage(), &[0, 0, 2, 1, 1, 1]);
        assert_eq!(family.uncovered_count(), 2);
        assert_eq!(family.single_covered_count(), 3);
        assert_eq!(family.multi_covered_count(), 1);
        assert_eq!(family.cost(), 1.5);
        assert!(family.remove(&Subset::unit([0, 1, 3, 5])).is_none());

        // positions stay valid after an interior removal
        assert!(family.contains(&Subset::unit([2, 4])));
        assert!(family.remove(&Subset::unit([2, 4])).is_some());
        assert_eq!(family.subsets(), &[Subset::unit([2, 3, 5])]);
    }

    #[test]
    fn test_merge_and_mismatch() {
        let mut family = Family::new(6);
        family.insert(subset(&[2, 3, 5], 1.0)).unwrap();
        let added = family.merge(&sample()).unwrap();
        assert_eq!(added, 2);
        assert_eq!(family.size(), 3);

        let other = Family::new(5);
        assert_eq!(
            family.merge(&other).unwrap_err(),
            CoverError::UniverseMismatch {
                expected: 6,
                found: 5
            }
        );
    }

    #[test]
    fn test_uniform_and_linear() {
        let mut family = Family::new(4);
        assert!(family.costs_are_uniform());
        assert!(family.costs_are_linear());
        family.insert(subset(&[0], 2.0)).unwrap();
        family.insert(subset(&[1], 2.0)).unwrap();
        assert!(family.costs_are_uniform());
        family.insert(subset(&[2], 3.0)).unwrap();
        assert!(!family.costs_are_uniform());
        assert!(family.costs_are_linear());

        let bounded = family.clone_bounded(2, 5.0);
        assert!(!bounded.costs_are_uniform());
        assert!(!bounded.costs_are_linear());
        assert!(bounded.empty_like().costs_are_linear());
    }

    #[test]
    fn test_cost_model_family_is_nonlinear() {
        let model = Rc::new(FixedExistentCosts::new(&[1.0, 1.0], 2));
        let family = Family::with_cost_model(3, model, IndexAggregation::Sum);
        assert!(!family.costs_are_uniform());
        assert!(!family.costs_are_linear());
    }

    #[test]
    fn test_clone_bounded_keeps_subsets_and_penalizes() {
        let family = sample();
        let bounded = family.clone_bounded(2, 1.0);
        // the subset costing 2.0 stays although it exceeds the penalty
        assert_eq!(bounded.size(), 3);
        assert!(bounded.contains(&Subset::unit([0, 1, 3, 5])));
        assert_eq!(bounded.max_subsets(), 2);
        assert_eq!(bounded.max_subset_cost(), 1.0);
        // three subsets over a bound of two: 3.5 plus 3 * 1.0
        assert_eq!(bounded.cost(), 6.5);

        let unbounded = family.clone_bounded(0, f64::INFINITY);
        assert_eq!(unbounded.size(), 3);
        assert_eq!(unbounded.cost(), family.cost());
    }

    #[test]
    fn test_size_penalty_costs() {
        let mut family = Family::new(5).clone_bounded(2, 10.0);
        family.insert(subset(&[0], 1.0)).unwrap();
        assert_eq!(family.add_cost(&subset(&[1], 1.0)), 1.0);
        family.insert(subset(&[1], 1.0)).unwrap();
        assert_eq!(family.cost(), 2.0);

        // crossing the bound charges every subset
        let third = subset(&[2], 1.0);
        assert_eq!(family.add_cost(&third), 1.0 + 3.0 * 10.0);
        family.insert(third.clone()).unwrap();
        assert_eq!(family.cost(), 3.0 + 3.0 * 10.0);

        let fourth = subset(&[3], 1.0);
        assert_eq!(family.add_cost(&fourth), 11.0);
        family.insert(fourth.clone()).unwrap();
        assert_eq!(family.cost(), 4.0 + 40.0);

        assert_eq!(family.remove_cost(&fourth), 11.0);
        family.remove(&fourth);
        assert_eq!(family.remove_cost(&third), 1.0 + 3.0 * 10.0);
        family.remove(&third);
        assert_eq!(family.cost(), 2.0);
        assert_eq!(family.remove_cost(&third), 0.0);
    }

    #[test]
    fn test_add_and_remove_cost_match_cost_difference() {
        let model = Rc::new(FrequencyCosts::new(
            &[1.0, 2.0, 3.0],
            &FrequencyConfig::default().with_decimal_digits(6),
        ));
        let mut family = Family::with_cost_model(4, model, IndexAggregation::Sum);
        let subsets = [
            subset(&[0, 1], 1.0).with_cost_indices([0, 1]),
            subset(&[1, 2], 2.0).with_cost_indices([1, 2]),
            subset(&[3], 0.5).with_cost_indices([1]),
        ];
        for s in &subsets {
            let before = family.cost();
            let add = family.add_cost(s);
            family.insert(s.clone()).unwrap();
            assert!((before + add - family.cost()).abs() < 1e-9);
        }
        for s in &subsets {
            let before = family.cost();
            let remove = family.remove_cost(s);
            family.remove(s);
            assert!((before - remove - family.cost()).abs() < 1e-9);
        }
        assert_eq!(family.index_cost(), 0.0);
        assert_eq!(family.cost(), 0.0);
    }

    #[test]
    fn test_cost_index_out_of_range() {
        let model = Rc::new(FixedExistentCosts::new(&[1.0], 1));
        let mut family = Family::with_cost_model(2, model, IndexAggregation::Sum);
        let err = family
            .insert(subset(&[0], 1.0).with_cost_indices([1]))
            .unwrap_err();
        assert_eq!(
            err,
            CoverError::CostIndexOutOfRange {
                index: 1,
                cost_index_count: 1
            }
        );
    }

    #[test]
    fn test_quotient_aggregation() {
        let model = Rc::new(FixedExistentCosts::new(&[1.0, 1.0], 3));
        let mut family = Family::with_cost_model(2, model, IndexAggregation::Quotient);
        let a = subset(&[0], 1.0).with_cost_indices([0]);
        let b = subset(&[1], 1.0).with_cost_indices([1]);
        family.insert(a).unwrap();
        let expected = 1.0 / (2.0 * MAX_COST_FACTOR - 1.0);
        assert!((family.cost() - expected).abs() < 1e-12);

        let before = family.cost();
        let add = family.add_cost(&b);
        family.insert(b.clone()).unwrap();
        assert!((before + add - family.cost()).abs() < 1e-6);
        assert!(family.cost() > before);

        let remove = family.remove_cost(&b);
        assert!((family.cost() - remove - before).abs() < 1e-6);
    }

    #[test]
    fn test_empty_like_keeps_shape() {
        let model = Rc::new(FixedExistentCosts::new(&[1.0], 1));
        let mut family = Family::with_cost_model(3, model, IndexAggregation::Sum)
            .clone_bounded(1, 4.0);
        family
            .insert(subset(&[0], 1.0).with_cost_indices([0]))
            .unwrap();
        let empty = family.empty_like();
        assert!(empty.is_empty());
        assert_eq!(empty.universe_size(), 3);
        assert_eq!(empty.max_subsets(), 1);
        assert_eq!(empty.cost_index_coverage(), Some(&[0][..]));
        assert!(Rc::ptr_eq(
            empty.cost_model().unwrap(),
            family.cost_model().unwrap()
        ));

        family.clear();
        assert!(family.is_empty());
        assert_eq!(family.uncovered_count(), 3);
        assert_eq!(family.max_subset_cost(), 4.0);
    }

    #[test]
    fn test_necessary_and_redundant() {
        let mut family = Family::new(4);
        family.insert(subset(&[0, 1], 1.0)).unwrap();
        family.insert(subset(&[1, 2], 1.0)).unwrap();
        family.insert(subset(&[2, 3], 1.0)).unwrap();
        assert!(family.is_necessary(&Subset::unit([0, 1])));
        assert!(!family.is_necessary(&Subset::unit([1, 2])));
        assert!(!family.is_necessary(&Subset::unit([3])));
        assert_eq!(family.redundant_subsets(), vec![&Subset::unit([1, 2])]);
        assert_eq!(family.newly_covered_count(&Subset::unit([0, 3])), 0);
        assert_eq!(family.uniquely_covered_count(&Subset::unit([0, 3])), 2);
    }

    #[test]
    fn test_covered_indices() {
        let mut family = Family::new(5);
        family.insert(subset(&[1, 3], 1.0)).unwrap();
        assert_eq!(family.covered_indices(), vec![1, 3]);
        assert_eq!(family.uncovered_indices(), vec![0, 2, 4]);
        assert_eq!(family.covered_count(), 2);
        assert!(family.index_is_covered(3));
        assert_eq!(family.coverage_count(3), 1);
    }

    #[test]
    fn test_display() {
        let mut family = Family::new(3);
        assert_eq!(family.to_string(), "{}");
        family.insert(subset(&[0, 1], 1.0)).unwrap();
        family.insert(subset(&[2], 2.5)).unwrap();
        assert_eq!(family.to_string(), "{[0, 1]:1, [2]:2.5}");
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.size, 3);
        // [2, 3, 5] only covers indices that others cover too
        assert_eq!(stats.necessary, 2);
        assert_eq!(stats.uncovered, 0);
        assert!((stats.mean_frequency - 9.0 / 6.0).abs() < 1e-12);
        assert!((stats.mean_subset_len - 3.0).abs() < 1e-12);
        assert!(stats.cost_indices.is_none());
    }
}
