//! Size-bounded solving through per-subset cost penalties.
//!
//! # Algorithm
//!
//! 1. Uniform cost: delegate, subset count and cost already agree
//! 2. Linear cost: bound a clone by the largest subset cost, delegate once
//! 3. Non-linear cost: bound by the largest marginal cost against the hint
//!    (or an empty family), solve; if still too large, re-bound against the
//!    first result and solve a second time, keeping the smaller result
//!
//! The second pass is never followed by a third.

use tracing::debug;

use crate::family::Family;
use crate::strategy::CoverStrategy;

/// Wraps a strategy to target at most `max_subsets` subsets.
///
/// The family handed to the wrapped strategy is a
/// [`clone_bounded`](Family::clone_bounded) copy: once it holds more than
/// `max_subsets` subsets every subset is charged an extra penalty, so a
/// cost-minimizing strategy prefers smaller solutions. The bound is a
/// target, not a guarantee.
///
/// # Examples
///
/// ```
/// use u_setcover::family::{Family, Subset};
/// use u_setcover::greedy::GreedyCover;
/// use u_setcover::strategy::CoverStrategy;
/// use u_setcover::transform::SizeBoundedSolver;
///
/// let mut family = Family::new(4);
/// family.insert(Subset::new([0, 1], 1.0)?)?;
/// family.insert(Subset::new([2], 0.6)?)?;
/// family.insert(Subset::new([3], 0.6)?)?;
/// family.insert(Subset::new([2, 3], 1.4)?)?;
///
/// assert_eq!(GreedyCover::default().solve(&family).size(), 3);
///
/// let mut solver = SizeBoundedSolver::new(GreedyCover::default(), 1);
/// let cover = solver.solve(&family);
/// assert_eq!(cover.size(), 2);
/// # Ok::<(), u_setcover::CoverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SizeBoundedSolver<S> {
    strategy: S,
    max_subsets: usize,
    processed: usize,
}

impl<S: CoverStrategy> SizeBoundedSolver<S> {
    /// Wraps `strategy` with the target `max_subsets`.
    ///
    /// # Panics
    ///
    /// Panics if `max_subsets` is zero.
    pub fn new(strategy: S, max_subsets: usize) -> Self {
        assert!(max_subsets > 0, "max_subsets must be at least 1");
        Self {
            strategy,
            max_subsets,
            processed: 0,
        }
    }

    /// The targeted subset count.
    pub fn max_subsets(&self) -> usize {
        self.max_subsets
    }

    /// The wrapped strategy.
    pub fn inner(&self) -> &S {
        &self.strategy
    }

    /// Unwraps the strategy.
    pub fn into_inner(self) -> S {
        self.strategy
    }

    /// Number of problems solved so far.
    pub fn processed(&self) -> usize {
        self.processed
    }
}

/// Largest marginal cost of any subset of `family` relative to `reference`:
/// removal cost if the reference holds it, insertion cost otherwise.
fn max_cost(reference: &Family, family: &Family) -> f64 {
    family
        .iter()
        .map(|subset| {
            if reference.contains(subset) {
                reference.remove_cost(subset)
            } else {
                reference.add_cost(subset)
            }
        })
        .fold(0.0, f64::max)
}

impl<S: CoverStrategy> CoverStrategy for SizeBoundedSolver<S> {
    fn solve_with_hint(&mut self, family: &Family, known: Option<&Family>) -> Family {
        self.processed += 1;
        if let Some(known) = known {
            assert_eq!(
                known.universe_size(),
                family.universe_size(),
                "known solution universe differs from the family's"
            );
        }

        if family.costs_are_uniform() {
            debug!(max_subsets = self.max_subsets, "uniform costs, delegating");
            return self.strategy.solve_with_hint(family, known);
        }

        if family.costs_are_linear() {
            let bound = max_cost(family, family);
            debug!(max_subsets = self.max_subsets, bound, "linear costs, bounding once");
            let bounded = family.clone_bounded(self.max_subsets, bound);
            return self.strategy.solve_with_hint(&bounded, known);
        }

        let empty;
        let reference = match known {
            Some(known) => known,
            None => {
                empty = family.empty_like();
                &empty
            }
        };
        let bound = max_cost(reference, family);
        let bounded = family.clone_bounded(self.max_subsets, bound);
        let hint = known.map(|k| k.clone_bounded(self.max_subsets, bound));
        let first = self.strategy.solve_with_hint(&bounded, hint.as_ref());
        debug!(
            max_subsets = self.max_subsets,
            bound,
            size = first.size(),
            "non-linear costs, first pass"
        );
        if first.size() <= self.max_subsets {
            return first;
        }

        let bound = max_cost(&first, family);
        let bounded = family.clone_bounded(self.max_subsets, bound);
        let hint = known.map(|k| k.clone_bounded(self.max_subsets, bound));
        let second = self.strategy.solve_with_hint(&bounded, hint.as_ref());
        debug!(
            bound,
            first_size = first.size(),
            second_size = second.size(),
            "non-linear costs, second pass"
        );
        if second.size() < first.size()
            || (second.size() == first.size() && second.cost() < first.cost())
        {
            second
        } else {
            first
        }
    }

    fn statistics(&self) -> String {
        format!("problems processed: {}", self.processed)
    }
}
