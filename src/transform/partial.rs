//! Solving families that cannot cover the whole universe.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use crate::family::{Family, Subset};
use crate::strategy::CoverStrategy;

/// Wraps a strategy so it can be applied to families that leave part of
/// the universe uncovered.
///
/// Every subset is padded with the indices no subset covers, which makes
/// the padded family fully coverable. The wrapped strategy solves the
/// padded problem and each padded subset of its answer is mapped back to
/// the original it came from. Padded subsets never appear in the output.
///
/// # Examples
///
/// ```
/// use u_setcover::family::{Family, Subset};
/// use u_setcover::greedy::GreedyCover;
/// use u_setcover::strategy::CoverStrategy;
/// use u_setcover::transform::PartialCoverageAdapter;
///
/// let mut family = Family::new(5);
/// family.insert(Subset::unit([0, 1]))?;
/// family.insert(Subset::unit([1, 2]))?;
///
/// let mut adapter = PartialCoverageAdapter::new(GreedyCover::default());
/// let cover = adapter.solve(&family);
/// assert_eq!(cover.size(), 2);
/// assert_eq!(cover.uncovered_indices(), vec![3, 4]);
/// # Ok::<(), u_setcover::CoverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PartialCoverageAdapter<S> {
    strategy: S,
    processed: usize,
}

impl<S: CoverStrategy> PartialCoverageAdapter<S> {
    /// Wraps `strategy`.
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            processed: 0,
        }
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

fn padded(template: &Family, subsets: &Family, missing: &[usize]) -> Family {
    let mut result = template.empty_like();
    for subset in subsets {
        result.insert_unchecked(subset.augmented(missing));
    }
    result
}

impl<S: CoverStrategy> CoverStrategy for PartialCoverageAdapter<S> {
    fn solve_with_hint(&mut self, family: &Family, known: Option<&Family>) -> Family {
        self.processed += 1;

        let working = match known {
            Some(known) => {
                assert_eq!(
                    known.universe_size(),
                    family.universe_size(),
                    "known solution universe differs from the family's"
                );
                let mut merged = family.clone();
                for subset in known {
                    merged.insert_unchecked(subset.clone());
                }
                Cow::Owned(merged)
            }
            None => Cow::Borrowed(family),
        };

        if working.covered_count() == 0 {
            debug!("nothing coverable, returning empty family");
            return working.empty_like();
        }
        if working.uncovered_count() == 0 {
            debug!("fully coverable, delegating");
            return self.strategy.solve_with_hint(&working, known);
        }

        let missing = working.uncovered_indices();
        debug!(
            missing = missing.len(),
            subsets = working.size(),
            "padding subsets with uncoverable indices"
        );

        // members are disjoint from `missing`, so padding stays one-to-one
        let origins: HashMap<Vec<usize>, &Subset> = working
            .iter()
            .map(|s| (s.augmented(&missing).members().to_vec(), s))
            .collect();
        let problem = padded(&working, &working, &missing);
        let hint = known.map(|k| padded(k, k, &missing));

        let solution = self.strategy.solve_with_hint(&problem, hint.as_ref());

        let mut result = working.empty_like();
        for subset in &solution {
            if let Some(original) = origins.get(subset.members()) {
                result.insert_unchecked((*original).clone());
            }
        }
        result
    }

    fn statistics(&self) -> String {
        format!("problems processed: {}", self.processed)
    }
}
