//! Cost-limit decisions answered by a single optimization run.

use tracing::debug;

use crate::family::Family;
use crate::strategy::{CoverDecision, CoverStrategy};

/// Turns an optimization strategy into a one-shot decision procedure.
///
/// The wrapped strategy runs exactly once per query. Its answer is returned
/// as a witness if it covers the whole universe and costs strictly less
/// than the limit. Tightening the limit, e.g. by bisection, is up to the
/// caller.
///
/// # Examples
///
/// ```
/// use u_setcover::family::{Family, Subset};
/// use u_setcover::greedy::GreedyCover;
/// use u_setcover::strategy::CoverDecision;
/// use u_setcover::transform::DecisionWrapper;
///
/// let mut family = Family::new(2);
/// family.insert(Subset::new([0, 1], 2.0)?)?;
///
/// let mut decision = DecisionWrapper::new(GreedyCover::default());
/// assert!(decision.decide(&family, None, 2.5).is_some());
/// assert!(decision.decide(&family, None, 2.0).is_none());
/// # Ok::<(), u_setcover::CoverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DecisionWrapper<S> {
    strategy: S,
    processed: usize,
}

impl<S: CoverStrategy> DecisionWrapper<S> {
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

    /// Number of queries answered so far.
    pub fn processed(&self) -> usize {
        self.processed
    }
}

impl<S: CoverStrategy> CoverDecision for DecisionWrapper<S> {
    fn decide(
        &mut self,
        family: &Family,
        known: Option<&Family>,
        cost_limit: f64,
    ) -> Option<Family> {
        self.processed += 1;
        let solution = self.strategy.solve_with_hint(family, known);
        let accepted = solution.uncovered_count() == 0 && solution.cost() < cost_limit;
        debug!(
            cost = solution.cost(),
            cost_limit,
            uncovered = solution.uncovered_count(),
            accepted,
            "decision query"
        );
        accepted.then_some(solution)
    }

    fn statistics(&self) -> String {
        format!("problems processed: {}", self.processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Subset;
    use crate::greedy::GreedyCover;

    struct Fixed {
        answer: Family,
        calls: usize,
    }

    impl CoverStrategy for Fixed {
        fn solve_with_hint(&mut self, _family: &Family, _known: Option<&Family>) -> Family {
            self.calls += 1;
            self.answer.clone()
        }

        fn statistics(&self) -> String {
            String::new()
        }
    }

    fn covering(n: usize, cost: f64) -> Family {
        let mut family = Family::new(n);
        family
            .insert(Subset::new(0..n, cost).unwrap())
            .unwrap();
        family
    }

    #[test]
    fn test_witness_below_limit() {
        let answer = covering(3, 4.0);
        let mut fixed = Fixed { answer, calls: 0 };
        let mut decision = DecisionWrapper::new(&mut fixed);
        let witness = decision.decide(&Family::new(3), None, 4.5).unwrap();
        assert_eq!(witness.cost(), 4.0);
        assert_eq!(decision.statistics(), "problems processed: 1");
        drop(decision);
        assert_eq!(fixed.calls, 1);
    }

    #[test]
    fn test_limit_is_strict() {
        let mut decision = DecisionWrapper::new(Fixed {
            answer: covering(3, 4.0),
            calls: 0,
        });
        assert!(decision.decide(&Family::new(3), None, 4.0).is_none());
        assert_eq!(decision.processed(), 1);
    }

    #[test]
    fn test_partial_covering_is_no_witness() {
        let mut answer = Family::new(3);
        answer.insert(Subset::new([0, 1], 0.5).unwrap()).unwrap();
        let mut decision = DecisionWrapper::new(Fixed { answer, calls: 0 });
        assert!(decision
            .decide(&Family::new(3), None, f64::INFINITY)
            .is_none());
    }

    #[test]
    fn test_decision_with_greedy() {
        let mut family = Family::new(4);
        family.insert(Subset::new([0, 1], 1.0).unwrap()).unwrap();
        family.insert(Subset::new([2, 3], 1.0).unwrap()).unwrap();
        family.insert(Subset::new([0, 1, 2, 3], 5.0).unwrap()).unwrap();

        let mut decision = DecisionWrapper::new(GreedyCover::default());
        let witness = decision.decide(&family, None, 3.0).unwrap();
        assert_eq!(witness.uncovered_count(), 0);
        assert!(witness.cost() < 3.0);
        assert!(decision.decide(&family, None, 1.5).is_none());
        assert_eq!(decision.inner().processed(), 2);
    }
}
