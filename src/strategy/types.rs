//! Core traits for cover strategies.

use crate::family::Family;

/// An optimization strategy for weighted set cover.
///
/// Given a family, a strategy returns a sub-family that covers as much of
/// the universe as possible at low cost. Strategies keep their own
/// counters, so solving takes `&mut self`.
///
/// A returned family never contains subsets that are not in the input
/// family or the hint. An input covering nothing yields an empty family.
///
/// # Examples
///
/// ```
/// use u_setcover::family::{Family, Subset};
/// use u_setcover::strategy::CoverStrategy;
///
/// /// Keeps every subset.
/// struct TakeAll {
///     calls: usize,
/// }
///
/// impl CoverStrategy for TakeAll {
///     fn solve_with_hint(&mut self, family: &Family, _hint: Option<&Family>) -> Family {
///         self.calls += 1;
///         family.clone()
///     }
///
///     fn statistics(&self) -> String {
///         format!("problems processed: {}", self.calls)
///     }
/// }
///
/// let mut family = Family::new(2);
/// family.insert(Subset::unit([0, 1]))?;
/// let mut strategy = TakeAll { calls: 0 };
/// assert_eq!(strategy.solve(&family).size(), 1);
/// assert_eq!(strategy.statistics(), "problems processed: 1");
/// # Ok::<(), u_setcover::CoverError>(())
/// ```
pub trait CoverStrategy {
    /// Solves without a known solution.
    fn solve(&mut self, family: &Family) -> Family {
        self.solve_with_hint(family, None)
    }

    /// Solves, optionally seeded with a known (not necessarily optimal)
    /// solution over the same universe.
    fn solve_with_hint(&mut self, family: &Family, known: Option<&Family>) -> Family;

    /// Human-readable statistics of the runs so far.
    fn statistics(&self) -> String;
}

impl<S: CoverStrategy + ?Sized> CoverStrategy for &mut S {
    fn solve(&mut self, family: &Family) -> Family {
        (**self).solve(family)
    }

    fn solve_with_hint(&mut self, family: &Family, known: Option<&Family>) -> Family {
        (**self).solve_with_hint(family, known)
    }

    fn statistics(&self) -> String {
        (**self).statistics()
    }
}

impl<S: CoverStrategy + ?Sized> CoverStrategy for Box<S> {
    fn solve(&mut self, family: &Family) -> Family {
        (**self).solve(family)
    }

    fn solve_with_hint(&mut self, family: &Family, known: Option<&Family>) -> Family {
        (**self).solve_with_hint(family, known)
    }

    fn statistics(&self) -> String {
        (**self).statistics()
    }
}

/// Decision form of set cover: is there a full covering cheaper than a
/// limit?
///
/// A returned family is a witness: it covers every index and costs strictly
/// less than `cost_limit`. `None` means no witness was found, which for a
/// heuristic does not prove that none exists.
pub trait CoverDecision {
    /// Looks for a full covering of `family` cheaper than `cost_limit`.
    fn decide(&mut self, family: &Family, known: Option<&Family>, cost_limit: f64)
        -> Option<Family>;

    /// Human-readable statistics of the runs so far.
    fn statistics(&self) -> String;
}

impl<D: CoverDecision + ?Sized> CoverDecision for &mut D {
    fn decide(
        &mut self,
        family: &Family,
        known: Option<&Family>,
        cost_limit: f64,
    ) -> Option<Family> {
        (**self).decide(family, known, cost_limit)
    }

    fn statistics(&self) -> String {
        (**self).statistics()
    }
}
