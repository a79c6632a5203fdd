//! Local search execution.
//!
//! # Algorithm
//!
//! 1. Solve with the wrapped strategy and drop redundant subsets
//! 2. Each round:
//!    a. Remove and complete: with `m` the largest number of indices any
//!       subset covers alone, for `k` in `1..=min(max_alone, m - 1)` remove
//!       every subset covering at most `k` indices alone and complete the
//!       rest greedily; take the first strictly better cover
//!    b. Add one: insert each candidate outside the cover in turn, drop
//!       the subsets it made redundant in the cheapest way, and take the
//!       candidate with the cheapest outcome if it beats the cover
//! 3. Stop after a round without improvement or after `max_rounds`

use tracing::{debug, trace};

use super::config::LocalSearchConfig;
use crate::family::{Family, Subset};
use crate::greedy::{candidates, rehomed, remove_redundant_subsets};
use crate::strategy::CoverStrategy;

/// Fewer uncovered indices, or as many at strictly lower cost.
fn improves(next: &Family, current: &Family) -> bool {
    (next.uncovered_count(), next.cost()) < (current.uncovered_count(), current.cost())
}

/// Candidate with the lowest `add_cost / newly_covered`, earliest on ties.
fn cheapest<'a>(
    family: &Family,
    candidates: &[&'a Subset],
    excluded: &[Subset],
) -> Option<&'a Subset> {
    let mut best: Option<(&'a Subset, f64)> = None;
    for &candidate in candidates {
        if family.contains(candidate) || excluded.contains(candidate) {
            continue;
        }
        let newly = family.newly_covered_count(candidate);
        if newly == 0 {
            continue;
        }
        let ratio = family.add_cost(candidate) / newly as f64;
        if best.map_or(true, |(_, r)| ratio < r) {
            best = Some((candidate, ratio));
        }
    }
    best.map(|(subset, _)| subset)
}

/// Covers what `family` leaves uncovered from `candidates`, then drops
/// redundant subsets. The first pick avoids the subsets in `removed`.
fn complete(family: &mut Family, candidates: &[&Subset], removed: &[Subset]) {
    let mut excluded = removed;
    while family.uncovered_count() > 0 {
        let first = !excluded.is_empty();
        let pick = cheapest(family, candidates, excluded);
        excluded = &[];
        match pick {
            Some(subset) => {
                family.insert_unchecked(subset.clone());
            }
            None if first => {}
            None => break,
        }
    }
    remove_redundant_subsets(family);
}

/// Subsets of `pool` present in `family` and redundant there.
fn redundant_in<'p>(family: &Family, pool: &[&'p Subset]) -> Vec<&'p Subset> {
    pool.iter()
        .copied()
        .filter(|s| family.contains(s) && !family.is_necessary(s))
        .collect()
}

/// The subset with the largest removal cost, earliest on ties.
///
/// `removable` must not be empty.
fn costliest_removal<'p>(family: &Family, removable: &[&'p Subset]) -> &'p Subset {
    let mut victim = removable[0];
    let mut max = family.remove_cost(victim);
    for &subset in &removable[1..] {
        let cost = family.remove_cost(subset);
        if cost > max {
            victim = subset;
            max = cost;
        }
    }
    victim
}

/// Lowest cost reachable by removing redundant subsets of `pool` from
/// `family`. The family is restored before returning.
///
/// Every combination is tried while at most `limit` subsets are removable;
/// above that the costliest removal is committed first.
fn min_cost_without(family: &mut Family, pool: &[&Subset], limit: usize) -> f64 {
    let removable = redundant_in(family, pool);
    let mut best = family.cost();
    if removable.is_empty() {
        return best;
    }

    if removable.len() > limit {
        let victim = costliest_removal(family, &removable);
        if let Some(removed) = family.remove(victim) {
            best = best.min(min_cost_without(family, &removable, limit));
            family.insert_unchecked(removed);
        }
        return best;
    }

    // removal order is irrelevant, so later subsets only
    for (i, &subset) in removable.iter().enumerate() {
        if let Some(removed) = family.remove(subset) {
            best = best.min(min_cost_without(family, &removable[i + 1..], limit));
            family.insert_unchecked(removed);
        }
    }
    best
}

/// Removes redundant subsets of `pool` from `family` one at a time, each
/// time the one leading to the cheapest reachable reduction.
fn reduce(family: &mut Family, pool: &[&Subset], limit: usize) {
    loop {
        let removable = redundant_in(family, pool);
        let victim = match removable.len() {
            0 => return,
            1 => removable[0],
            n if n > limit => costliest_removal(family, &removable),
            _ => {
                let current = family.cost();
                let mut best: Option<(&Subset, f64)> = None;
                for (i, &subset) in removable.iter().enumerate() {
                    if let Some(removed) = family.remove(subset) {
                        let cost = min_cost_without(family, &removable[i + 1..], limit);
                        family.insert_unchecked(removed);
                        if cost < best.map_or(current, |(_, c)| c) {
                            best = Some((subset, cost));
                        }
                    }
                }
                match best {
                    Some((subset, _)) => subset,
                    None => return,
                }
            }
        };
        family.remove(victim);
    }
}

/// Remove-and-complete move. `None` if no threshold yields a better cover.
fn iter_remove(cover: &Family, candidates: &[&Subset], max_alone: usize) -> Option<Family> {
    let most_alone = cover
        .iter()
        .map(|s| cover.uniquely_covered_count(s))
        .max()?;

    for k in 1..=most_alone.saturating_sub(1).min(max_alone) {
        let removed: Vec<Subset> = cover
            .iter()
            .filter(|s| cover.uniquely_covered_count(s) <= k)
            .cloned()
            .collect();
        if removed.is_empty() {
            continue;
        }
        let mut next = cover.clone();
        for subset in &removed {
            next.remove(subset);
        }
        complete(&mut next, candidates, &removed);
        if improves(&next, cover) {
            trace!(k, removed = removed.len(), cost = next.cost(), "remove and complete");
            return Some(next);
        }
    }
    None
}

/// Add-one move. `None` if no candidate leads to a cheaper cover.
fn add_one(cover: &Family, candidates: &[&Subset], limit: usize) -> Option<Family> {
    let mut trial = cover.clone();
    let mut best: Option<(&Subset, f64)> = None;

    for &candidate in candidates {
        if trial.contains(candidate) {
            continue;
        }
        trial.insert_unchecked(candidate.clone());
        let pool: Vec<Subset> = trial
            .redundant_subsets()
            .into_iter()
            .filter(|s| *s != candidate)
            .cloned()
            .collect();
        if !pool.is_empty() {
            let pool: Vec<&Subset> = pool.iter().collect();
            let cost = min_cost_without(&mut trial, &pool, limit);
            if cost < best.map_or(cover.cost(), |(_, c)| c) {
                best = Some((candidate, cost));
            }
        }
        trial.remove(candidate);
    }

    let (subset, cost) = best?;
    let mut next = cover.clone();
    next.insert_unchecked(subset.clone());
    let pool: Vec<Subset> = next
        .redundant_subsets()
        .into_iter()
        .filter(|s| *s != subset)
        .cloned()
        .collect();
    let pool: Vec<&Subset> = pool.iter().collect();
    reduce(&mut next, &pool, limit);
    remove_redundant_subsets(&mut next);
    trace!(subset = %subset, cost, "add one");
    Some(next)
}

/// Improves the covers of a wrapped strategy by local search.
///
/// Candidates are the family's subsets and the hint's subsets, as for the
/// greedy heuristics. The returned cover is never worse than the wrapped
/// strategy's answer after redundant subsets are dropped.
///
/// # Examples
///
/// ```
/// use u_setcover::family::{Family, Subset};
/// use u_setcover::greedy::GreedyCover;
/// use u_setcover::local::{LocalSearchConfig, LocalSearchCover};
/// use u_setcover::strategy::CoverStrategy;
///
/// let mut family = Family::new(4);
/// family.insert(Subset::new([0, 1, 2, 3], 2.2)?)?;
/// family.insert(Subset::new([0, 1], 1.0)?)?;
/// family.insert(Subset::new([2, 3], 1.0)?)?;
///
/// let mut solver = LocalSearchCover::new(GreedyCover::default(), LocalSearchConfig::default());
/// let cover = solver.solve(&family);
/// assert_eq!(cover.uncovered_count(), 0);
/// assert_eq!(cover.cost(), 2.0);
/// # Ok::<(), u_setcover::CoverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearchCover<S> {
    strategy: S,
    config: LocalSearchConfig,
    processed: usize,
    improvements: usize,
}

impl<S: CoverStrategy> LocalSearchCover<S> {
    /// Wraps `strategy`.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn new(strategy: S, config: LocalSearchConfig) -> Self {
        config.validate().expect("invalid LocalSearchConfig");
        Self {
            strategy,
            config,
            processed: 0,
            improvements: 0,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
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

    /// Number of accepted moves so far.
    pub fn improvements(&self) -> usize {
        self.improvements
    }

    /// Improves `cover`, a covering made of subsets of `family` or `known`.
    ///
    /// The result is priced by `family`'s cost model and size bound.
    ///
    /// # Panics
    ///
    /// Panics if `known` has a different universe than `family`.
    pub fn improve(&mut self, family: &Family, known: Option<&Family>, cover: &Family) -> Family {
        let candidates = candidates(family, known);
        let mut cover = rehomed(family, cover);
        remove_redundant_subsets(&mut cover);
        let start_cost = cover.cost();
        let limit = self.config.exhaustive_limit;

        let mut rounds = 0;
        while rounds < self.config.max_rounds {
            rounds += 1;
            let mut improved = false;
            if self.config.iter_remove {
                if let Some(next) = iter_remove(&cover, &candidates, self.config.max_alone) {
                    cover = next;
                    improved = true;
                    self.improvements += 1;
                }
            }
            if self.config.add_one {
                let next = add_one(&cover, &candidates, limit);
                if let Some(next) = next.filter(|n| improves(n, &cover)) {
                    cover = next;
                    improved = true;
                    self.improvements += 1;
                }
            }
            if !improved {
                break;
            }
        }

        debug!(
            rounds,
            start_cost,
            cost = cover.cost(),
            subsets = cover.size(),
            "local search finished"
        );
        cover
    }
}

impl<S: CoverStrategy> CoverStrategy for LocalSearchCover<S> {
    fn solve_with_hint(&mut self, family: &Family, known: Option<&Family>) -> Family {
        self.processed += 1;
        let start = self.strategy.solve_with_hint(family, known);
        self.improve(family, known, &start)
    }

    fn statistics(&self) -> String {
        format!(
            "problems processed: {}, improvements: {}",
            self.processed, self.improvements
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::costs::FrequencyCosts;
    use crate::family::IndexAggregation;
    use crate::greedy::GreedyCover;

    /// Returns the same answer for every problem.
    struct Preset(Family);

    impl CoverStrategy for Preset {
        fn solve_with_hint(&mut self, _family: &Family, _known: Option<&Family>) -> Family {
            self.0.clone()
        }

        fn statistics(&self) -> String {
            String::new()
        }
    }

    fn subset(members: &[usize], cost: f64) -> Subset {
        Subset::new(members.iter().copied(), cost).unwrap()
    }

    fn family(n: usize, subsets: &[(&[usize], f64)]) -> Family {
        let mut family = Family::new(n);
        for (members, cost) in subsets {
            family.insert(subset(members, *cost)).unwrap();
        }
        family
    }

    fn pick(family: &Family, members: &[&[usize]]) -> Family {
        let mut picked = family.empty_like();
        for m in members {
            let s = family.iter().find(|s| s.members() == *m).unwrap();
            picked.insert(s.clone()).unwrap();
        }
        picked
    }

    #[test]
    fn test_add_one_replaces_pair() {
        let input = family(4, &[(&[0, 1], 1.0), (&[2, 3], 1.0), (&[0, 1, 2, 3], 1.5)]);
        let start = pick(&input, &[&[0, 1], &[2, 3]]);
        let config = LocalSearchConfig::default().with_iter_remove(false);
        let mut solver = LocalSearchCover::new(Preset(start), config);
        let cover = solver.solve(&input);
        assert_eq!(cover.size(), 1);
        assert_eq!(cover.cost(), 1.5);
        assert_eq!(solver.improvements(), 1);
        assert_eq!(solver.statistics(), "problems processed: 1, improvements: 1");
    }

    #[test]
    fn test_iter_remove_recompletes() {
        // [2] and [3] cover one index alone each, the pair covers both for less
        let input = family(
            4,
            &[(&[0, 1], 1.0), (&[2], 1.0), (&[3], 1.0), (&[2, 3], 1.2)],
        );
        let start = pick(&input, &[&[0, 1], &[2], &[3]]);
        let config = LocalSearchConfig::default().with_add_one(false);
        let cover = LocalSearchCover::new(Preset(start), config).solve(&input);
        assert_eq!(cover.uncovered_count(), 0);
        assert_eq!(cover.size(), 2);
        assert!(cover.contains(&Subset::unit([2, 3])));
        assert!((cover.cost() - 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_start_cover_is_reduced() {
        let input = family(3, &[(&[0, 1], 1.0), (&[1, 2], 1.0), (&[2], 1.0)]);
        let start = input.clone();
        let cover = LocalSearchCover::new(Preset(start), LocalSearchConfig::default())
            .solve(&input);
        assert_eq!(cover.uncovered_count(), 0);
        assert!(cover.redundant_subsets().is_empty());
        assert_eq!(cover.cost(), 2.0);
    }

    #[test]
    fn test_no_improvement_keeps_cover() {
        let input = family(4, &[(&[0, 1], 1.0), (&[2, 3], 1.0), (&[0, 1, 2, 3], 3.0)]);
        let mut solver = LocalSearchCover::new(GreedyCover::default(), LocalSearchConfig::default());
        let cover = solver.solve(&input);
        assert_eq!(cover.cost(), 2.0);
        assert_eq!(solver.improvements(), 0);
    }

    #[test]
    fn test_reduce_exhaustive_beats_costliest_first() {
        let input = family(4, &[(&[0, 1, 2, 3], 1.5), (&[0, 1], 1.0), (&[2, 3], 1.0)]);
        let pool: Vec<Subset> = input.iter().cloned().collect();
        let pool: Vec<&Subset> = pool.iter().collect();

        let mut restored = input.clone();
        assert_eq!(min_cost_without(&mut restored, &pool, 8), 1.5);
        assert_eq!(restored.size(), 3);
        assert_eq!(restored.cost(), 3.5);

        let mut exhaustive = input.clone();
        reduce(&mut exhaustive, &pool, 8);
        assert_eq!(exhaustive.size(), 1);
        assert_eq!(exhaustive.cost(), 1.5);

        // past the limit the costliest removal goes first
        let mut greedy = input.clone();
        reduce(&mut greedy, &pool, 0);
        assert_eq!(greedy.size(), 2);
        assert_eq!(greedy.cost(), 2.0);
    }

    #[test]
    fn test_complete_skips_removed_on_first_pick() {
        let input = family(2, &[(&[0], 0.1), (&[0, 1], 1.0), (&[1], 0.1)]);
        let candidates: Vec<&Subset> = input.iter().collect();
        let removed = vec![subset(&[0], 0.1), subset(&[1], 0.1)];
        let mut partial = input.empty_like();
        complete(&mut partial, &candidates, &removed);
        assert_eq!(partial.uncovered_count(), 0);
        assert_eq!(partial.size(), 1);
        assert!(partial.contains(&Subset::unit([0, 1])));
    }

    #[test]
    fn test_cost_model_family_improves() {
        let model = Rc::new(FrequencyCosts::floating(&[1.0, 1.0]));
        let mut input = Family::with_cost_model(4, model, IndexAggregation::Sum);
        input
            .insert(subset(&[0, 1], 0.5).with_cost_indices([0]))
            .unwrap();
        input
            .insert(subset(&[2, 3], 0.5).with_cost_indices([0]))
            .unwrap();
        input
            .insert(subset(&[0, 1, 2, 3], 1.0).with_cost_indices([1]))
            .unwrap();
        let greedy = GreedyCover::default().solve(&input);
        let local = LocalSearchCover::new(GreedyCover::default(), LocalSearchConfig::default())
            .solve(&input);
        assert_eq!(local.uncovered_count(), 0);
        assert!(local.cost() <= greedy.cost());
    }

    #[test]
    fn test_hint_subsets_are_candidates() {
        let input = family(2, &[(&[0], 1.0), (&[1], 1.0)]);
        let hint = family(2, &[(&[0, 1], 1.5)]);
        let start = input.clone();
        let cover = LocalSearchCover::new(Preset(start), LocalSearchConfig::default())
            .solve_with_hint(&input, Some(&hint));
        assert_eq!(cover.size(), 1);
        assert_eq!(cover.cost(), 1.5);
    }

    #[test]
    #[should_panic(expected = "invalid LocalSearchConfig")]
    fn test_invalid_config_panics() {
        let config = LocalSearchConfig::default().with_max_rounds(0);
        LocalSearchCover::new(GreedyCover::default(), config);
    }
}
