//! Greedy set cover execution.
//!
//! # Algorithm
//!
//! 1. Candidates are the family's subsets followed by those hint subsets
//!    the family lacks
//! 2. While an index is uncovered, add the candidate with the lowest
//!    `add_cost / newly_covered` (earliest candidate on ties), the ratio
//!    optionally perturbed by noise
//! 3. Stop once no candidate covers anything new
//! 4. Optionally remove redundant subsets, largest removal cost first
//!
//! # Reference
//!
//! Chvátal, V. (1979). "A Greedy Heuristic for the Set-Covering Problem",
//! *Mathematics of Operations Research* 4(3), 233-235.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::config::{GreedyConfig, IteratedGreedyConfig};
use crate::family::{Family, Subset};
use crate::strategy::CoverStrategy;

const DEFAULT_SEED: u64 = 42;

/// Family subsets followed by the hint subsets not already present.
pub(crate) fn candidates<'a>(family: &'a Family, known: Option<&'a Family>) -> Vec<&'a Subset> {
    let mut candidates: Vec<&Subset> = family.iter().collect();
    if let Some(known) = known {
        assert_eq!(
            known.universe_size(),
            family.universe_size(),
            "known solution universe differs from the family's"
        );
        candidates.extend(known.iter().filter(|s| !family.contains(s)));
    }
    candidates
}

/// Re-homes `known` into an empty copy of `family`, so it is priced with the
/// family's bound and cost model.
pub(crate) fn rehomed(family: &Family, known: &Family) -> Family {
    let mut result = family.empty_like();
    for subset in known {
        result.insert_unchecked(subset.clone());
    }
    result
}

fn greedy_pass<R: Rng>(
    family: &Family,
    candidates: &[&Subset],
    noise: f64,
    remove_redundant: bool,
    rng: &mut R,
) -> Family {
    let mut result = family.empty_like();

    while result.uncovered_count() > 0 {
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            if result.contains(candidate) {
                continue;
            }
            let newly = result.newly_covered_count(candidate);
            if newly == 0 {
                continue;
            }
            let mut ratio = result.add_cost(candidate) / newly as f64;
            if noise > 0.0 {
                ratio *= 1.0 + noise * rng.random::<f64>();
            }
            if best.map_or(true, |(_, r)| ratio < r) {
                best = Some((i, ratio));
            }
        }
        let Some((i, ratio)) = best else {
            break;
        };
        trace!(subset = %candidates[i], ratio, "greedy pick");
        result.insert_unchecked(candidates[i].clone());
    }

    if remove_redundant {
        remove_redundant_subsets(&mut result);
    }
    result
}

/// Removes redundant subsets one at a time, the one with the largest
/// removal cost first, until every subset is necessary.
pub(crate) fn remove_redundant_subsets(family: &mut Family) {
    loop {
        let mut victim: Option<(&Subset, f64)> = None;
        for subset in family.redundant_subsets() {
            let cost = family.remove_cost(subset);
            if victim.map_or(true, |(_, c)| cost > c) {
                victim = Some((subset, cost));
            }
        }
        let Some(victim) = victim.map(|(s, _)| s.clone()) else {
            break;
        };
        trace!(subset = %victim, "removing redundant subset");
        family.remove(&victim);
    }
}

/// Ordering key of a candidate solution: fewer uncovered indices, then lower
/// cost, then fewer subsets.
fn quality(family: &Family) -> (usize, f64, usize) {
    (family.uncovered_count(), family.cost(), family.size())
}

/// Cost-effectiveness greedy heuristic.
///
/// # Examples
///
/// ```
/// use u_setcover::family::{Family, Subset};
/// use u_setcover::greedy::{GreedyConfig, GreedyCover};
/// use u_setcover::strategy::CoverStrategy;
///
/// let mut family = Family::new(4);
/// family.insert(Subset::new([0, 1, 2, 3], 3.0)?)?;
/// family.insert(Subset::new([0, 1], 1.0)?)?;
/// family.insert(Subset::new([2, 3], 1.0)?)?;
///
/// let mut greedy = GreedyCover::new(GreedyConfig::default());
/// let cover = greedy.solve(&family);
/// assert_eq!(cover.uncovered_count(), 0);
/// assert_eq!(cover.cost(), 2.0);
/// # Ok::<(), u_setcover::CoverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GreedyCover {
    config: GreedyConfig,
    rng: StdRng,
    processed: usize,
}

impl GreedyCover {
    /// Creates the heuristic.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn new(config: GreedyConfig) -> Self {
        config.validate().expect("invalid GreedyConfig");
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        Self {
            config,
            rng,
            processed: 0,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &GreedyConfig {
        &self.config
    }

    /// Number of problems solved so far.
    pub fn processed(&self) -> usize {
        self.processed
    }
}

impl Default for GreedyCover {
    fn default() -> Self {
        Self::new(GreedyConfig::default())
    }
}

impl CoverStrategy for GreedyCover {
    fn solve_with_hint(&mut self, family: &Family, known: Option<&Family>) -> Family {
        self.processed += 1;
        let candidates = candidates(family, known);
        let result = greedy_pass(
            family,
            &candidates,
            self.config.noise,
            self.config.remove_redundant,
            &mut self.rng,
        );
        debug!(
            candidates = candidates.len(),
            subsets = result.size(),
            uncovered = result.uncovered_count(),
            cost = result.cost(),
            "greedy cover finished"
        );
        result
    }

    fn statistics(&self) -> String {
        format!("problems processed: {}", self.processed)
    }
}

/// Repeated randomized greedy keeping the best pass.
///
/// # Examples
///
/// ```
/// use u_setcover::family::{Family, Subset};
/// use u_setcover::greedy::{IteratedGreedyConfig, IteratedGreedyCover};
/// use u_setcover::strategy::CoverStrategy;
///
/// let mut family = Family::new(3);
/// family.insert(Subset::unit([0, 1]))?;
/// family.insert(Subset::unit([1, 2]))?;
/// family.insert(Subset::unit([2]))?;
///
/// let config = IteratedGreedyConfig::default().with_iterations(5).with_seed(3);
/// let mut solver = IteratedGreedyCover::new(config);
/// let cover = solver.solve(&family);
/// assert_eq!(cover.uncovered_count(), 0);
/// assert_eq!(cover.size(), 2);
/// # Ok::<(), u_setcover::CoverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IteratedGreedyCover {
    config: IteratedGreedyConfig,
    rng: StdRng,
    processed: usize,
    passes: usize,
}

impl IteratedGreedyCover {
    /// Creates the heuristic.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn new(config: IteratedGreedyConfig) -> Self {
        config.validate().expect("invalid IteratedGreedyConfig");
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        Self {
            config,
            rng,
            processed: 0,
            passes: 0,
        }
    }

    /// Number of problems solved so far.
    pub fn processed(&self) -> usize {
        self.processed
    }
}

impl CoverStrategy for IteratedGreedyCover {
    fn solve_with_hint(&mut self, family: &Family, known: Option<&Family>) -> Family {
        self.processed += 1;
        let candidates = candidates(family, known);

        let mut best = known
            .filter(|k| k.uncovered_count() == 0)
            .map(|k| rehomed(family, k));
        let mut best_pass = None;

        for pass in 0..self.config.iterations {
            let noise = if pass == 0 { 0.0 } else { self.config.noise };
            let result = greedy_pass(
                family,
                &candidates,
                noise,
                self.config.remove_redundant,
                &mut self.rng,
            );
            self.passes += 1;
            if best.as_ref().map_or(true, |b| quality(&result) < quality(b)) {
                best = Some(result);
                best_pass = Some(pass);
            }
        }

        let best = best.unwrap_or_else(|| family.empty_like());
        debug!(
            passes = self.config.iterations,
            best_pass = ?best_pass,
            subsets = best.size(),
            uncovered = best.uncovered_count(),
            cost = best.cost(),
            "iterated greedy finished"
        );
        best
    }

    fn statistics(&self) -> String {
        format!(
            "problems processed: {}, greedy passes: {}",
            self.processed, self.passes
        )
    }
}
