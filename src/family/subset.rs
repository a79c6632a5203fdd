//! Universe-indexed subsets.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{CoverError, Result};

/// A candidate subset of the universe.
///
/// Members and cost indices are stored sorted and deduplicated. A subset is
/// immutable once built; augmenting it (see [`Subset::augmented`]) yields a
/// new value.
///
/// Equality and hashing consider the members only. Two subsets with the same
/// members but different costs are duplicates as far as a
/// [`Family`](super::Family) is concerned.
///
/// # Examples
///
/// ```
/// use u_setcover::family::Subset;
///
/// let s = Subset::new([3, 1, 2, 1], 2.5).unwrap();
/// assert_eq!(s.members(), &[1, 2, 3]);
/// assert_eq!(s.cost(), 2.5);
/// assert_eq!(s, Subset::unit([1, 2, 3]));
/// ```
#[derive(Debug, Clone)]
pub struct Subset {
    members: Vec<usize>,
    cost: f64,
    cost_indices: Vec<usize>,
}

fn normalized<I: IntoIterator<Item = usize>>(indices: I) -> Vec<usize> {
    let mut v: Vec<usize> = indices.into_iter().collect();
    v.sort_unstable();
    v.dedup();
    v
}

impl Subset {
    /// Creates a subset with the given members and cost.
    ///
    /// Fails when the cost is negative or not finite. Member ranges are
    /// checked when the subset is inserted into a family.
    pub fn new<I: IntoIterator<Item = usize>>(members: I, cost: f64) -> Result<Self> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(CoverError::InvalidCost(cost));
        }
        Ok(Self {
            members: normalized(members),
            cost,
            cost_indices: Vec::new(),
        })
    }

    /// Creates a subset with unit cost.
    pub fn unit<I: IntoIterator<Item = usize>>(members: I) -> Self {
        Self {
            members: normalized(members),
            cost: 1.0,
            cost_indices: Vec::new(),
        }
    }

    /// Attaches secondary cost indices, replacing any present.
    pub fn with_cost_indices<I: IntoIterator<Item = usize>>(mut self, cost_indices: I) -> Self {
        self.cost_indices = normalized(cost_indices);
        self
    }

    /// Sorted universe indices covered by this subset.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// The scalar cost of including this subset.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Sorted cost indices, empty when the subset has none.
    pub fn cost_indices(&self) -> &[usize] {
        &self.cost_indices
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the subset covers nothing.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if `index` is a member.
    pub fn contains(&self, index: usize) -> bool {
        self.members.binary_search(&index).is_ok()
    }

    /// Largest member, if any.
    pub fn max_member(&self) -> Option<usize> {
        self.members.last().copied()
    }

    /// Largest cost index, if any.
    pub fn max_cost_index(&self) -> Option<usize> {
        self.cost_indices.last().copied()
    }

    /// Returns a copy whose members additionally include `extra`.
    ///
    /// Cost and cost indices are carried over unchanged.
    pub fn augmented(&self, extra: &[usize]) -> Self {
        let mut members = Vec::with_capacity(self.members.len() + extra.len());
        members.extend_from_slice(&self.members);
        members.extend_from_slice(extra);
        Self {
            members: normalized(members),
            cost: self.cost,
            cost_indices: self.cost_indices.clone(),
        }
    }

    /// Returns `true` if the two subsets share no member.
    pub fn is_disjoint(&self, other: &Subset) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.members.len() && j < other.members.len() {
            match self.members[i].cmp(&other.members[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return false,
            }
        }
        true
    }
}

impl PartialEq for Subset {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for Subset {}

impl Hash for Subset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.members.hash(state);
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.members, self.cost)
    }
}
