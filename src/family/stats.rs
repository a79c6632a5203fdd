use std::fmt;

/// Cost-index part of [`FamilyStats`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostIndexStats {
    /// Size of the cost-index space.
    pub count: usize,
    /// Cost indices covered at least once.
    pub covered: usize,
    /// Model cost of the current covering.
    pub index_cost: f64,
    /// Sum of all cost-index coverage counts.
    pub total_frequency: usize,
}

/// Snapshot of a family's size, cost, and coverage figures.
///
/// Produced by [`Family::stats`](super::Family::stats). The `Display`
/// implementation renders one figure per line for logging.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FamilyStats {
    /// Size of the universe.
    pub universe_size: usize,
    /// Number of subsets.
    pub size: usize,
    /// Family cost including penalty and cost-index terms.
    pub cost: f64,
    /// Sum of the subset costs alone.
    pub plain_cost: f64,
    /// Size bound, `0` when unbounded.
    pub max_subsets: usize,
    /// Penalty per subset while the size bound is exceeded.
    pub max_subset_cost: f64,
    /// Subsets covering at least one index alone.
    pub necessary: usize,
    /// Indices covered by no subset.
    pub uncovered: usize,
    /// Indices covered exactly once.
    pub single_covered: usize,
    /// Indices covered more than once.
    pub multi_covered: usize,
    /// Mean coverage count per universe index.
    pub mean_frequency: f64,
    /// Mean number of members per subset.
    pub mean_subset_len: f64,
    /// Mean coverage count divided by the number of subsets.
    pub density: f64,
    /// Cost-index figures, when the family has a cost model.
    pub cost_indices: Option<CostIndexStats>,
}

impl fmt::Display for FamilyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "universe size:        {}", self.universe_size)?;
        writeln!(f, "subsets:              {}", self.size)?;
        writeln!(f, "necessary subsets:    {}", self.necessary)?;
        writeln!(f, "cost:                 {}", self.cost)?;
        writeln!(f, "plain cost:           {}", self.plain_cost)?;
        if self.max_subsets > 0 {
            writeln!(
                f,
                "size bound:           {} (penalty {})",
                self.max_subsets, self.max_subset_cost
            )?;
        }
        writeln!(f, "uncovered indices:    {}", self.uncovered)?;
        writeln!(f, "single covered:       {}", self.single_covered)?;
        writeln!(f, "multi covered:        {}", self.multi_covered)?;
        writeln!(f, "mean frequency:       {:.4}", self.mean_frequency)?;
        writeln!(f, "mean subset length:   {:.4}", self.mean_subset_len)?;
        write!(f, "density:              {:.4}", self.density)?;
        if let Some(ci) = &self.cost_indices {
            writeln!(f)?;
            writeln!(f, "cost indices:         {}", ci.count)?;
            writeln!(f, "covered cost indices: {}", ci.covered)?;
            writeln!(f, "cost index frequency: {}", ci.total_frequency)?;
            write!(f, "index cost:           {}", ci.index_cost)?;
        }
        Ok(())
    }
}
