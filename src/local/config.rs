//! Local search configuration.

/// Configuration for [`LocalSearchCover`](super::LocalSearchCover).
///
/// # Examples
///
/// ```
/// use u_setcover::local::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default()
///     .with_max_rounds(10)
///     .with_add_one(false);
/// assert_eq!(config.max_rounds, 10);
/// assert!(config.iter_remove);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Maximum number of improvement rounds per problem.
    pub max_rounds: usize,

    /// Apply the remove-and-complete move.
    pub iter_remove: bool,

    /// Apply the add-one-and-reduce move.
    pub add_one: bool,

    /// Subsets covering at most this many indices alone are candidates for
    /// removal by the remove-and-complete move.
    pub max_alone: usize,

    /// Up to this many redundant subsets, every combination of removals is
    /// tried. Above it, the subset with the largest removal cost goes first.
    pub exhaustive_limit: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_rounds: 50,
            iter_remove: true,
            add_one: true,
            max_alone: 2,
            exhaustive_limit: 8,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the maximum number of rounds.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Enables or disables the remove-and-complete move.
    pub fn with_iter_remove(mut self, iter_remove: bool) -> Self {
        self.iter_remove = iter_remove;
        self
    }

    /// Enables or disables the add-one-and-reduce move.
    pub fn with_add_one(mut self, add_one: bool) -> Self {
        self.add_one = add_one;
        self
    }

    /// Sets the removal threshold of the remove-and-complete move.
    pub fn with_max_alone(mut self, max_alone: usize) -> Self {
        self.max_alone = max_alone;
        self
    }

    /// Sets the number of redundant subsets up to which every removal
    /// combination is tried.
    pub fn with_exhaustive_limit(mut self, exhaustive_limit: usize) -> Self {
        self.exhaustive_limit = exhaustive_limit;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rounds == 0 {
            return Err("max_rounds must be at least 1".into());
        }
        if !self.iter_remove && !self.add_one {
            return Err("at least one move must be enabled".into());
        }
        if self.max_alone == 0 {
            return Err("max_alone must be at least 1".into());
        }
        if self.exhaustive_limit > 16 {
            return Err("exhaustive_limit must be at most 16".into());
        }
        Ok(())
    }
}
