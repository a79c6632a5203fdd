//! Greedy heuristic configuration.

/// Configuration for [`GreedyCover`](super::GreedyCover).
///
/// # Examples
///
/// ```
/// use u_setcover::greedy::GreedyConfig;
///
/// let config = GreedyConfig::default()
///     .with_noise(0.1)
///     .with_remove_redundant(false)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreedyConfig {
    /// Relative noise on the cost ratio of each candidate.
    ///
    /// Every ratio is multiplied by `1 + noise * u` with `u` uniform in
    /// `[0, 1)`. `0.0` makes the heuristic deterministic.
    pub noise: f64,

    /// Drop subsets that became redundant once the covering is complete,
    /// most expensive removal first.
    pub remove_redundant: bool,

    /// Random seed for the noise. `None` uses a fixed default.
    pub seed: Option<u64>,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            noise: 0.0,
            remove_redundant: true,
            seed: None,
        }
    }
}

impl GreedyConfig {
    /// Sets the relative noise.
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Enables or disables redundancy removal.
    pub fn with_remove_redundant(mut self, remove_redundant: bool) -> Self {
        self.remove_redundant = remove_redundant;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err("noise must be finite and non-negative".into());
        }
        Ok(())
    }
}

/// Configuration for [`IteratedGreedyCover`](super::IteratedGreedyCover).
///
/// The first pass always runs without noise, so the result is never worse
/// than a single deterministic greedy pass.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IteratedGreedyConfig {
    /// Number of greedy passes per problem.
    pub iterations: usize,

    /// Relative noise of the passes after the first.
    pub noise: f64,

    /// Drop redundant subsets after each pass.
    pub remove_redundant: bool,

    /// Random seed. `None` uses a fixed default.
    pub seed: Option<u64>,
}

impl Default for IteratedGreedyConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            noise: 0.2,
            remove_redundant: true,
            seed: None,
        }
    }
}

impl IteratedGreedyConfig {
    /// Sets the number of passes.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the relative noise of the randomized passes.
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Enables or disables redundancy removal.
    pub fn with_remove_redundant(mut self, remove_redundant: bool) -> Self {
        self.remove_redundant = remove_redundant;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.iterations == 0 {
            return Err("iterations must be at least 1".into());
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err("noise must be finite and non-negative".into());
        }
        Ok(())
    }
}
