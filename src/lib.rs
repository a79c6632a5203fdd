//! Weighted set-cover optimization framework.
//!
//! Given a universe of indices `[0, n)` and a family of candidate subsets,
//! each with a scalar cost and optionally a set of secondary cost indices,
//! find a sub-family covering the universe (or as much of it as possible)
//! at low cost.
//!
//! - **Family**: subsets and families with incremental coverage counts and
//!   marginal add/remove costs.
//! - **Costs**: cost-index models pricing how often secondary indices are
//!   covered, with exact fixed-point or floating summation.
//! - **Greedy**: cost-effectiveness greedy and its iterated randomized
//!   variant.
//! - **Local**: local search improving the covers of any strategy.
//! - **Transform**: wrappers turning size-bounded, partial, and decision
//!   variants into plain calls of any [`CoverStrategy`].
//!
//! # Example
//!
//! ```
//! use u_setcover::family::{Family, Subset};
//! use u_setcover::greedy::GreedyCover;
//! use u_setcover::transform::PartialCoverageAdapter;
//! use u_setcover::CoverStrategy;
//!
//! let mut family = Family::new(8);
//! for members in [&[0, 1, 2][..], &[3, 4], &[5, 6, 7], &[0], &[1, 2, 3], &[4, 5, 6], &[7]] {
//!     family.insert(Subset::unit(members.iter().copied()))?;
//! }
//!
//! let mut solver = PartialCoverageAdapter::new(GreedyCover::default());
//! let cover = solver.solve(&family);
//! assert_eq!(cover.uncovered_count(), 0);
//! assert_eq!(cover.size(), 3);
//! # Ok::<(), u_setcover::CoverError>(())
//! ```
//!
//! # Threading
//!
//! Families share their cost model through `Rc` and the frequency model
//! caches powers in a `RefCell`, so neither is `Send`. Run independent
//! problems on independent threads with their own families.

pub mod costs;
pub mod error;
pub mod family;
pub mod greedy;
pub mod local;
pub mod strategy;
pub mod transform;

pub use error::{CoverError, Result};
pub use strategy::{CoverDecision, CoverStrategy};
