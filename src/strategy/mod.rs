//! Strategy traits.
//!
//! [`CoverStrategy`] is the plug-in point for set cover heuristics; the
//! wrappers in [`transform`](crate::transform) are generic over it and
//! accept borrowed (`&mut S`) or boxed strategies alike.
//! [`CoverDecision`] is the yes/no variant with a cost limit.

mod types;

pub use types::{CoverDecision, CoverStrategy};
