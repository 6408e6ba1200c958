//! Distance computation.
//!
//! Provides the Euclidean distance function and a per-instance oracle with
//! memoized depot distances.

mod oracle;

pub use oracle::{distance, DistanceOracle};
