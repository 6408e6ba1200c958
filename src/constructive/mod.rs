//! Constructive heuristics for building initial CVRP solutions.
//!
//! - [`capacity_insertion`] — Demand/distance-ordered cheapest insertion under
//!   vehicle capacity, O(n²)

mod config;
mod insertion;
mod unassigned;

pub use config::ConstructionConfig;
pub use insertion::capacity_insertion;

pub(crate) use unassigned::UnassignedSet;
