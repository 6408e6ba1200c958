//! # cvrp-search
//!
//! Heuristic solver for the capacitated vehicle routing problem: a fixed
//! fleet of identical vehicles leaves a single depot, serves every customer
//! exactly once within its capacity, and returns. Total Euclidean travel
//! distance is minimized.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Instance, Tour, Solution)
//! - [`distance`] — Euclidean distances with cached depot distances
//! - [`evaluation`] — Tour length evaluation, move deltas and solution validation
//! - [`constructive`] — Capacity-aware sequential insertion
//! - [`local_search`] — Pairwise customer exchange until convergence
//! - [`io`] — Plain-text instance and solution formats
//! - [`solver`] — End-to-end pipeline and run report
//! - [`generator`] — Seeded random instances

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod io;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::RoutingError;
