//! Domain model types for capacitated vehicle routing.
//!
//! Provides the core abstractions: customers with demands and locations, an
//! immutable instance with a homogeneous fleet, vehicle tours, and a solution
//! that tracks where every customer sits.

mod customer;
mod instance;
mod solution;
mod tour;

pub use customer::{Customer, Point};
pub use instance::Instance;
pub use solution::{Slot, Solution};
pub use tour::Tour;

/// Index of the depot in every instance.
pub const DEPOT: usize = 0;
