//! Point and customer types.

use serde::{Deserialize, Serialize};

/// A location in the plane.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::Point;
///
/// let p = Point::new(3.0, 4.0);
/// assert!((p.distance_to(Point::new(0.0, 0.0)) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A customer (or the depot) of a routing instance.
///
/// Index 0 is the depot. Its demand is carried along but never counted
/// against vehicle capacity.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::Customer;
///
/// let depot = Customer::depot(35.0, 35.0);
/// assert_eq!(depot.index(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Customer::new(1, 41.0, 49.0, 10);
/// assert_eq!(c.index(), 1);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    index: usize,
    demand: u32,
    location: Point,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(index: usize, x: f64, y: f64, demand: u32) -> Self {
        Self {
            index,
            demand,
            location: Point::new(x, y),
        }
    }

    /// Creates a depot at the given coordinates (index 0, demand 0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, 0)
    }

    /// Customer index (0 = depot).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Units delivered to this customer.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Location of this customer.
    pub fn location(&self) -> Point {
        self.location
    }

    pub fn x(&self) -> f64 {
        self.location.x
    }

    pub fn y(&self) -> f64 {
        self.location.y
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.index == super::DEPOT
    }

    pub(crate) fn reindexed(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}
