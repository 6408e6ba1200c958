//! Euclidean distance oracle.

use crate::models::{Customer, Instance, Point, DEPOT};

/// Euclidean distance between two points.
///
/// Pure and symmetric; satisfies the triangle inequality.
///
/// # Examples
///
/// ```
/// use cvrp_search::distance::distance;
/// use cvrp_search::models::Point;
///
/// let d = distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
/// assert!((d - 5.0).abs() < 1e-10);
/// ```
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

/// Distances between customers of one instance.
///
/// Customer-to-customer legs are computed on demand from coordinates, which
/// keeps memory linear in the number of customers. Depot legs are computed
/// once at creation and served from a table; they dominate the construction
/// heuristic's scoring and every tour's first and last leg.
///
/// The oracle is read-only after creation and can be shared across threads.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::{Customer, Instance};
/// use cvrp_search::distance::DistanceOracle;
///
/// let instance = Instance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 3.0, 4.0, 10),
///         Customer::new(2, 6.0, 8.0, 20),
///     ],
///     1,
///     100,
/// )
/// .unwrap();
/// let oracle = DistanceOracle::new(&instance);
/// assert!((oracle.from_depot(1) - 5.0).abs() < 1e-10);
/// assert!((oracle.between(1, 2) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceOracle<'a> {
    customers: &'a [Customer],
    from_depot: Vec<f64>,
}

impl<'a> DistanceOracle<'a> {
    /// Creates an oracle for `instance`, precomputing depot distances.
    pub fn new(instance: &'a Instance) -> Self {
        let customers = instance.customers();
        let depot = customers[DEPOT].location();
        let from_depot = customers
            .iter()
            .map(|c| distance(depot, c.location()))
            .collect();
        Self {
            customers,
            from_depot,
        }
    }

    /// Distance between customers `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn between(&self, from: usize, to: usize) -> f64 {
        if from == DEPOT {
            self.from_depot[to]
        } else if to == DEPOT {
            self.from_depot[from]
        } else {
            distance(self.customers[from].location(), self.customers[to].location())
        }
    }

    /// Memoized distance from the depot to `customer`.
    pub fn from_depot(&self, customer: usize) -> f64 {
        self.from_depot[customer]
    }

    /// All depot distances, indexed by customer.
    pub fn distances_from_depot(&self) -> &[f64] {
        &self.from_depot
    }

    /// Number of locations covered (depot included).
    pub fn size(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if `between` is symmetric within `tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size()).all(|i| {
            ((i + 1)..self.size()).all(|j| (self.between(i, j) - self.between(j, i)).abs() <= tol)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_instance() -> Instance {
        Instance::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 3.0, 4.0, 10),
                Customer::new(2, 0.0, 8.0, 20),
            ],
            1,
            100,
        )
        .expect("valid")
    }

    #[test]
    fn test_depot_distances() {
        let inst = sample_instance();
        let oracle = DistanceOracle::new(&inst);
        assert_eq!(oracle.size(), 3);
        assert!((oracle.from_depot(1) - 5.0).abs() < 1e-10);
        assert!((oracle.from_depot(2) - 8.0).abs() < 1e-10);
        assert!(oracle.from_depot(0).abs() < 1e-10);
        assert_eq!(oracle.distances_from_depot().len(), 3);
    }

    #[test]
    fn test_between_uses_depot_table() {
        let inst = sample_instance();
        let oracle = DistanceOracle::new(&inst);
        assert_eq!(oracle.between(0, 2), oracle.from_depot(2));
        assert_eq!(oracle.between(2, 0), oracle.from_depot(2));
        assert!((oracle.between(1, 2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let inst = sample_instance();
        assert!(DistanceOracle::new(&inst).is_symmetric(1e-10));
    }

    #[test]
    fn test_triangle_inequality() {
        let inst = sample_instance();
        let oracle = DistanceOracle::new(&inst);
        for a in 0..3 {
            for b in 0..3 {
                for c in 0..3 {
                    assert!(
                        oracle.between(a, c) <= oracle.between(a, b) + oracle.between(b, c) + 1e-10
                    );
                }
            }
        }
    }
}
