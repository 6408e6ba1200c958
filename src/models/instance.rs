//! Immutable CVRP instance.

use serde::Serialize;

use super::{Customer, DEPOT};
use crate::error::RoutingError;

/// A capacitated vehicle routing instance: customers (index 0 = depot) and a
/// homogeneous fleet.
///
/// Instances are built once, either by parsing text
/// ([`parse_instance`](crate::io::parse_instance)) or through [`Instance::new`],
/// and are shared read-only afterwards.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::{Customer, Instance};
///
/// let instance = Instance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 3.0, 4.0, 10),
///         Customer::new(2, 6.0, 8.0, 20),
///     ],
///     2,
///     25,
/// )
/// .unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.total_demand(), 30);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    customers: Vec<Customer>,
    vehicle_count: usize,
    vehicle_capacity: u32,
}

impl Instance {
    /// Creates an instance. Customers are re-indexed by position, so the
    /// first element becomes the depot.
    ///
    /// Fails with [`RoutingError::MalformedInput`] when there is no depot or
    /// a coordinate is not finite.
    pub fn new(
        customers: Vec<Customer>,
        vehicle_count: usize,
        vehicle_capacity: u32,
    ) -> Result<Self, RoutingError> {
        if customers.is_empty() {
            return Err(RoutingError::malformed(0, "instance has no depot"));
        }
        if let Some(bad) = customers
            .iter()
            .position(|c| !c.x().is_finite() || !c.y().is_finite())
        {
            return Err(RoutingError::malformed(
                0,
                format!("customer {bad} has non-finite coordinates"),
            ));
        }

        let customers = customers
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.reindexed(i))
            .collect();

        Ok(Self {
            customers,
            vehicle_count,
            vehicle_capacity,
        })
    }

    /// All locations, depot first.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// The customer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn customer(&self, index: usize) -> &Customer {
        &self.customers[index]
    }

    /// Demand of the customer at `index`.
    pub fn demand(&self, index: usize) -> u32 {
        self.customers[index].demand()
    }

    pub fn depot(&self) -> &Customer {
        &self.customers[DEPOT]
    }

    /// Number of locations including the depot, as declared in the input.
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Number of customers excluding the depot.
    pub fn num_customers(&self) -> usize {
        self.customers.len() - 1
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    pub fn vehicle_capacity(&self) -> u32 {
        self.vehicle_capacity
    }

    /// Summed demand of all non-depot customers.
    pub fn total_demand(&self) -> u64 {
        self.customers[1..].iter().map(|c| u64::from(c.demand())).sum()
    }

    /// Largest single non-depot demand (0 if there are no customers).
    pub fn max_demand(&self) -> u32 {
        self.customers[1..]
            .iter()
            .map(Customer::demand)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reindexes() {
        let instance = Instance::new(
            vec![
                Customer::new(9, 0.0, 0.0, 5),
                Customer::new(4, 1.0, 0.0, 3),
            ],
            1,
            10,
        )
        .expect("valid");
        assert_eq!(instance.depot().index(), 0);
        assert_eq!(instance.customer(1).index(), 1);
        assert_eq!(instance.customer_count(), 2);
        assert_eq!(instance.num_customers(), 1);
    }

    #[test]
    fn test_depot_demand_excluded() {
        let instance = Instance::new(
            vec![
                Customer::new(0, 0.0, 0.0, 100),
                Customer::new(1, 1.0, 0.0, 3),
                Customer::new(2, 2.0, 0.0, 4),
            ],
            1,
            10,
        )
        .expect("valid");
        assert_eq!(instance.total_demand(), 7);
        assert_eq!(instance.max_demand(), 4);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            Instance::new(vec![], 1, 10),
            Err(RoutingError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = Instance::new(
            vec![Customer::depot(0.0, 0.0), Customer::new(1, f64::NAN, 0.0, 1)],
            1,
            10,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_depot_only() {
        let instance = Instance::new(vec![Customer::depot(1.0, 1.0)], 3, 10).expect("valid");
        assert_eq!(instance.num_customers(), 0);
        assert_eq!(instance.max_demand(), 0);
        assert_eq!(instance.total_demand(), 0);
    }
}
