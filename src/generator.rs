//! Seeded random instance generation.
//!
//! Customers are scattered uniformly over a square centered on the depot,
//! with demands drawn uniformly from `1..=max_demand`. The largest demand
//! never exceeds the vehicle capacity, and unless a fleet size is given the
//! fleet is sized so that total capacity covers total demand with one spare
//! vehicle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::RoutingError;
use crate::models::{Customer, Instance};

/// Builder for random instances.
///
/// # Examples
///
/// ```
/// use cvrp_search::generator::InstanceGenerator;
///
/// let instance = InstanceGenerator::new(20).with_seed(7).generate().unwrap();
/// assert_eq!(instance.num_customers(), 20);
/// assert!(instance.max_demand() <= instance.vehicle_capacity());
///
/// let again = InstanceGenerator::new(20).with_seed(7).generate().unwrap();
/// assert_eq!(instance.customer(5).location(), again.customer(5).location());
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    customers: usize,
    capacity: u32,
    max_demand: u32,
    vehicles: Option<usize>,
    extent: f64,
    seed: u64,
}

impl InstanceGenerator {
    /// Generator for `customers` customers (depot excluded).
    pub fn new(customers: usize) -> Self {
        Self {
            customers,
            capacity: 100,
            max_demand: 30,
            vehicles: None,
            extent: 100.0,
            seed: 42,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Upper bound on customer demand, clamped to the capacity.
    pub fn with_max_demand(mut self, max_demand: u32) -> Self {
        self.max_demand = max_demand;
        self
    }

    pub fn with_vehicles(mut self, vehicles: usize) -> Self {
        self.vehicles = Some(vehicles);
        self
    }

    /// Half-width of the square the customers are drawn from.
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draws an instance. The same settings always give the same instance.
    pub fn generate(&self) -> Result<Instance, RoutingError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let max_demand = self.max_demand.clamp(1, self.capacity.max(1));
        let extent = self.extent.abs();

        let mut customers = Vec::with_capacity(self.customers + 1);
        customers.push(Customer::depot(0.0, 0.0));
        for index in 1..=self.customers {
            let (x, y) = if extent > 0.0 {
                (
                    rng.random_range(-extent..=extent),
                    rng.random_range(-extent..=extent),
                )
            } else {
                (0.0, 0.0)
            };
            let demand = rng.random_range(1..=max_demand);
            customers.push(Customer::new(index, x, y, demand));
        }

        let vehicles = self.vehicles.unwrap_or_else(|| {
            let total: u64 = customers.iter().map(|c| u64::from(c.demand())).sum();
            let capacity = u64::from(self.capacity.max(1));
            total.div_ceil(capacity) as usize + 1
        });

        Instance::new(customers, vehicles, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, SolverConfig};

    #[test]
    fn test_deterministic() {
        let a = InstanceGenerator::new(30).with_seed(3).generate().expect("valid");
        let b = InstanceGenerator::new(30).with_seed(3).generate().expect("valid");
        for i in 0..a.customer_count() {
            assert_eq!(a.customer(i).location(), b.customer(i).location());
            assert_eq!(a.demand(i), b.demand(i));
        }
        assert_eq!(a.vehicle_count(), b.vehicle_count());
    }

    #[test]
    fn test_bounds() {
        let inst = InstanceGenerator::new(50)
            .with_capacity(40)
            .with_max_demand(100)
            .with_extent(10.0)
            .generate()
            .expect("valid");
        assert!(inst.max_demand() <= 40);
        for c in &inst.customers()[1..] {
            assert!(c.demand() >= 1);
            assert!(c.x().abs() <= 10.0 && c.y().abs() <= 10.0);
        }
        assert!(inst.vehicle_count() as u64 * 40 >= inst.total_demand());
    }

    #[test]
    fn test_fixed_fleet() {
        let inst = InstanceGenerator::new(5).with_vehicles(9).generate().expect("valid");
        assert_eq!(inst.vehicle_count(), 9);
    }

    #[test]
    fn test_generated_instances_solve() {
        for seed in 0..5 {
            let inst = InstanceGenerator::new(25)
                .with_capacity(50)
                .with_max_demand(10)
                .with_seed(seed)
                .generate()
                .expect("valid");
            let report = solve(&inst, &SolverConfig::default()).expect("feasible");
            assert!(report.feasible);
        }
    }
}
