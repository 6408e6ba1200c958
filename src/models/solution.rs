//! Solution type with an incrementally maintained position index.

use serde::Serialize;

use super::{Instance, Tour, DEPOT};
use crate::error::RoutingError;

/// Where a customer currently sits: vehicle (tour) index and position within
/// that tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub vehicle: usize,
    pub position: usize,
}

/// One tour per vehicle plus a `customer → slot` index.
///
/// The index is updated on every insertion and exchange, so locating a
/// customer is O(1). A solution may be partial while it is being constructed;
/// [`SolutionValidator`](crate::evaluation::SolutionValidator) decides whether
/// it is complete and capacity feasible.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::{Customer, Instance, Slot, Solution};
///
/// let instance = Instance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 1.0, 0.0, 4),
///         Customer::new(2, 2.0, 0.0, 3),
///     ],
///     2,
///     10,
/// )
/// .unwrap();
/// let solution = Solution::from_routes(&instance, &[vec![2, 1]]).unwrap();
/// assert_eq!(solution.num_vehicles(), 2);
/// assert_eq!(solution.slot(1), Some(Slot { vehicle: 0, position: 1 }));
/// assert!(solution.tour(1).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    tours: Vec<Tour>,
    #[serde(skip)]
    slots: Vec<Option<Slot>>,
}

impl Solution {
    /// Creates a solution with `vehicle_count` empty tours for an instance of
    /// `customer_count` locations (depot included).
    pub fn empty(vehicle_count: usize, customer_count: usize) -> Self {
        Self {
            tours: vec![Tour::new(); vehicle_count],
            slots: vec![None; customer_count],
        }
    }

    /// Builds a solution from explicit customer sequences, one per vehicle.
    ///
    /// Missing trailing routes are treated as empty vehicles. Customers may
    /// be left out (the result is then partial), but each may appear only once
    /// and the depot may not appear at all. Capacity is not checked here.
    pub fn from_routes(instance: &Instance, routes: &[Vec<usize>]) -> Result<Self, RoutingError> {
        if routes.len() > instance.vehicle_count() {
            return Err(RoutingError::malformed(
                0,
                format!(
                    "{} routes given for {} vehicles",
                    routes.len(),
                    instance.vehicle_count()
                ),
            ));
        }

        let mut solution = Self::empty(instance.vehicle_count(), instance.customer_count());
        for (vehicle, route) in routes.iter().enumerate() {
            for &customer in route {
                if customer == DEPOT {
                    return Err(RoutingError::InvalidAssignment {
                        customer,
                        reason: format!("depot listed inside tour of vehicle {vehicle}"),
                    });
                }
                if customer >= instance.customer_count() {
                    return Err(RoutingError::InvalidAssignment {
                        customer,
                        reason: "unknown customer".to_string(),
                    });
                }
                if let Some(slot) = solution.slot(customer) {
                    return Err(RoutingError::InvalidAssignment {
                        customer,
                        reason: format!("already assigned to vehicle {}", slot.vehicle),
                    });
                }
                let position = solution.tours[vehicle].len();
                solution.insert(instance, vehicle, position, customer);
            }
        }
        Ok(solution)
    }

    /// Tours in vehicle order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Tour of `vehicle`.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle` is out of bounds.
    pub fn tour(&self, vehicle: usize) -> &Tour {
        &self.tours[vehicle]
    }

    pub fn num_vehicles(&self) -> usize {
        self.tours.len()
    }

    /// Current slot of `customer`, or `None` while it is unassigned.
    pub fn slot(&self, customer: usize) -> Option<Slot> {
        self.slots.get(customer).copied().flatten()
    }

    /// Number of customers placed on some tour.
    pub fn num_assigned(&self) -> usize {
        self.tours.iter().map(Tour::len).sum()
    }

    /// Customer sequences in vehicle order.
    pub fn routes(&self) -> Vec<Vec<usize>> {
        self.tours.iter().map(|t| t.customers().to_vec()).collect()
    }

    /// Inserts an unassigned customer at `position` of `vehicle`'s tour and
    /// shifts the slots of the customers behind it.
    pub(crate) fn insert(
        &mut self,
        instance: &Instance,
        vehicle: usize,
        position: usize,
        customer: usize,
    ) {
        debug_assert!(customer != DEPOT && self.slot(customer).is_none());

        let tour = &mut self.tours[vehicle];
        tour.insert(position, customer, instance.demand(customer));
        for (p, &c) in tour.customers().iter().enumerate().skip(position) {
            self.slots[c] = Some(Slot { vehicle, position: p });
        }
    }

    /// Exchanges the positions of two assigned customers, updating tour loads
    /// and the slot index. Returns `false` (and changes nothing) if either
    /// customer is unassigned.
    pub(crate) fn swap(&mut self, instance: &Instance, first: usize, second: usize) -> bool {
        let (Some(a), Some(b)) = (self.slot(first), self.slot(second)) else {
            return false;
        };

        if a.vehicle == b.vehicle {
            self.tours[a.vehicle].swap_positions(a.position, b.position);
        } else {
            let first_demand = instance.demand(first);
            let second_demand = instance.demand(second);
            self.tours[a.vehicle].replace(a.position, second, second_demand, first_demand);
            self.tours[b.vehicle].replace(b.position, first, first_demand, second_demand);
        }

        self.slots[first] = Some(b);
        self.slots[second] = Some(a);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn instance() -> Instance {
        Instance::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 1.0, 0.0, 3),
                Customer::new(2, 2.0, 0.0, 3),
                Customer::new(3, 3.0, 0.0, 4),
                Customer::new(4, 4.0, 0.0, 2),
            ],
            2,
            6,
        )
        .expect("valid")
    }

    #[test]
    fn test_empty_solution() {
        let sol = Solution::empty(3, 5);
        assert_eq!(sol.num_vehicles(), 3);
        assert_eq!(sol.num_assigned(), 0);
        assert_eq!(sol.slot(1), None);
    }

    #[test]
    fn test_insert_shifts_slots() {
        let inst = instance();
        let mut sol = Solution::empty(2, 5);
        sol.insert(&inst, 0, 0, 1);
        sol.insert(&inst, 0, 1, 2);
        sol.insert(&inst, 0, 0, 3);
        assert_eq!(sol.tour(0).customers(), &[3, 1, 2]);
        assert_eq!(sol.slot(3), Some(Slot { vehicle: 0, position: 0 }));
        assert_eq!(sol.slot(1), Some(Slot { vehicle: 0, position: 1 }));
        assert_eq!(sol.slot(2), Some(Slot { vehicle: 0, position: 2 }));
        assert_eq!(sol.tour(0).load(), 10);
    }

    #[test]
    fn test_swap_cross_tour_updates_loads() {
        let inst = instance();
        let mut sol = Solution::from_routes(&inst, &[vec![1, 2], vec![3, 4]]).expect("valid");
        assert!(sol.swap(&inst, 1, 4));
        assert_eq!(sol.tour(0).customers(), &[4, 2]);
        assert_eq!(sol.tour(1).customers(), &[3, 1]);
        assert_eq!(sol.tour(0).load(), 5);
        assert_eq!(sol.tour(1).load(), 7);
        assert_eq!(sol.slot(4), Some(Slot { vehicle: 0, position: 0 }));
        assert_eq!(sol.slot(1), Some(Slot { vehicle: 1, position: 1 }));
    }

    #[test]
    fn test_swap_same_tour() {
        let inst = instance();
        let mut sol = Solution::from_routes(&inst, &[vec![1, 2, 3]]).expect("valid");
        assert!(sol.swap(&inst, 3, 1));
        assert_eq!(sol.tour(0).customers(), &[3, 2, 1]);
        assert_eq!(sol.tour(0).load(), 10);
        assert_eq!(sol.slot(3), Some(Slot { vehicle: 0, position: 0 }));
    }

    #[test]
    fn test_swap_unassigned_is_noop() {
        let inst = instance();
        let mut sol = Solution::from_routes(&inst, &[vec![1]]).expect("valid");
        let before = sol.clone();
        assert!(!sol.swap(&inst, 1, 2));
        assert_eq!(sol, before);
    }

    #[test]
    fn test_from_routes_rejects_duplicates() {
        let inst = instance();
        let err = Solution::from_routes(&inst, &[vec![1, 2], vec![2]]).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidAssignment { customer: 2, .. }));
    }

    #[test]
    fn test_from_routes_rejects_depot_and_unknown() {
        let inst = instance();
        assert!(Solution::from_routes(&inst, &[vec![0]]).is_err());
        assert!(Solution::from_routes(&inst, &[vec![9]]).is_err());
    }

    #[test]
    fn test_from_routes_rejects_too_many_routes() {
        let inst = instance();
        assert!(Solution::from_routes(&inst, &[vec![1], vec![2], vec![3]]).is_err());
    }

    #[test]
    fn test_routes_roundtrip() {
        let inst = instance();
        let sol = Solution::from_routes(&inst, &[vec![2, 1], vec![4, 3]]).expect("valid");
        assert_eq!(sol.routes(), vec![vec![2, 1], vec![4, 3]]);
        assert_eq!(sol.num_assigned(), 4);
    }
}
