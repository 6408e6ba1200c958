//! Capacity-aware sequential insertion heuristic.
//!
//! # Algorithm
//!
//! Repeatedly picks one unassigned customer and inserts it where it adds the
//! least distance:
//!
//! 1. **Selection.** If the largest remaining demand (scaled by
//!    [`ConstructionConfig::oversize_factor`]) exceeds the largest remaining
//!    vehicle capacity, the largest-demand customer goes next so it is not
//!    stranded. Otherwise the customer maximizing
//!    `demand × distance_from_depot` goes next: remote, heavy customers are
//!    placed while tours are still flexible.
//! 2. **Insertion.** Every position of every vehicle with enough remaining
//!    capacity is tried; the cheapest wins, ties going to the lowest vehicle
//!    index, then the lowest position.
//! 3. If no vehicle has room, the instance is reported infeasible.
//!
//! # Complexity
//!
//! O(n²) for n customers: each step scans the unassigned set and every
//! insertion position, each evaluated in O(1).

use std::cmp::Reverse;

use tracing::{debug, trace};

use super::{ConstructionConfig, UnassignedSet};
use crate::distance::DistanceOracle;
use crate::error::RoutingError;
use crate::evaluation::TourEvaluator;
use crate::models::{Instance, Solution};

#[derive(Debug, Clone, Copy)]
struct Insertion {
    vehicle: usize,
    position: usize,
    delta: f64,
}

/// Builds a complete, capacity-feasible solution by sequential insertion.
///
/// Fails with [`RoutingError::InfeasibleInstance`] as soon as a selected
/// customer fits on no vehicle.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::{Customer, Instance};
/// use cvrp_search::distance::DistanceOracle;
/// use cvrp_search::constructive::{capacity_insertion, ConstructionConfig};
///
/// let instance = Instance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 1.0, 0.0, 10),
///         Customer::new(2, 2.0, 0.0, 10),
///         Customer::new(3, 3.0, 0.0, 10),
///     ],
///     2,
///     20,
/// )
/// .unwrap();
/// let oracle = DistanceOracle::new(&instance);
///
/// let solution = capacity_insertion(&instance, &oracle, &ConstructionConfig::default()).unwrap();
/// assert_eq!(solution.num_assigned(), 3);
/// assert!(solution.tours().iter().all(|t| t.load() <= 20));
/// ```
pub fn capacity_insertion(
    instance: &Instance,
    distances: &DistanceOracle<'_>,
    config: &ConstructionConfig,
) -> Result<Solution, RoutingError> {
    let evaluator = TourEvaluator::new(distances);
    let capacity = u64::from(instance.vehicle_capacity());
    let mut solution = Solution::empty(instance.vehicle_count(), instance.customer_count());
    let mut unassigned = UnassignedSet::all_customers(instance.customer_count());

    while !unassigned.is_empty() {
        let largest_remaining = solution
            .tours()
            .iter()
            .map(|t| capacity.saturating_sub(t.load()))
            .max()
            .unwrap_or(0);

        let Some(slot) = select_next(
            instance,
            distances,
            &unassigned,
            largest_remaining,
            config.oversize_factor,
        ) else {
            break;
        };
        let customer = unassigned.take(slot);
        let demand = instance.demand(customer);

        let Some(best) = best_insertion(&evaluator, &solution, customer, demand, capacity) else {
            return Err(RoutingError::InfeasibleInstance {
                customer,
                demand,
                largest_remaining,
            });
        };

        trace!(
            customer,
            vehicle = best.vehicle,
            position = best.position,
            delta = best.delta,
            remaining = unassigned.len(),
            "inserted customer"
        );
        solution.insert(instance, best.vehicle, best.position, customer);
    }

    debug!(
        assigned = solution.num_assigned(),
        used_vehicles = solution.tours().iter().filter(|t| !t.is_empty()).count(),
        "insertion complete"
    );
    Ok(solution)
}

/// Picks the next customer and returns its slot in `unassigned`.
fn select_next(
    instance: &Instance,
    distances: &DistanceOracle<'_>,
    unassigned: &UnassignedSet,
    largest_remaining: u64,
    oversize_factor: f64,
) -> Option<usize> {
    let mut heaviest: Option<(usize, usize)> = None;
    let mut best_scored: Option<(usize, usize, f64)> = None;

    for (slot, customer) in unassigned.iter() {
        let demand = instance.demand(customer);

        let heavier = heaviest.is_none_or(|(_, c)| {
            (demand, Reverse(customer)) > (instance.demand(c), Reverse(c))
        });
        if heavier {
            heaviest = Some((slot, customer));
        }

        let score = f64::from(demand) * distances.from_depot(customer);
        let better = best_scored
            .is_none_or(|(_, c, s)| score > s || (score == s && customer < c));
        if better {
            best_scored = Some((slot, customer, score));
        }
    }

    let (heavy_slot, heavy_customer) = heaviest?;
    let largest_demand = f64::from(instance.demand(heavy_customer));
    if largest_demand * oversize_factor > largest_remaining as f64 {
        return Some(heavy_slot);
    }
    best_scored.map(|(slot, _, _)| slot)
}

/// Cheapest insertion of `customer` over every vehicle with room for it.
fn best_insertion(
    evaluator: &TourEvaluator<'_>,
    solution: &Solution,
    customer: usize,
    demand: u32,
    capacity: u64,
) -> Option<Insertion> {
    let mut best: Option<Insertion> = None;

    for (vehicle, tour) in solution.tours().iter().enumerate() {
        if capacity.saturating_sub(tour.load()) < u64::from(demand) {
            continue;
        }
        for position in 0..=tour.len() {
            let delta = evaluator.insertion_delta(tour.customers(), position, customer);
            // Strict comparison keeps the earliest (vehicle, position) on ties.
            if best.is_none_or(|b| delta < b.delta) {
                best = Some(Insertion {
                    vehicle,
                    position,
                    delta,
                });
            }
        }
    }

    best
}
