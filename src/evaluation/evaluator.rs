//! Tour length evaluation and move deltas.

use crate::distance::DistanceOracle;
use crate::models::{Slot, Solution, DEPOT};

/// Computes tour and solution lengths, and the length change of candidate
/// insertions and exchanges without materializing the candidate.
///
/// Full-length methods are O(tour length) and allocation free; delta methods
/// are O(1). The full recomputation stays available as the reference against
/// which deltas are checked.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::{Customer, Instance};
/// use cvrp_search::distance::DistanceOracle;
/// use cvrp_search::evaluation::TourEvaluator;
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
/// let evaluator = TourEvaluator::new(&oracle);
///
/// // depot → 1 → 2 → depot = 5 + 5 + 10
/// assert!((evaluator.tour_length(&[1, 2]) - 20.0).abs() < 1e-10);
/// assert_eq!(evaluator.tour_length(&[]), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourEvaluator<'a> {
    distances: &'a DistanceOracle<'a>,
}

impl<'a> TourEvaluator<'a> {
    /// Creates an evaluator backed by `distances`.
    pub fn new(distances: &'a DistanceOracle<'a>) -> Self {
        Self { distances }
    }

    /// Length of `depot → tour[0] → … → tour[n-1] → depot`; 0 for an empty tour.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
            return 0.0;
        };
        let inner: f64 = tour
            .windows(2)
            .map(|leg| self.distances.between(leg[0], leg[1]))
            .sum();
        self.distances.from_depot(first) + inner + self.distances.from_depot(last)
    }

    /// Summed tour length over all vehicles.
    pub fn solution_length(&self, solution: &Solution) -> f64 {
        solution
            .tours()
            .iter()
            .map(|t| self.tour_length(t.customers()))
            .sum()
    }

    /// Length change of inserting `customer` before `tour[position]`
    /// (`position == tour.len()` appends).
    pub fn insertion_delta(&self, tour: &[usize], position: usize, customer: usize) -> f64 {
        let prev = if position == 0 { DEPOT } else { tour[position - 1] };
        let next = tour.get(position).copied().unwrap_or(DEPOT);
        self.distances.between(prev, customer) + self.distances.between(customer, next)
            - self.distances.between(prev, next)
    }

    /// Length change of exchanging the customers at slots `first` and
    /// `second`.
    ///
    /// Handles cross-tour exchanges, same-tour exchanges and the adjacent
    /// case where the two customers share an edge.
    pub fn swap_delta(&self, solution: &Solution, first: Slot, second: Slot) -> f64 {
        if first.vehicle != second.vehicle {
            let a = solution.tour(first.vehicle).customers();
            let b = solution.tour(second.vehicle).customers();
            let x = a[first.position];
            let y = b[second.position];
            return self.replacement_delta(a, first.position, y)
                + self.replacement_delta(b, second.position, x);
        }

        let tour = solution.tour(first.vehicle).customers();
        let (p, q) = if first.position <= second.position {
            (first.position, second.position)
        } else {
            (second.position, first.position)
        };
        if p == q {
            return 0.0;
        }

        let x = tour[p];
        let y = tour[q];
        if q == p + 1 {
            // prev → x → y → next becomes prev → y → x → next; x–y is kept.
            let prev = if p == 0 { DEPOT } else { tour[p - 1] };
            let next = tour.get(q + 1).copied().unwrap_or(DEPOT);
            return self.distances.between(prev, y) + self.distances.between(x, next)
                - self.distances.between(prev, x)
                - self.distances.between(y, next);
        }

        self.replacement_delta(tour, p, y) + self.replacement_delta(tour, q, x)
    }

    /// Length change of putting `customer` in place of `tour[position]`,
    /// with both neighbours unchanged.
    fn replacement_delta(&self, tour: &[usize], position: usize, customer: usize) -> f64 {
        let prev = if position == 0 { DEPOT } else { tour[position - 1] };
        let next = tour.get(position + 1).copied().unwrap_or(DEPOT);
        let old = tour[position];
        self.distances.between(prev, customer) + self.distances.between(customer, next)
            - self.distances.between(prev, old)
            - self.distances.between(old, next)
    }
}
