//! Partition and capacity checks on solutions.

use crate::models::{Instance, Solution, DEPOT};

/// A type of invariant violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A non-depot customer is not visited by any tour.
    MissingCustomer { customer: usize },
    /// A customer is visited more than once.
    DuplicateCustomer { customer: usize, occurrences: usize },
    /// The depot appears inside a tour.
    DepotInTour { vehicle: usize },
    /// A tour references an index outside the instance.
    UnknownCustomer { vehicle: usize, customer: usize },
    /// Summed demand of a tour exceeds the vehicle capacity.
    CapacityExceeded {
        vehicle: usize,
        load: u64,
        capacity: u32,
    },
    /// The solution has a different number of tours than the fleet.
    FleetSizeMismatch { tours: usize, vehicles: usize },
}

/// A violated invariant in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: ViolationType,
}

impl Violation {
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Checks the partition and capacity invariants of a solution against its
/// instance.
///
/// Loads are recomputed from the instance's demands rather than read from the
/// tours' cached loads.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::{Customer, Instance, Solution};
/// use cvrp_search::evaluation::SolutionValidator;
///
/// let instance = Instance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 1.0, 0.0, 4),
///         Customer::new(2, 2.0, 0.0, 4),
///     ],
///     2,
///     6,
/// )
/// .unwrap();
/// let validator = SolutionValidator::new(&instance);
///
/// let split = Solution::from_routes(&instance, &[vec![1], vec![2]]).unwrap();
/// assert!(validator.is_complete(&split));
/// assert!(validator.is_capacity_feasible(&split));
///
/// let merged = Solution::from_routes(&instance, &[vec![1, 2]]).unwrap();
/// assert!(validator.is_complete(&merged));
/// assert!(!validator.is_capacity_feasible(&merged));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolutionValidator<'a> {
    instance: &'a Instance,
}

impl<'a> SolutionValidator<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// `true` iff every non-depot customer appears exactly once across all
    /// tours and nothing else does.
    pub fn is_complete(&self, solution: &Solution) -> bool {
        !self
            .partition_violations(solution)
            .iter()
            .any(|v| !matches!(v.kind, ViolationType::FleetSizeMismatch { .. }))
    }

    /// `true` iff every tour's summed demand is within the vehicle capacity.
    pub fn is_capacity_feasible(&self, solution: &Solution) -> bool {
        let capacity = u64::from(self.instance.vehicle_capacity());
        solution
            .tours()
            .iter()
            .all(|t| self.load_of(t.customers()) <= capacity)
    }

    /// `true` iff the solution is complete and capacity feasible.
    pub fn is_valid(&self, solution: &Solution) -> bool {
        self.is_complete(solution) && self.is_capacity_feasible(solution)
    }

    /// All violations found in `solution`.
    pub fn violations(&self, solution: &Solution) -> Vec<Violation> {
        let mut violations = self.partition_violations(solution);
        let capacity = self.instance.vehicle_capacity();
        for (vehicle, tour) in solution.tours().iter().enumerate() {
            let load = self.load_of(tour.customers());
            if load > u64::from(capacity) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    vehicle,
                    load,
                    capacity,
                }));
            }
        }
        violations
    }

    /// Counts of (missing, duplicated) customers, for error reporting.
    pub fn partition_counts(&self, solution: &Solution) -> (usize, usize) {
        self.partition_violations(solution)
            .iter()
            .fold((0, 0), |(missing, duplicated), v| match v.kind {
                ViolationType::MissingCustomer { .. } => (missing + 1, duplicated),
                ViolationType::DuplicateCustomer { .. } => (missing, duplicated + 1),
                _ => (missing, duplicated),
            })
    }

    fn partition_violations(&self, solution: &Solution) -> Vec<Violation> {
        let count = self.instance.customer_count();
        let mut seen = vec![0usize; count];
        let mut violations = Vec::new();

        if solution.num_vehicles() != self.instance.vehicle_count() {
            violations.push(Violation::new(ViolationType::FleetSizeMismatch {
                tours: solution.num_vehicles(),
                vehicles: self.instance.vehicle_count(),
            }));
        }

        for (vehicle, tour) in solution.tours().iter().enumerate() {
            for &customer in tour.customers() {
                if customer == DEPOT {
                    violations.push(Violation::new(ViolationType::DepotInTour { vehicle }));
                } else if customer >= count {
                    violations.push(Violation::new(ViolationType::UnknownCustomer {
                        vehicle,
                        customer,
                    }));
                } else {
                    seen[customer] += 1;
                }
            }
        }

        for (customer, &occurrences) in seen.iter().enumerate().skip(1) {
            match occurrences {
                1 => {}
                0 => violations.push(Violation::new(ViolationType::MissingCustomer { customer })),
                _ => violations.push(Violation::new(ViolationType::DuplicateCustomer {
                    customer,
                    occurrences,
                })),
            }
        }
        violations
    }

    fn load_of(&self, tour: &[usize]) -> u64 {
        tour.iter()
            .filter(|&&c| c != DEPOT && c < self.instance.customer_count())
            .map(|&c| u64::from(self.instance.demand(c)))
            .sum()
    }
}
