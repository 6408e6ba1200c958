//! End-to-end pipeline: construction, pairwise-exchange search, validation.
//!
//! [`solve`] builds a solution from scratch; [`improve`] starts the search
//! from a given complete, capacity-feasible solution. Both return a
//! [`SolveReport`] whose solution has passed the validator.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constructive::{capacity_insertion, ConstructionConfig};
use crate::distance::DistanceOracle;
use crate::error::RoutingError;
use crate::evaluation::{SolutionValidator, TourEvaluator, ViolationType};
use crate::io::format_solution;
use crate::local_search::{PairwiseExchange, SearchConfig, SearchOutcome, SearchStatus};
use crate::models::{Instance, Solution};

/// Configuration of the whole pipeline.
///
/// # Examples
///
/// ```
/// use cvrp_search::solver::SolverConfig;
///
/// let config: SolverConfig =
///     serde_json::from_str(r#"{ "search": { "max_sweeps": 50, "parallel": true } }"#).unwrap();
/// assert_eq!(config.search.max_sweeps, 50);
/// assert!((config.construction.oversize_factor - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub construction: ConstructionConfig,
    pub search: SearchConfig,
}

impl SolverConfig {
    pub fn with_construction(mut self, construction: ConstructionConfig) -> Self {
        self.construction = construction;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}

/// Result of a solver run.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub solution: Solution,
    /// Total length of the final solution.
    pub objective: f64,
    /// Total length before local search.
    pub initial_objective: f64,
    /// Whether every tour respects the vehicle capacity.
    pub feasible: bool,
    pub status: SearchStatus,
    pub sweeps: usize,
    pub accepted_moves: usize,
}

impl SolveReport {
    /// Renders the report in the solution text layout.
    pub fn to_text(&self, instance: &Instance) -> Result<String, RoutingError> {
        format_solution(instance, &self.solution, self.objective)
    }
}

/// Solves `instance`: capacity-aware insertion followed by pairwise exchange.
///
/// # Examples
///
/// ```
/// use cvrp_search::io::parse_instance;
/// use cvrp_search::solver::{solve, SolverConfig};
///
/// let instance = parse_instance("5 2 6\n0 0 0\n3 2 1\n3 3 -1\n4 -2 2\n2 -3 -1\n").unwrap();
/// let report = solve(&instance, &SolverConfig::default()).unwrap();
///
/// assert!(report.feasible);
/// assert!(report.objective <= report.initial_objective);
/// assert!(report.to_text(&instance).unwrap().starts_with(&format!("{:.2} 1", report.objective)));
/// ```
pub fn solve(instance: &Instance, config: &SolverConfig) -> Result<SolveReport, RoutingError> {
    log_instance(instance);
    let distances = DistanceOracle::new(instance);

    let initial = capacity_insertion(instance, &distances, &config.construction)?;
    let evaluator = TourEvaluator::new(&distances);
    info!(
        objective = evaluator.solution_length(&initial),
        "construction finished"
    );
    log_tours(instance, &evaluator, &initial);

    search(instance, &distances, initial, &config.search)
}

/// Runs the local search from an existing solution.
///
/// The starting solution must visit every customer once and respect
/// capacity.
pub fn improve(
    instance: &Instance,
    solution: Solution,
    config: &SolverConfig,
) -> Result<SolveReport, RoutingError> {
    log_instance(instance);
    ensure_feasible(instance, &solution)?;
    let distances = DistanceOracle::new(instance);
    search(instance, &distances, solution, &config.search)
}

fn search(
    instance: &Instance,
    distances: &DistanceOracle<'_>,
    solution: Solution,
    config: &SearchConfig,
) -> Result<SolveReport, RoutingError> {
    let engine = PairwiseExchange::new(instance, distances, config.clone());
    let SearchOutcome {
        solution,
        status,
        sweeps,
        accepted_moves,
        initial_objective,
        objective,
        ..
    } = engine.run(solution);

    info!(
        before = initial_objective,
        after = objective,
        sweeps,
        accepted_moves,
        ?status,
        "local search finished"
    );
    log_tours(instance, &TourEvaluator::new(distances), &solution);
    ensure_feasible(instance, &solution)?;

    Ok(SolveReport {
        solution,
        objective,
        initial_objective,
        feasible: true,
        status,
        sweeps,
        accepted_moves,
    })
}

fn ensure_feasible(instance: &Instance, solution: &Solution) -> Result<(), RoutingError> {
    let validator = SolutionValidator::new(instance);
    if !validator.is_complete(solution) {
        let (missing, duplicated) = validator.partition_counts(solution);
        return Err(RoutingError::IncompleteSolution {
            missing,
            duplicated,
        });
    }

    let overloaded = validator
        .violations(solution)
        .into_iter()
        .find_map(|violation| match violation.kind {
            ViolationType::CapacityExceeded {
                vehicle,
                load,
                capacity,
            } => Some((vehicle, load, capacity)),
            _ => None,
        });
    match overloaded {
        Some((vehicle, load, capacity)) => Err(RoutingError::InvalidAssignment {
            customer: solution.tour(vehicle).customers().last().copied().unwrap_or_default(),
            reason: format!("vehicle {vehicle} carries {load}, over capacity {capacity}"),
        }),
        None => Ok(()),
    }
}

fn log_instance(instance: &Instance) {
    let depot = instance.depot();
    info!(
        customers = instance.num_customers(),
        vehicles = instance.vehicle_count(),
        capacity = instance.vehicle_capacity(),
        largest_demand = instance.max_demand(),
        depot_x = depot.x(),
        depot_y = depot.y(),
        "instance loaded"
    );
}

fn log_tours(instance: &Instance, evaluator: &TourEvaluator<'_>, solution: &Solution) {
    for (vehicle, tour) in solution.tours().iter().enumerate() {
        debug!(
            vehicle,
            length = evaluator.tour_length(tour.customers()),
            load = tour.load(),
            capacity = instance.vehicle_capacity(),
            customers = ?tour.customers(),
            "tour"
        );
    }
}
