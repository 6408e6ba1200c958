//! Pairwise customer exchange (swap) local search.
//!
//! # Algorithm
//!
//! A sweep visits every unordered customer pair (i, k), i < k, in index
//! order. For each pair the two customers' current slots are looked up in the
//! solution's position index, and exchanging them is evaluated with an O(1)
//! length delta. The exchange is committed immediately when it strictly
//! shortens the solution and both affected tours stay within capacity; the
//! sweep then carries on from the updated solution.
//!
//! The engine is a two-state machine: it stays in [`SearchState::Searching`]
//! while sweeps keep finding improvements and moves to
//! [`SearchState::Converged`] after a sweep without any. A sweep budget and an
//! optional deadline bound the search; hitting either returns the best
//! solution with [`SearchStatus::BudgetExceeded`].
//!
//! # Complexity
//!
//! O(n²) pair evaluations per sweep, each O(1).

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::SearchConfig;
use crate::distance::DistanceOracle;
use crate::evaluation::{SolutionValidator, TourEvaluator};
use crate::models::{Instance, Slot, Solution};

/// Smallest length decrease treated as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// State of the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Sweeps are still finding improving exchanges.
    Searching,
    /// The last full sweep accepted no exchange: a local optimum.
    Converged,
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// A local optimum was reached.
    Converged,
    /// The sweep budget or deadline ran out first. The returned solution is
    /// the best found, but not necessarily a local optimum.
    BudgetExceeded,
}

/// A candidate exchange of two customers and its length change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMove {
    pub first: usize,
    pub second: usize,
    pub delta: f64,
}

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best solution found.
    pub solution: Solution,
    pub status: SearchStatus,
    /// Number of sweeps started.
    pub sweeps: usize,
    /// Number of committed exchanges.
    pub accepted_moves: usize,
    /// Solution length before the search.
    pub initial_objective: f64,
    /// Solution length after the search, recomputed from scratch.
    pub objective: f64,
    /// Running solution length at the end of every sweep.
    pub sweep_objectives: Vec<f64>,
}

impl SearchOutcome {
    /// Returns `true` if the search ended in a local optimum.
    pub fn is_converged(&self) -> bool {
        self.status == SearchStatus::Converged
    }
}

enum SweepEnd {
    Improved,
    Unchanged,
    Interrupted,
}

/// Improves a feasible solution by exchanging pairs of customers until no
/// exchange helps or the budget runs out.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::{Customer, Instance, Solution};
/// use cvrp_search::distance::DistanceOracle;
/// use cvrp_search::local_search::{PairwiseExchange, SearchConfig};
///
/// let instance = Instance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 5.0, 1.0, 10),
///         Customer::new(2, -5.0, -1.0, 10),
///         Customer::new(3, 5.0, -1.0, 10),
///         Customer::new(4, -5.0, 1.0, 10),
///     ],
///     2,
///     20,
/// )
/// .unwrap();
/// let oracle = DistanceOracle::new(&instance);
///
/// // Each vehicle crosses the depot to serve one east and one west customer.
/// let interleaved = Solution::from_routes(&instance, &[vec![1, 4], vec![3, 2]]).unwrap();
/// let engine = PairwiseExchange::new(&instance, &oracle, SearchConfig::default());
/// let outcome = engine.run(interleaved);
///
/// assert!(outcome.is_converged());
/// assert!(outcome.objective < outcome.initial_objective);
/// ```
#[derive(Debug, Clone)]
pub struct PairwiseExchange<'a> {
    instance: &'a Instance,
    evaluator: TourEvaluator<'a>,
    config: SearchConfig,
}

impl<'a> PairwiseExchange<'a> {
    /// Creates an engine for `instance`.
    pub fn new(
        instance: &'a Instance,
        distances: &'a DistanceOracle<'a>,
        config: SearchConfig,
    ) -> Self {
        Self {
            instance,
            evaluator: TourEvaluator::new(distances),
            config,
        }
    }

    /// Runs sweeps from `solution` until convergence or budget exhaustion.
    ///
    /// Budget exhaustion is logged, never raised.
    pub fn run(&self, solution: Solution) -> SearchOutcome {
        let started = Instant::now();
        let deadline = self
            .config
            .time_limit()
            .and_then(|limit| started.checked_add(limit));

        let mut solution = solution;
        let initial_objective = self.evaluator.solution_length(&solution);
        let mut objective = initial_objective;
        let mut sweeps = 0;
        let mut accepted_moves = 0;
        let mut sweep_objectives = Vec::new();
        let mut state = SearchState::Searching;

        let status = loop {
            state = match state {
                SearchState::Converged => break SearchStatus::Converged,
                SearchState::Searching if sweeps >= self.config.max_sweeps => {
                    warn!(sweeps, objective, "sweep budget exhausted before convergence");
                    break SearchStatus::BudgetExceeded;
                }
                SearchState::Searching => {
                    sweeps += 1;
                    let mut accepted = 0;
                    let end = self.sweep(&mut solution, &mut objective, &mut accepted, deadline);
                    accepted_moves += accepted;
                    sweep_objectives.push(objective);
                    debug!(sweep = sweeps, accepted, objective, "sweep finished");

                    match end {
                        SweepEnd::Improved => SearchState::Searching,
                        SweepEnd::Unchanged => SearchState::Converged,
                        SweepEnd::Interrupted => {
                            warn!(
                                sweeps,
                                objective,
                                elapsed_ms = started.elapsed().as_millis() as u64,
                                "time limit reached before convergence"
                            );
                            break SearchStatus::BudgetExceeded;
                        }
                    }
                }
            };
        };

        let recomputed = self.evaluator.solution_length(&solution);
        debug_assert!(
            (recomputed - objective).abs() <= 1e-6 * recomputed.max(1.0),
            "running objective {objective} drifted from {recomputed}"
        );

        SearchOutcome {
            solution,
            status,
            sweeps,
            accepted_moves,
            initial_objective,
            objective: recomputed,
            sweep_objectives,
        }
    }

    /// Evaluates exchanging `first` and `second` in `solution`.
    ///
    /// Returns the move only if it strictly shortens the solution and keeps
    /// both tours within capacity.
    pub fn evaluate(&self, solution: &Solution, first: usize, second: usize) -> Option<SwapMove> {
        let a = solution.slot(first)?;
        let b = solution.slot(second)?;
        if !self.fits(solution, first, a, second, b) {
            return None;
        }
        let delta = self.evaluator.swap_delta(solution, a, b);
        (delta < -IMPROVEMENT_EPSILON).then_some(SwapMove {
            first,
            second,
            delta,
        })
    }

    fn sweep(
        &self,
        solution: &mut Solution,
        objective: &mut f64,
        accepted: &mut usize,
        deadline: Option<Instant>,
    ) -> SweepEnd {
        let mut improved = false;

        for first in 1..self.instance.customer_count() {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return SweepEnd::Interrupted;
            }

            let mut start = first + 1;
            while let Some(mv) = self.next_improving(solution, first, start) {
                let applied = solution.swap(self.instance, mv.first, mv.second);
                debug_assert!(applied);
                debug_assert!(SolutionValidator::new(self.instance).is_capacity_feasible(solution));
                *objective += mv.delta;
                *accepted += 1;
                improved = true;
                start = mv.second + 1;
            }
        }

        if improved {
            SweepEnd::Improved
        } else {
            SweepEnd::Unchanged
        }
    }

    /// First improving partner `k >= start` of `first`, in index order.
    ///
    /// The parallel path evaluates all partners against the same solution and
    /// keeps the lowest index, so it commits exactly what the sequential scan
    /// would.
    fn next_improving(&self, solution: &Solution, first: usize, start: usize) -> Option<SwapMove> {
        let end = self.instance.customer_count();
        if self.config.parallel {
            (start..end)
                .into_par_iter()
                .find_map_first(|second| self.evaluate(solution, first, second))
        } else {
            (start..end).find_map(|second| self.evaluate(solution, first, second))
        }
    }

    fn fits(&self, solution: &Solution, first: usize, a: Slot, second: usize, b: Slot) -> bool {
        if a.vehicle == b.vehicle {
            return true;
        }
        let capacity = u64::from(self.instance.vehicle_capacity());
        let first_demand = u64::from(self.instance.demand(first));
        let second_demand = u64::from(self.instance.demand(second));
        let load_a = solution.tour(a.vehicle).load();
        let load_b = solution.tour(b.vehicle).load();

        load_a - first_demand + second_demand <= capacity
            && load_b - second_demand + first_demand <= capacity
    }
}
