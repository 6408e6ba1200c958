use cvrp_search::distance::DistanceOracle;
use cvrp_search::evaluation::SolutionValidator;
use cvrp_search::io::{parse_instance, parse_solution};
use cvrp_search::local_search::{PairwiseExchange, SearchConfig, SearchStatus};
use cvrp_search::models::Solution;
use cvrp_search::solver::{improve, solve, SolverConfig};
use cvrp_search::RoutingError;

const FOUR_CUSTOMERS: &str = "\
5 2 6
0 0 0
3 2 1
3 3 -1
4 -2 2
2 -3 -1
";

#[test]
fn test_four_customers_two_vehicles() {
    let instance = parse_instance(FOUR_CUSTOMERS).expect("valid");
    let report = solve(&instance, &SolverConfig::default()).expect("feasible");
    let text = report.to_text(&instance).expect("complete");

    let mut lines = text.lines();
    let header = lines.next().expect("header");
    assert!(header.ends_with(" 1"), "header was {header}");
    let tours: Vec<&str> = lines.collect();
    assert_eq!(tours.len(), 2);
    for tour in &tours {
        assert!(tour.starts_with("0 ") && tour.ends_with(" 0"));
    }

    for tour in report.solution.tours() {
        assert!(tour.load() <= 6);
    }
    assert!(SolutionValidator::new(&instance).is_valid(&report.solution));
}

#[test]
fn test_single_oversized_customer() {
    let instance = parse_instance("2 1 10\n0 0 0\n11 5 5\n").expect("valid");
    let err = solve(&instance, &SolverConfig::default()).unwrap_err();
    assert!(matches!(err, RoutingError::InfeasibleInstance { customer: 1, .. }));
}

#[test]
fn test_colinear_customers_converge_in_one_sweep() {
    let instance = parse_instance("5 1 100\n0 0 0\n1 1 0\n1 2 0\n1 3 0\n1 4 0\n").expect("valid");
    let report = solve(&instance, &SolverConfig::default()).expect("feasible");

    assert_eq!(report.solution.tour(0).customers(), &[1, 2, 3, 4]);
    assert_eq!(report.sweeps, 1);
    assert_eq!(report.accepted_moves, 0);
    assert_eq!(report.status, SearchStatus::Converged);
    assert!((report.objective - 8.0).abs() < 1e-10);
    assert_eq!(report.to_text(&instance).expect("complete"), "8.00 1\n0 1 2 3 4 0\n");
}

#[test]
fn test_warm_start_from_text() {
    let instance = parse_instance(FOUR_CUSTOMERS).expect("valid");
    let parsed = parse_solution("99.00 1\n0 2 1 0\n0 4 3 0\n", &instance).expect("valid");
    let report = improve(&instance, parsed.solution, &SolverConfig::default()).expect("feasible");
    assert!(report.objective <= report.initial_objective + 1e-10);
    assert!(SolutionValidator::new(&instance).is_valid(&report.solution));
}

#[test]
fn test_time_limit_returns_best_solution() {
    let instance = parse_instance(FOUR_CUSTOMERS).expect("valid");
    let oracle = DistanceOracle::new(&instance);
    let start = Solution::from_routes(&instance, &[vec![2, 1], vec![4, 3]]).expect("valid");
    let config = SearchConfig::default().with_time_limit(std::time::Duration::ZERO);
    let outcome = PairwiseExchange::new(&instance, &oracle, config).run(start.clone());

    assert_eq!(outcome.status, SearchStatus::BudgetExceeded);
    assert_eq!(outcome.solution, start);
}

#[test]
fn test_malformed_instance_reports_line() {
    let err = parse_instance("3 1 10\n0 0 0\n1 1 1\n2 x 2\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed input at line 4: invalid x coordinate `x`: invalid float literal"
    );
}
