//! Solution text writer and reader.
//!
//! Layout: `<objective %.2f> <feasible 0|1>`, then one line per vehicle
//! listing the depot, the tour's customers in order, and the depot again.

use std::iter;

use super::numbered_lines;
use super::reader::{parse_field, split_fields};
use crate::error::RoutingError;
use crate::evaluation::SolutionValidator;
use crate::models::{Instance, Solution, DEPOT};

/// A solution read back from text.
#[derive(Debug, Clone)]
pub struct ParsedSolution {
    pub solution: Solution,
    pub objective: f64,
    pub feasible: bool,
}

/// Renders `solution` in the output layout.
///
/// The feasibility flag reflects capacity feasibility. Fails with
/// [`RoutingError::IncompleteSolution`] unless every customer is visited
/// exactly once.
///
/// # Examples
///
/// ```
/// use cvrp_search::io::{format_solution, parse_instance};
/// use cvrp_search::models::Solution;
///
/// let instance = parse_instance("3 2 10\n0 0 0\n4 1 0\n6 2 0\n").unwrap();
/// let solution = Solution::from_routes(&instance, &[vec![1, 2]]).unwrap();
///
/// let text = format_solution(&instance, &solution, 4.0).unwrap();
/// assert_eq!(text, "4.00 1\n0 1 2 0\n0 0\n");
/// ```
pub fn format_solution(
    instance: &Instance,
    solution: &Solution,
    objective: f64,
) -> Result<String, RoutingError> {
    let validator = SolutionValidator::new(instance);
    if !validator.is_complete(solution) {
        let (missing, duplicated) = validator.partition_counts(solution);
        return Err(RoutingError::IncompleteSolution {
            missing,
            duplicated,
        });
    }
    let feasible = validator.is_capacity_feasible(solution);

    let mut out = format!("{objective:.2} {}\n", u8::from(feasible));
    for tour in solution.tours() {
        let line = iter::once(DEPOT)
            .chain(tour.customers().iter().copied())
            .chain(iter::once(DEPOT))
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Reads a solution written by [`format_solution`] back into a [`Solution`]
/// for `instance`.
///
/// Partition and capacity are not checked here; use
/// [`SolutionValidator`] on the result.
pub fn parse_solution(text: &str, instance: &Instance) -> Result<ParsedSolution, RoutingError> {
    let mut lines = numbered_lines(text);
    let (header_line, header) = lines
        .next()
        .ok_or_else(|| RoutingError::malformed(0, "empty solution"))?;

    let [objective, flag] = split_fields::<2>(header_line, header)?;
    let objective: f64 = parse_field(header_line, "objective", objective)?;
    let feasible = match flag {
        "0" => false,
        "1" => true,
        other => {
            return Err(RoutingError::malformed(
                header_line,
                format!("feasibility flag must be 0 or 1, found `{other}`"),
            ))
        }
    };

    let mut routes = Vec::new();
    for (line, text) in lines {
        let stops = text
            .split_whitespace()
            .map(|field| parse_field::<usize>(line, "customer index", field))
            .collect::<Result<Vec<_>, _>>()?;

        match stops.as_slice() {
            [DEPOT, inner @ .., DEPOT] => routes.push(inner.to_vec()),
            _ => {
                return Err(RoutingError::malformed(
                    line,
                    "tour must start and end at the depot",
                ))
            }
        }
    }

    let solution = Solution::from_routes(instance, &routes)?;
    Ok(ParsedSolution {
        solution,
        objective,
        feasible,
    })
}
