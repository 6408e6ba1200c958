//! Instance text reader.
//!
//! Layout: a header `customer_count vehicle_count vehicle_capacity`, then
//! exactly `customer_count` lines `demand x y`. The first data line is the
//! depot; its demand is read but never counted against capacity. Blank lines
//! are skipped.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::numbered_lines;
use crate::error::RoutingError;
use crate::models::{Customer, Instance};

/// Largest fleet accepted from text. Every declared vehicle gets its own tour.
pub const MAX_VEHICLES: usize = 1 << 20;

/// Parses an instance from text.
///
/// Fails with [`RoutingError::MalformedInput`] if the header is invalid, the
/// number of customer lines differs from the declared count, or a line is not
/// the expected numeric triple.
///
/// # Examples
///
/// ```
/// use cvrp_search::io::parse_instance;
///
/// let instance = parse_instance("3 2 10\n0 0 0\n4 1.5 0\n6 -2 3.25\n").unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.vehicle_count(), 2);
/// assert_eq!(instance.vehicle_capacity(), 10);
/// assert_eq!(instance.customer(2).demand(), 6);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, RoutingError> {
    let mut lines = numbered_lines(text);
    let (header_line, header) = lines
        .next()
        .ok_or_else(|| RoutingError::malformed(0, "empty input"))?;

    let [count, vehicles, capacity] = split_fields::<3>(header_line, header)?;
    let customer_count: usize = parse_field(header_line, "customer count", count)?;
    let vehicle_count: usize = parse_field(header_line, "vehicle count", vehicles)?;
    let vehicle_capacity: u32 = parse_field(header_line, "vehicle capacity", capacity)?;
    if vehicle_count > MAX_VEHICLES {
        return Err(RoutingError::malformed(
            header_line,
            format!("vehicle count {vehicle_count} exceeds the limit of {MAX_VEHICLES}"),
        ));
    }
    if customer_count == 0 {
        return Err(RoutingError::malformed(
            header_line,
            "customer count must include the depot",
        ));
    }

    let lines: Vec<(usize, &str)> = lines.collect();
    let mut customers = Vec::with_capacity(lines.len().min(customer_count));
    for (line, text) in lines {
        if customers.len() == customer_count {
            return Err(RoutingError::malformed(
                line,
                format!("more than the declared {customer_count} customer lines"),
            ));
        }
        customers.push(parse_customer(customers.len(), line, text)?);
    }
    if customers.len() != customer_count {
        return Err(RoutingError::malformed(
            0,
            format!(
                "expected {customer_count} customer lines, found {}",
                customers.len()
            ),
        ));
    }

    Instance::new(customers, vehicle_count, vehicle_capacity)
}

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance, RoutingError> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}

impl FromStr for Instance {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_instance(s)
    }
}

fn parse_customer(index: usize, line: usize, text: &str) -> Result<Customer, RoutingError> {
    let [demand, x, y] = split_fields::<3>(line, text)?;
    let demand: u32 = parse_field(line, "demand", demand)?;
    let x: f64 = parse_field(line, "x coordinate", x)?;
    let y: f64 = parse_field(line, "y coordinate", y)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(RoutingError::malformed(line, "coordinates must be finite"));
    }
    Ok(Customer::new(index, x, y, demand))
}

pub(crate) fn split_fields<const N: usize>(
    line: usize,
    text: &str,
) -> Result<[&str; N], RoutingError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    <[&str; N]>::try_from(fields).map_err(|fields| {
        RoutingError::malformed(line, format!("expected {N} fields, found {}", fields.len()))
    })
}

pub(crate) fn parse_field<T>(line: usize, name: &str, value: &str) -> Result<T, RoutingError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| RoutingError::malformed(line, format!("invalid {name} `{value}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of(err: RoutingError) -> usize {
        match err {
            RoutingError::MalformedInput { line, .. } => line,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_basic() {
        let inst = parse_instance("5 4 10\n0 30 40\n3 37 52\n3 49 49\n4 52 64\n2 31 62\n")
            .expect("valid");
        assert_eq!(inst.customer_count(), 5);
        assert_eq!(inst.num_customers(), 4);
        assert_eq!(inst.vehicle_count(), 4);
        assert_eq!(inst.vehicle_capacity(), 10);
        assert_eq!(inst.depot().x(), 30.0);
        assert_eq!(inst.customer(3).demand(), 4);
        assert_eq!(inst.customer(4).index(), 4);
    }

    #[test]
    fn test_parse_ignores_blank_lines_and_whitespace() {
        let inst = parse_instance("\n2 1 5 \n\n  0 0 0\n1 1.0 1.0\n\n").expect("valid");
        assert_eq!(inst.customer_count(), 2);
    }

    #[test]
    fn test_parse_via_from_str() {
        let inst: Instance = "1 1 10\n0 0 0".parse().expect("valid");
        assert_eq!(inst.num_customers(), 0);
    }

    #[test]
    fn test_too_few_lines() {
        let err = parse_instance("3 1 10\n0 0 0\n1 1 1\n").unwrap_err();
        assert_eq!(line_of(err), 0);
    }

    #[test]
    fn test_too_many_lines() {
        let err = parse_instance("2 1 10\n0 0 0\n1 1 1\n1 2 2\n").unwrap_err();
        assert_eq!(line_of(err), 4);
    }

    #[test]
    fn test_bad_number() {
        let err = parse_instance("2 1 10\n0 0 0\n1 abc 1\n").unwrap_err();
        assert_eq!(line_of(err), 3);
    }

    #[test]
    fn test_negative_demand_rejected() {
        let err = parse_instance("2 1 10\n0 0 0\n-1 1 1\n").unwrap_err();
        assert_eq!(line_of(err), 3);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_instance("2 1 10\n0 0 0\n1 1\n").unwrap_err();
        assert_eq!(line_of(err), 3);
        let err = parse_instance("2 1\n0 0 0\n1 1 1\n").unwrap_err();
        assert_eq!(line_of(err), 1);
    }

    #[test]
    fn test_non_finite_coordinates() {
        let err = parse_instance("2 1 10\n0 0 0\n1 inf 1\n").unwrap_err();
        assert_eq!(line_of(err), 3);
    }

    #[test]
    fn test_empty_and_zero_count() {
        assert_eq!(line_of(parse_instance("").unwrap_err()), 0);
        assert_eq!(line_of(parse_instance("0 1 10\n").unwrap_err()), 1);
    }

    #[test]
    fn test_huge_customer_count_is_malformed() {
        let err = parse_instance("1000000000000000 1 10\n0 0 0\n1 1 1\n").unwrap_err();
        assert_eq!(line_of(err), 0);
    }

    #[test]
    fn test_vehicle_count_limit() {
        let err = parse_instance("2 1000000000000 10\n0 0 0\n1 1 1\n").unwrap_err();
        assert_eq!(line_of(err), 1);

        let text = format!("2 {MAX_VEHICLES} 10\n0 0 0\n1 1 1\n");
        let inst = parse_instance(&text).expect("at the limit");
        assert_eq!(inst.vehicle_count(), MAX_VEHICLES);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_instance("/nonexistent/cvrp/instance.txt").unwrap_err();
        assert!(matches!(err, RoutingError::Io(_)));
    }
}
