//! Error type shared by parsing, construction and output.

use thiserror::Error;

/// Errors raised while reading, solving or writing a routing instance.
///
/// Search budget exhaustion is not an error: the local search reports it
/// through [`SearchStatus`](crate::local_search::SearchStatus) and still
/// returns its best solution.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The input text does not match the expected layout.
    ///
    /// `line` is 1-based; 0 means the problem concerns the text as a whole.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A customer cannot be placed on any vehicle.
    #[error(
        "infeasible instance: customer {customer} with demand {demand} does not fit \
         (largest remaining capacity {largest_remaining})"
    )]
    InfeasibleInstance {
        customer: usize,
        demand: u32,
        largest_remaining: u64,
    },

    /// A route assignment references a customer that cannot be placed.
    #[error("invalid assignment of customer {customer}: {reason}")]
    InvalidAssignment { customer: usize, reason: String },

    /// A solution was about to be written while not covering every customer
    /// exactly once.
    #[error("incomplete solution: {missing} customer(s) missing, {duplicated} duplicated")]
    IncompleteSolution { missing: usize, duplicated: usize },

    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
}

impl RoutingError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
