//! Solution evaluation: tour lengths, move deltas, and invariant checks.

mod evaluator;
mod validator;

pub use evaluator::TourEvaluator;
pub use validator::{SolutionValidator, Violation, ViolationType};
