//! Local search for improving CVRP solutions.
//!
//! - [`PairwiseExchange`] — Intra- and inter-route customer swaps with
//!   capacity re-checking and convergence detection

mod config;
mod exchange;

pub use config::SearchConfig;
pub use exchange::{PairwiseExchange, SearchOutcome, SearchState, SearchStatus, SwapMove};
