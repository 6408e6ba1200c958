//! Local search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration parameters for the pairwise-exchange local search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cvrp_search::local_search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_sweeps(50)
///     .with_time_limit(Duration::from_secs(5))
///     .with_parallel(true);
/// assert_eq!(config.max_sweeps, 50);
/// assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of full sweeps over all customer pairs.
    pub max_sweeps: usize,
    /// Wall-clock limit in seconds (None for no limit).
    pub time_limit_secs: Option<f64>,
    /// Evaluate the candidates of each customer in parallel.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_sweeps: 1000,
            time_limit_secs: None,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Sets the maximum number of sweeps.
    pub fn with_max_sweeps(mut self, n: usize) -> Self {
        self.max_sweeps = n;
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_secs = Some(limit.as_secs_f64());
        self
    }

    /// Enables or disables parallel candidate evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The wall-clock limit; negative or non-finite values mean no limit.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.max_sweeps, 1000);
        assert!(config.time_limit().is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn test_invalid_time_limit_ignored() {
        let config = SearchConfig {
            time_limit_secs: Some(-1.0),
            ..SearchConfig::default()
        };
        assert!(config.time_limit().is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SearchConfig =
            serde_json::from_str(r#"{ "max_sweeps": 3 }"#).expect("valid json");
        assert_eq!(config.max_sweeps, 3);
        assert!(!config.parallel);
    }
}
