//! Construction heuristic configuration.

use serde::{Deserialize, Serialize};

/// Configuration parameters for the capacity-aware insertion heuristic.
///
/// # Examples
///
/// ```
/// use cvrp_search::constructive::ConstructionConfig;
///
/// let config = ConstructionConfig::default().with_oversize_factor(2.0);
/// assert_eq!(config.oversize_factor, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    /// Multiplier applied to the largest remaining demand before comparing
    /// it with the largest remaining vehicle capacity. When the scaled demand
    /// exceeds that capacity, the largest-demand customer is placed next
    /// instead of the best-scoring one.
    ///
    /// 1.0 only reacts once a demand can no longer fit anywhere; 2.0 starts
    /// placing large demands as soon as they would take more than half of the
    /// roomiest vehicle.
    pub oversize_factor: f64,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            oversize_factor: 1.0,
        }
    }
}

impl ConstructionConfig {
    /// Sets the oversize factor.
    pub fn with_oversize_factor(mut self, factor: f64) -> Self {
        self.oversize_factor = factor;
        self
    }
}
