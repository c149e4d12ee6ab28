//! Engine configuration
//!
//! One document configures the whole engine:
//!
//! ```yaml
//! thresholds:
//!   cbm:
//!     seaToAirLimit: 29.0
//! rates:
//!   taxRate: 0.1
//! estimateGate: requireValid
//! debounceMs: 300
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use intake_core::{IntakeError, Result, Thresholds};
use intake_estimate::CostRates;

/// Default debounce window for the change observer.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Whether the estimate is produced when validation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EstimateGate {
    /// Always estimate; validation stays advisory.
    #[default]
    Always,
    /// Skip the estimate while any family is failing.
    RequireValid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub thresholds: Thresholds,
    pub rates: CostRates,
    pub estimate_gate: EstimateGate,
    pub debounce_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            rates: CostRates::default(),
            estimate_gate: EstimateGate::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        for issue in config.thresholds.ordering_issues() {
            tracing::warn!(%issue, "threshold ordering contract violated");
        }
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| IntakeError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&raw)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.estimate_gate, EstimateGate::Always);
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
thresholds:
  weight:
    maxWeight: 40
rates:
  seaRatePerCbm: 45000
estimateGate: requireValid
debounceMs: 250
"#;
        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.thresholds.weight.max_weight, 40.0);
        assert_eq!(config.thresholds.weight.warning_threshold, 25.0);
        assert_eq!(config.rates.sea_rate_per_cbm, 45_000.0);
        assert_eq!(config.rates.air_rate_per_kg, 15_000.0);
        assert_eq!(config.estimate_gate, EstimateGate::RequireValid);
        assert_eq!(config.debounce_ms, 250);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_yaml("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_unknown_gate_rejected() {
        assert!(EngineConfig::from_yaml("estimateGate: sometimes").is_err());
    }
}
