//! Threshold policy for the business rules
//!
//! Defines the numeric limits each rule family compares against. Every key has a
//! default, so an override document only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IntakeError, Result};

/// Volume limits in m³ for the whole order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CbmThresholds {
    /// Above this total the shipment cannot go by sea.
    pub sea_to_air_limit: f64,
    /// Above this total the customer is told they are close to the limit.
    pub warning_threshold: f64,
}

impl Default for CbmThresholds {
    fn default() -> Self {
        Self {
            sea_to_air_limit: 29.0,
            warning_threshold: 25.0,
        }
    }
}

/// Declared-value limits in Thai Baht.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThbThresholds {
    /// Above this value customs needs extra recipient identification.
    pub extra_info_required: f64,
    pub warning_threshold: f64,
}

impl Default for ThbThresholds {
    fn default() -> Self {
        Self {
            extra_info_required: 1500.0,
            warning_threshold: 1200.0,
        }
    }
}

/// Per-item weight limits in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightThresholds {
    pub max_weight: f64,
    pub warning_threshold: f64,
}

impl Default for WeightThresholds {
    fn default() -> Self {
        Self {
            max_weight: 30.0,
            warning_threshold: 25.0,
        }
    }
}

/// All thresholds used during one evaluation session.
///
/// Configuration contract: each family's `warning_threshold` must be below its hard
/// limit. The engine does not enforce this; [`Thresholds::ordering_issues`] reports
/// violations so loaders can log them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub cbm: CbmThresholds,
    pub thb: ThbThresholds,
    pub weight: WeightThresholds,
}

impl Thresholds {
    /// Load from YAML. Missing sections and keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let thresholds: Thresholds = serde_yaml::from_str(yaml)?;
        thresholds.log_ordering_issues();
        Ok(thresholds)
    }

    /// Load from JSON. Missing sections and keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let thresholds: Thresholds = serde_json::from_str(json).map_err(IntakeError::config)?;
        thresholds.log_ordering_issues();
        Ok(thresholds)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| IntakeError::config(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&raw),
            _ => Self::from_yaml(&raw),
        }
    }

    /// Families whose warning threshold is not strictly below the hard limit.
    pub fn ordering_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.cbm.warning_threshold >= self.cbm.sea_to_air_limit {
            issues.push(format!(
                "cbm: warningThreshold {} is not below seaToAirLimit {}",
                self.cbm.warning_threshold, self.cbm.sea_to_air_limit
            ));
        }
        if self.thb.warning_threshold >= self.thb.extra_info_required {
            issues.push(format!(
                "thb: warningThreshold {} is not below extraInfoRequired {}",
                self.thb.warning_threshold, self.thb.extra_info_required
            ));
        }
        if self.weight.warning_threshold >= self.weight.max_weight {
            issues.push(format!(
                "weight: warningThreshold {} is not below maxWeight {}",
                self.weight.warning_threshold, self.weight.max_weight
            ));
        }

        issues
    }

    fn log_ordering_issues(&self) {
        for issue in self.ordering_issues() {
            tracing::warn!(%issue, "threshold ordering contract violated");
        }
    }
}
