//! Rate card for the cost estimator
//!
//! Monetary constants only. The sea→air volume limit and the declared-value cutoff
//! come from [`intake_core::Thresholds`] so the estimator and the rule evaluator can
//! never disagree about them.

use serde::{Deserialize, Serialize};

use intake_core::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostRates {
    /// Air freight charge per kilogram.
    pub air_rate_per_kg: f64,

    /// Sea freight charge per m³.
    pub sea_rate_per_cbm: f64,

    /// Fixed multiplier from the raw subtotal to THB.
    ///
    /// A placeholder, not a live exchange rate. The declared-value rule does not
    /// use it.
    pub thb_exchange_rate: f64,

    /// Surcharge as a fraction of the subtotal once the THB value crosses the cutoff.
    pub surcharge_rate: f64,

    /// Tax as a fraction of the subtotal.
    pub tax_rate: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            air_rate_per_kg: 15_000.0,
            sea_rate_per_cbm: 50_000.0,
            thb_exchange_rate: 35.0,
            surcharge_rate: 0.02,
            tax_rate: 0.10,
        }
    }
}

impl CostRates {
    /// Load from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
