//! Order engine: validation and estimate in one call
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use intake_core::units::{determine_shipping_type, total_cbm};
use intake_core::{OrderItem, Result, ShippingInfo, ShippingType};
use intake_estimate::{CostBreakdown, CostEstimator};
use intake_rules::{Finding, FindingSink, ValidationAggregator, ValidationResult};

use crate::config::{EngineConfig, EstimateGate};

/// Combined outcome of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Digest of the normalised draft; unchanged input gives the same hash.
    pub draft_hash: String,
    /// Customer's preferred mode, overridden to air when the volume exceeds the sea limit.
    pub effective_shipping_type: ShippingType,
    pub validation: ValidationResult,
    pub findings: Vec<Finding>,
    /// `None` only when the gate is [`EstimateGate::RequireValid`] and validation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<CostBreakdown>,
}

impl Assessment {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub struct OrderEngine {
    aggregator: ValidationAggregator,
    estimator: CostEstimator,
    gate: EstimateGate,
}

impl OrderEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            aggregator: ValidationAggregator::new(config.thresholds),
            estimator: CostEstimator::new(config.rates, config.thresholds),
            gate: config.estimate_gate,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn FindingSink>) -> Self {
        self.aggregator.add_sink(sink);
        self
    }

    /// Validate the draft, then estimate it unless the gate says otherwise.
    ///
    /// `items` have their CBM cache refreshed as part of validation.
    pub fn assess(&mut self, items: &mut [OrderItem], shipping: &ShippingInfo) -> Result<Assessment> {
        let validation = self.aggregator.validate_all(items, shipping);

        let estimate = match self.gate {
            EstimateGate::RequireValid if !validation.overall_valid => {
                tracing::debug!(
                    failing = ?validation.failing_families(),
                    "estimate skipped, validation failing"
                );
                None
            }
            _ => Some(self.estimator.estimate(items)),
        };

        let effective_shipping_type = determine_shipping_type(
            total_cbm(items),
            shipping.shipping_type,
            self.aggregator.thresholds().cbm.sea_to_air_limit,
        );

        Ok(Assessment {
            draft_hash: draft_hash(items, shipping)?,
            effective_shipping_type,
            validation,
            findings: self.aggregator.findings().to_vec(),
            estimate,
        })
    }

    /// Estimate without validating.
    pub fn estimate(&self, items: &[OrderItem]) -> CostBreakdown {
        self.estimator.estimate(items)
    }

    pub fn aggregator(&self) -> &ValidationAggregator {
        &self.aggregator
    }

    pub fn gate(&self) -> EstimateGate {
        self.gate
    }
}

impl Default for OrderEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// `blake3:<hex>` over the JSON form of the draft.
pub fn draft_hash(items: &[OrderItem], shipping: &ShippingInfo) -> Result<String> {
    let bytes = serde_json::to_vec(&(items, shipping))?;
    Ok(format!("blake3:{}", blake3::hash(&bytes)))
}
