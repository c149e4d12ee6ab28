//! Validation aggregator
//!
//! Owns the current finding list and the per-family flags for one order draft.
//! Each family entry point replaces that family's findings wholesale, so repeated
//! evaluation never accumulates stale findings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use intake_core::units::normalize_items;
use intake_core::{OrderItem, ShippingInfo, Thresholds};

use crate::finding::{Family, Finding, Severity};
use crate::notify::FindingSink;
use crate::rule::{evaluate_cbm, evaluate_member_code, evaluate_thb, evaluate_weight, RuleOutcome};

/// Pass/fail flags per family.
///
/// Starts all `true`; `overall_valid` is always the AND of the four family flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub cbm_valid: bool,
    pub thb_valid: bool,
    pub member_code_valid: bool,
    pub weight_valid: bool,
    pub overall_valid: bool,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            cbm_valid: true,
            thb_valid: true,
            member_code_valid: true,
            weight_valid: true,
            overall_valid: true,
        }
    }
}

impl ValidationResult {
    /// Flag for a family. `Dimensions` has no flag and always reads `true`.
    pub fn family_valid(&self, family: Family) -> bool {
        match family {
            Family::Cbm => self.cbm_valid,
            Family::Thb => self.thb_valid,
            Family::MemberCode => self.member_code_valid,
            Family::Weight => self.weight_valid,
            Family::Dimensions => true,
        }
    }

    /// Families currently failing, in evaluation order.
    pub fn failing_families(&self) -> Vec<Family> {
        Family::EVALUATED
            .into_iter()
            .filter(|family| !self.family_valid(*family))
            .collect()
    }

    fn set(&mut self, family: Family, valid: bool) {
        match family {
            Family::Cbm => self.cbm_valid = valid,
            Family::Thb => self.thb_valid = valid,
            Family::MemberCode => self.member_code_valid = valid,
            Family::Weight => self.weight_valid = valid,
            Family::Dimensions => {}
        }
        self.overall_valid =
            self.cbm_valid && self.thb_valid && self.member_code_valid && self.weight_valid;
    }
}

/// Runs the rule families and keeps their combined state.
///
/// Not internally synchronised: callers sharing one instance must serialise access.
pub struct ValidationAggregator {
    thresholds: Thresholds,
    findings: Vec<Finding>,
    results: ValidationResult,
    sinks: Vec<Arc<dyn FindingSink>>,
}

impl ValidationAggregator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            findings: Vec::new(),
            results: ValidationResult::default(),
            sinks: Vec::new(),
        }
    }

    /// Register a sink notified once per finding raised.
    pub fn with_sink(mut self, sink: Arc<dyn FindingSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn add_sink(&mut self, sink: Arc<dyn FindingSink>) {
        self.sinks.push(sink);
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn results(&self) -> ValidationResult {
        self.results
    }

    /// Run every family in order: CBM, THB, member code, weight.
    ///
    /// Rewrites each item's cached `cbm` first (see [`normalize_items`]). Calling this
    /// twice on unchanged input yields the same result and the same finding set.
    pub fn validate_all(&mut self, items: &mut [OrderItem], shipping: &ShippingInfo) -> ValidationResult {
        normalize_items(items);

        self.validate_cbm(items);
        self.validate_thb(items);
        self.validate_member_code(shipping);
        self.validate_weight(items);

        tracing::debug!(
            overall_valid = self.results.overall_valid,
            findings = self.findings.len(),
            "validated order draft"
        );

        self.results
    }

    pub fn validate_cbm(&mut self, items: &[OrderItem]) -> bool {
        let outcome = evaluate_cbm(items, &self.thresholds);
        self.apply(outcome)
    }

    pub fn validate_thb(&mut self, items: &[OrderItem]) -> bool {
        let outcome = evaluate_thb(items, &self.thresholds);
        self.apply(outcome)
    }

    pub fn validate_member_code(&mut self, shipping: &ShippingInfo) -> bool {
        let outcome = evaluate_member_code(shipping);
        self.apply(outcome)
    }

    pub fn validate_weight(&mut self, items: &[OrderItem]) -> bool {
        let outcome = evaluate_weight(items, &self.thresholds);
        self.apply(outcome)
    }

    /// Replace a family's findings and flag with `outcome`.
    fn apply(&mut self, outcome: RuleOutcome) -> bool {
        let RuleOutcome { family, valid, findings } = outcome;

        self.findings.retain(|f| f.family != family);
        for finding in &findings {
            for sink in &self.sinks {
                sink.notify(finding);
            }
        }
        self.findings.extend(findings);
        self.results.set(family, valid);

        valid
    }

    /// Read-only view of the current findings.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn findings_for(&self, family: Family) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.family == family).collect()
    }

    pub fn findings_by_family(&self) -> BTreeMap<Family, Vec<&Finding>> {
        let mut grouped: BTreeMap<Family, Vec<&Finding>> = BTreeMap::new();
        for finding in &self.findings {
            grouped.entry(finding.family).or_default().push(finding);
        }
        grouped
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Drop findings for one family, or all of them. Flags are left untouched.
    pub fn clear_findings(&mut self, family: Option<Family>) {
        match family {
            Some(family) => self.findings.retain(|f| f.family != family),
            None => self.findings.clear(),
        }
    }
}

impl Default for ValidationAggregator {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl std::fmt::Debug for ValidationAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationAggregator")
            .field("thresholds", &self.thresholds)
            .field("findings", &self.findings.len())
            .field("results", &self.results)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
