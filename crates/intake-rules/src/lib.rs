//! Intake Rules: business-rule validation for order drafts
//!
//! Four independent rule families check an order draft and report findings:
//!
//! ```text
//! items ──┬─→ CBM (sea→air limit) ──────┐
//!         ├─→ THB (declared value) ─────┤
//!         └─→ weight (per item) ────────┼─→ ValidationAggregator ─→ ValidationResult
//! shipping ─→ member code ──────────────┘            │
//!                                                    └─→ findings ─→ FindingSink(s)
//! ```
//!
//! Validation is advisory: a failing result never blocks anything by itself, the
//! caller decides whether to gate on it.
//!
//! # Example
//!
//! ```
//! use intake_core::{Currency, OrderItem, ShippingInfo, Thresholds};
//! use intake_rules::{Family, ValidationAggregator};
//!
//! let mut aggregator = ValidationAggregator::new(Thresholds::default());
//!
//! let mut items = vec![
//!     OrderItem::new("Carton")
//!         .with_dimensions(320.0, 100.0, 100.0)
//!         .with_price(2000.0, Currency::Thb)
//!         .with_weight(12.0),
//! ];
//! let shipping = ShippingInfo::new().with_member_code("M-1234");
//!
//! let result = aggregator.validate_all(&mut items, &shipping);
//! assert!(!result.thb_valid);
//! assert!(result.cbm_valid);
//! assert_eq!(aggregator.findings_for(Family::Thb).len(), 1);
//! ```

pub mod aggregator;
pub mod finding;
pub mod notify;
pub mod rule;

pub use aggregator::{ValidationAggregator, ValidationResult};
pub use finding::{ActionEffect, Family, Finding, FindingAction, FindingKey, Severity};
pub use notify::{FindingSink, Notification, NotificationKind, NotificationLog, TracingSink};
pub use rule::{evaluate_cbm, evaluate_member_code, evaluate_thb, evaluate_weight, RuleOutcome};

use intake_core::{OrderItem, ShippingInfo, Thresholds};

/// Validate a draft with default thresholds.
///
/// Returns the flags and the findings raised. `items` get their CBM cache refreshed.
pub fn validate_order(items: &mut [OrderItem], shipping: &ShippingInfo) -> (ValidationResult, Vec<Finding>) {
    let mut aggregator = ValidationAggregator::new(Thresholds::default());
    let result = aggregator.validate_all(items, shipping);
    (result, aggregator.findings().to_vec())
}

/// `true` if the draft passes every family under default thresholds.
pub fn would_pass(items: &[OrderItem], shipping: &ShippingInfo) -> bool {
    let mut scratch = items.to_vec();
    validate_order(&mut scratch, shipping).0.overall_valid
}
