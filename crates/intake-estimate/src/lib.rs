//! Intake Estimate: shipping cost estimation
//!
//! ```text
//! items ─→ subtotal, weight, CBM ─→ shipping mode (sea | air) ─→ base fee
//!                  │                                              │
//!                  └─→ THB value ─→ surcharge ─────┐              │
//!                  └─→ tax ────────────────────────┴──→ total ←───┘
//! ```
//!
//! # Example
//!
//! ```
//! use intake_core::{Currency, OrderItem, ShippingType};
//! use intake_estimate::estimate;
//!
//! let items = vec![OrderItem::new("Carton")
//!     .with_dimensions(100.0, 100.0, 100.0)
//!     .with_weight(8.0)
//!     .with_price(100.0, Currency::Thb)];
//!
//! let breakdown = estimate(&items);
//! assert_eq!(breakdown.shipping_type, ShippingType::Sea);
//! assert!(breakdown.requires_extra_recipient_info);
//! ```

pub mod estimator;
pub mod rates;

pub use estimator::{CostBreakdown, CostEstimator};
pub use rates::CostRates;

use intake_core::OrderItem;

/// Estimate with the default rate card and thresholds.
pub fn estimate(items: &[OrderItem]) -> CostBreakdown {
    CostEstimator::default().estimate(items)
}
