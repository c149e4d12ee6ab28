//! Intake Core: order data model, unit conversion, and thresholds
//!
//! Shared vocabulary for the rule evaluator, the cost estimator, and the engine
//! facade. Everything here is a pure value or a pure function.

pub mod data_model;
pub mod error;
pub mod logging;
pub mod thresholds;
pub mod units;

pub use data_model::{Currency, OrderItem, ShippingInfo, ShippingType};
pub use error::{IntakeError, Result};
pub use thresholds::{CbmThresholds, ThbThresholds, Thresholds, WeightThresholds};
pub use units::{
    determine_shipping_type, item_cbm, normalize_items, recommend_shipping_type, subtotal,
    total_cbm, total_value, total_weight,
};

/// Version of the intake engine.
pub const INTAKE_VERSION: &str = "1.0.0";
