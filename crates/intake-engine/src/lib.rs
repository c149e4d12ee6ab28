//! Intake Engine: validation and estimation behind one facade
//!
//! ```text
//! EngineConfig ─→ OrderEngine ──assess──→ Assessment { draftHash, effectiveShippingType, validation, findings, estimate }
//!       │
//!       └───────→ ChangeObserver ──schedule (debounced)──→ watch::Receiver<ObservedValidation>
//! ```
//!
//! [`OrderEngine`] is synchronous and owns its aggregator. [`ChangeObserver`] shares
//! one behind an async mutex and re-validates after edits settle.
//!
//! # Example
//!
//! ```
//! use intake_core::{Currency, OrderItem, ShippingInfo};
//! use intake_engine::{EngineConfig, OrderEngine};
//!
//! let mut engine = OrderEngine::new(EngineConfig::default());
//! let mut items = vec![OrderItem::new("Carton")
//!     .with_dimensions(100.0, 100.0, 100.0)
//!     .with_weight(8.0)
//!     .with_price(100.0, Currency::Thb)];
//!
//! let shipping = ShippingInfo::new().with_member_code("M-1");
//! let assessment = engine.assess(&mut items, &shipping).unwrap();
//! assert!(assessment.validation.overall_valid);
//! assert!(assessment.estimate.is_some());
//! ```

pub mod config;
pub mod engine;
pub mod observer;

pub use config::{EngineConfig, EstimateGate, DEFAULT_DEBOUNCE_MS};
pub use engine::{draft_hash, Assessment, OrderEngine};
pub use observer::{ChangeObserver, ObservedValidation};
