//! Data Model: OrderItem, ShippingInfo and the enums they use
//!
//! Field names serialize in camelCase so drafts coming from the order form
//! deserialize without an adapter layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency an item's unit price is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Thb,
    Krw,
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Currency::Thb => write!(f, "THB"),
            Currency::Krw => write!(f, "KRW"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// Transport mode for a consolidated shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingType {
    #[default]
    Sea,
    Air,
}

impl fmt::Display for ShippingType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShippingType::Sea => write!(f, "sea"),
            ShippingType::Air => write!(f, "air"),
        }
    }
}

/// One line of an order draft: a box (or a batch of identical boxes).
///
/// Dimensions are centimetres, weight is kilograms per unit. Missing numeric fields
/// deserialize as `0`, which every calculation treats as "contributes nothing".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub quantity: u32,

    #[serde(default)]
    pub unit_price: f64,

    #[serde(default)]
    pub unit_price_currency: Currency,

    #[serde(default)]
    pub width: f64,

    #[serde(default)]
    pub height: f64,

    #[serde(default)]
    pub depth: f64,

    #[serde(default)]
    pub weight: f64,

    /// Cached `width * height * depth / 1_000_000`. Written by
    /// [`crate::units::normalize_items`]; never an independent source of truth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cbm: Option<f64>,
}

impl OrderItem {
    /// Create an item with quantity 1, THB pricing and no dimensions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity: 1,
            unit_price: 0.0,
            unit_price_currency: Currency::Thb,
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            weight: 0.0,
            cbm: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_price(mut self, unit_price: f64, currency: Currency) -> Self {
        self.unit_price = unit_price;
        self.unit_price_currency = currency;
        self
    }

    /// Set box dimensions in centimetres. Clears the cached CBM.
    pub fn with_dimensions(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self.cbm = None;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Quantity used by volume, weight and declared-value sums: `0` counts as `1`.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }
}

/// Sentinel some customers type instead of leaving the member code blank.
const NO_CODE_SENTINEL: &str = "no code";

/// Shipping metadata attached to an order draft.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_type: Option<ShippingType>,
}

impl ShippingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member_code(mut self, code: impl Into<String>) -> Self {
        self.member_code = Some(code.into());
        self
    }

    pub fn with_shipping_type(mut self, shipping_type: ShippingType) -> Self {
        self.shipping_type = Some(shipping_type);
        self
    }

    /// `true` when a usable member code is present.
    ///
    /// Absent, empty, and any casing of `"no code"` all count as missing.
    pub fn has_member_code(&self) -> bool {
        match self.member_code.as_deref() {
            None => false,
            Some(code) => !code.is_empty() && !code.eq_ignore_ascii_case(NO_CODE_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_with_missing_fields() {
        let json = r#"{"name": "Box A", "unitPrice": 120.5, "unitPriceCurrency": "KRW"}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.name, "Box A");
        assert_eq!(item.quantity, 0);
        assert_eq!(item.effective_quantity(), 1);
        assert_eq!(item.unit_price_currency, Currency::Krw);
        assert_eq!(item.width, 0.0);
        assert!(item.cbm.is_none());
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = OrderItem::new("Box")
            .with_price(10.0, Currency::Usd)
            .with_dimensions(10.0, 20.0, 30.0);
        let json = serde_json::to_string(&item).unwrap();

        assert!(json.contains("\"unitPrice\":10.0"));
        assert!(json.contains("\"unitPriceCurrency\":\"USD\""));
        assert!(!json.contains("cbm"));
    }

    #[test]
    fn test_with_dimensions_clears_cache() {
        let mut item = OrderItem::new("Box");
        item.cbm = Some(1.0);
        let item = item.with_dimensions(1.0, 1.0, 1.0);
        assert!(item.cbm.is_none());
    }

    #[test]
    fn test_member_code_presence() {
        assert!(!ShippingInfo::new().has_member_code());
        assert!(!ShippingInfo::new().with_member_code("").has_member_code());
        assert!(!ShippingInfo::new().with_member_code("no code").has_member_code());
        assert!(!ShippingInfo::new().with_member_code("NO CODE").has_member_code());
        assert!(!ShippingInfo::new().with_member_code("No Code").has_member_code());
        assert!(ShippingInfo::new().with_member_code("M-1234").has_member_code());
    }

    #[test]
    fn test_shipping_type_serde() {
        let info: ShippingInfo =
            serde_json::from_str(r#"{"memberCode": "M-1", "shippingType": "air"}"#).unwrap();
        assert_eq!(info.shipping_type, Some(ShippingType::Air));
        assert_eq!(ShippingType::Sea.to_string(), "sea");
    }
}
