//! Unit conversion and order-level aggregation
//!
//! All functions are total: a missing or non-positive dimension yields a volume of `0`
//! instead of an error, and a quantity of `0` counts as `1`. Nothing here rounds
//! intermediate sums; display layers round to two places on their own.

use serde::{Deserialize, Serialize};

use crate::data_model::{Currency, OrderItem, ShippingType};
use crate::error::{IntakeError, Result};

/// cm³ per m³.
pub const CM3_PER_M3: f64 = 1_000_000.0;

const FT3_PER_M3: f64 = 35.3147;
const LITERS_PER_M3: f64 = 1000.0;

/// Volume in m³ of a `width × height × depth` box given in centimetres.
///
/// Returns `0` unless all three sides are strictly positive (NaN included).
pub fn cbm_of(width: f64, height: f64, depth: f64) -> f64 {
    if width > 0.0 && height > 0.0 && depth > 0.0 {
        width * height * depth / CM3_PER_M3
    } else {
        0.0
    }
}

/// Volume of a single unit of `item`, in m³.
pub fn item_cbm(item: &OrderItem) -> f64 {
    cbm_of(item.width, item.height, item.depth)
}

/// Σ `item_cbm(item) × max(quantity, 1)`.
pub fn total_cbm(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| item_cbm(item) * f64::from(item.effective_quantity()))
        .sum()
}

/// Σ `weight × max(quantity, 1)`; non-positive weights contribute nothing.
pub fn total_weight(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| positive_or_zero(item.weight) * f64::from(item.effective_quantity()))
        .sum()
}

/// Declared value of the items priced in `currency`.
///
/// Items priced in any other currency are skipped, not converted.
pub fn total_value(items: &[OrderItem], currency: Currency) -> f64 {
    items
        .iter()
        .filter(|item| item.unit_price_currency == currency)
        .map(|item| positive_or_zero(item.unit_price) * f64::from(item.effective_quantity()))
        .sum()
}

/// Raw Σ `unit_price × quantity` across every currency.
///
/// Unlike the other sums this uses the literal quantity, so a zero-quantity line adds
/// nothing.
pub fn subtotal(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| positive_or_zero(item.unit_price) * f64::from(item.quantity))
        .sum()
}

/// Rewrite every item's cached `cbm` from its current dimensions.
///
/// This is the only place the cache is written. Calling it repeatedly on unchanged
/// items is a no-op after the first call.
pub fn normalize_items(items: &mut [OrderItem]) {
    for item in items.iter_mut() {
        item.cbm = Some(item_cbm(item));
    }
}

/// `Air` when `total_cbm` is strictly above `sea_to_air_limit`, otherwise `Sea`.
pub fn recommend_shipping_type(total_cbm: f64, sea_to_air_limit: f64) -> ShippingType {
    if total_cbm > sea_to_air_limit {
        ShippingType::Air
    } else {
        ShippingType::Sea
    }
}

/// Shipping mode for an order, honouring the customer's preference.
///
/// Volume above `sea_to_air_limit` always forces `Air`; otherwise the preferred mode
/// wins, and `Sea` is the fallback.
pub fn determine_shipping_type(
    total_cbm: f64,
    preferred: Option<ShippingType>,
    sea_to_air_limit: f64,
) -> ShippingType {
    match recommend_shipping_type(total_cbm, sea_to_air_limit) {
        ShippingType::Air => ShippingType::Air,
        ShippingType::Sea => preferred.unwrap_or(ShippingType::Sea),
    }
}

fn positive_or_zero(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A volume expressed in the units the warehouse staff use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CbmConversion {
    pub m3: f64,
    pub cm3: f64,
    /// Rounded to 3 places.
    pub ft3: f64,
    /// Rounded to 2 places.
    pub liters: f64,
}

pub fn convert_cbm(m3: f64) -> CbmConversion {
    CbmConversion {
        m3,
        cm3: m3 * CM3_PER_M3,
        ft3: round_to(m3 * FT3_PER_M3, 3),
        liters: round_to(m3 * LITERS_PER_M3, 2),
    }
}

/// Cube-shaped cartons stocked at the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardBox {
    Small,
    Medium,
    Large,
    XLarge,
}

impl StandardBox {
    pub const ALL: [StandardBox; 4] = [
        StandardBox::Small,
        StandardBox::Medium,
        StandardBox::Large,
        StandardBox::XLarge,
    ];

    /// Side length in centimetres.
    pub fn side_cm(&self) -> f64 {
        match self {
            StandardBox::Small => 20.0,
            StandardBox::Medium => 30.0,
            StandardBox::Large => 40.0,
            StandardBox::XLarge => 50.0,
        }
    }

    pub fn cbm(&self) -> f64 {
        let side = self.side_cm();
        cbm_of(side, side, side)
    }

    pub fn dimensions(&self) -> BoxDimensions {
        let side = self.side_cm();
        BoxDimensions::new(side, side, side)
    }
}

/// Fraction of a box's volume actually used, rounded to 4 places.
///
/// A zero (or negative) box volume yields `0`.
pub fn packing_efficiency(items_volume: f64, box_volume: f64) -> f64 {
    if box_volume <= 0.0 {
        return 0.0;
    }
    round_to(items_volume / box_volume, 4)
}

/// Outer dimensions of one box, in centimetres, with its volume in m³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub cbm: f64,
}

impl BoxDimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            cbm: cbm_of(width, height, depth),
        }
    }
}

/// Box of `required_volume_cm3` whose sides follow `aspect_ratio` (`"W:H:D"`, e.g. `"2:2:1"`).
///
/// Sides are rounded to 0.1 cm, so the resulting volume is approximate.
pub fn optimize_box_dimensions(required_volume_cm3: f64, aspect_ratio: &str) -> Result<BoxDimensions> {
    if !(required_volume_cm3 > 0.0) || !required_volume_cm3.is_finite() {
        return Err(IntakeError::UnitsError(format!(
            "required volume must be positive, got {}",
            required_volume_cm3
        )));
    }

    let ratios = aspect_ratio
        .split(':')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| IntakeError::UnitsError(format!("aspect ratio '{}': {}", aspect_ratio, e)))?;

    let [w, h, d] = match ratios.as_slice() {
        [w, h, d] if *w > 0.0 && *h > 0.0 && *d > 0.0 => [*w, *h, *d],
        _ => {
            return Err(IntakeError::UnitsError(format!(
                "aspect ratio must be three positive parts 'W:H:D', got '{}'",
                aspect_ratio
            )))
        }
    };

    // V = k³ · w · h · d
    let k = (required_volume_cm3 / (w * h * d)).cbrt();

    Ok(BoxDimensions::new(
        round_to(k * w, 1),
        round_to(k * h, 1),
        round_to(k * d, 1),
    ))
}

/// Which packing layout takes less space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutRecommendation {
    UseAlternative,
    KeepCurrent,
}

/// Several current boxes compared against one alternative box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxComparison {
    pub current_total_cbm: f64,
    pub alternative_cbm: f64,
    pub cbm_savings: f64,
    /// Savings as a percentage of the current total; `0` when the current total is `0`.
    pub savings_percentage: f64,
    pub recommendation: LayoutRecommendation,
}

impl BoxComparison {
    pub fn is_alternative_better(&self) -> bool {
        self.recommendation == LayoutRecommendation::UseAlternative
    }
}

pub fn compare_box_layouts(current: &[BoxDimensions], alternative: &BoxDimensions) -> BoxComparison {
    let current_total_cbm: f64 = current
        .iter()
        .map(|b| cbm_of(b.width, b.height, b.depth))
        .sum();
    let alternative_cbm = cbm_of(alternative.width, alternative.height, alternative.depth);
    let cbm_savings = current_total_cbm - alternative_cbm;

    let savings_percentage = if current_total_cbm > 0.0 {
        round_to(cbm_savings / current_total_cbm, 4) * 100.0
    } else {
        0.0
    };

    let recommendation = if alternative_cbm < current_total_cbm {
        LayoutRecommendation::UseAlternative
    } else {
        LayoutRecommendation::KeepCurrent
    };

    BoxComparison {
        current_total_cbm,
        alternative_cbm,
        cbm_savings,
        savings_percentage,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(w: f64, h: f64, d: f64, qty: u32) -> OrderItem {
        OrderItem::new("box").with_dimensions(w, h, d).with_quantity(qty)
    }

    #[test]
    fn test_item_cbm() {
        assert_eq!(item_cbm(&boxed(300.0, 100.0, 100.0, 1)), 3.0);
        assert_eq!(item_cbm(&boxed(100.0, 100.0, 2900.0, 1)), 29.0);
    }

    #[test]
    fn test_item_cbm_missing_dimension_is_zero() {
        assert_eq!(item_cbm(&boxed(0.0, 100.0, 100.0, 1)), 0.0);
        assert_eq!(item_cbm(&boxed(100.0, -1.0, 100.0, 1)), 0.0);
        assert_eq!(item_cbm(&boxed(100.0, 100.0, f64::NAN, 1)), 0.0);
        assert_eq!(item_cbm(&OrderItem::new("empty")), 0.0);
    }

    #[test]
    fn test_total_cbm_zero_quantity_counts_as_one() {
        let items = vec![boxed(100.0, 100.0, 100.0, 0), boxed(100.0, 100.0, 100.0, 3)];
        assert_eq!(total_cbm(&items), 4.0);
    }

    #[test]
    fn test_total_weight() {
        let items = vec![
            OrderItem::new("a").with_weight(2.5).with_quantity(2),
            OrderItem::new("b").with_weight(-4.0).with_quantity(5),
            OrderItem::new("c").with_weight(1.0).with_quantity(0),
        ];
        assert_eq!(total_weight(&items), 6.0);
    }

    #[test]
    fn test_total_value_skips_other_currencies() {
        let items = vec![
            OrderItem::new("a").with_price(1000.0, Currency::Thb).with_quantity(1),
            OrderItem::new("b").with_price(50_000.0, Currency::Krw).with_quantity(1),
            OrderItem::new("c").with_price(200.0, Currency::Thb).with_quantity(0),
        ];
        assert_eq!(total_value(&items, Currency::Thb), 1200.0);
        assert_eq!(total_value(&items, Currency::Krw), 50_000.0);
        assert_eq!(total_value(&items, Currency::Usd), 0.0);
    }

    #[test]
    fn test_subtotal_uses_literal_quantity() {
        let items = vec![
            OrderItem::new("a").with_price(10.0, Currency::Usd).with_quantity(3),
            OrderItem::new("b").with_price(99.0, Currency::Thb).with_quantity(0),
        ];
        assert_eq!(subtotal(&items), 30.0);
    }

    #[test]
    fn test_normalize_items_is_idempotent() {
        let mut items = vec![boxed(300.0, 100.0, 100.0, 1), boxed(0.0, 10.0, 10.0, 1)];
        normalize_items(&mut items);
        let first = items.clone();
        normalize_items(&mut items);

        assert_eq!(items, first);
        assert_eq!(items[0].cbm, Some(3.0));
        assert_eq!(items[1].cbm, Some(0.0));
    }

    #[test]
    fn test_recommend_shipping_type_boundary() {
        assert_eq!(recommend_shipping_type(29.0, 29.0), ShippingType::Sea);
        assert_eq!(recommend_shipping_type(29.000001, 29.0), ShippingType::Air);
    }

    #[test]
    fn test_preferred_mode_unless_volume_forces_air() {
        assert_eq!(determine_shipping_type(1.0, Some(ShippingType::Air), 29.0), ShippingType::Air);
        assert_eq!(determine_shipping_type(1.0, Some(ShippingType::Sea), 29.0), ShippingType::Sea);
        assert_eq!(determine_shipping_type(33.2, Some(ShippingType::Sea), 29.0), ShippingType::Air);
        assert_eq!(determine_shipping_type(29.0, None, 29.0), ShippingType::Sea);
        assert_eq!(determine_shipping_type(29.5, None, 29.0), ShippingType::Air);
    }

    #[test]
    fn test_convert_cbm() {
        let conversion = convert_cbm(2.0);
        assert_eq!(conversion.cm3, 2_000_000.0);
        assert_eq!(conversion.ft3, 70.629);
        assert_eq!(conversion.liters, 2000.0);
    }

    #[test]
    fn test_standard_boxes() {
        assert!((StandardBox::Small.cbm() - 0.008).abs() < 1e-12);
        assert!((StandardBox::Medium.cbm() - 0.027).abs() < 1e-12);
        assert!((StandardBox::Large.cbm() - 0.064).abs() < 1e-12);
        assert!((StandardBox::XLarge.cbm() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_packing_efficiency() {
        assert_eq!(packing_efficiency(0.5, 2.0), 0.25);
        assert_eq!(packing_efficiency(1.0, 3.0), 0.3333);
        assert_eq!(packing_efficiency(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_optimize_box_dimensions() {
        let dims = optimize_box_dimensions(32_000.0, "2:2:1").unwrap();
        assert_eq!(dims.width, 40.0);
        assert_eq!(dims.height, 40.0);
        assert_eq!(dims.depth, 20.0);
        assert!((dims.cbm - 0.032).abs() < 1e-9);
    }

    #[test]
    fn test_optimize_box_dimensions_rejects_bad_ratio() {
        assert!(optimize_box_dimensions(1000.0, "2:2").is_err());
        assert!(optimize_box_dimensions(1000.0, "2:x:1").is_err());
        assert!(optimize_box_dimensions(1000.0, "2:0:1").is_err());
        assert!(optimize_box_dimensions(0.0, "1:1:1").is_err());
    }

    #[test]
    fn test_compare_box_layouts() {
        let current = vec![StandardBox::XLarge.dimensions(), StandardBox::XLarge.dimensions()];
        let alternative = BoxDimensions::new(100.0, 50.0, 40.0);
        let comparison = compare_box_layouts(&current, &alternative);

        assert!(comparison.is_alternative_better());
        assert!((comparison.cbm_savings - 0.05).abs() < 1e-9);
        assert!((comparison.savings_percentage - 20.0).abs() < 1e-9);

        let empty = compare_box_layouts(&[], &alternative);
        assert_eq!(empty.savings_percentage, 0.0);
        assert_eq!(empty.recommendation, LayoutRecommendation::KeepCurrent);
    }
}
