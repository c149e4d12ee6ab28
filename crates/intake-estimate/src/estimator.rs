//! Cost estimation
//!
//! Produces a [`CostBreakdown`] from the order items alone. The breakdown is purely
//! derived: calling [`CostEstimator::estimate`] again on the same items gives the
//! same numbers, and nothing is rounded along the way.

use serde::{Deserialize, Serialize};

use intake_core::units::{recommend_shipping_type, subtotal, total_cbm, total_weight};
use intake_core::{OrderItem, ShippingType, Thresholds};

use crate::rates::CostRates;

/// Derived costs for an order draft.
///
/// `total == subtotal + base_shipping_fee + additional_fee + tax`, summed in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Raw Σ unit price × quantity, with no currency conversion.
    pub subtotal: f64,
    pub total_weight: f64,
    #[serde(rename = "totalCBM")]
    pub total_cbm: f64,
    pub shipping_type: ShippingType,
    pub base_shipping_fee: f64,
    pub additional_fee: f64,
    pub tax: f64,
    pub total: f64,
    pub requires_extra_recipient_info: bool,
    pub cbm_exceeded: bool,
}

/// Stateless estimator over a rate card and the shared thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostEstimator {
    rates: CostRates,
    thresholds: Thresholds,
}

impl CostEstimator {
    pub fn new(rates: CostRates, thresholds: Thresholds) -> Self {
        Self { rates, thresholds }
    }

    pub fn rates(&self) -> &CostRates {
        &self.rates
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn estimate(&self, items: &[OrderItem]) -> CostBreakdown {
        let rates = &self.rates;

        let subtotal = subtotal(items);
        let total_weight = total_weight(items);
        let total_cbm = total_cbm(items);

        let sea_to_air_limit = self.thresholds.cbm.sea_to_air_limit;
        let shipping_type = recommend_shipping_type(total_cbm, sea_to_air_limit);
        let base_shipping_fee = match shipping_type {
            ShippingType::Air => total_weight * rates.air_rate_per_kg,
            ShippingType::Sea => total_cbm * rates.sea_rate_per_cbm,
        };

        let thb_value = subtotal * rates.thb_exchange_rate;
        let requires_extra_recipient_info = thb_value > self.thresholds.thb.extra_info_required;
        let additional_fee = if requires_extra_recipient_info {
            subtotal * rates.surcharge_rate
        } else {
            0.0
        };

        let tax = subtotal * rates.tax_rate;
        let total = subtotal + base_shipping_fee + additional_fee + tax;

        tracing::debug!(
            subtotal,
            total_cbm,
            total_weight,
            %shipping_type,
            total,
            "estimated order cost"
        );

        CostBreakdown {
            subtotal,
            total_weight,
            total_cbm,
            shipping_type,
            base_shipping_fee,
            additional_fee,
            tax,
            total,
            requires_extra_recipient_info,
            cbm_exceeded: total_cbm > sea_to_air_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::Currency;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_empty_order() {
        let breakdown = CostEstimator::default().estimate(&[]);
        assert_eq!(breakdown.total, 0.0);
        assert_eq!(breakdown.shipping_type, ShippingType::Sea);
        assert!(!breakdown.requires_extra_recipient_info);
        assert!(!breakdown.cbm_exceeded);
    }

    #[test]
    fn test_sea_freight() {
        let items = vec![OrderItem::new("box")
            .with_dimensions(100.0, 100.0, 100.0)
            .with_quantity(2)
            .with_weight(10.0)
            .with_price(10.0, Currency::Usd)];
        let breakdown = CostEstimator::default().estimate(&items);

        assert_eq!(breakdown.shipping_type, ShippingType::Sea);
        assert_eq!(breakdown.total_cbm, 2.0);
        assert_eq!(breakdown.total_weight, 20.0);
        assert_eq!(breakdown.base_shipping_fee, 100_000.0);
        assert_eq!(breakdown.subtotal, 20.0);
        // 20 × 35 = 700 THB, under the cutoff
        assert_eq!(breakdown.additional_fee, 0.0);
        assert!(approx(breakdown.tax, 2.0));
        assert!(approx(breakdown.total, 100_022.0));
    }

    #[test]
    fn test_air_freight_above_limit() {
        let items = vec![
            OrderItem::new("a").with_dimensions(320.0, 100.0, 100.0).with_weight(5.0),
            OrderItem::new("b").with_dimensions(300.0, 100.0, 100.0).with_quantity(10).with_weight(2.0),
        ];
        let breakdown = CostEstimator::default().estimate(&items);

        assert!(approx(breakdown.total_cbm, 33.2));
        assert!(breakdown.cbm_exceeded);
        assert_eq!(breakdown.shipping_type, ShippingType::Air);
        assert_eq!(breakdown.total_weight, 25.0);
        assert_eq!(breakdown.base_shipping_fee, 375_000.0);
    }

    #[test]
    fn test_exactly_at_limit_stays_sea() {
        let items = vec![OrderItem::new("a").with_dimensions(100.0, 100.0, 2900.0)];
        let breakdown = CostEstimator::default().estimate(&items);

        assert_eq!(breakdown.total_cbm, 29.0);
        assert!(!breakdown.cbm_exceeded);
        assert_eq!(breakdown.shipping_type, ShippingType::Sea);
        assert_eq!(breakdown.base_shipping_fee, 29.0 * 50_000.0);
    }

    #[test]
    fn test_surcharge_uses_converted_value() {
        // 42.86 × 35 = 1500.1 THB → over the cutoff
        let over = vec![OrderItem::new("a").with_price(42.86, Currency::Usd)];
        let breakdown = CostEstimator::default().estimate(&over);
        assert!(breakdown.requires_extra_recipient_info);
        assert!(approx(breakdown.additional_fee, 42.86 * 0.02));

        // 42 × 35 = 1470 THB → under
        let under = vec![OrderItem::new("a").with_price(42.0, Currency::Thb)];
        let breakdown = CostEstimator::default().estimate(&under);
        assert!(!breakdown.requires_extra_recipient_info);
        assert_eq!(breakdown.additional_fee, 0.0);
    }

    #[test]
    fn test_limit_follows_thresholds() {
        let mut thresholds = Thresholds::default();
        thresholds.cbm.sea_to_air_limit = 1.0;
        let estimator = CostEstimator::new(CostRates::default(), thresholds);

        let items = vec![OrderItem::new("a").with_dimensions(200.0, 100.0, 100.0).with_weight(4.0)];
        let breakdown = estimator.estimate(&items);
        assert_eq!(breakdown.shipping_type, ShippingType::Air);
        assert_eq!(breakdown.base_shipping_fee, 60_000.0);
    }

    #[test]
    fn test_zero_quantity_line_adds_no_subtotal() {
        let items = vec![OrderItem::new("a")
            .with_price(500.0, Currency::Thb)
            .with_quantity(0)
            .with_dimensions(100.0, 100.0, 100.0)];
        let breakdown = CostEstimator::default().estimate(&items);

        assert_eq!(breakdown.subtotal, 0.0);
        // volume still counts the line once
        assert_eq!(breakdown.total_cbm, 1.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&CostEstimator::default().estimate(&[])).unwrap();
        assert!(json.contains("\"totalCBM\""));
        assert!(json.contains("\"baseShippingFee\""));
        assert!(json.contains("\"requiresExtraRecipientInfo\""));
        assert!(json.contains("\"shippingType\":\"sea\""));
    }
}
