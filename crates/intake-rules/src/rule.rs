//! Rule evaluators, one per family
//!
//! Each evaluator is a pure function of the order data and the thresholds. It returns
//! the family's pass/fail flag together with the complete set of findings for that
//! family; the aggregator swaps that set in wholesale.
//!
//! | Family     | Hard limit crossed        | Near limit        | Fails family on |
//! |------------|---------------------------|-------------------|-----------------|
//! | CBM        | error                     | warning           | hard limit      |
//! | THB        | warning                   | info              | hard limit      |
//! | memberCode | warning (missing code)    | n/a               | missing code    |
//! | weight     | error (per item)          | warning (per item)| any hard limit  |
//!
//! All comparisons are strict (`>`): a value equal to a limit does not cross it.

use intake_core::units::{total_cbm, total_value};
use intake_core::{Currency, OrderItem, ShippingInfo, Thresholds};

use crate::finding::{ActionEffect, Family, Finding, FindingAction, Severity};

/// Result of evaluating one family.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub family: Family,
    pub valid: bool,
    pub findings: Vec<Finding>,
}

impl RuleOutcome {
    fn pass(family: Family) -> Self {
        Self {
            family,
            valid: true,
            findings: Vec::new(),
        }
    }

    /// Most severe finding in this outcome, if any.
    pub fn worst(&self) -> Option<&Finding> {
        self.findings.iter().max_by_key(|f| f.severity)
    }
}

/// Total order volume against the sea→air limit.
pub fn evaluate_cbm(items: &[OrderItem], thresholds: &Thresholds) -> RuleOutcome {
    let total = total_cbm(items);
    let limits = &thresholds.cbm;
    tracing::debug!(total_cbm = total, limit = limits.sea_to_air_limit, "evaluating cbm rule");

    if total > limits.sea_to_air_limit {
        tracing::info!(total_cbm = total, "cbm above sea freight limit, shipment converts to air");
        let finding = Finding::new(
            Family::Cbm,
            Severity::Error,
            "CBM threshold exceeded",
            format!(
                "Total CBM is {:.2} m³, exceeding the {} m³ sea freight limit.",
                total, limits.sea_to_air_limit
            ),
        )
        .with_details(
            "Sea freight is not available for this volume; the shipment will be converted \
             to air freight automatically. Additional charges may apply.",
        )
        .with_action(FindingAction::new("Reduce items", ActionEffect::ReduceItems).primary())
        .with_action(FindingAction::new("Proceed with air freight", ActionEffect::ProceedWithAir));

        return RuleOutcome {
            family: Family::Cbm,
            valid: false,
            findings: vec![finding],
        };
    }

    if total > limits.warning_threshold {
        let finding = Finding::new(
            Family::Cbm,
            Severity::Warning,
            "CBM approaching limit",
            format!("Total CBM is {:.2} m³.", total),
        )
        .with_details(format!(
            "This is close to the {} m³ sea freight limit. Adding more items may convert \
             the shipment to air freight.",
            limits.sea_to_air_limit
        ));

        return RuleOutcome {
            family: Family::Cbm,
            valid: true,
            findings: vec![finding],
        };
    }

    RuleOutcome::pass(Family::Cbm)
}

/// Declared value in THB against the customs disclosure limit.
///
/// Only THB-priced items count toward the total; KRW and USD lines are skipped.
pub fn evaluate_thb(items: &[OrderItem], thresholds: &Thresholds) -> RuleOutcome {
    let total = total_value(items, Currency::Thb);
    let limits = &thresholds.thb;
    tracing::debug!(total_thb = total, limit = limits.extra_info_required, "evaluating thb rule");

    if total > limits.extra_info_required {
        let finding = Finding::new(
            Family::Thb,
            Severity::Warning,
            "THB threshold exceeded",
            format!(
                "Total declared value is {} THB, exceeding {} THB.",
                format_amount(total),
                limits.extra_info_required
            ),
        )
        .with_details(
            "Thai customs clearance may require additional recipient information such as \
             a passport or national ID number.",
        )
        .with_action(
            FindingAction::new("Add recipient information", ActionEffect::AddRecipientInfo).primary(),
        );

        return RuleOutcome {
            family: Family::Thb,
            valid: false,
            findings: vec![finding],
        };
    }

    if total > limits.warning_threshold {
        let finding = Finding::new(
            Family::Thb,
            Severity::Info,
            "THB approaching limit",
            format!("Total declared value is {} THB.", format_amount(total)),
        )
        .with_details(format!(
            "This is close to the {} THB limit.",
            limits.extra_info_required
        ));

        return RuleOutcome {
            family: Family::Thb,
            valid: true,
            findings: vec![finding],
        };
    }

    RuleOutcome::pass(Family::Thb)
}

/// Member code presence.
pub fn evaluate_member_code(shipping: &ShippingInfo) -> RuleOutcome {
    tracing::debug!(present = shipping.has_member_code(), "evaluating member code rule");

    if shipping.has_member_code() {
        return RuleOutcome::pass(Family::MemberCode);
    }

    let finding = Finding::new(
        Family::MemberCode,
        Severity::Warning,
        "Member code not provided",
        "No member code was entered.",
    )
    .with_details(
        "Shipments without a member code may be delayed. Please enter the correct member code.",
    )
    .with_action(FindingAction::new("Enter member code", ActionEffect::EnterMemberCode).primary())
    .with_action(FindingAction::new("Accept delay and proceed", ActionEffect::AcceptDelay));

    RuleOutcome {
        family: Family::MemberCode,
        valid: false,
        findings: vec![finding],
    }
}

/// Per-item weight limits.
///
/// Every item is checked independently; one item above the hard limit fails the
/// whole family.
pub fn evaluate_weight(items: &[OrderItem], thresholds: &Thresholds) -> RuleOutcome {
    let limits = &thresholds.weight;
    let mut findings = Vec::new();
    let mut valid = true;

    for (position, item) in items.iter().enumerate() {
        let index = position + 1;

        if item.weight > limits.max_weight {
            tracing::info!(item = index, weight = item.weight, "item above weight limit");
            findings.push(
                Finding::new(
                    Family::Weight,
                    Severity::Error,
                    "Weight limit exceeded",
                    format!(
                        "Item {} weighs {} kg, exceeding the {} kg per-item maximum.",
                        index, item.weight, limits.max_weight
                    ),
                )
                .with_details("This item is too heavy. Split it into several items or reduce its weight.")
                .for_item(index),
            );
            valid = false;
        } else if item.weight > limits.warning_threshold {
            findings.push(
                Finding::new(
                    Family::Weight,
                    Severity::Warning,
                    "Heavy item",
                    format!("Item {} weighs {} kg.", index, item.weight),
                )
                .with_details("Heavy items may incur additional charges.")
                .for_item(index),
            );
        }
    }

    tracing::debug!(items = items.len(), findings = findings.len(), valid, "evaluated weight rule");

    RuleOutcome {
        family: Family::Weight,
        valid,
        findings,
    }
}

/// Group thousands and keep at most two decimals: `2000.0` → `"2,000"`, `1234.5` → `"1,234.5"`.
fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
