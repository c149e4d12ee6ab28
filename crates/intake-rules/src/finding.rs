//! Findings raised by the business rules
//!
//! A finding is one rule outcome worth showing to the user: which family raised it,
//! how severe it is, the message, and the remediation actions on offer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule family a finding belongs to.
///
/// Findings are replaced per family on re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Family {
    Cbm,
    Thb,
    MemberCode,
    Weight,
    /// Reserved for dimension checks; no rule in the current set raises it.
    Dimensions,
}

impl Family {
    /// The families `validate_all` evaluates, in evaluation order.
    pub const EVALUATED: [Family; 4] = [Family::Cbm, Family::Thb, Family::MemberCode, Family::Weight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Cbm => "cbm",
            Family::Thb => "thb",
            Family::MemberCode => "memberCode",
            Family::Weight => "weight",
            Family::Dimensions => "dimensions",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a finding.
///
/// `Info` never fails a family and `Error` always does. `Warning` depends on the
/// family; see [`crate::rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info = 0,
    Warning = 1,
    Error = 2,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What a remediation action asks the collaborator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionEffect {
    ReduceItems,
    ProceedWithAir,
    AddRecipientInfo,
    EnterMemberCode,
    AcceptDelay,
}

impl ActionEffect {
    /// Guidance shown once the user picks the action.
    pub fn hint(&self) -> &'static str {
        match self {
            ActionEffect::ReduceItems => {
                "Reduce item quantities or switch to smaller items."
            }
            ActionEffect::ProceedWithAir => "Air freight delivers faster.",
            ActionEffect::AddRecipientInfo => {
                "Enter the additional details in the recipient information section."
            }
            ActionEffect::EnterMemberCode => {
                "Enter the member code you received when you signed up."
            }
            ActionEffect::AcceptDelay => {
                "Shipping delay accepted; the order will proceed."
            }
        }
    }
}

/// A remediation the user can pick from a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingAction {
    pub label: String,
    pub effect: ActionEffect,
    #[serde(default)]
    pub primary: bool,
}

impl FindingAction {
    pub fn new(label: impl Into<String>, effect: ActionEffect) -> Self {
        Self {
            label: label.into(),
            effect,
            primary: false,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }
}

/// A single validation outcome record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Unique per finding, regenerated on every evaluation pass.
    pub id: String,
    pub family: Family,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<FindingAction>,
    /// 1-based position of the offending item, for per-item rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
    pub timestamp: DateTime<Utc>,
}

impl Finding {
    pub fn new(
        family: Family,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("finding_{}", uuid::Uuid::new_v4().simple()),
            family,
            severity,
            title: title.into(),
            message: message.into(),
            details: None,
            actions: Vec::new(),
            item_index: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_action(mut self, action: FindingAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn for_item(mut self, index: usize) -> Self {
        self.item_index = Some(index);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Content identity, ignoring `id` and `timestamp`.
    pub fn key(&self) -> FindingKey {
        FindingKey {
            family: self.family,
            severity: self.severity,
            item_index: self.item_index,
            title: self.title.clone(),
            message: self.message.clone(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}/{}] {}: {}", self.family, self.severity, self.title, self.message)
    }
}

/// What makes two findings "the same" across evaluation passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FindingKey {
    pub family: Family,
    pub severity: Severity,
    pub item_index: Option<usize>,
    pub title: String,
    pub message: String,
}
