//! Notification side channel
//!
//! The aggregator calls every registered [`FindingSink`] once per finding it raises.
//! Collaborators use this to surface toasts or alerts; the engine itself never
//! formats anything beyond the finding's own text.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::Level;

use crate::finding::{Family, Finding, Severity};

/// Receives findings as they are raised.
pub trait FindingSink: Send + Sync {
    fn notify(&self, finding: &Finding);
}

impl<F> FindingSink for F
where
    F: Fn(&Finding) + Send + Sync,
{
    fn notify(&self, finding: &Finding) {
        self(finding)
    }
}

/// Visual kind of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Error,
    Warning,
    Info,
}

/// A toast-style notification derived from a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub finding_id: String,
    pub family: Family,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// How long the toast stays on screen.
    pub duration_ms: u64,
}

impl Notification {
    pub fn from_finding(finding: &Finding) -> Self {
        let (kind, duration_ms) = match finding.severity {
            Severity::Error => (NotificationKind::Error, 8000),
            Severity::Warning => (NotificationKind::Warning, 8000),
            Severity::Info => (NotificationKind::Info, 4000),
        };

        Self {
            finding_id: finding.id.clone(),
            family: finding.family,
            kind,
            title: finding.title.clone(),
            message: finding.message.clone(),
            duration_ms,
        }
    }
}

/// Sink that records a [`Notification`] per finding.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Take everything recorded so far, leaving the log empty.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FindingSink for NotificationLog {
    fn notify(&self, finding: &Finding) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification::from_finding(finding));
    }
}

/// Sink that forwards findings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    /// Log level a finding of `severity` is emitted at.
    pub fn level_for(severity: Severity) -> Level {
        match severity {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARN,
            Severity::Info => Level::INFO,
        }
    }
}

impl FindingSink for TracingSink {
    fn notify(&self, finding: &Finding) {
        let level = Self::level_for(finding.severity);
        if level == Level::ERROR {
            tracing::error!(family = %finding.family, id = %finding.id, "{}", finding.message);
        } else if level == Level::WARN {
            tracing::warn!(family = %finding.family, id = %finding.id, "{}", finding.message);
        } else {
            tracing::info!(family = %finding.family, id = %finding.id, "{}", finding.message);
        }
    }
}
