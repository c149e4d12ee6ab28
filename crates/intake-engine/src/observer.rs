//! Debounced re-validation
//!
//! Interactive order forms mutate the draft on every keystroke. [`ChangeObserver`]
//! collapses a burst of changes into one `validate_all` run: each
//! [`ChangeObserver::schedule`] aborts the pending timer and arms a new one, so only
//! the last scheduled draft is validated. At most one timer is pending per observer.
//!
//! Outcomes are published on a `tokio::sync::watch` channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

use intake_core::{OrderItem, ShippingInfo};
use intake_rules::{Finding, ValidationAggregator, ValidationResult};

use crate::config::EngineConfig;

/// One completed validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedValidation {
    /// Sequence number of the `schedule`/`validate_now` call that produced this run.
    pub generation: u64,
    pub result: ValidationResult,
    pub findings: Vec<Finding>,
    /// The validated draft, with its CBM cache refreshed.
    pub items: Vec<OrderItem>,
}

pub struct ChangeObserver {
    aggregator: Arc<AsyncMutex<ValidationAggregator>>,
    window: Duration,
    generation: Arc<AtomicU64>,
    completed: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    tx: Arc<watch::Sender<Option<ObservedValidation>>>,
}

impl ChangeObserver {
    pub fn new(aggregator: ValidationAggregator, window: Duration) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            aggregator: Arc::new(AsyncMutex::new(aggregator)),
            window,
            generation: Arc::new(AtomicU64::new(0)),
            completed: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            tx: Arc::new(tx),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(ValidationAggregator::new(config.thresholds), config.debounce())
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Shared handle to the aggregator the observer validates with.
    pub fn aggregator(&self) -> Arc<AsyncMutex<ValidationAggregator>> {
        Arc::clone(&self.aggregator)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ObservedValidation>> {
        self.tx.subscribe()
    }

    /// Most recently published run, if any.
    pub fn latest(&self) -> Option<ObservedValidation> {
        self.tx.borrow().clone()
    }

    /// Number of validation runs that have completed.
    pub fn completed_runs(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    /// Arm the debounce timer for this draft, replacing any pending one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, items: Vec<OrderItem>, shipping: ShippingInfo) {
        let generation = self.next_generation();
        let aggregator = Arc::clone(&self.aggregator);
        let current = Arc::clone(&self.generation);
        let completed = Arc::clone(&self.completed);
        let tx = Arc::clone(&self.tx);
        let window = self.window;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;

            let mut aggregator = aggregator.lock().await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            let observed = run(&mut aggregator, generation, items, &shipping);
            drop(aggregator);

            completed.fetch_add(1, Ordering::SeqCst);
            tx.send_replace(Some(observed));
        });

        if let Some(previous) = self.lock_pending().replace(handle) {
            previous.abort();
        }
        tracing::debug!(generation, window_ms = window.as_millis() as u64, "revalidation scheduled");
    }

    /// Abort the pending timer. Returns `true` if one was still waiting.
    pub fn cancel(&self) -> bool {
        self.next_generation();
        match self.lock_pending().take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Cancel any pending timer and validate `items` right away.
    pub async fn validate_now(&self, items: Vec<OrderItem>, shipping: ShippingInfo) -> ObservedValidation {
        self.cancel();
        let generation = self.next_generation();

        let mut aggregator = self.aggregator.lock().await;
        let observed = run(&mut aggregator, generation, items, &shipping);
        drop(aggregator);

        self.completed.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(Some(observed.clone()));
        observed
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ChangeObserver {
    fn drop(&mut self) {
        if let Some(handle) = self.lock_pending().take() {
            handle.abort();
        }
    }
}

fn run(
    aggregator: &mut ValidationAggregator,
    generation: u64,
    mut items: Vec<OrderItem>,
    shipping: &ShippingInfo,
) -> ObservedValidation {
    let result = aggregator.validate_all(&mut items, shipping);
    ObservedValidation {
        generation,
        result,
        findings: aggregator.findings().to_vec(),
        items,
    }
}
