//! Debounce scheduler — collapses repeated actuation requests per key.
//!
//! This is a best-effort coalescing debounce, not a most-recent-wins one:
//! while an entry is pending for a key, later requests for that key are
//! dropped and the first request's parameters stay authoritative. Once an
//! entry is created it always fires; cancellation is not supported.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hestia_domain::error::HestiaError;

use hestia_app::ports::{ServiceDispatcher, StateStore};

use crate::executor::RuleExecutor;
use crate::rule::ThresholdRule;

/// Owns the pending-entry registry and executes rules after their delay.
pub struct DebounceScheduler<S, D> {
    pub(crate) executor: Arc<RuleExecutor<S, D>>,
    pending: Arc<Mutex<HashMap<String, tokio::task::JoinHandle<()>>>>,
}

impl<S, D> DebounceScheduler<S, D>
where
    S: StateStore + 'static,
    D: ServiceDispatcher + 'static,
{
    /// Create a scheduler with an empty registry.
    pub fn new(executor: RuleExecutor<S, D>) -> Self {
        Self {
            executor: Arc::new(executor),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Request an actuation.
    ///
    /// `delay == 0` executes synchronously. Otherwise the rule is captured
    /// in a single-shot timer keyed by [`ThresholdRule::debounce_key`]; a
    /// request for a key that is already pending is silently dropped.
    ///
    /// # Errors
    ///
    /// Returns dispatch errors only on the synchronous path; delayed
    /// executions log their errors instead.
    pub async fn trigger(&self, rule: ThresholdRule) -> Result<(), HestiaError> {
        if rule.delay == 0 {
            return self.executor.execute(&rule).await;
        }

        let key = rule.debounce_key();
        let mut pending = self.lock();
        if pending.contains_key(&key) {
            tracing::debug!(%key, "actuation already pending, request dropped");
            return Ok(());
        }

        let executor = Arc::clone(&self.executor);
        let registry = Arc::clone(&self.pending);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(rule.delay)).await;
            if let Err(err) = executor.execute(&rule).await {
                tracing::error!(key = %task_key, error = %err, "delayed actuation failed");
            }
            registry
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .remove(&task_key);
        });
        pending.insert(key, handle);
        Ok(())
    }

    /// Number of entries currently pending.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.lock().len()
    }

    /// Drop the registry (teardown). Already-scheduled timers still fire;
    /// only the bookkeeping is released.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, tokio::task::JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
