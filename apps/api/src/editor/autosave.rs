#![allow(dead_code)]

//! Autosave coordinator — trailing-edge debounce over draft snapshots.
//!
//! Discipline: one owned timer per draft. Every new snapshot aborts the
//! pending persist task and schedules a fresh one, so an older snapshot can
//! never land after a newer one. Only the snapshot present when the quiet
//! period elapses is persisted; rapid edits collapse into a single write.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::warn;
use uuid::Uuid;

use crate::models::cv::CvPatch;
use crate::presentation::{to_patch, CvDraft};
use crate::store::CvStore;

/// Quiet period between the last edit and the persist.
pub const QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Sink for debounced draft writes. The production implementation reshapes
/// the patch onto the stored document; tests substitute a recorder.
#[async_trait]
pub trait DraftPersister: Send + Sync {
    async fn persist(&self, cv_id: Uuid, patch: CvPatch) -> anyhow::Result<()>;
}

/// Persists through the document store, applying the top-level merge the
/// update endpoint performs.
pub struct StorePersister {
    store: Arc<dyn CvStore>,
    owner_id: Uuid,
}

impl StorePersister {
    pub fn new(store: Arc<dyn CvStore>, owner_id: Uuid) -> Self {
        Self { store, owner_id }
    }
}

#[async_trait]
impl DraftPersister for StorePersister {
    async fn persist(&self, cv_id: Uuid, patch: CvPatch) -> anyhow::Result<()> {
        let existing = self
            .store
            .get(self.owner_id, cv_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("CV {cv_id} not found"))?;

        self.store
            .update(self.owner_id, cv_id, patch.apply(existing.document))
            .await?;
        Ok(())
    }
}

pub struct AutosaveCoordinator {
    cv_id: Uuid,
    quiet_period: Duration,
    persister: Arc<dyn DraftPersister>,
    // At most one scheduled persist exists at any time.
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutosaveCoordinator {
    pub fn new(cv_id: Uuid, persister: Arc<dyn DraftPersister>) -> Self {
        Self::with_quiet_period(cv_id, persister, QUIET_PERIOD)
    }

    pub fn with_quiet_period(
        cv_id: Uuid,
        persister: Arc<dyn DraftPersister>,
        quiet_period: Duration,
    ) -> Self {
        Self {
            cv_id,
            quiet_period,
            persister,
            pending: Mutex::new(None),
        }
    }

    /// Accepts a new draft snapshot: cancel-then-reschedule.
    ///
    /// Must be called from within a tokio runtime.
    pub fn enqueue(&self, snapshot: &CvDraft) {
        let mut pending = self.pending.lock().expect("autosave timer lock poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let persister = Arc::clone(&self.persister);
        let snapshot = snapshot.clone();
        let cv_id = self.cv_id;
        let quiet_period = self.quiet_period;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let patch = to_patch(&snapshot);
            if let Err(e) = persister.persist(cv_id, patch).await {
                // Acceptable loss: the draft itself is untouched, and the
                // next edit re-arms the cycle. No retry queue.
                warn!("Autosave failed for CV {cv_id}: {e}");
            }
        }));
    }
}

impl Drop for AutosaveCoordinator {
    fn drop(&mut self) {
        // Session teardown cancels the in-flight timer.
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
