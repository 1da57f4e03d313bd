//! CRUD over the persisted submission collection.
//!
//! Every operation reads, modifies, and rewrites the whole ordered
//! sequence — there is no partial-record API.  `create` and `update` also
//! refresh the draft projection so review edits are reflected at the next
//! hydration.

use chrono::Utc;
use tracing::{debug, info};

use formstash_shared::FormSnapshot;

use crate::error::Result;
use crate::models::{SubmissionId, SubmissionRecord};
use crate::store::FormStore;

pub struct Submissions {
    store: FormStore,
}

impl Submissions {
    pub fn new(store: FormStore) -> Self {
        Self { store }
    }

    /// All persisted submissions, oldest first.
    pub async fn list(&self) -> Vec<SubmissionRecord> {
        self.store.read_all_collection_entries().await
    }

    /// Snapshot of one submission, `None` when the id is gone.
    pub async fn get_by_id(&self, id: &SubmissionId) -> Option<FormSnapshot> {
        self.list()
            .await
            .into_iter()
            .find(|r| &r.id == id)
            .map(|r| r.data)
    }

    /// Persist a new submission and refresh the draft projection.  This is
    /// the only path that touches the constrained tier on create.
    pub async fn create(&self, snapshot: &FormSnapshot) -> Result<SubmissionId> {
        let id = self.store.write_collection_entry(snapshot).await?;
        self.store.write_draft_projection(snapshot).await;
        Ok(id)
    }

    /// Replace the matching record's snapshot, refresh its `submitted_at`,
    /// and refresh the draft projection with the new snapshot.
    ///
    /// Returns `false` without touching storage when the id is absent —
    /// the record may have been deleted by another tab sharing the tiers.
    pub async fn update_by_id(&self, id: &SubmissionId, snapshot: &FormSnapshot) -> Result<bool> {
        let mut records = self.store.read_all_collection_entries().await;

        let Some(record) = records.iter_mut().find(|r| &r.id == id) else {
            debug!(id = %id, "update skipped, id not found");
            return Ok(false);
        };
        record.data = snapshot.clone();
        record.submitted_at = Utc::now();

        self.store.commit_collection(&records)?;
        self.store.write_draft_projection(snapshot).await;
        info!(id = %id, "updated submission");
        Ok(true)
    }

    /// Remove the matching record.  Silent no-op when the id is absent.
    pub async fn delete_by_id(&self, id: &SubmissionId) -> Result<bool> {
        let mut records = self.store.read_all_collection_entries().await;
        let before = records.len();
        records.retain(|r| &r.id != id);

        if records.len() == before {
            debug!(id = %id, "delete skipped, id not found");
            return Ok(false);
        }

        self.store.commit_collection(&records)?;
        info!(id = %id, remaining = records.len(), "deleted submission");
        Ok(true)
    }

    /// Reconstruct the session draft from both tiers.
    pub async fn hydrate(&self) -> Option<FormSnapshot> {
        self.store.hydrate().await
    }

    /// Erase both tiers.
    pub async fn clear(&self) {
        self.store.clear_all().await
    }
}
