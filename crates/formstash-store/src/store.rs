//! Dual-tier persistence of form snapshots.
//!
//! The larger tier holds the full submission collection, payload included,
//! as a JSON array under [`STORAGE_KEY`].  The constrained tier holds at
//! most one record: a media-stripped projection of the most recently
//! written snapshot under [`COOKIE_NAME`], kept as a best-effort draft
//! cache whose failures are logged and swallowed.

use serde::Deserialize;
use tracing::{info, warn};

use formstash_shared::constants::{COOKIE_NAME, STORAGE_KEY};
use formstash_shared::FormSnapshot;

use crate::error::{Result, StoreError};
use crate::hydrate;
use crate::models::{SubmissionId, SubmissionRecord};
use crate::tier::{StorageTier, TierError};
use crate::{CookieTier, MemoryTier};

/// Everything the larger tier may legally hold under [`STORAGE_KEY`]:
/// either the current collection layout or the legacy single-snapshot
/// layout from before submissions were tracked as a history.  Decoded once
/// at the storage boundary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredShape {
    Collection(Vec<SubmissionRecord>),
    Legacy(FormSnapshot),
}

pub struct FormStore {
    collection: Box<dyn StorageTier>,
    draft: Box<dyn StorageTier>,
}

impl FormStore {
    /// Build a store over injected tiers: the larger collection tier and
    /// the constrained draft tier.
    pub fn new(collection: Box<dyn StorageTier>, draft: Box<dyn StorageTier>) -> Self {
        Self { collection, draft }
    }

    /// Fully in-memory store: an unbounded collection tier and a stock
    /// cookie jar.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryTier::new()), Box::new(CookieTier::new()))
    }

    /// Append a snapshot to the collection, returning the fresh record id.
    ///
    /// The whole collection is read, extended, and written back in one
    /// commit, so a rejected write leaves the stored array unchanged.
    pub async fn write_collection_entry(&self, snapshot: &FormSnapshot) -> Result<SubmissionId> {
        let mut records = self.read_all_collection_entries().await;
        let record = SubmissionRecord::new(snapshot.clone());
        let id = record.id.clone();
        records.push(record);
        self.commit_collection(&records)?;
        info!(id = %id, total = records.len(), "persisted submission");
        Ok(id)
    }

    /// Serialize and write the full collection.  Quota rejections from the
    /// tier surface as [`StoreError::QuotaExceeded`].
    pub(crate) fn commit_collection(&self, records: &[SubmissionRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.collection
            .write(STORAGE_KEY, &json)
            .map_err(map_tier_error)
    }

    /// Read the ordered collection, oldest first.
    ///
    /// A legacy bare-snapshot layout is migrated into a single synthesized
    /// record.  Unreadable or corrupt content degrades to an empty
    /// collection, never an error.
    pub async fn read_all_collection_entries(&self) -> Vec<SubmissionRecord> {
        let raw = match self.collection.read(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "collection tier read failed");
                return Vec::new();
            }
        };

        match serde_json::from_str::<StoredShape>(&raw) {
            Ok(StoredShape::Collection(records)) => records,
            Ok(StoredShape::Legacy(snapshot)) => {
                info!("migrating legacy single-snapshot layout");
                vec![SubmissionRecord::new(snapshot)]
            }
            Err(e) => {
                warn!(error = %e, "corrupt collection content, starting empty");
                Vec::new()
            }
        }
    }

    /// Write the media-stripped draft projection to the constrained tier.
    ///
    /// This tier is a cache, not the source of truth: every failure is
    /// logged and swallowed.
    pub async fn write_draft_projection(&self, snapshot: &FormSnapshot) {
        let stripped = snapshot.strip_media_payload();
        let json = match serde_json::to_string(&stripped) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "draft projection serialization failed");
                return;
            }
        };
        if let Err(e) = self.draft.write(COOKIE_NAME, &json) {
            warn!(error = %e, "draft projection write failed");
        }
    }

    /// Read the draft projection.  Absent, expired, and corrupt all
    /// resolve to `None`.
    pub async fn read_draft_projection(&self) -> Option<FormSnapshot> {
        let raw = match self.draft.read(COOKIE_NAME) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "draft tier read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "corrupt draft projection");
                None
            }
        }
    }

    /// Reconstruct the draft snapshot for a new session from both tiers.
    /// `None` means no usable state; the caller starts from the all-empty
    /// default.
    pub async fn hydrate(&self) -> Option<FormSnapshot> {
        let draft = self.read_draft_projection().await;
        let records = self.read_all_collection_entries().await;
        hydrate::resolve(draft, records.last())
    }

    /// Erase both tiers unconditionally.
    pub async fn clear_all(&self) {
        if let Err(e) = self.collection.remove(STORAGE_KEY) {
            warn!(error = %e, "failed to clear collection tier");
        }
        if let Err(e) = self.draft.remove(COOKIE_NAME) {
            warn!(error = %e, "failed to clear draft tier");
        }
    }
}

fn map_tier_error(e: TierError) -> StoreError {
    match e {
        TierError::CapacityExceeded { attempted, limit } => {
            StoreError::QuotaExceeded { attempted, limit }
        }
        TierError::Backend(msg) => StoreError::Backend(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstash_shared::MediaAttachment;

    fn media(name: &str, content: &str) -> MediaAttachment {
        MediaAttachment {
            name: name.to_string(),
            mime_type: "image/png".to_string(),
            size_bytes: content.len() as u64,
            content: content.to_string(),
        }
    }

    fn snapshot_with_media() -> FormSnapshot {
        FormSnapshot {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            description: "d".to_string(),
            image: Some(media("i.png", "data:image/png;base64,AAA")),
            video: Some(media("v.mp4", "data:video/mp4;base64,BBB")),
            ..FormSnapshot::default()
        }
    }

    #[tokio::test]
    async fn test_round_trip_preserves_media_content() {
        let store = FormStore::in_memory();
        let id = store
            .write_collection_entry(&snapshot_with_media())
            .await
            .unwrap();

        let records = store.read_all_collection_entries().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(
            records[0].data.image.as_ref().unwrap().content,
            "data:image/png;base64,AAA"
        );
        assert_eq!(
            records[0].data.video.as_ref().unwrap().content,
            "data:video/mp4;base64,BBB"
        );
    }

    #[tokio::test]
    async fn test_draft_projection_strips_payload() {
        let draft_tier = std::sync::Arc::new(CookieTier::new());
        let store = FormStore::new(Box::new(MemoryTier::new()), Box::new(draft_tier.clone()));
        store.write_draft_projection(&snapshot_with_media()).await;

        // inspect the constrained tier directly, not through the store
        let raw = draft_tier.read(COOKIE_NAME).unwrap().unwrap();
        let projected: FormSnapshot = serde_json::from_str(&raw).unwrap();
        let image = projected.image.unwrap();
        assert_eq!(image.content, "");
        assert_eq!(image.name, "i.png");
        assert_eq!(image.size_bytes, 25);
        assert_eq!(projected.name, "Ada");
        assert_eq!(projected.video.unwrap().content, "");
    }

    #[tokio::test]
    async fn test_legacy_bare_snapshot_migrates() {
        let collection = MemoryTier::new();
        collection
            .write(
                STORAGE_KEY,
                r#"{"name":"x","email":"e","description":"","priority":"high"}"#,
            )
            .unwrap();
        let store = FormStore::new(Box::new(collection), Box::new(CookieTier::new()));

        let records = store.read_all_collection_entries().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data.name, "x");
        assert_eq!(records[0].data.priority, formstash_shared::Priority::High);
        assert!(!records[0].id.as_str().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_degrades_to_empty() {
        let collection = MemoryTier::new();
        collection.write(STORAGE_KEY, "definitely [ not json").unwrap();
        let store = FormStore::new(Box::new(collection), Box::new(CookieTier::new()));
        assert!(store.read_all_collection_entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_quota_failure_leaves_collection_unchanged() {
        // room for one small record, not for one carrying media payload
        let store = FormStore::new(
            Box::new(MemoryTier::with_capacity(400)),
            Box::new(CookieTier::new()),
        );
        let small = FormSnapshot {
            name: "first".to_string(),
            ..FormSnapshot::default()
        };
        store.write_collection_entry(&small).await.unwrap();

        let err = store
            .write_collection_entry(&snapshot_with_media())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));

        let records = store.read_all_collection_entries().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data.name, "first");
    }

    #[tokio::test]
    async fn test_clear_all_erases_both_tiers() {
        let store = FormStore::in_memory();
        store
            .write_collection_entry(&snapshot_with_media())
            .await
            .unwrap();
        store.write_draft_projection(&snapshot_with_media()).await;

        store.clear_all().await;
        assert!(store.read_all_collection_entries().await.is_empty());
        assert!(store.read_draft_projection().await.is_none());
    }
}
