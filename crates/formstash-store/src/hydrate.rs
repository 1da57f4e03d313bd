//! Hydration: reconstructing the draft snapshot at session start.

use formstash_shared::{FormSnapshot, MediaAttachment};

use crate::models::SubmissionRecord;

/// Merge the constrained-tier draft with the latest collection entry into
/// the snapshot a new session starts from.
///
/// The draft wins wherever it carries data, except media payload: the
/// constrained tier structurally cannot hold payload, so a payload-less
/// draft descriptor is replaced by the latest entry's descriptor (or
/// dropped when there is none).  With no draft at all, the latest entry's
/// snapshot is used as-is.
///
/// The two tiers are reconciled by "most recent" convention, not by a
/// shared id, so the backfilled payload may belong to an earlier
/// submission than the draft's scalars.  Pure function of its inputs —
/// calling it again with the same reads yields the same result.
pub fn resolve(
    draft: Option<FormSnapshot>,
    latest: Option<&SubmissionRecord>,
) -> Option<FormSnapshot> {
    match draft {
        Some(mut draft) => {
            draft.image = backfill(draft.image, latest.and_then(|r| r.data.image.clone()));
            draft.video = backfill(draft.video, latest.and_then(|r| r.data.video.clone()));
            Some(draft)
        }
        None => latest.map(|r| r.data.clone()),
    }
}

fn backfill(
    drafted: Option<MediaAttachment>,
    persisted: Option<MediaAttachment>,
) -> Option<MediaAttachment> {
    match drafted {
        Some(media) if media.has_payload() => Some(media),
        _ => persisted,
    }
}
