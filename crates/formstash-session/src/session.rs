//! The form session driver.
//!
//! Owns the in-memory snapshot and the submission manager, and walks the
//! `Editing -> Submitting -> Editing` cycle: a successful submit resets
//! the fields while storage is retained, a failed submit keeps the fields
//! intact and surfaces the error.  Media encodes are guarded by per-field
//! generation tickets so a superseded encode that resolves late cannot
//! clobber newer state.

use thiserror::Error;
use tracing::{debug, info, warn};

use formstash_shared::{FormField, FormSnapshot, MediaAttachment};
use formstash_store::{StoreError, SubmissionId, SubmissionRecord, Submissions};

use crate::action::{reduce, FieldPatch, FormAction};
use crate::validate;

/// Errors surfaced by the session driver.
#[derive(Error, Debug)]
pub enum SessionError {
    /// `submit` was called while required fields are missing.
    #[error("Form is not ready to submit")]
    NotSubmittable,

    /// The persistence layer rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Where the session currently is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Editing,
    Submitting,
}

/// The two media fields an encode can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaField {
    Image,
    Video,
}

impl MediaField {
    fn form_field(&self) -> FormField {
        match self {
            Self::Image => FormField::Image,
            Self::Video => FormField::Video,
        }
    }
}

/// Claim on one media field, handed out when an encode starts.  Only the
/// most recently issued ticket per field may land its result.
#[derive(Debug, Clone, Copy)]
pub struct EncodeTicket {
    field: MediaField,
    generation: u64,
}

pub struct FormSession {
    submissions: Submissions,
    snapshot: FormSnapshot,
    phase: SessionPhase,
    hydrated: bool,
    last_error: Option<String>,
    image_generation: u64,
    video_generation: u64,
}

impl FormSession {
    pub fn new(submissions: Submissions) -> Self {
        Self {
            submissions,
            snapshot: FormSnapshot::default(),
            phase: SessionPhase::Editing,
            hydrated: false,
            last_error: None,
            image_generation: 0,
            video_generation: 0,
        }
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether startup hydration has run (even if it found nothing).
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The error surfaced by the last failed operation, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submittable(&self) -> bool {
        validate::is_submittable(&self.snapshot)
    }

    pub fn field_errors(&self) -> std::collections::BTreeMap<FormField, &'static str> {
        validate::field_errors(&self.snapshot)
    }

    /// Access to the submission history for listing flows.
    pub fn submissions(&self) -> &Submissions {
        &self.submissions
    }

    /// Populate the session from the persisted tiers.  With nothing
    /// stored, the snapshot stays at the all-empty defaults.
    pub async fn hydrate(&mut self) {
        if let Some(stored) = self.submissions.hydrate().await {
            debug!("hydrated session from persisted tiers");
            self.snapshot = reduce(&self.snapshot, FormAction::Hydrate(stored));
        }
        self.hydrated = true;
    }

    /// Dispatch an action against the working snapshot.
    pub fn apply(&mut self, action: FormAction) {
        self.snapshot = reduce(&self.snapshot, action);
    }

    /// Persist the working snapshot as a new submission.
    ///
    /// Success resets the fields to defaults and leaves storage in place.
    /// Failure keeps every field so nothing the user entered is lost.
    pub async fn submit(&mut self) -> Result<SubmissionId, SessionError> {
        if !self.is_submittable() {
            self.last_error = Some("Please fill all required fields".to_string());
            return Err(SessionError::NotSubmittable);
        }

        self.phase = SessionPhase::Submitting;
        let result = self.submissions.create(&self.snapshot).await;
        self.phase = SessionPhase::Editing;

        match result {
            Ok(id) => {
                info!(id = %id, "form submitted");
                self.snapshot = reduce(&self.snapshot, FormAction::Reset);
                self.last_error = None;
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "submit failed, fields retained");
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Back to defaults; optionally erase both persistence tiers.
    pub async fn reset(&mut self, clear_storage: bool) {
        self.snapshot = reduce(&self.snapshot, FormAction::Reset);
        self.last_error = None;
        if clear_storage {
            self.submissions.clear().await;
        }
    }

    /// Load a stored submission into the working snapshot for review.
    pub async fn load_submission(&mut self, id: &SubmissionId) -> bool {
        match self.submissions.get_by_id(id).await {
            Some(data) => {
                self.snapshot = reduce(&self.snapshot, FormAction::Replace(data));
                true
            }
            None => false,
        }
    }

    /// Push review edits back onto a stored submission.  Returns `false`
    /// when the record has vanished in the meantime.
    pub async fn update_submission(&mut self, id: &SubmissionId) -> Result<bool, SessionError> {
        Ok(self.submissions.update_by_id(id, &self.snapshot).await?)
    }

    /// The submission history, oldest first.
    pub async fn history(&self) -> Vec<SubmissionRecord> {
        self.submissions.list().await
    }

    /// Start a media encode for `field`, superseding any encode still in
    /// flight for it.
    pub fn begin_media_update(&mut self, field: MediaField) -> EncodeTicket {
        let generation = match field {
            MediaField::Image => {
                self.image_generation += 1;
                self.image_generation
            }
            MediaField::Video => {
                self.video_generation += 1;
                self.video_generation
            }
        };
        EncodeTicket { field, generation }
    }

    /// Land a finished encode.  Returns `false`, leaving state untouched,
    /// when the ticket has been superseded by a later
    /// [`begin_media_update`](Self::begin_media_update) or a clear.
    pub fn apply_media(&mut self, ticket: EncodeTicket, media: MediaAttachment) -> bool {
        let current = match ticket.field {
            MediaField::Image => self.image_generation,
            MediaField::Video => self.video_generation,
        };
        if ticket.generation != current {
            debug!(field = %ticket.field.form_field(), "discarding stale media encode");
            return false;
        }

        let patch = match ticket.field {
            MediaField::Image => FieldPatch::Image(Some(media)),
            MediaField::Video => FieldPatch::Video(Some(media)),
        };
        self.apply(FormAction::Edit(patch));
        true
    }

    /// Drop the attachment for `field` and invalidate any in-flight
    /// encode targeting it.
    pub fn clear_media(&mut self, field: MediaField) {
        let _ = self.begin_media_update(field);
        let patch = match field {
            MediaField::Image => FieldPatch::Image(None),
            MediaField::Video => FieldPatch::Video(None),
        };
        self.apply(FormAction::Edit(patch));
    }
}
