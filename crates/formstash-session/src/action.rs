//! Form actions and the pure reducer.
//!
//! State transitions are a sum type plus a pure function, independent of
//! any UI binding: the caller dispatches actions, the reducer returns the
//! next snapshot and never mutates the old one.

use formstash_shared::{FormField, FormSnapshot, MediaAttachment, Priority, Status};

/// An edit to exactly one of the nine snapshot fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch {
    Name(String),
    Email(String),
    Description(String),
    Image(Option<MediaAttachment>),
    Video(Option<MediaAttachment>),
    Priority(Priority),
    /// Replace the whole option list (deduplicated, order kept).
    Options(Vec<String>),
    /// Flip one option label in or out of the list.
    ToggleOption(String),
    Status(Status),
    DueDate(String),
}

impl FieldPatch {
    /// The field this patch touches.
    pub fn field(&self) -> FormField {
        match self {
            Self::Name(_) => FormField::Name,
            Self::Email(_) => FormField::Email,
            Self::Description(_) => FormField::Description,
            Self::Image(_) => FormField::Image,
            Self::Video(_) => FormField::Video,
            Self::Priority(_) => FormField::Priority,
            Self::Options(_) | Self::ToggleOption(_) => FormField::Options,
            Self::Status(_) => FormField::Status,
            Self::DueDate(_) => FormField::DueDate,
        }
    }
}

/// Everything a form session can do to its snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Edit one field while staying on the current instance.
    Edit(FieldPatch),
    /// Load a stored submission for review, replacing every field.
    Replace(FormSnapshot),
    /// Populate the session from persisted tiers at startup.
    Hydrate(FormSnapshot),
    /// Back to the all-empty defaults.
    Reset,
}

/// Pure transition function: next snapshot from the current one and an
/// action.
pub fn reduce(state: &FormSnapshot, action: FormAction) -> FormSnapshot {
    match action {
        FormAction::Edit(patch) => apply_patch(state.clone(), patch),
        FormAction::Replace(snapshot) | FormAction::Hydrate(snapshot) => snapshot,
        FormAction::Reset => FormSnapshot::default(),
    }
}

fn apply_patch(mut snapshot: FormSnapshot, patch: FieldPatch) -> FormSnapshot {
    match patch {
        FieldPatch::Name(value) => snapshot.name = value,
        FieldPatch::Email(value) => snapshot.email = value,
        FieldPatch::Description(value) => snapshot.description = value,
        FieldPatch::Image(media) => snapshot.image = media,
        FieldPatch::Video(media) => snapshot.video = media,
        FieldPatch::Priority(priority) => snapshot.priority = priority,
        FieldPatch::Options(options) => {
            snapshot.options.clear();
            for option in options {
                if !snapshot.options.contains(&option) {
                    snapshot.options.push(option);
                }
            }
        }
        FieldPatch::ToggleOption(label) => snapshot.toggle_option(&label),
        FieldPatch::Status(status) => snapshot.status = status,
        FieldPatch::DueDate(value) => snapshot.due_date = value,
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_updates_one_field_only() {
        let state = FormSnapshot {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            ..FormSnapshot::default()
        };
        let next = reduce(
            &state,
            FormAction::Edit(FieldPatch::Description("notes".to_string())),
        );
        assert_eq!(next.description, "notes");
        assert_eq!(next.name, "Ada");
        assert_eq!(next.email, "a@x.com");
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let state = FormSnapshot {
            name: "Ada".to_string(),
            ..FormSnapshot::default()
        };
        let _ = reduce(&state, FormAction::Edit(FieldPatch::Name("Eve".to_string())));
        let _ = reduce(&state, FormAction::Reset);
        assert_eq!(state.name, "Ada");
    }

    #[test]
    fn test_replace_and_hydrate_take_whole_snapshot() {
        let state = FormSnapshot::default();
        let incoming = FormSnapshot {
            name: "stored".to_string(),
            due_date: "2024-01-01".to_string(),
            ..FormSnapshot::default()
        };
        assert_eq!(
            reduce(&state, FormAction::Replace(incoming.clone())),
            incoming
        );
        assert_eq!(reduce(&state, FormAction::Hydrate(incoming.clone())), incoming);
    }

    #[test]
    fn test_reset_returns_defaults() {
        let state = FormSnapshot {
            name: "Ada".to_string(),
            options: vec!["Option A".to_string()],
            ..FormSnapshot::default()
        };
        assert_eq!(reduce(&state, FormAction::Reset), FormSnapshot::default());
    }

    #[test]
    fn test_toggle_option_patch() {
        let state = FormSnapshot::default();
        let next = reduce(
            &state,
            FormAction::Edit(FieldPatch::ToggleOption("Option A".to_string())),
        );
        assert_eq!(next.options, ["Option A"]);
        let again = reduce(
            &next,
            FormAction::Edit(FieldPatch::ToggleOption("Option A".to_string())),
        );
        assert!(again.options.is_empty());
    }

    #[test]
    fn test_options_patch_dedupes() {
        let next = reduce(
            &FormSnapshot::default(),
            FormAction::Edit(FieldPatch::Options(vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option A".to_string(),
            ])),
        );
        assert_eq!(next.options, ["Option A", "Option B"]);
    }
}
