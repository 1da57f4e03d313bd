//! Snapshot validation.
//!
//! Two deliberately different views: [`is_submittable`] gates the submit
//! button with the historical seven-field requirement list, while
//! [`field_errors`] is the exhaustive per-field requirement map shown next
//! to the fields, which also lists the options and the due date.  The
//! asymmetry is inherited behavior and must not be unified silently.

use std::collections::BTreeMap;

use formstash_shared::{FormField, FormSnapshot};

/// Whether the snapshot may be submitted.
///
/// Checks name, email and description (trimmed), both media uploads,
/// priority and status.  Options and due date are not consulted.
pub fn is_submittable(snapshot: &FormSnapshot) -> bool {
    !snapshot.name.trim().is_empty()
        && !snapshot.email.trim().is_empty()
        && !snapshot.description.trim().is_empty()
        && snapshot.image.is_some()
        && snapshot.video.is_some()
        && snapshot.priority.is_set()
        && snapshot.status.is_set()
}

/// Per-field requirement messages for every unsatisfied field.
pub fn field_errors(snapshot: &FormSnapshot) -> BTreeMap<FormField, &'static str> {
    let mut errors = BTreeMap::new();

    if snapshot.name.trim().is_empty() {
        errors.insert(FormField::Name, "Name is required");
    }
    if snapshot.email.trim().is_empty() {
        errors.insert(FormField::Email, "Email is required");
    }
    if snapshot.description.trim().is_empty() {
        errors.insert(FormField::Description, "Description is required");
    }
    if snapshot.image.is_none() {
        errors.insert(FormField::Image, "An image upload is required");
    }
    if snapshot.video.is_none() {
        errors.insert(FormField::Video, "A video upload is required");
    }
    if !snapshot.priority.is_set() {
        errors.insert(FormField::Priority, "Select a priority");
    }
    if snapshot.options.is_empty() {
        errors.insert(FormField::Options, "Pick at least one option");
    }
    if !snapshot.status.is_set() {
        errors.insert(FormField::Status, "Select a status");
    }
    if snapshot.due_date.trim().is_empty() {
        errors.insert(FormField::DueDate, "Due date is required");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstash_shared::{MediaAttachment, Priority, Status};

    fn filled_except_options_and_due_date() -> FormSnapshot {
        FormSnapshot {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            description: "d".to_string(),
            image: Some(MediaAttachment::default()),
            video: Some(MediaAttachment::default()),
            priority: Priority::High,
            status: Status::Pending,
            ..FormSnapshot::default()
        }
    }

    #[test]
    fn test_empty_snapshot_is_not_submittable() {
        let snapshot = FormSnapshot::default();
        assert!(!is_submittable(&snapshot));
        assert_eq!(field_errors(&snapshot).len(), 9);
    }

    #[test]
    fn test_whitespace_only_text_fails() {
        let snapshot = FormSnapshot {
            name: "   ".to_string(),
            ..filled_except_options_and_due_date()
        };
        assert!(!is_submittable(&snapshot));
        assert!(field_errors(&snapshot).contains_key(&FormField::Name));
    }

    #[test]
    fn test_asymmetry_between_gate_and_error_map() {
        // submittable without options or a due date, yet the exhaustive
        // map still flags both
        let snapshot = filled_except_options_and_due_date();
        assert!(is_submittable(&snapshot));

        let errors = field_errors(&snapshot);
        let flagged: Vec<_> = errors.keys().copied().collect();
        assert_eq!(flagged, [FormField::Options, FormField::DueDate]);
    }

    #[test]
    fn test_fully_filled_snapshot_has_no_errors() {
        let snapshot = FormSnapshot {
            options: vec!["Option A".to_string()],
            due_date: "2024-01-01".to_string(),
            ..filled_except_options_and_due_date()
        };
        assert!(is_submittable(&snapshot));
        assert!(field_errors(&snapshot).is_empty());
    }
}
