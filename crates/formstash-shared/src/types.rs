//! Core form domain types shared by every crate.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase wire
//! names so the persisted JSON matches the historical storage format.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MediaAttachment
// ---------------------------------------------------------------------------

/// An uploaded binary asset, carried as a self-contained `data:` URL.
///
/// An empty `content` string means "metadata only, payload elided" — the
/// form a descriptor takes inside the size-constrained draft tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaAttachment {
    /// Original file name.
    pub name: String,
    /// MIME type reported at upload time (e.g. `image/png`).
    pub mime_type: String,
    /// Size of the raw payload in bytes.
    pub size_bytes: u64,
    /// Base64 `data:` URL of the payload, or `""` when elided.
    pub content: String,
}

impl MediaAttachment {
    /// Whether this descriptor still carries its payload.
    pub fn has_payload(&self) -> bool {
        !self.content.is_empty()
    }

    /// Metadata-only copy with the payload elided.
    pub fn stripped(&self) -> Self {
        Self {
            content: String::new(),
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Field enums
// ---------------------------------------------------------------------------

/// Single-select priority. `Unset` serializes as the empty string.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
}

impl Priority {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Dropdown status. `Unset` serializes as the empty string.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl Status {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// Identifies one of the nine snapshot fields.  Used as the key of the
/// validation error map and for media-encode bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Description,
    Image,
    Video,
    Priority,
    Options,
    Status,
    DueDate,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Description => "description",
            Self::Image => "image",
            Self::Video => "video",
            Self::Priority => "priority",
            Self::Options => "options",
            Self::Status => "status",
            Self::DueDate => "dueDate",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FormSnapshot
// ---------------------------------------------------------------------------

/// The complete set of field values for one form instance.
///
/// All nine fields are always present: absent media is an explicit `None`
/// (serialized as `null`), never a missing key.  Every field carries a
/// serde default so stored JSON from older layouts deserializes with the
/// missing fields filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub description: String,
    pub image: Option<MediaAttachment>,
    pub video: Option<MediaAttachment>,
    pub priority: Priority,
    pub options: Vec<String>,
    pub status: Status,
    /// ISO date (`YYYY-MM-DD`) or empty.
    pub due_date: String,
}

impl FormSnapshot {
    /// Add the option if missing, remove it if present.  Keeps the list
    /// free of duplicates.
    pub fn toggle_option(&mut self, label: &str) {
        if let Some(pos) = self.options.iter().position(|o| o == label) {
            self.options.remove(pos);
        } else {
            self.options.push(label.to_string());
        }
    }

    /// Copy with both media payloads elided, the only form the constrained
    /// tier is allowed to hold.
    pub fn strip_media_payload(&self) -> Self {
        Self {
            image: self.image.as_ref().map(MediaAttachment::stripped),
            video: self.video.as_ref().map(MediaAttachment::stripped),
            ..self.clone()
        }
    }
}

/// Human-readable byte count (`512 Bytes`, `2.00 KB`, `1.50 MB`).
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} Bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(content: &str) -> MediaAttachment {
        MediaAttachment {
            name: "photo.png".to_string(),
            mime_type: "image/png".to_string(),
            size_bytes: 3,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let mut snapshot = FormSnapshot::default();
        snapshot.due_date = "2024-01-01".to_string();
        snapshot.image = Some(attachment("data:image/png;base64,AAA"));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["dueDate"], "2024-01-01");
        assert_eq!(json["image"]["mimeType"], "image/png");
        assert_eq!(json["image"]["sizeBytes"], 3);
        // absent media is an explicit null, not a missing key
        assert!(json["video"].is_null());
        assert_eq!(json["priority"], "");
        assert_eq!(json["status"], "");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        // older stored data may predate some fields
        let snapshot: FormSnapshot =
            serde_json::from_str(r#"{"name":"Ada","email":"a@x.com"}"#).unwrap();
        assert_eq!(snapshot.name, "Ada");
        assert_eq!(snapshot.priority, Priority::Unset);
        assert!(snapshot.image.is_none());
        assert!(snapshot.options.is_empty());
        assert_eq!(snapshot.due_date, "");
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            r#""in-progress""#
        );
        let status: Status = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(status, Status::Unset);
    }

    #[test]
    fn test_stripped_keeps_metadata() {
        let full = attachment("data:image/png;base64,AAA");
        let stripped = full.stripped();
        assert_eq!(stripped.name, full.name);
        assert_eq!(stripped.mime_type, full.mime_type);
        assert_eq!(stripped.size_bytes, full.size_bytes);
        assert!(!stripped.has_payload());
        assert!(full.has_payload());
    }

    #[test]
    fn test_toggle_option() {
        let mut snapshot = FormSnapshot::default();
        snapshot.toggle_option("Option A");
        snapshot.toggle_option("Option B");
        snapshot.toggle_option("Option A");
        assert_eq!(snapshot.options, vec!["Option B".to_string()]);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.50 MB");
    }
}
