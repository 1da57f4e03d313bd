//! Persisted submission records.
//!
//! Records are owned exclusively by the submission collection: an ordered
//! sequence, oldest first, append-only except for explicit update/delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formstash_shared::FormSnapshot;

/// Unique submission identifier, generated at creation time and never
/// reused: millisecond timestamp prefix plus a random suffix, enough to
/// avoid collisions within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix: u32 = rand::random();
        Self(format!("{millis:x}-{suffix:08x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One persisted form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Unique record identifier.
    pub id: SubmissionId,
    /// The submitted snapshot, media payload included.
    pub data: FormSnapshot,
    /// When the record was created or last updated.
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Wrap a snapshot into a fresh record stamped now.
    pub fn new(data: FormSnapshot) -> Self {
        Self {
            id: SubmissionId::generate(),
            data,
            submitted_at: Utc::now(),
        }
    }

    /// Picker label: first comma-segment of the name (or `Unnamed`) plus
    /// the submission date.
    pub fn display_name(&self) -> String {
        let name = self
            .data
            .name
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Unnamed");
        format!("{} - {}", name, self.submitted_at.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = SubmissionId::generate();
        let b = SubmissionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_serializes_as_bare_string() {
        let id = SubmissionId::from("18c2-0000cafe");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""18c2-0000cafe""#);
    }

    #[test]
    fn test_display_name() {
        let mut record = SubmissionRecord::new(FormSnapshot::default());
        record.data.name = "Lovelace, Ada".to_string();
        assert!(record.display_name().starts_with("Lovelace - "));

        record.data.name = "   ".to_string();
        assert!(record.display_name().starts_with("Unnamed - "));
    }
}
