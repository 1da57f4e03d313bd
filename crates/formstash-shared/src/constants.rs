/// Larger-tier key under which the submission collection is stored.
pub const STORAGE_KEY: &str = "storage_form_key";

/// Constrained-tier cookie name holding the draft projection.
pub const COOKIE_NAME: &str = "cookie_form_key";

/// Draft projection lifetime in days.
pub const DRAFT_TTL_DAYS: i64 = 3;

/// Maximum accepted media payload in bytes (10 MiB).
pub const MAX_MEDIA_SIZE: usize = 10 * 1024 * 1024;

/// Maximum size of one encoded cookie record (`name=value`) in bytes,
/// matching the common browser per-cookie limit.
pub const COOKIE_CAPACITY: usize = 4096;

/// Cookie path attribute for the draft projection.
pub const COOKIE_PATH: &str = "/";

/// Cookie SameSite attribute for the draft projection.
pub const COOKIE_SAME_SITE: &str = "Lax";

/// Canonical labels offered by the multi-select field.
pub const OPTION_LABELS: [&str; 3] = ["Option A", "Option B", "Option C"];
