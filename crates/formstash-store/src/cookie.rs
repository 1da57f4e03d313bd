//! Cookie-jar constrained tier.
//!
//! Models the browser cookie contract the draft projection lives under:
//! values are URL-encoded, records carry `path=/; SameSite=Lax` and an
//! expiry of write-time plus the draft TTL, and one encoded record may not
//! exceed the 4 KiB cookie limit.  Expired records read as absent and are
//! evicted.  The jar can be backed by a file so drafts survive restarts;
//! jar persistence is best-effort and never fails a caller.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use formstash_shared::constants::{COOKIE_CAPACITY, COOKIE_PATH, COOKIE_SAME_SITE, DRAFT_TTL_DAYS};

use crate::tier::{StorageTier, TierError};

/// `encodeURIComponent` equivalent: everything but the unreserved marks is
/// percent-encoded.
const COOKIE_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CookieRecord {
    /// URL-encoded payload.
    value: String,
    expires_at: DateTime<Utc>,
    path: String,
    same_site: String,
}

pub struct CookieTier {
    jar: Mutex<HashMap<String, CookieRecord>>,
    ttl: Duration,
    capacity: usize,
    backing: Option<PathBuf>,
}

impl CookieTier {
    /// Fresh in-memory jar with the stock draft TTL and cookie capacity.
    pub fn new() -> Self {
        Self {
            jar: Mutex::new(HashMap::new()),
            ttl: Duration::days(DRAFT_TTL_DAYS),
            capacity: COOKIE_CAPACITY,
            backing: None,
        }
    }

    /// Override the record lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Override the per-record byte limit.
    pub fn with_capacity(mut self, limit: usize) -> Self {
        self.capacity = limit;
        self
    }

    /// Back the jar with a file, loading whatever it currently holds.
    /// A missing or corrupt jar file starts empty.
    pub fn backed_by(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, CookieRecord>>(&raw) {
                Ok(jar) => jar,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt cookie jar, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable cookie jar, starting empty");
                HashMap::new()
            }
        };
        self.jar = Mutex::new(loaded);
        self.backing = Some(path);
        self
    }

    fn persist(&self, jar: &HashMap<String, CookieRecord>) {
        let Some(path) = &self.backing else {
            return;
        };
        let json = match serde_json::to_string(jar) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "cookie jar serialization failed");
                return;
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            warn!(path = %path.display(), error = %e, "cookie jar persist failed");
        }
    }
}

impl Default for CookieTier {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageTier for CookieTier {
    fn read(&self, key: &str) -> Result<Option<String>, TierError> {
        let mut jar = self
            .jar
            .lock()
            .map_err(|e| TierError::Backend(format!("Lock poisoned: {e}")))?;

        let Some(record) = jar.get(key) else {
            return Ok(None);
        };

        if Utc::now() > record.expires_at {
            debug!(key, "evicting expired cookie");
            jar.remove(key);
            self.persist(&jar);
            return Ok(None);
        }

        let decoded = percent_decode_str(&record.value)
            .decode_utf8()
            .map_err(|e| TierError::Backend(format!("Cookie decode failed: {e}")))?;
        Ok(Some(decoded.into_owned()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), TierError> {
        let encoded = utf8_percent_encode(value, COOKIE_VALUE_SET).to_string();

        // one cookie record is `name=value`
        let attempted = key.len() + 1 + encoded.len();
        if attempted > self.capacity {
            return Err(TierError::CapacityExceeded {
                attempted,
                limit: self.capacity,
            });
        }

        let mut jar = self
            .jar
            .lock()
            .map_err(|e| TierError::Backend(format!("Lock poisoned: {e}")))?;

        jar.insert(
            key.to_string(),
            CookieRecord {
                value: encoded,
                expires_at: Utc::now() + self.ttl,
                path: COOKIE_PATH.to_string(),
                same_site: COOKIE_SAME_SITE.to_string(),
            },
        );
        self.persist(&jar);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TierError> {
        let mut jar = self
            .jar
            .lock()
            .map_err(|e| TierError::Backend(format!("Lock poisoned: {e}")))?;
        jar.remove(key);
        self.persist(&jar);
        Ok(())
    }
}
