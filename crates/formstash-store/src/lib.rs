//! # formstash-store
//!
//! Dual-tier persistence for form submissions: a size-constrained
//! cookie-jar tier caching a media-stripped draft projection, and a larger
//! key-value tier holding the full submission history, payload included.
//! The crate exposes the tier capability, three backends, the dual-tier
//! [`FormStore`], the hydration resolver, and the [`Submissions`] CRUD
//! manager built on top.

pub mod collection;
pub mod cookie;
pub mod disk;
pub mod hydrate;
pub mod memory;
pub mod models;
pub mod store;
pub mod tier;

mod error;

pub use collection::Submissions;
pub use cookie::CookieTier;
pub use disk::DiskTier;
pub use error::StoreError;
pub use memory::MemoryTier;
pub use models::{SubmissionId, SubmissionRecord};
pub use store::FormStore;
pub use tier::{StorageTier, TierError};
