//! # formstash-shared
//!
//! Domain types and constants shared by the Formstash crates: the form
//! snapshot, media attachment descriptors, field enums, and the storage
//! keys both persistence tiers agree on.

pub mod constants;
pub mod types;

pub use types::{
    format_size, FormField, FormSnapshot, MediaAttachment, Priority, Status,
};
