//! # formstash-media
//!
//! Async file-to-data-URL encoding for form media uploads.  Accepts a
//! binary blob, rejects it past a 10 MiB ceiling, and resolves to a
//! payload-bearing [`MediaAttachment`](formstash_shared::MediaAttachment).

pub mod encoder;

mod error;

pub use encoder::{encode_blob, encode_file};
pub use error::MediaError;
