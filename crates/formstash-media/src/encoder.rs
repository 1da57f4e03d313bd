//! Binary-blob to `data:` URL encoding.
//!
//! The contract mirrors a browser `FileReader`: accept a named binary blob,
//! reject it past the size ceiling, and resolve to a [`MediaAttachment`]
//! whose `content` is a self-contained base64 data-URL.

use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use formstash_shared::constants::MAX_MEDIA_SIZE;
use formstash_shared::MediaAttachment;

use crate::error::{MediaError, Result};

/// Encode an in-memory blob into a payload-bearing attachment descriptor.
///
/// Rejects with [`MediaError::FileTooLarge`] before doing any work when the
/// blob exceeds the 10 MiB ceiling.  The base64 pass runs on the blocking
/// pool since payloads can reach megabytes.
pub async fn encode_blob(name: &str, mime_type: &str, bytes: Bytes) -> Result<MediaAttachment> {
    if bytes.len() > MAX_MEDIA_SIZE {
        return Err(MediaError::FileTooLarge {
            size: bytes.len(),
            max: MAX_MEDIA_SIZE,
        });
    }

    let size_bytes = bytes.len() as u64;
    let mime = mime_type.to_string();
    let content = tokio::task::spawn_blocking(move || to_data_url(&mime, &bytes))
        .await
        .map_err(|e| MediaError::ReadFailure(format!("Encoding task failed: {e}")))?;

    debug!(name, size = size_bytes, "encoded media payload");

    Ok(MediaAttachment {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        size_bytes,
        content,
    })
}

/// Read a file from disk and encode it.
///
/// The size check runs against the file metadata before the read, so an
/// oversized file is rejected without pulling its bytes into memory.
pub async fn encode_file(path: impl AsRef<Path>) -> Result<MediaAttachment> {
    let path = path.as_ref();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| MediaError::ReadFailure(format!("{}: {e}", path.display())))?;

    if metadata.len() as usize > MAX_MEDIA_SIZE {
        return Err(MediaError::FileTooLarge {
            size: metadata.len() as usize,
            max: MAX_MEDIA_SIZE,
        });
    }

    let data = tokio::fs::read(path)
        .await
        .map_err(|e| MediaError::ReadFailure(format!("{}: {e}", path.display())))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let mime_type = mime_for_path(path);

    encode_blob(&name, mime_type, data.into()).await
}

fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Best-effort MIME type from the file extension, the way a browser fills
/// `File.type`.
fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encode_blob() {
        let media = encode_blob("hi.txt", "text/plain", Bytes::from_static(b"hi"))
            .await
            .unwrap();
        assert_eq!(media.name, "hi.txt");
        assert_eq!(media.size_bytes, 2);
        assert_eq!(media.content, "data:text/plain;base64,aGk=");
        assert!(media.has_payload());
    }

    #[tokio::test]
    async fn test_oversized_blob_rejected() {
        let big = Bytes::from(vec![0u8; MAX_MEDIA_SIZE + 1]);
        let err = encode_blob("big.bin", "application/octet-stream", big)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileTooLarge { .. }));
    }

    #[tokio::test]
    async fn test_encode_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, b"frames").await.unwrap();

        let media = encode_file(&path).await.unwrap();
        assert_eq!(media.name, "clip.mp4");
        assert_eq!(media.mime_type, "video/mp4");
        assert_eq!(media.size_bytes, 6);
        assert!(media.content.starts_with("data:video/mp4;base64,"));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_failure() {
        let err = encode_file("/nonexistent/never.png").await.unwrap_err();
        assert!(matches!(err, MediaError::ReadFailure(_)));
    }
}
