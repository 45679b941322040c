//! `Source` (the user-supplied media unit) and its canonical encoded form.
//!
//! A [`Source`] is either a file on disk or an in-memory clip handed over by
//! a recorder.  [`Source::encode`] reads the bytes asynchronously and
//! produces an [`EncodedPayload`] — the self-describing MIME + base64
//! representation the AI backend requires for transcription.  Encoding never
//! retries; a failed read surfaces immediately as [`EncodingError`].

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::kind::{mime_for_path, MediaKind};

// ---------------------------------------------------------------------------
// EncodingError
// ---------------------------------------------------------------------------

/// Errors raised while accepting or encoding a source.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The file extension or supplied MIME type is not a known audio/video
    /// type.  Raised at acceptance time, before any read is attempted.
    #[error("unsupported media type: {0}")]
    UnsupportedType(String),

    /// The underlying read failed (missing file, permission error, …).
    #[error("failed to read source: {0}")]
    Unreadable(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// A single user-supplied audio/video unit awaiting processing.
///
/// Construct with [`Source::from_file`] (picker/upload path) or
/// [`Source::clip`] (completed microphone recording).  Sources are immutable;
/// a new submission creates a new `Source` rather than mutating an old one.
#[derive(Debug, Clone)]
pub enum Source {
    /// Media file on disk; bytes are read lazily by [`Source::encode`].
    File {
        path: PathBuf,
        mime: &'static str,
        kind: MediaKind,
    },
    /// In-memory recorded clip, complete at construction time.
    Clip {
        bytes: Vec<u8>,
        mime: String,
        kind: MediaKind,
    },
}

impl Source {
    /// Accept a media file, resolving its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// [`EncodingError::UnsupportedType`] when the extension is not a known
    /// audio/video type.  The file itself is not opened here.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EncodingError> {
        let path = path.as_ref();
        let mime = mime_for_path(path)
            .ok_or_else(|| EncodingError::UnsupportedType(path.display().to_string()))?;
        // mime_for_path only yields audio/* and video/* entries.
        let kind = MediaKind::from_mime(mime)
            .ok_or_else(|| EncodingError::UnsupportedType(mime.to_string()))?;

        Ok(Source::File {
            path: path.to_path_buf(),
            mime,
            kind,
        })
    }

    /// Accept a completed in-memory recording with its MIME type
    /// (e.g. `"audio/webm"` from a browser-style recorder).
    ///
    /// # Errors
    ///
    /// [`EncodingError::UnsupportedType`] when `mime` is neither `audio/*`
    /// nor `video/*`.
    pub fn clip(bytes: Vec<u8>, mime: impl Into<String>) -> Result<Self, EncodingError> {
        let mime = mime.into();
        let kind = MediaKind::from_mime(&mime)
            .ok_or_else(|| EncodingError::UnsupportedType(mime.clone()))?;

        Ok(Source::Clip { bytes, mime, kind })
    }

    /// Media kind (audio or video) of this source.
    pub fn kind(&self) -> MediaKind {
        match self {
            Source::File { kind, .. } | Source::Clip { kind, .. } => *kind,
        }
    }

    /// MIME type of this source.
    pub fn mime(&self) -> &str {
        match self {
            Source::File { mime, .. } => mime,
            Source::Clip { mime, .. } => mime,
        }
    }

    /// Read and encode this source into an [`EncodedPayload`].
    ///
    /// File sources are read with `tokio::fs`; clip sources encode their
    /// in-memory bytes.  Both paths produce identical payloads for identical
    /// bytes and MIME type.
    ///
    /// # Errors
    ///
    /// [`EncodingError::Unreadable`] when the file read fails.  No retries.
    pub async fn encode(&self) -> Result<EncodedPayload, EncodingError> {
        let (bytes, mime) = match self {
            Source::File { path, mime, .. } => (tokio::fs::read(path).await?, mime.to_string()),
            Source::Clip { bytes, mime, .. } => (bytes.clone(), mime.clone()),
        };

        log::debug!(
            "source: encoded {} bytes of {} ({})",
            bytes.len(),
            mime,
            self.kind().label()
        );

        Ok(EncodedPayload {
            mime,
            data: STANDARD.encode(bytes),
        })
    }
}

// ---------------------------------------------------------------------------
// EncodedPayload
// ---------------------------------------------------------------------------

/// Canonical self-describing representation of a [`Source`]: MIME type plus
/// base64-encoded bytes.
///
/// Immutable; consumed by the transcription request and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// MIME type of the encoded media (e.g. `"audio/mpeg"`).
    pub mime: String,
    /// Base64-encoded media bytes (standard alphabet, padded).
    pub data: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn file_source_encodes_contents() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("hello.wav");
        std::fs::write(&path, b"abc").expect("write fixture");

        let source = Source::from_file(&path).expect("accept");
        assert_eq!(source.kind(), MediaKind::Audio);
        assert_eq!(source.mime(), "audio/wav");

        let payload = source.encode().await.expect("encode");
        assert_eq!(payload.mime, "audio/wav");
        assert_eq!(payload.data, "YWJj"); // base64("abc")
    }

    #[tokio::test]
    async fn clip_and_file_produce_identical_payloads() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("clip.webm");
        std::fs::write(&path, b"recorded-bytes").expect("write fixture");

        let from_file = Source::from_file(&path).expect("accept file");
        let from_clip =
            Source::clip(b"recorded-bytes".to_vec(), "audio/webm").expect("accept clip");

        let a = from_file.encode().await.expect("encode file");
        let b = from_clip.encode().await.expect("encode clip");
        assert_eq!(a, b);
    }

    #[test]
    fn unsupported_extension_is_rejected_at_acceptance() {
        let err = Source::from_file("notes.txt").unwrap_err();
        assert!(matches!(err, EncodingError::UnsupportedType(_)));
    }

    #[test]
    fn clip_with_non_media_mime_is_rejected() {
        let err = Source::clip(vec![1, 2, 3], "text/plain").unwrap_err();
        assert!(matches!(err, EncodingError::UnsupportedType(_)));
    }

    #[test]
    fn clip_classifies_video() {
        let source = Source::clip(vec![0u8; 4], "video/mp4").expect("accept");
        assert_eq!(source.kind(), MediaKind::Video);
    }

    #[tokio::test]
    async fn missing_file_surfaces_unreadable() {
        let source = Source::from_file("/nonexistent/missing.mp3").expect("accept");
        let err = source.encode().await.unwrap_err();
        assert!(matches!(err, EncodingError::Unreadable(_)));
    }

    #[tokio::test]
    async fn empty_clip_encodes_to_empty_data() {
        let source = Source::clip(Vec::new(), "audio/ogg").expect("accept");
        let payload = source.encode().await.expect("encode");
        assert!(payload.data.is_empty());
    }
}
