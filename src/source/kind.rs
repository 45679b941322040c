//! Media kind classification and extension → MIME resolution.

use std::path::Path;

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

/// Broad class of a user-supplied media unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Classify a MIME type string; `None` for anything that is neither
    /// `audio/*` nor `video/*`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("audio/") {
            Some(MediaKind::Audio)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Short label for logs and status output.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

// ---------------------------------------------------------------------------
// Extension → MIME table
// ---------------------------------------------------------------------------

/// Known media file extensions (lowercase, without dot) and their MIME types.
const MIME_TYPES: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("webm", "audio/webm"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("flac", "audio/flac"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
];

/// Resolve the MIME type for a media file path from its extension.
///
/// Returns `None` for unknown or missing extensions — callers reject such
/// paths instead of guessing a type.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn known_audio_extensions_resolve() {
        assert_eq!(mime_for_path(Path::new("talk.mp3")), Some("audio/mpeg"));
        assert_eq!(mime_for_path(Path::new("talk.wav")), Some("audio/wav"));
        assert_eq!(mime_for_path(Path::new("talk.flac")), Some("audio/flac"));
    }

    #[test]
    fn known_video_extensions_resolve() {
        assert_eq!(mime_for_path(Path::new("clip.mp4")), Some("video/mp4"));
        assert_eq!(
            mime_for_path(Path::new("clip.mov")),
            Some("video/quicktime")
        );
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(mime_for_path(Path::new("TALK.MP3")), Some("audio/mpeg"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert_eq!(mime_for_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert_eq!(mime_for_path(&PathBuf::from("no_extension")), None);
    }

    #[test]
    fn from_mime_classifies_audio_and_video() {
        assert_eq!(MediaKind::from_mime("audio/webm"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_mime("video/mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("text/plain"), None);
    }

    #[test]
    fn every_table_entry_classifies() {
        for (ext, mime) in MIME_TYPES {
            assert!(
                MediaKind::from_mime(mime).is_some(),
                "table entry {ext} has unclassifiable MIME {mime}"
            );
        }
    }
}
