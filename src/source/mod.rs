//! Input normalization — file uploads and recorded clips → encoded payloads.
//!
//! # Pipeline
//!
//! ```text
//! file path ──▶ Source::from_file ─┐
//!                                  ├─▶ Source::encode() ─▶ EncodedPayload
//! recorded clip ──▶ Source::clip ──┘        (async read + base64)
//! ```
//!
//! Both origins are treated identically past construction: [`Source::encode`]
//! produces the MIME-typed, base64-encoded [`EncodedPayload`] that the AI
//! backend consumes for transcription.

pub mod kind;
pub mod payload;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use kind::{mime_for_path, MediaKind};
pub use payload::{EncodedPayload, EncodingError, Source};
