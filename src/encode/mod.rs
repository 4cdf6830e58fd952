//! Encoding sinks.
//!
//! Sinks consume rendered frames in presentation order and own every codec and container
//! concern; the compositor never touches them.

/// `ffmpeg`-based MP4 output via the system binary.
pub mod ffmpeg;
/// Numbered PNG files, one per frame.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
