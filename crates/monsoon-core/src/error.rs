use crate::mix::TrackId;
use thiserror::Error;

/// Failures the atmosphere degrades around. None of these stop the page.
#[derive(Debug, Error)]
pub enum AtmosError {
    #[error("audio track `{}` failed to load from {src}: {reason}", .track.name())]
    AudioLoad {
        track: TrackId,
        src: String,
        reason: String,
    },
    #[error("playback of `{}` was rejected: {reason}", .track.name())]
    PlaybackRejected { track: TrackId, reason: String },
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("drawing surface unavailable: {0}")]
    Surface(String),
    #[error("dom error: {0}")]
    Dom(String),
}
