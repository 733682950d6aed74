use crate::core::state::{SceneAction, SceneState};
use thiserror::Error;

/// Problems with the static track configuration or a slide's data attributes.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("track list is empty")]
    NoTracks,
    #[error("track {index} has no title")]
    MissingTitle { index: usize },
    #[error("track {index} ({title:?}) has no audio source")]
    MissingSource { index: usize, title: String },
    #[error("track {index} ({title:?}) has invalid verse start {value}")]
    InvalidVerseStart {
        index: usize,
        title: String,
        value: f32,
    },
    #[error("slide attribute {name} is missing")]
    MissingAttribute { name: &'static str },
    #[error("slide attribute {name}={value:?} is not a valid number")]
    MalformedAttribute { name: &'static str, value: String },
    #[error("malformed track configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected scene transitions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a transition to {0:?} is already in flight")]
    InFlight(SceneState),
    #[error("{action:?} is not valid from {from:?}")]
    Invalid {
        from: SceneState,
        action: SceneAction,
    },
    #[error("assets are still loading")]
    AssetsPending,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("OBJ parse error: {0}")]
    Parse(String),
    #[error("model contains no triangles")]
    NoGeometry,
}
