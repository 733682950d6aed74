use crate::core::error::ConfigError;
use crate::core::track::{Selection, Track};

/// Carousel position over the configured tracks.
///
/// The slider widget owns the visuals; this keeps the index and the selection
/// the stage will launch with.
#[derive(Debug, Clone)]
pub struct Carousel {
    tracks: Vec<Track>,
    index: usize,
    selection: Selection,
}

impl Carousel {
    pub fn new(tracks: Vec<Track>) -> Result<Self, ConfigError> {
        let first = tracks.first().ok_or(ConfigError::NoTracks)?;
        let selection = first.selection();
        Ok(Self {
            tracks,
            index: 0,
            selection,
        })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.index]
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Step by `delta` slides, wrapping at both ends.
    pub fn go(&mut self, delta: i32) -> usize {
        let len = self.tracks.len() as i64;
        let next = (self.index as i64 + delta as i64).rem_euclid(len) as usize;
        self.index = next;
        self.selection = self.tracks[next].selection();
        next
    }

    pub fn jump_to(&mut self, index: usize) -> Option<&Track> {
        let track = self.tracks.get(index)?;
        self.index = index;
        self.selection = track.selection();
        Some(track)
    }

    /// Record the widget's centered slide as read from its data attributes.
    pub fn select(&mut self, index: usize, selection: Selection) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.index = index;
        self.selection = selection;
        true
    }
}
