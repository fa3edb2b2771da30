use std::path::{Path, PathBuf};

use thiserror::Error;

/// One playable entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    /// Cover image reference. The terminal UI shows it as text.
    pub cover: Option<PathBuf>,
    pub src: PathBuf,
}

impl Track {
    pub fn new(title: impl Into<String>, src: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            cover: None,
            src: src.into(),
        }
    }

    pub fn with_cover(mut self, cover: impl Into<PathBuf>) -> Self {
        self.cover = Some(cover.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("playlist has no tracks")]
    Empty,

    #[error("failed to read playlist {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse playlist {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A non-empty, ordered list of tracks. Indices never change once built.
#[derive(Clone, Debug)]
pub struct Playlist {
    pub(super) tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::Empty);
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Source path of the track at `index`, if it exists.
    pub fn src(&self, index: usize) -> Option<&Path> {
        self.tracks.get(index).map(|t| t.src.as_path())
    }
}
