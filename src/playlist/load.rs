use std::path::{Path, PathBuf};

use lofty::prelude::*;
use serde::Deserialize;

use super::model::{Playlist, PlaylistError, Track};

/// On-disk layout of a playlist file:
///
/// ```toml
/// [[track]]
/// title = "Sanctuary"
/// cover = "covers/sanctuary.jpg"
/// src = "audio/sanctuary.mp3"
/// ```
#[derive(Debug, Deserialize)]
struct PlaylistFile {
    #[serde(default, rename = "track")]
    tracks: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    title: Option<String>,
    cover: Option<PathBuf>,
    src: PathBuf,
}

/// Read a playlist file. Relative `src`/`cover` paths resolve against the
/// directory containing `path`.
pub fn load(path: &Path) -> Result<Playlist, PlaylistError> {
    let text = std::fs::read_to_string(path).map_err(|source| PlaylistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_toml(&text, path)
}

/// Parse playlist `text` as if it had been read from `path`.
pub(super) fn from_toml(text: &str, path: &Path) -> Result<Playlist, PlaylistError> {
    let file: PlaylistFile = toml::from_str(text).map_err(|source| PlaylistError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let tracks: Vec<Track> = file
        .tracks
        .into_iter()
        .map(|entry| {
            let src = resolve(base, entry.src);
            let title = entry
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| fallback_title(&src));
            Track {
                title,
                cover: entry.cover.map(|c| resolve(base, c)),
                src,
            }
        })
        .collect();

    Playlist::new(tracks)
}

fn resolve(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { base.join(p) }
}

/// Title from the file's tags, else the file stem.
pub(super) fn fallback_title(src: &Path) -> String {
    if let Ok(tagged) = lofty::read_from_path(src) {
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(title) = tag.title() {
                let title = title.trim();
                if !title.is_empty() {
                    return title.to_string();
                }
            }
        }
    }

    src.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}
