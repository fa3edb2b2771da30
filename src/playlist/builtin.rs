use super::model::{Playlist, Track};

/// `(title, cover, src)` for every bundled track, relative to the working dir.
const BUILTIN_TRACKS: &[(&str, &str, &str)] = &[
    (
        "Dearly Beloved",
        "assets/covers/dearly-beloved.jpg",
        "assets/audio/dearly-beloved.mp3",
    ),
    (
        "Simple and Clean",
        "assets/covers/simple-and-clean.jpg",
        "assets/audio/simple-and-clean.mp3",
    ),
    (
        "Sanctuary",
        "assets/covers/sanctuary.jpg",
        "assets/audio/sanctuary.mp3",
    ),
    (
        "Hikari",
        "assets/covers/hikari.jpg",
        "assets/audio/hikari.mp3",
    ),
];

/// The playlist compiled into the binary.
pub fn builtin() -> Playlist {
    // BUILTIN_TRACKS is non-empty, so the `Playlist` invariant holds.
    Playlist {
        tracks: BUILTIN_TRACKS
            .iter()
            .map(|&(title, cover, src)| Track::new(title, src).with_cover(cover))
            .collect(),
    }
}
