use std::path::PathBuf;

use rand::Rng;

use crate::app::App;
use crate::audio::AudioHandle;
use crate::config;
use crate::player::Event;
use crate::playlist::{self, Playlist, PlaylistError};

/// Pick the playlist: command-line path, then `playlist.path`, then built-in.
pub fn resolve_playlist(
    arg: Option<String>,
    settings: &config::Settings,
) -> Result<Playlist, PlaylistError> {
    match arg.map(PathBuf::from).or_else(|| settings.playlist.path.clone()) {
        Some(path) => playlist::load(&path),
        None => Ok(playlist::builtin()),
    }
}

/// Apply configured playback defaults and cue the first track.
pub fn apply_playback_defaults<H: AudioHandle, R: Rng>(
    app: &mut App<H, R>,
    settings: &config::Settings,
) {
    app.follow_playback = settings.ui.follow_playback;

    app.player.dispatch(Event::SetShuffle(settings.playback.shuffle));
    app.player.dispatch(Event::SetRepeat(settings.playback.repeat));
    app.player.dispatch(Event::SetVolume(settings.playback.volume));
    app.player.dispatch(Event::Mount);

    if settings.playback.autoplay {
        app.toggle_play();
    }
}
