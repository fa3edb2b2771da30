//! Application model: `App` wraps the `Player` with terminal UI state.
//!
//! The cursor (`selected`) is independent from the now-playing index; in
//! follow mode it snaps back to the playing track whenever that changes.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;

use crate::audio::{AudioHandle, Signal};
use crate::player::{Event, PlaybackState, Player};
use crate::playlist::Track;

/// The main application model.
pub struct App<H, R = StdRng> {
    pub player: Player<H, R>,
    pub selected: usize,
    pub follow_playback: bool,
    pub metadata_window: bool,
    last_index: usize,
}

impl<H: AudioHandle, R: Rng> App<H, R> {
    pub fn new(player: Player<H, R>) -> Self {
        let index = player.state().index;
        Self {
            player,
            selected: index,
            follow_playback: true,
            metadata_window: false,
            last_index: index,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        self.player.state()
    }

    pub fn tracks(&self) -> &[Track] {
        self.player.playlist().tracks()
    }

    /// Track-switch and play controls are disabled while a load is in flight.
    pub fn controls_enabled(&self) -> bool {
        !self.state().is_loading()
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Enable following playback (cursor follows currently playing track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }
    /// Disable follow-playback.
    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    fn dispatch(&mut self, event: Event) {
        self.player.dispatch(event);
        let index = self.state().index;
        if index != self.last_index {
            self.last_index = index;
            if self.follow_playback && index < self.tracks().len() {
                self.selected = index;
            }
        }
    }

    /// Feed a signal from the audio handle into the player.
    pub fn handle_signal(&mut self, signal: Signal) {
        self.dispatch(signal.into_event());
    }

    /// Returns false when the control is currently disabled.
    pub fn toggle_play(&mut self) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.dispatch(Event::TogglePlay);
        true
    }

    /// Play (or play/pause, if it is already current) the track under the cursor.
    pub fn play_selected(&mut self) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.follow_playback_on();
        self.dispatch(Event::SelectTrack(self.selected));
        true
    }

    pub fn next_track(&mut self) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.follow_playback_on();
        self.dispatch(Event::Next);
        true
    }

    pub fn previous_track(&mut self) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.follow_playback_on();
        self.dispatch(Event::Previous);
        true
    }

    pub fn toggle_shuffle(&mut self) {
        let on = !self.state().shuffle;
        self.dispatch(Event::SetShuffle(on));
    }

    pub fn toggle_repeat(&mut self) {
        let on = !self.state().repeat;
        self.dispatch(Event::SetRepeat(on));
    }

    /// Change the volume by `delta`; the player clamps the result.
    pub fn nudge_volume(&mut self, delta: f32) {
        let v = self.state().volume + delta;
        self.dispatch(Event::SetVolume(v));
    }

    /// Seek relative to the current position, staying within `[0, duration]`.
    pub fn scrub(&mut self, secs: i64) {
        let s = self.state();
        let delta = Duration::from_secs(secs.unsigned_abs());
        let mut target = if secs < 0 {
            s.position.saturating_sub(delta)
        } else {
            s.position.saturating_add(delta)
        };
        if s.duration_known() {
            target = target.min(s.duration);
        }
        self.dispatch(Event::Seek(target));
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        let len = self.tracks().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        let len = self.tracks().len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.tracks().len().saturating_sub(1);
    }

    /// Jump the cursor back to the now-playing track.
    pub fn select_now_playing(&mut self) {
        let index = self.state().index;
        if index < self.tracks().len() {
            self.selected = index;
        }
    }
}
