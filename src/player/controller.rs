use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::audio::AudioHandle;
use crate::playlist::{Playlist, Track};

use super::event::{Effect, Event};
use super::machine::step;
use super::state::{PlaybackState, Ticket};

/// Owns the playback state and the audio handle, and mediates between them.
pub struct Player<H, R = StdRng> {
    playlist: Playlist,
    state: PlaybackState,
    handle: H,
    rng: R,
}

impl<H: AudioHandle> Player<H, StdRng> {
    pub fn new(playlist: Playlist, handle: H) -> Self {
        Self::with_rng(playlist, handle, StdRng::from_entropy())
    }
}

impl<H: AudioHandle, R: Rng> Player<H, R> {
    pub fn with_rng(playlist: Playlist, handle: H, rng: R) -> Self {
        Self {
            playlist,
            state: PlaybackState::default(),
            handle,
            rng,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.state.index)
    }

    /// Feed one event through the state machine and carry out its effects.
    pub fn dispatch(&mut self, event: Event) {
        if let Some(ticket) = signal_ticket(&event) {
            if ticket != self.state.ticket {
                debug!(?ticket, current = ?self.state.ticket, "dropping stale audio signal");
                return;
            }
        }

        match &event {
            Event::SelectTrack(index) if *index >= self.playlist.len() => {
                let len = self.playlist.len();
                warn!(index, len, "ignoring selection past the end of the playlist");
            }
            Event::LoadFailed { reason, .. } => {
                warn!(index = self.state.index, %reason, "track failed to load");
            }
            Event::PlayRejected { reason, .. } => {
                warn!(index = self.state.index, %reason, "playback was rejected");
            }
            _ => {}
        }

        let t = step(self.state, event, self.playlist.len(), &mut self.rng);
        if t.state.index != self.state.index {
            info!(from = self.state.index, to = t.state.index, "switching track");
        }
        self.state = t.state;

        for effect in t.effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Load { ticket, index } => match self.playlist.src(index) {
                Some(src) => {
                    debug!(?ticket, index, src = %src.display(), "loading track");
                    self.handle.load(ticket, src.to_path_buf());
                }
                None => {
                    let reason = format!("no track at index {index}");
                    self.dispatch(Event::LoadFailed { ticket, reason });
                }
            },
            Effect::Play { ticket } => self.handle.play(ticket),
            Effect::Pause => self.handle.pause(),
            Effect::SetVolume(v) => self.handle.set_volume(v),
            Effect::SetPosition(t) => self.handle.set_position(t),
        }
    }
}

fn signal_ticket(event: &Event) -> Option<Ticket> {
    match event {
        Event::LoadReady { ticket, .. }
        | Event::LoadFailed { ticket, .. }
        | Event::PlayRejected { ticket, .. }
        | Event::Progress { ticket, .. }
        | Event::Ended { ticket } => Some(*ticket),
        _ => None,
    }
}
