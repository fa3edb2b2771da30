//! Audio-related small types: the handle trait, thread commands and the
//! signals the handle reports back.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::player::{Event, Ticket};

/// The single external playback resource.
///
/// Calls are requests; their outcome arrives later as a `Signal` on the
/// channel the handle was built with.
pub trait AudioHandle {
    fn load(&mut self, ticket: Ticket, src: PathBuf);
    fn play(&mut self, ticket: Ticket);
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn set_position(&mut self, position: Duration);
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source with `src`, paused.
    Load { ticket: Ticket, src: PathBuf },
    Play { ticket: Ticket },
    Pause,
    SetVolume(f32),
    Seek(Duration),
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SignalKind {
    LoadReady {
        duration: Option<Duration>,
    },
    LoadFailed {
        reason: String,
    },
    PlayRejected {
        reason: String,
    },
    Progress {
        position: Duration,
        duration: Option<Duration>,
    },
    Ended,
}

/// Something the audio handle reports about the load identified by `ticket`.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    pub ticket: Ticket,
    pub kind: SignalKind,
}

impl Signal {
    pub fn new(ticket: Ticket, kind: SignalKind) -> Self {
        Self { ticket, kind }
    }

    pub fn into_event(self) -> Event {
        let ticket = self.ticket;
        match self.kind {
            SignalKind::LoadReady { duration } => Event::LoadReady { ticket, duration },
            SignalKind::LoadFailed { reason } => Event::LoadFailed { ticket, reason },
            SignalKind::PlayRejected { reason } => Event::PlayRejected { ticket, reason },
            SignalKind::Progress { position, duration } => Event::Progress {
                ticket,
                position,
                duration,
            },
            SignalKind::Ended => Event::Ended { ticket },
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutput(#[from] rodio::StreamError),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
