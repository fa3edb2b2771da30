use std::time::Duration;

use super::state::Ticket;

/// Inputs to the state machine: user intents and audio handle signals.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Cue the current track into the handle without playing it.
    Mount,
    TogglePlay,
    SelectTrack(usize),
    Next,
    Previous,
    SetVolume(f32),
    Seek(Duration),
    SetShuffle(bool),
    SetRepeat(bool),

    /// The handle can play the loaded track through.
    LoadReady {
        ticket: Ticket,
        duration: Option<Duration>,
    },
    LoadFailed {
        ticket: Ticket,
        reason: String,
    },
    /// The handle refused to start playback.
    PlayRejected {
        ticket: Ticket,
        reason: String,
    },
    Progress {
        ticket: Ticket,
        position: Duration,
        duration: Option<Duration>,
    },
    Ended {
        ticket: Ticket,
    },
}

/// Commands the controller must issue to the audio handle, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Load { ticket: Ticket, index: usize },
    Play { ticket: Ticket },
    Pause,
    SetVolume(f32),
    SetPosition(Duration),
}
