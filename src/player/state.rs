use std::time::Duration;

/// Generation number of a load request.
///
/// Every track switch takes a fresh ticket; signals from the audio handle
/// carry the ticket of the load they belong to. Only signals for the current
/// ticket are honored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

impl Ticket {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Paused,
    Playing,
    /// A track switch is in flight.
    Loading,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub index: usize,
    pub phase: Phase,
    /// Always within `[0, 1]`.
    pub volume: f32,
    pub position: Duration,
    /// Zero until the handle reports the track length.
    pub duration: Duration,
    pub shuffle: bool,
    pub repeat: bool,
    pub ticket: Ticket,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            index: 0,
            phase: Phase::Paused,
            volume: 1.0,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            shuffle: false,
            repeat: false,
            ticket: Ticket::default(),
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn duration_known(&self) -> bool {
        !self.duration.is_zero()
    }
}
