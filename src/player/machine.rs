use std::time::Duration;

use rand::Rng;

use super::event::{Effect, Event};
use super::state::{Phase, PlaybackState};

/// Result of feeding one event to the state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: PlaybackState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: PlaybackState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Apply `event` to `state` for a playlist of `len` tracks.
///
/// `rng` is only consulted for shuffled next/previous picks.
pub fn step<R: Rng + ?Sized>(
    state: PlaybackState,
    event: Event,
    len: usize,
    rng: &mut R,
) -> Transition {
    let mut s = state;
    let mut fx: Vec<Effect> = Vec::new();

    match event {
        Event::Mount => {
            s.ticket = s.ticket.next();
            s.phase = Phase::Paused;
            s.position = Duration::ZERO;
            s.duration = Duration::ZERO;
            fx.push(Effect::Load {
                ticket: s.ticket,
                index: s.index,
            });
        }

        Event::TogglePlay => toggle_play(&mut s, &mut fx),

        Event::SelectTrack(i) => {
            if i >= len {
                return Transition::unchanged(state);
            }
            select_track(&mut s, &mut fx, i);
        }

        Event::Next => advance(&mut s, &mut fx, len, Direction::Forward, rng),

        Event::Previous => advance(&mut s, &mut fx, len, Direction::Backward, rng),

        Event::SetVolume(v) => {
            if v.is_nan() {
                return Transition::unchanged(state);
            }
            s.volume = v.clamp(0.0, 1.0);
            fx.push(Effect::SetVolume(s.volume));
        }

        Event::Seek(t) => {
            if s.is_loading() {
                return Transition::unchanged(state);
            }
            let t = if s.duration_known() { t.min(s.duration) } else { t };
            s.position = t;
            fx.push(Effect::SetPosition(t));
        }

        Event::SetShuffle(on) => s.shuffle = on,

        Event::SetRepeat(on) => s.repeat = on,

        Event::LoadReady { ticket, duration } => {
            if ticket != s.ticket {
                return Transition::unchanged(state);
            }
            if let Some(d) = duration {
                s.duration = d;
            }
            if s.is_loading() {
                s.phase = Phase::Playing;
                fx.push(Effect::Play { ticket });
            }
        }

        Event::LoadFailed { ticket, .. } | Event::PlayRejected { ticket, .. } => {
            if ticket != s.ticket {
                return Transition::unchanged(state);
            }
            s.phase = Phase::Paused;
        }

        Event::Progress {
            ticket,
            position,
            duration,
        } => {
            if ticket != s.ticket {
                return Transition::unchanged(state);
            }
            s.position = position;
            if let Some(d) = duration {
                s.duration = d;
            }
        }

        Event::Ended { ticket } => {
            if ticket != s.ticket || !s.is_playing() {
                return Transition::unchanged(state);
            }
            if s.repeat {
                s.position = Duration::ZERO;
                fx.push(Effect::SetPosition(Duration::ZERO));
                fx.push(Effect::Play { ticket });
            } else {
                advance(&mut s, &mut fx, len, Direction::Forward, rng);
            }
        }
    }

    Transition {
        state: s,
        effects: fx,
    }
}

fn toggle_play(s: &mut PlaybackState, fx: &mut Vec<Effect>) {
    match s.phase {
        Phase::Loading => {}
        Phase::Playing => {
            s.phase = Phase::Paused;
            fx.push(Effect::Pause);
        }
        Phase::Paused => {
            s.phase = Phase::Playing;
            fx.push(Effect::Play { ticket: s.ticket });
        }
    }
}

fn select_track(s: &mut PlaybackState, fx: &mut Vec<Effect>, index: usize) {
    if index == s.index {
        toggle_play(s, fx);
        return;
    }

    s.ticket = s.ticket.next();
    s.index = index;
    s.phase = Phase::Loading;
    s.position = Duration::ZERO;
    s.duration = Duration::ZERO;
    fx.push(Effect::Pause);
    fx.push(Effect::Load {
        ticket: s.ticket,
        index,
    });
}

fn advance<R: Rng + ?Sized>(
    s: &mut PlaybackState,
    fx: &mut Vec<Effect>,
    len: usize,
    dir: Direction,
    rng: &mut R,
) {
    if len == 0 {
        return;
    }
    let target = target_index(s, len, dir, rng);
    select_track(s, fx, target);
}

fn target_index<R: Rng + ?Sized>(
    s: &PlaybackState,
    len: usize,
    dir: Direction,
    rng: &mut R,
) -> usize {
    if s.shuffle {
        return rng.gen_range(0..len);
    }

    let last = len - 1;
    match dir {
        Direction::Forward if s.index >= last => {
            if s.repeat {
                0
            } else {
                last
            }
        }
        Direction::Forward => s.index + 1,
        Direction::Backward if s.index == 0 => {
            if s.repeat {
                last
            } else {
                0
            }
        }
        Direction::Backward => s.index - 1,
    }
}
