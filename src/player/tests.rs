use super::*;
use crate::audio::AudioHandle;
use crate::playlist::{Playlist, Track};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Load(Ticket, PathBuf),
    Play(Ticket),
    Pause,
    Volume(f32),
    Position(Duration),
}

#[derive(Default)]
struct FakeHandle {
    calls: Vec<Call>,
}

impl AudioHandle for FakeHandle {
    fn load(&mut self, ticket: Ticket, src: PathBuf) {
        self.calls.push(Call::Load(ticket, src));
    }
    fn play(&mut self, ticket: Ticket) {
        self.calls.push(Call::Play(ticket));
    }
    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }
    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::Volume(volume));
    }
    fn set_position(&mut self, position: Duration) {
        self.calls.push(Call::Position(position));
    }
}

fn playlist(n: usize) -> Playlist {
    Playlist::new(
        (0..n)
            .map(|i| Track::new(format!("Song {i}"), format!("/music/{i}.mp3")))
            .collect(),
    )
    .unwrap()
}

fn player(n: usize) -> Player<FakeHandle, StdRng> {
    Player::with_rng(playlist(n), FakeHandle::default(), StdRng::seed_from_u64(7))
}

fn ready(p: &mut Player<FakeHandle, StdRng>) {
    let ticket = p.state().ticket;
    p.dispatch(Event::LoadReady {
        ticket,
        duration: Some(Duration::from_secs(180)),
    });
}

/// Switch to `index` and let the load complete.
fn play_index(p: &mut Player<FakeHandle, StdRng>, index: usize) {
    p.dispatch(Event::SelectTrack(index));
    ready(p);
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn defaults_match_a_fresh_mount() {
    let s = PlaybackState::default();
    assert_eq!(s.index, 0);
    assert_eq!(s.phase, Phase::Paused);
    assert_eq!(s.volume, 1.0);
    assert_eq!(s.position, Duration::ZERO);
    assert!(!s.shuffle);
    assert!(!s.repeat);
}

#[test]
fn mount_cues_current_track_without_playing() {
    let mut p = player(3);
    p.dispatch(Event::Mount);
    assert_eq!(p.state().phase, Phase::Paused);
    assert_eq!(
        p.handle().calls,
        vec![Call::Load(p.state().ticket, PathBuf::from("/music/0.mp3"))]
    );

    ready(&mut p);
    assert_eq!(p.state().phase, Phase::Paused);
    assert_eq!(p.state().duration, Duration::from_secs(180));
    assert_eq!(p.handle().calls.len(), 1);
}

#[test]
fn select_then_ready_plays_every_valid_index() {
    for i in 1..4 {
        let mut p = player(4);
        play_index(&mut p, i);
        assert_eq!(p.state().index, i);
        assert!(p.state().is_playing());
        assert!(!p.state().is_loading());
    }
}

#[test]
fn select_track_pauses_then_loads_new_source() {
    let mut p = player(3);
    p.dispatch(Event::SelectTrack(2));

    let s = *p.state();
    assert!(s.is_loading());
    assert_eq!(s.index, 2);
    assert_eq!(s.position, Duration::ZERO);
    assert_eq!(
        p.handle().calls,
        vec![Call::Pause, Call::Load(s.ticket, PathBuf::from("/music/2.mp3"))]
    );

    ready(&mut p);
    assert_eq!(p.handle().calls.last(), Some(&Call::Play(s.ticket)));
}

#[test]
fn selecting_current_track_toggles_instead_of_reloading() {
    let mut p = player(3);
    p.dispatch(Event::SelectTrack(0));
    assert!(p.state().is_playing());
    p.dispatch(Event::SelectTrack(0));
    assert_eq!(p.state().phase, Phase::Paused);
    assert!(
        !p.handle()
            .calls
            .iter()
            .any(|c| matches!(c, Call::Load(..)))
    );
}

#[test]
fn toggle_play_twice_returns_to_playing() {
    let mut p = player(3);
    play_index(&mut p, 1);
    assert!(p.state().is_playing());

    p.dispatch(Event::TogglePlay);
    assert_eq!(p.state().phase, Phase::Paused);
    p.dispatch(Event::TogglePlay);
    assert!(p.state().is_playing());
}

#[test]
fn toggle_play_is_ignored_while_loading() {
    let s = PlaybackState {
        phase: Phase::Loading,
        ..PlaybackState::default()
    };
    let t = step(s, Event::TogglePlay, 3, &mut rng());
    assert_eq!(t.state, s);
    assert!(t.effects.is_empty());
}

#[test]
fn set_volume_clamps_to_unit_range() {
    for (input, expected) in [
        (-3.0, 0.0),
        (0.0, 0.0),
        (0.42, 0.42),
        (1.0, 1.0),
        (7.5, 1.0),
        (f32::INFINITY, 1.0),
        (f32::NEG_INFINITY, 0.0),
    ] {
        let t = step(PlaybackState::default(), Event::SetVolume(input), 3, &mut rng());
        assert_eq!(t.state.volume, expected, "input {input}");
        assert_eq!(t.effects, vec![Effect::SetVolume(expected)]);
    }
}

#[test]
fn set_volume_ignores_nan() {
    let s = PlaybackState {
        volume: 0.3,
        ..PlaybackState::default()
    };
    let t = step(s, Event::SetVolume(f32::NAN), 3, &mut rng());
    assert_eq!(t.state.volume, 0.3);
    assert!(t.effects.is_empty());
}

#[test]
fn ended_with_repeat_restarts_same_track() {
    let mut p = player(3);
    p.dispatch(Event::SetRepeat(true));
    play_index(&mut p, 1);
    let ticket = p.state().ticket;

    for _ in 0..3 {
        p.dispatch(Event::Ended { ticket });
        assert_eq!(p.state().index, 1);
        assert_eq!(p.state().ticket, ticket);
        assert!(p.state().is_playing());
    }
    let tail = &p.handle().calls[p.handle().calls.len() - 2..];
    assert_eq!(tail, &[Call::Position(Duration::ZERO), Call::Play(ticket)]);
}

#[test]
fn ended_without_repeat_advances() {
    let mut p = player(3);
    play_index(&mut p, 1);
    let ticket = p.state().ticket;

    p.dispatch(Event::Ended { ticket });
    assert_eq!(p.state().index, 2);
    assert!(p.state().is_loading());
}

#[test]
fn ended_on_last_track_without_repeat_pauses() {
    let mut p = player(3);
    play_index(&mut p, 2);
    let ticket = p.state().ticket;

    p.dispatch(Event::Ended { ticket });
    assert_eq!(p.state().index, 2);
    assert_eq!(p.state().phase, Phase::Paused);
    assert_eq!(p.handle().calls.last(), Some(&Call::Pause));
}

#[test]
fn next_clamps_at_last_without_repeat() {
    let s = PlaybackState {
        index: 2,
        ..PlaybackState::default()
    };
    let t = step(s, Event::Next, 3, &mut rng());
    assert_eq!(t.state.index, 2);
}

#[test]
fn previous_clamps_at_first_without_repeat() {
    let s = PlaybackState {
        index: 0,
        ..PlaybackState::default()
    };
    let t = step(s, Event::Previous, 3, &mut rng());
    assert_eq!(t.state.index, 0);
}

#[test]
fn previous_wraps_to_last_with_repeat() {
    let s = PlaybackState {
        index: 0,
        repeat: true,
        ..PlaybackState::default()
    };
    let t = step(s, Event::Previous, 3, &mut rng());
    assert_eq!(t.state.index, 2);
    assert!(t.state.is_loading());
}

#[test]
fn previous_steps_back_by_one() {
    let s = PlaybackState {
        index: 2,
        ..PlaybackState::default()
    };
    let t = step(s, Event::Previous, 3, &mut rng());
    assert_eq!(t.state.index, 1);
}

#[test]
fn next_twice_then_clamps_on_three_tracks() {
    let mut p = player(3);
    let mut seen = Vec::new();
    for _ in 0..3 {
        p.dispatch(Event::Next);
        ready(&mut p);
        seen.push(p.state().index);
    }
    assert_eq!(seen, vec![1, 2, 2]);
}

#[test]
fn next_wraps_to_first_with_repeat() {
    let mut p = player(3);
    play_index(&mut p, 2);
    p.dispatch(Event::SetRepeat(true));
    p.dispatch(Event::Next);
    assert_eq!(p.state().index, 0);
}

#[test]
fn shuffle_next_stays_in_range_and_covers_playlist() {
    let len = 5;
    let mut r = rng();
    let mut s = PlaybackState {
        shuffle: true,
        ..PlaybackState::default()
    };
    let mut hits = vec![0usize; len];

    for _ in 0..2000 {
        let t = step(s, Event::Next, len, &mut r);
        assert!(t.state.index < len);
        hits[t.state.index] += 1;
        s = t.state;
        s.phase = Phase::Playing;
    }

    // Uniform picks: each index should land near 400 of 2000.
    for (i, n) in hits.iter().enumerate() {
        assert!(*n > 250, "index {i} chosen only {n} times");
    }
}

#[test]
fn latest_selection_wins_over_stale_load() {
    let mut p = player(4);
    p.dispatch(Event::SelectTrack(1));
    let first = p.state().ticket;
    p.dispatch(Event::SelectTrack(3));
    let second = p.state().ticket;
    assert_ne!(first, second);

    p.dispatch(Event::LoadReady {
        ticket: second,
        duration: None,
    });
    assert_eq!(p.state().index, 3);
    assert!(p.state().is_playing());

    let calls_before = p.handle().calls.len();
    p.dispatch(Event::LoadReady {
        ticket: first,
        duration: Some(Duration::from_secs(1)),
    });
    assert_eq!(p.state().index, 3);
    assert!(p.state().is_playing());
    assert_eq!(p.handle().calls.len(), calls_before);
}

#[test]
fn stale_load_ready_before_current_does_not_play() {
    let mut p = player(4);
    p.dispatch(Event::SelectTrack(1));
    let first = p.state().ticket;
    p.dispatch(Event::SelectTrack(2));

    p.dispatch(Event::LoadReady {
        ticket: first,
        duration: None,
    });
    assert_eq!(p.state().index, 2);
    assert!(p.state().is_loading());
}

#[test]
fn stale_signals_never_change_state() {
    let mut s = PlaybackState {
        index: 1,
        phase: Phase::Playing,
        ticket: Ticket(5),
        position: Duration::from_secs(10),
        ..PlaybackState::default()
    };
    s.duration = Duration::from_secs(100);
    let old = Ticket(4);

    for ev in [
        Event::LoadReady {
            ticket: old,
            duration: None,
        },
        Event::LoadFailed {
            ticket: old,
            reason: "x".into(),
        },
        Event::PlayRejected {
            ticket: old,
            reason: "x".into(),
        },
        Event::Progress {
            ticket: old,
            position: Duration::from_secs(99),
            duration: Some(Duration::from_secs(5)),
        },
        Event::Ended { ticket: old },
    ] {
        let t = step(s, ev.clone(), 3, &mut rng());
        assert_eq!(t.state, s, "{ev:?}");
        assert!(t.effects.is_empty());
    }
}

#[test]
fn load_failure_falls_back_to_paused_on_new_index() {
    let mut p = player(3);
    p.dispatch(Event::SelectTrack(2));
    let ticket = p.state().ticket;
    p.dispatch(Event::LoadFailed {
        ticket,
        reason: "decode error".into(),
    });
    assert_eq!(p.state().index, 2);
    assert_eq!(p.state().phase, Phase::Paused);
}

#[test]
fn play_rejection_reverts_to_paused() {
    let mut p = player(3);
    p.dispatch(Event::TogglePlay);
    assert!(p.state().is_playing());
    let ticket = p.state().ticket;
    p.dispatch(Event::PlayRejected {
        ticket,
        reason: "no source".into(),
    });
    assert_eq!(p.state().phase, Phase::Paused);
}

#[test]
fn unresolved_load_stays_loading() {
    let mut p = player(3);
    p.dispatch(Event::SelectTrack(1));
    let ticket = p.state().ticket;
    p.dispatch(Event::Progress {
        ticket,
        position: Duration::ZERO,
        duration: None,
    });
    p.dispatch(Event::TogglePlay);
    assert!(p.state().is_loading());

    // Another switch can still supersede it.
    p.dispatch(Event::SelectTrack(2));
    ready(&mut p);
    assert_eq!(p.state().index, 2);
    assert!(p.state().is_playing());
}

#[test]
fn progress_updates_position_and_duration() {
    let mut p = player(3);
    play_index(&mut p, 1);
    let ticket = p.state().ticket;
    p.dispatch(Event::Progress {
        ticket,
        position: Duration::from_secs(12),
        duration: Some(Duration::from_secs(200)),
    });
    assert_eq!(p.state().position, Duration::from_secs(12));
    assert_eq!(p.state().duration, Duration::from_secs(200));
    assert!(p.state().is_playing());
}

#[test]
fn seek_is_forwarded_and_clamped_to_known_duration() {
    let mut p = player(3);
    play_index(&mut p, 1);

    p.dispatch(Event::Seek(Duration::from_secs(30)));
    assert_eq!(p.state().position, Duration::from_secs(30));
    assert_eq!(
        p.handle().calls.last(),
        Some(&Call::Position(Duration::from_secs(30)))
    );

    p.dispatch(Event::Seek(Duration::from_secs(999)));
    assert_eq!(p.state().position, Duration::from_secs(180));
}

#[test]
fn shuffle_and_repeat_flags_have_no_effects() {
    let t = step(PlaybackState::default(), Event::SetShuffle(true), 3, &mut rng());
    assert!(t.state.shuffle);
    assert!(t.effects.is_empty());

    let t = step(t.state, Event::SetRepeat(true), 3, &mut rng());
    assert!(t.state.repeat);
    assert!(t.effects.is_empty());
}

#[test]
fn out_of_range_selection_keeps_current_track() {
    let mut p = player(3);
    play_index(&mut p, 1);
    let before = *p.state();
    let calls = p.handle().calls.len();

    p.dispatch(Event::SelectTrack(9));
    assert_eq!(*p.state(), before);
    assert_eq!(p.handle().calls.len(), calls);

    // Stepping back afterwards stays inside the playlist.
    p.dispatch(Event::Previous);
    assert_eq!(p.state().index, 0);
}

#[test]
fn step_ignores_selection_at_len() {
    let s = PlaybackState::default();
    let t = step(s, Event::SelectTrack(3), 3, &mut rng());
    assert_eq!(t.state, s);
    assert!(t.effects.is_empty());
}
