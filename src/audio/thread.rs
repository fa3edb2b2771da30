use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::config::AudioSettings;
use crate::player::Ticket;

use super::sink::create_sink_at;
use super::types::{AudioCmd, AudioError, Signal, SignalKind};

/// The track currently held by the audio thread.
struct Loaded {
    ticket: Ticket,
    src: PathBuf,
    sink: Sink,
    duration: Option<Duration>,
    /// Start offset of `sink` when it was rebuilt to seek.
    offset: Duration,
}

/// Everything the audio thread mutates between commands.
struct Deck {
    stream: Option<OutputStream>,
    loaded: Option<Loaded>,
    volume: f32,
    playing: bool,
    ended_sent: bool,
    signals: Sender<Signal>,
}

impl Deck {
    fn emit(&self, ticket: Ticket, kind: SignalKind) {
        // The receiver only goes away during shutdown.
        let _ = self.signals.send(Signal::new(ticket, kind));
    }

    fn load(&mut self, ticket: Ticket, src: PathBuf) {
        if let Some(old) = self.loaded.take() {
            old.sink.stop();
        }
        self.playing = false;
        self.ended_sent = false;

        let Some(stream) = self.stream.as_ref() else {
            self.emit(
                ticket,
                SignalKind::LoadFailed {
                    reason: "no audio output device".to_string(),
                },
            );
            return;
        };

        match create_sink_at(stream, &src, Duration::ZERO, self.volume) {
            Ok((sink, duration)) => {
                debug!(?ticket, src = %src.display(), ?duration, "track ready");
                self.loaded = Some(Loaded {
                    ticket,
                    src,
                    sink,
                    duration,
                    offset: Duration::ZERO,
                });
                self.emit(ticket, SignalKind::LoadReady { duration });
            }
            Err(e) => {
                self.emit(
                    ticket,
                    SignalKind::LoadFailed {
                        reason: e.to_string(),
                    },
                );
            }
        }
    }

    fn play(&mut self, ticket: Ticket) {
        let finished = match self.loaded.as_ref() {
            Some(l) if l.ticket == ticket => l.sink.empty(),
            Some(_) | None => {
                self.emit(
                    ticket,
                    SignalKind::PlayRejected {
                        reason: "nothing loaded for this request".to_string(),
                    },
                );
                return;
            }
        };

        // A drained sink has no source left; start the track over.
        if finished && !self.rebuild_at(Duration::ZERO) {
            return;
        }

        if let Some(l) = self.loaded.as_ref() {
            l.sink.play();
            self.playing = true;
            self.ended_sent = false;
        }
    }

    fn pause(&mut self) {
        if let Some(l) = self.loaded.as_ref() {
            l.sink.pause();
        }
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(l) = self.loaded.as_ref() {
            l.sink.set_volume(volume);
        }
    }

    fn seek(&mut self, pos: Duration) {
        let Some(l) = self.loaded.as_mut() else {
            return;
        };

        if !l.sink.empty() {
            match l.sink.try_seek(pos) {
                Ok(()) => {
                    l.offset = Duration::ZERO;
                    self.ended_sent = false;
                    return;
                }
                Err(e) => debug!(%e, "seek unsupported, rebuilding sink"),
            }
        }

        if self.rebuild_at(pos) && self.playing {
            if let Some(l) = self.loaded.as_ref() {
                l.sink.play();
            }
        }
    }

    /// Replace the current sink with a fresh paused one starting at `pos`.
    fn rebuild_at(&mut self, pos: Duration) -> bool {
        let (Some(stream), Some(l)) = (self.stream.as_ref(), self.loaded.as_mut()) else {
            return false;
        };

        match create_sink_at(stream, &l.src, pos, self.volume) {
            Ok((sink, _)) => {
                l.sink.stop();
                l.sink = sink;
                l.offset = pos;
                self.ended_sent = false;
                true
            }
            Err(e) => {
                warn!(%e, "failed to reopen track");
                false
            }
        }
    }

    /// Periodic progress report and end-of-track detection.
    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(l) = self.loaded.as_ref() else {
            return;
        };

        let ticket = l.ticket;
        if l.sink.empty() {
            self.playing = false;
            if !self.ended_sent {
                self.ended_sent = true;
                self.emit(ticket, SignalKind::Ended);
            }
        } else {
            let position = l.offset + l.sink.get_pos();
            let duration = l.duration;
            self.emit(ticket, SignalKind::Progress { position, duration });
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(l) = self.loaded.take() {
            if self.playing {
                // Fade out gently before stopping.
                fade_out_sink(&l.sink, self.volume, fade_out_ms);
            }
            l.sink.stop();
        }
        self.playing = false;
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    signals: Sender<Signal>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream().map_err(AudioError::from) {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!(%e, "every load will fail");
                None
            }
        };

        let mut deck = Deck {
            stream,
            loaded: None,
            volume: 1.0,
            playing: false,
            ended_sent: false,
            signals,
        };
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { ticket, src } => deck.load(ticket, src),
                    AudioCmd::Play { ticket } => deck.play(ticket),
                    AudioCmd::Pause => deck.pause(),
                    AudioCmd::SetVolume(v) => deck.set_volume(v),
                    AudioCmd::Seek(pos) => deck.seek(pos),
                    AudioCmd::Quit { fade_out_ms } => {
                        deck.quit(fade_out_ms);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => deck.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
