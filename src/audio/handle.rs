use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;
use crate::player::Ticket;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioHandle, Signal};

/// `AudioHandle` backed by a `rodio` sink on a dedicated thread.
pub struct RodioHandle {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioHandle {
    /// Start the audio thread. Signals about loads and playback arrive on
    /// the returned receiver.
    pub fn spawn(audio_settings: AudioSettings) -> (Self, Receiver<Signal>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (signal_tx, signal_rx) = mpsc::channel::<Signal>();

        let audio_handle = spawn_audio_thread(rx, signal_tx, audio_settings);

        let handle = Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        };
        (handle, signal_rx)
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(cmd = ?e.0, "audio thread is gone");
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl AudioHandle for RodioHandle {
    fn load(&mut self, ticket: Ticket, src: PathBuf) {
        self.send(AudioCmd::Load { ticket, src });
    }

    fn play(&mut self, ticket: Ticket) {
        self.send(AudioCmd::Play { ticket });
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }

    fn set_position(&mut self, position: Duration) {
        self.send(AudioCmd::Seek(position));
    }
}
