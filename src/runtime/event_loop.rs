use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::app::App;
use crate::audio::{RodioHandle, Signal};
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Same for `zz` (jump to now playing).
    pub pending_zz: bool,
}

/// Main terminal event loop: drains audio signals, draws, and handles input.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<RodioHandle>,
    signals: &Receiver<Signal>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        loop {
            match signals.try_recv() {
                Ok(signal) => app.handle_signal(signal),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("audio thread exited");
                    return Ok(());
                }
            }
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns true when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<RodioHandle>,
    state: &mut EventLoopState,
) -> bool {
    let was_gg = std::mem::take(&mut state.pending_gg);
    let was_zz = std::mem::take(&mut state.pending_zz);

    let accepted = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play(),
        KeyCode::Char('l') | KeyCode::Char('n') => app.next_track(),
        KeyCode::Char('h') | KeyCode::Char('b') => app.previous_track(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char('s') => {
            app.toggle_shuffle();
            true
        }
        KeyCode::Char('r') => {
            app.toggle_repeat();
            true
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.nudge_volume(settings.controls.volume_step);
            true
        }
        KeyCode::Char('-') => {
            app.nudge_volume(-settings.controls.volume_step);
            true
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            app.scrub(secs);
            true
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            app.scrub(-secs);
            true
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback_off();
            app.next();
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback_off();
            app.prev();
            true
        }
        KeyCode::Char('g') => {
            if was_gg {
                app.follow_playback_off();
                app.select_first();
            } else {
                state.pending_gg = true;
            }
            true
        }
        KeyCode::Char('G') => {
            app.follow_playback_off();
            app.select_last();
            true
        }
        KeyCode::Char('z') => {
            if was_zz {
                app.follow_playback_on();
                app.select_now_playing();
            } else {
                state.pending_zz = true;
            }
            true
        }
        KeyCode::Char('K') => {
            app.toggle_metadata_window();
            true
        }
        _ => true,
    };

    if !accepted {
        debug!(key = ?key.code, "control disabled while loading");
    }
    false
}
