use std::env;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioHandle;
use crate::player::Player;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    if let Err(e) = logging::init(&settings) {
        eprintln!("tonearm: logging disabled: {e}");
    }
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let playlist = startup::resolve_playlist(env::args().nth(1), &settings)?;
    info!(tracks = playlist.len(), "playlist loaded");

    let (handle, signals) = RodioHandle::spawn(settings.audio.clone());
    let mut app = App::new(Player::new(playlist, handle));
    startup::apply_playback_defaults(&mut app, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &signals, &mut state)
    })();

    app.player
        .handle()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
