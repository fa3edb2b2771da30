//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use rand::Rng;
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::audio::AudioHandle;
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{Phase, PlaybackState};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("zz", "now playing");
    map.insert("enter", "play selected song");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("+/-", "volume");
    map.insert("s", "shuffle");
    map.insert("r", "repeat");
    map.insert("K", "details");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "space/p", "h/l", "H/L", "enter", "j/k", "gg/G", "zz", "+/-", "s", "r", "K", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `MM:SS / MM:SS`, with `--:--` while the length is unknown.
fn position_label(s: &PlaybackState) -> String {
    let total = if s.duration_known() {
        format_mmss(s.duration)
    } else {
        "--:--".to_string()
    };
    format!("{} / {}", format_mmss(s.position), total)
}

fn position_ratio(s: &PlaybackState) -> f64 {
    if !s.duration_known() {
        return 0.0;
    }
    (s.position.as_secs_f64() / s.duration.as_secs_f64()).clamp(0.0, 1.0)
}

fn status_line(s: &PlaybackState) -> String {
    let phase = match s.phase {
        Phase::Playing => "Playing",
        Phase::Paused => "Paused",
        Phase::Loading => "Loading…",
    };
    let shuffle = if s.shuffle { "Shuffle On" } else { "Shuffle Off" };
    let repeat = if s.repeat { "Repeat On" } else { "Repeat Off" };
    let volume = (s.volume * 100.0).round() as u32;
    [
        phase.to_string(),
        shuffle.to_string(),
        repeat.to_string(),
        format!("Volume {volume}%"),
    ]
    .join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Rows available for items inside a bordered list block.
fn list_rows(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

/// Pick the slice of the list to show so the cursor stays roughly centered.
///
/// Returns `(start, end, cursor position within the window)`.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<H: AudioHandle, R: Rng>(
    frame: &mut Frame,
    app: &App<H, R>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());
    let state = app.state();

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tonearm ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let (title, cover) = match app.player.current_track() {
        Some(t) => (
            t.title.clone(),
            t.cover
                .as_ref()
                .map(|c| c.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        None => ("-".to_string(), "-".to_string()),
    };
    let now_playing = format!(
        "Now Playing: {}\nCover: {}\n{}",
        title,
        cover,
        status_line(state)
    );
    let now_playing_par = Paragraph::new(now_playing)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing_par, chunks[1]);

    // Position
    let gauge = Gauge::default()
        .block(Block::bordered().title(" position "))
        .ratio(position_ratio(state))
        .label(position_label(state));
    frame.render_widget(gauge, chunks[2]);

    // Playlist
    {
        let tracks = app.tracks();
        let (start, end, cursor) =
            visible_window(tracks.len(), list_rows(chunks[3]), app.selected);

        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let marker = if start + offset == state.index {
                    "♪ "
                } else {
                    "  "
                };
                ListItem::new(format!("{marker}{}", track.title))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        if end > start {
            list_state.select(Some(cursor));
        }
        frame.render_stateful_widget(list, chunks[3], &mut list_state);
    }

    // Overlay details popup (keeps list visible under it)
    if app.metadata_window {
        let list_area = chunks[3];
        let popup_area = centered_rect_sized(72, 8, list_area);
        frame.render_widget(Clear, popup_area);

        let details = match app.tracks().get(app.selected) {
            Some(track) => {
                let duration = if app.selected == state.index && state.duration_known() {
                    format_mmss(state.duration)
                } else {
                    "-".to_string()
                };
                format!(
                    "Title: {}\nCover: {}\nSource: {}\nDuration: {}",
                    track.title,
                    track
                        .cover
                        .as_ref()
                        .map(|c| c.display().to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    track.src.display(),
                    duration
                )
            }
            None => "No track selected".to_string(),
        };
        let details_paragraph = Paragraph::new(details)
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" details (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(details_paragraph, popup_area);
    }

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
