//! User interface components.
//!
//! Draws the player with ratatui: the lyrics panel on the left, the avatar
//! panel on the right, and the timeline and command bar at the bottom.

mod avatar;
mod lyrics_view;

pub use avatar::draw_avatar;
pub use lyrics_view::draw_lyrics;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::input::PlayerCommand;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),
            Constraint::Length(3), // Timeline
            Constraint::Length(3), // Command bar
        ])
        .split(f.size());

    draw_header(f, app, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    draw_lyrics(f, app, panels[0]);
    draw_avatar(f, app, panels[1]);

    draw_timeline(f, app, chunks[2]);
    draw_command_bar(f, chunks[3]);

    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }
    if let Some(status) = &app.status_message {
        draw_status_message(f, status);
        return;
    }
    if app.show_help {
        draw_help_modal(f);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let (title, artist) = app.document.as_ref().map_or((None, None), |doc| {
        (doc.title.as_deref(), doc.artist.as_deref())
    });

    let mut spans = vec![Span::styled(
        title.or(app.source_name.as_deref()).unwrap_or("No lyrics loaded"),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    if let Some(artist) = artist {
        spans.push(Span::styled(format!("  by {artist}"), Style::default().fg(Color::Gray)));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(create_titled_block(app.config.app_name(), false));
    f.render_widget(header, area);
}

fn draw_timeline(f: &mut Frame, app: &App, area: Rect) {
    let state = if app.clock.is_playing() { "▶" } else { "⏸" };
    let label = format!(
        "{state} {} / {}",
        format_time(app.clock.position()),
        format_time(app.clock.duration())
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(app.clock.ratio())
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_command_bar(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled("Commands", Style::default().fg(Color::Yellow)));

    let status_bar = Paragraph::new(Line::from(create_help_text(PlayerCommand::bindings())))
        .style(Style::default().fg(Color::Gray))
        .block(block);
    f.render_widget(status_bar, area);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")];

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));
        if i + 1 < commands.len() {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default(), Style::default())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Format seconds as `m:ss`. Negative and non-finite values show as `0:00`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds.floor() as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Cut `text` to at most `max_width` terminal columns, marking cuts with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn centered_rect(f: &Frame, width: u16, height: u16) -> Rect {
    let size = f.size();
    let width = width.min(size.width.saturating_sub(4));
    let height = height.min(size.height.saturating_sub(2));
    Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

// Draw an error message overlay
fn draw_error_message(f: &mut Frame, message: &str) {
    draw_message_box(f, "Error", Color::Red, message);
}

fn draw_status_message(f: &mut Frame, message: &str) {
    draw_message_box(f, "Info", Color::Cyan, message);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_message_box(f: &mut Frame, title: &str, color: Color, message: &str) {
    let max_width = (f.size().width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(40);
    let inner_width = width.saturating_sub(4).max(1);
    let msg_lines = message.width().div_ceil(inner_width).max(1);
    let area = centered_rect(f, width as u16, msg_lines as u16 + 4);

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(hint, inner_area[1]);
}

// Draw the help modal with keybindings
#[allow(clippy::cast_possible_truncation)]
fn draw_help_modal(f: &mut Frame) {
    let help_lines = build_help_content();
    let area = centered_rect(f, 50, help_lines.len() as u16 + 2);

    let block = Block::default()
        .title(Span::styled(" Help - Keybindings ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let help_text: Vec<Line> = help_lines
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>12}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(help_text).block(block).wrap(Wrap { trim: true }), area);
}

fn build_help_content() -> Vec<(&'static str, &'static str, bool)> {
    vec![
        ("── Playback ──", "", true),
        ("Space", "Play / pause", false),
        ("← / h", "Seek backward", false),
        ("→ / l", "Seek forward", false),
        ("r", "Restart from the top", false),
        ("", "", false),
        ("── Lyrics ──", "", true),
        ("p / Ctrl+V", "Load lyrics from clipboard", false),
        ("", "", false),
        ("── General ──", "", true),
        ("F1 / ?", "Show this help", false),
        ("Esc", "Dismiss message", false),
        ("q / Ctrl+C", "Quit", false),
    ]
}
