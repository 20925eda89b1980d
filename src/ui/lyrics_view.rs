use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{create_titled_block, truncate_to_width};
use crate::app::App;

/// Draw the scrolling lyrics panel.
///
/// The active line is centered and tinted with the current intent color.
/// In a gap between lines the panel stays on the line that just ended.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_lyrics(f: &mut Frame, app: &App, area: Rect) {
    let Some(doc) = app.document.as_ref().filter(|d| !d.is_empty()) else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No lyrics loaded", Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                "Press p to paste lyrics from the clipboard",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(create_titled_block("Lyrics", false));
        f.render_widget(empty, area);
        return;
    };

    let active = app.display_index();
    let focus = active.unwrap_or_else(|| {
        app.upcoming_index()
            .map_or(doc.len() - 1, |next| next.saturating_sub(1))
    });

    let title = match active {
        Some(i) => format!("Lyrics  {} / {}  ({:.0}%)", i + 1, doc.len(), doc.progress(active) * 100.0),
        None => format!("Lyrics  - / {}", doc.len()),
    };

    let highlight = app.intent.rgb().map_or(Color::Magenta, |(r, g, b)| Color::Rgb(r, g, b));
    let visible = area.height.saturating_sub(2) as usize;
    let width = area.width.saturating_sub(4) as usize;
    let first = focus.saturating_sub(visible / 2);

    let lines: Vec<Line> = doc
        .lines
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, line)| {
            let text = truncate_to_width(&line.text, width);
            let style = if Some(i) == active {
                Style::default().fg(highlight).add_modifier(Modifier::BOLD)
            } else if i < focus || (active.is_none() && i == focus) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(create_titled_block(&title, app.clock.is_playing()));
    f.render_widget(paragraph, area);
}
