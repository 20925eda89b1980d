use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::create_titled_block;
use crate::app::App;
use crate::types::Mood;

// Three-row stick figure per mood.
const fn pose(mood: Mood) -> [&'static str; 3] {
    match mood {
        Mood::Idle => [" o ", "/|\\", "/ \\"],
        Mood::Dancing => ["\\o/", " | ", "/ >"],
        Mood::Singing => [" o~", "/|\\", "/ \\"],
        Mood::Excited => ["\\o/", " | ", "/ \\"],
        Mood::Spinning => [" @ ", "-|-", "/ \\"],
        Mood::Headbanging => [" \\o", " |\\", "/ \\"],
    }
}

/// Draw the avatar panel: pose, mood, intensity, color and caption.
pub fn draw_avatar(f: &mut Frame, app: &App, area: Rect) {
    let block = create_titled_block("Avatar", false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Figure
            Constraint::Length(1), // Mood and color
            Constraint::Length(3), // Intensity
            Constraint::Min(2),    // Caption
        ])
        .split(inner);

    let intent = &app.intent;
    let color = intent.rgb().map_or(Color::White, |(r, g, b)| Color::Rgb(r, g, b));

    let figure: Vec<Line> = std::iter::once(Line::from(""))
        .chain(
            pose(intent.mood)
                .iter()
                .map(|row| Line::from(Span::styled(*row, Style::default().fg(color).add_modifier(Modifier::BOLD)))),
        )
        .collect();
    f.render_widget(Paragraph::new(figure).alignment(Alignment::Center), chunks[0]);

    let mood_line = Line::from(vec![
        Span::styled(intent.mood.name(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled("██", Style::default().fg(color)),
        Span::styled(format!(" {}", intent.color), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(mood_line).alignment(Alignment::Center), chunks[1]);

    let intensity = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Intensity"))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(intent.intensity.clamp(0.0, 1.0))
        .label(format!("{:.0}%", intent.intensity * 100.0));
    f.render_widget(intensity, chunks[2]);

    let caption = app
        .announced_line
        .and_then(|i| app.document.as_ref()?.caption(i));
    let caption_lines = caption.map_or_else(Vec::new, |caption| {
        let mut lines = vec![Line::from(Span::styled(
            caption.current.to_string(),
            Style::default().fg(Color::White),
        ))];
        if let Some(next) = caption.next {
            lines.push(Line::from(Span::styled(
                format!("Next: {next}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    });
    f.render_widget(
        Paragraph::new(caption_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[3],
    );
}
