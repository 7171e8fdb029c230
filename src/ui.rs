use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app_state::{AppState, Overlay, ResponseState};
use crate::constants::EXAMPLE_QUERIES;
use crate::theme::ThemePreference;

/// Colors for one theme. Light mode maps onto the terminal's light palette,
/// dark mode onto the default one.
struct Palette {
    fg: Color,
    muted: Color,
    accent: Color,
    link: Color,
    error: Color,
}

fn palette(dark: bool) -> Palette {
    if dark {
        Palette {
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Yellow,
            link: Color::Cyan,
            error: Color::Red,
        }
    } else {
        Palette {
            fg: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            link: Color::Blue,
            error: Color::LightRed,
        }
    }
}

pub fn draw(f: &mut Frame, app: &mut AppState) {
    // Unknown theme renders with the dark palette; the toggle control itself
    // stays blank until detection settles.
    let pal = palette(app.theme.applied_dark().unwrap_or(true));

    let textarea_height = {
        let line_count = app.textarea.lines().len() as u16;
        (line_count + 2).clamp(3, 8)
    };

    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(textarea_height),
    ];
    if app.first_query {
        constraints.insert(2, Constraint::Length(EXAMPLE_QUERIES.len() as u16 + 2));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_header(f, app, &pal, chunks[0]);
    draw_transcript(f, app, &pal, chunks[1]);
    if app.first_query {
        draw_example_queries(f, &pal, chunks[2]);
        f.render_widget(&app.textarea, chunks[3]);
    } else {
        f.render_widget(&app.textarea, chunks[2]);
    }

    match app.overlay {
        Overlay::History => draw_history_overlay(f, app, &pal),
        Overlay::Settings => draw_settings_overlay(f, app, &pal),
        Overlay::None => {}
    }
}

fn draw_header(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let toggle = match app.theme.indicator_dark() {
        // Nothing until ambient detection has settled.
        None => Span::raw(""),
        Some(true) => Span::styled("[🌙 dark]", Style::default().fg(pal.accent)),
        Some(false) => Span::styled("[☀ light]", Style::default().fg(pal.accent)),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "✦ Newsify",
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        toggle,
        Span::raw("  "),
        Span::styled(
            "Ctrl+T theme  Ctrl+H history  Ctrl+S settings  Esc quit",
            Style::default().fg(pal.muted),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(pal.fg));
    f.render_widget(header, area);
}

fn draw_transcript(f: &mut Frame, app: &mut AppState, pal: &Palette, area: Rect) {
    let mut lines = Vec::new();

    if app.first_query && app.entries.is_empty() {
        lines.push(Line::from(Span::styled(
            "What do you want to know?",
            Style::default().fg(pal.fg).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    for entry in &app.entries {
        lines.push(Line::from(vec![
            Span::styled(
                entry.submitted_at.format("%H:%M:%S").to_string(),
                Style::default().fg(pal.muted),
            ),
            Span::raw(" "),
            Span::styled(
                "🔍 ",
                Style::default().fg(pal.accent),
            ),
            Span::styled(&entry.query, Style::default().fg(pal.fg).add_modifier(Modifier::BOLD)),
        ]));

        let answer_style = match entry.response {
            ResponseState::Pending => Style::default().fg(pal.muted).add_modifier(Modifier::ITALIC),
            ResponseState::Received(_) => Style::default().fg(pal.fg),
            ResponseState::Failed => Style::default().fg(pal.error),
        };
        lines.push(Line::from(Span::styled(
            entry.response.display_text().to_string(),
            answer_style,
        )));

        for article in &entry.articles {
            lines.push(Line::from(vec![
                Span::styled("  🔗 ", Style::default().fg(pal.link)),
                Span::styled(&article.title, Style::default().fg(pal.link)),
                Span::raw(" "),
                Span::styled(&article.url, Style::default().fg(pal.muted)),
            ]));
        }
        lines.push(Line::from(""));
    }

    // Keep the offset inside the rendered content.
    let max_offset = (lines.len() as u16).saturating_sub(area.height.saturating_sub(2));
    if app.scroll_offset > max_offset {
        app.scroll_offset = max_offset;
    }

    let transcript = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Transcript"))
        .style(Style::default().fg(pal.fg))
        .wrap(Wrap { trim: true })
        .scroll((app.scroll_offset, 0));
    f.render_widget(transcript, area);
}

fn draw_example_queries(f: &mut Frame, pal: &Palette, area: Rect) {
    let lines: Vec<Line> = EXAMPLE_QUERIES
        .iter()
        .enumerate()
        .map(|(i, example)| {
            Line::from(vec![
                Span::styled(format!("F{} ", i + 1), Style::default().fg(pal.accent)),
                Span::styled(*example, Style::default().fg(pal.fg)),
            ])
        })
        .collect();

    let examples = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Try asking"))
        .style(Style::default().fg(pal.fg));
    f.render_widget(examples, area);
}

fn draw_history_overlay(f: &mut Frame, app: &AppState, pal: &Palette) {
    let mut lines = vec![
        Line::from(Span::styled(
            "History",
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if app.chats.is_empty() {
        lines.push(Line::from(Span::styled(
            "No saved chats",
            Style::default().fg(pal.muted).add_modifier(Modifier::ITALIC),
        )));
    } else {
        for chat in &app.chats {
            lines.push(Line::from(vec![
                Span::styled(&chat.title, Style::default().fg(pal.fg)),
                Span::styled(
                    format!(
                        "  ({} entries, {})",
                        chat.responses.len(),
                        chat.created_at.format("%Y-%m-%d")
                    ),
                    Style::default().fg(pal.muted),
                ),
            ]));
        }
    }

    render_overlay(f, lines, pal);
}

fn draw_settings_overlay(f: &mut Frame, app: &AppState, pal: &Palette) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Settings / Theme",
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let choices = [
        (ThemePreference::Light, "Light"),
        (ThemePreference::Dark, "Dark"),
        (ThemePreference::System, "System"),
    ];
    for (i, (preference, label)) in choices.iter().enumerate() {
        let marker = if *preference == app.theme.preference() {
            "(•)"
        } else {
            "( )"
        };
        let style = if i == app.settings_cursor {
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.fg)
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}", marker, label),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down select, Enter apply, Esc close",
        Style::default().fg(pal.muted),
    )));

    render_overlay(f, lines, pal);
}

fn render_overlay(f: &mut Frame, lines: Vec<Line>, pal: &Palette) {
    let area = f.area();

    let max_width = lines
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(20)
        .min(area.width as usize - 4) as u16
        + 4;
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: (area.width.saturating_sub(max_width)) / 2,
        y: 2,
        width: max_width,
        height,
    };

    f.render_widget(Clear, popup_area);
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(pal.accent)),
        )
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);
    f.render_widget(widget, popup_area);
}
