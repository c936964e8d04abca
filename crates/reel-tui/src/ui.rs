//! Rendering routines for the Reel TUI.

use crate::app::{App, FORM_FIELDS, member_name};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use reel_protocol::{FieldId, Record};

const PRIMARY: Color = Color::Rgb(236, 91, 43);
const SECONDARY: Color = Color::Rgb(238, 121, 72);
const TEXT: Color = Color::Rgb(238, 238, 238);
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);
const BORDER: Color = Color::Rgb(60, 60, 60);
const BORDER_ACTIVE: Color = Color::Rgb(238, 121, 72);
const YELLOW: Color = Color::Rgb(229, 192, 123);
const RED: Color = Color::Rgb(255, 110, 110);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &App, record: &Record) {
    let area = frame.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // form
            Constraint::Length(1), // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);
    draw_form(frame, app, record, root[1]);
    draw_status_bar(frame, app, root[2]);
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            " reel",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" v{VERSION}"), Style::default().fg(TEXT_MUTED)),
        Span::styled("  publisher ", Style::default().fg(TEXT_MUTED)),
        Span::styled(app.publisher.as_str(), Style::default().fg(TEXT)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn field_height(field: FieldId) -> Constraint {
    match field {
        FieldId::Description => Constraint::Length(5),
        FieldId::Cast => Constraint::Min(4),
        _ => Constraint::Length(3),
    }
}

fn field_label(field: FieldId) -> &'static str {
    match field {
        FieldId::Title => " Title ",
        FieldId::Year => " Year (Up/Down) ",
        FieldId::Upcoming => " Upcoming (Space) ",
        FieldId::Description => " Description ",
        FieldId::Rating => " Rating ",
        FieldId::Cast => " Cast (Enter add/update, Del remove) ",
    }
}

fn draw_form(frame: &mut Frame<'_>, app: &App, record: &Record, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(FORM_FIELDS.map(field_height))
        .split(area);

    for (field, row) in FORM_FIELDS.iter().zip(rows.iter()) {
        let active = app.focused() == *field;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if active { BORDER_ACTIVE } else { BORDER }))
            .title(Span::styled(
                field_label(*field),
                Style::default().fg(if active { SECONDARY } else { TEXT_MUTED }),
            ));
        let inner = block.inner(*row);
        frame.render_widget(block, *row);

        if *field == FieldId::Cast {
            draw_cast(frame, app, record, inner, active);
            continue;
        }

        let value = app.buffer(*field);
        let paragraph = Paragraph::new(value).style(Style::default().fg(TEXT));
        let paragraph = if *field == FieldId::Description {
            paragraph.wrap(Wrap { trim: false })
        } else {
            paragraph
        };
        frame.render_widget(paragraph, inner);

        if active && *field != FieldId::Upcoming && *field != FieldId::Description {
            frame.set_cursor_position((inner.x + value.chars().count() as u16, inner.y));
        }
    }
}

fn draw_cast(frame: &mut Frame<'_>, app: &App, record: &Record, area: Rect, active: bool) {
    let selected_style = Style::default()
        .fg(Color::Rgb(10, 10, 10))
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'_>> = record
        .cast
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let style = if active && app.cast_selected == Some(index) {
                selected_style
            } else {
                Style::default().fg(TEXT)
            };
            Line::from(vec![
                Span::styled(format!(" #{:<4}", member.id), Style::default().fg(TEXT_MUTED)),
                Span::styled(member_name(member).to_string(), style),
            ])
        })
        .collect();

    let (prompt, prompt_style) = match app.cast_selected {
        Some(_) => (" edit ", Style::default().fg(YELLOW)),
        None => (" new  ", Style::default().fg(SECONDARY)),
    };
    let input = if active {
        app.cast_input.as_str()
    } else {
        ""
    };
    lines.push(Line::from(vec![
        Span::styled(prompt, prompt_style),
        Span::styled(input.to_string(), Style::default().fg(TEXT)),
    ]));

    // Keep the input line visible when the list outgrows the block.
    let overflow = (lines.len() as u16).saturating_sub(area.height);
    frame.render_widget(Paragraph::new(lines).scroll((overflow, 0)), area);
}

fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_color = if app.status.starts_with("save failed") {
        RED
    } else if app.pending_saves > 0 {
        YELLOW
    } else {
        TEXT_MUTED
    };

    let shortcuts = vec![
        Span::styled(" Esc", Style::default().fg(TEXT_MUTED)),
        Span::styled(" quit", Style::default().fg(BORDER)),
        Span::styled("  Tab", Style::default().fg(TEXT_MUTED)),
        Span::styled(" next field", Style::default().fg(BORDER)),
        Span::styled("  Ctrl+P", Style::default().fg(TEXT_MUTED)),
        Span::styled(" publish", Style::default().fg(BORDER)),
    ];

    let right_text = if app.pending_saves > 0 {
        format!(" {} ({} pending) ", app.status, app.pending_saves)
    } else {
        format!(" {} ", app.status)
    };

    let right_len = right_text.len() as u16;
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len.min(area.width),
        ..area
    };

    let left = Paragraph::new(Line::from(shortcuts));
    let right = Paragraph::new(Line::from(Span::styled(
        right_text,
        Style::default().fg(status_color),
    )));

    frame.render_widget(left, left_area);
    frame.render_widget(right, right_area);
}
