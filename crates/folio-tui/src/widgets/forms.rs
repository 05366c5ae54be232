use folio_core::form::Field;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::{centered_columns, faded, is_drawn, render_offset, row, shift_rows};
use crate::app::{App, Mode};
use crate::reveals::RevealKey;
use crate::theme::Theme;

const HEADING: &str = "Get in touch";
const SUBHEADING: &str = "Have a project in mind? Send a message.";
const FORM_WIDTH: u16 = 60;
/// First field row inside the contact block
const FIELDS_ROW: u16 = 4;
const MESSAGE_HEIGHT: u16 = 5;

/// Bordered text input with its error line underneath
pub(super) fn input_field<'a>(theme: &Theme, label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let border = if focused { theme.accent } else { theme.border };
    let mut spans = vec![Span::styled(value, Style::default().fg(theme.text))];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
    }
    Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(format!(" {} ", label), Style::default().fg(theme.muted)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    )
}

pub(super) fn error_line<'a>(theme: &Theme, error: Option<&'a str>) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(error.unwrap_or(""), Style::default().fg(theme.error))))
}

/// Contact form: name, email and message with per-field errors
pub(super) fn render_contact(area: Rect, buf: &mut Buffer, app: &App, now_ms: f64) {
    let theme = &app.theme;
    let frame = app.reveals.frame(RevealKey::Contact, 0, now_ms);
    if !is_drawn(&frame) {
        return;
    }
    let dy = shift_rows(&frame);
    let column = centered_columns(area, FORM_WIDTH);

    let heading = Paragraph::new(Line::from(HEADING))
        .style(faded(theme, theme.text, &frame).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    render_offset(heading, row(column, 1), 0, dy, buf);
    let sub = Paragraph::new(Line::from(SUBHEADING))
        .style(faded(theme, theme.muted, &frame))
        .alignment(Alignment::Center);
    render_offset(sub, row(column, 2), 0, dy, buf);

    let focus = match app.mode {
        Mode::Contact(field) => Some(field),
        _ => None,
    };
    let form = &app.contact;

    let mut y = column.y + FIELDS_ROW;
    for field in Field::ALL {
        let height = if field == Field::Message { MESSAGE_HEIGHT } else { 3 };
        let field_area = Rect::new(column.x, y, column.width, height);
        let input = input_field(theme, field.label(), form.field(field), focus == Some(field));
        render_offset(input, field_area, 0, dy, buf);
        render_offset(
            error_line(theme, form.error(field)),
            Rect::new(column.x + 1, y + height, column.width.saturating_sub(1), 1),
            0,
            dy,
            buf,
        );
        y += height + 1;
    }

    let button = if form.is_pending() {
        Line::from(Span::styled("Sending...", Style::default().fg(theme.muted)))
    } else if focus.is_some() {
        Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(theme.background).bg(theme.accent)),
            Span::styled(" Send message   ", Style::default().fg(theme.accent)),
            Span::styled("Tab: next field  Esc: done", Style::default().fg(theme.muted)),
        ])
    } else {
        Line::from(Span::styled("c: write a message", Style::default().fg(theme.muted)))
    };
    render_offset(
        Paragraph::new(button).alignment(Alignment::Center),
        Rect::new(column.x, y, column.width, 1),
        0,
        dy,
        buf,
    );
}
