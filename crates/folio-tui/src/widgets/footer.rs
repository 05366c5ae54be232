use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::row;
use crate::app::App;

pub(super) fn render(area: Rect, buf: &mut Buffer, app: &App) {
    let theme = &app.theme;
    let footer = &app.content.footer;

    Paragraph::new(Line::from(footer.copyright()))
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center)
        .render(row(area, 1), buf);

    Paragraph::new(Line::from(vec![
        Span::styled(footer.email.as_str(), Style::default().fg(theme.accent)),
        Span::styled("  ·  ", Style::default().fg(theme.border)),
        Span::styled(footer.linkedin.as_str(), Style::default().fg(theme.accent)),
    ]))
    .alignment(Alignment::Center)
    .render(row(area, 2), buf);
}
