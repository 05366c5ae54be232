use folio_core::navigation::Section;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{letter_line, row};
use crate::app::App;
use crate::page::wrapped_rows;
use crate::reveals::RevealKey;

/// Row of the first service header inside the block
const ITEMS_ROW: u16 = 6;

/// Services accordion; expanded rows push the rest of the page down
pub(super) fn render(area: Rect, buf: &mut Buffer, app: &App, now_ms: f64) {
    let theme = &app.theme;

    Paragraph::new(letter_line(app, RevealKey::ServicesTitle, Section::Services.title(), theme.text, now_ms))
        .alignment(Alignment::Center)
        .render(row(area, 1), buf);
    Paragraph::new(Line::from("s: next service   o: expand"))
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center)
        .render(row(area, 3), buf);

    let inner = area.width.saturating_sub(8).max(10);
    let left = area.x + area.width.saturating_sub(inner) / 2;
    let mut y = area.y + ITEMS_ROW;

    for (i, service) in app.content.services.iter().enumerate() {
        let open = app.accordion.is_open(i);
        let selected = i == app.selected_service;

        Paragraph::new(Line::from("─".repeat(inner as usize)))
            .style(Style::default().fg(theme.border))
            .render(Rect::new(left, y, inner, 1).intersection(area), buf);

        let marker = if open { "▾" } else { "▸" };
        let title_style = if selected {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", marker), Style::default().fg(theme.accent)),
            Span::styled(service.title.as_str(), title_style),
        ]))
        .render(Rect::new(left, y + 1, inner, 1).intersection(area), buf);
        y += 3;

        if !open {
            continue;
        }

        // blank, summary, blank, label, items, closing, blank
        y += 1;
        let summary_rows = wrapped_rows(&service.summary, inner);
        Paragraph::new(service.summary.as_str())
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: true })
            .render(Rect::new(left, y, inner, summary_rows).intersection(area), buf);
        y += summary_rows + 1;

        Paragraph::new(Line::from("What's included:"))
            .style(Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC))
            .render(Rect::new(left, y, inner, 1).intersection(area), buf);
        y += 1;
        for item in &service.includes {
            Paragraph::new(Line::from(vec![
                Span::styled("  • ", Style::default().fg(theme.accent)),
                Span::styled(item.as_str(), Style::default().fg(theme.text)),
            ]))
            .render(Rect::new(left, y, inner, 1).intersection(area), buf);
            y += 1;
        }

        let closing_rows = wrapped_rows(&service.closing, inner);
        Paragraph::new(service.closing.as_str())
            .style(Style::default().fg(theme.muted))
            .wrap(Wrap { trim: true })
            .render(Rect::new(left, y, inner, closing_rows).intersection(area), buf);
        y += closing_rows + 1;
    }
}
