use folio_core::content::Testimonial;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::{render_offset, row};
use crate::app::App;
use crate::page::{card_columns, TESTIMONIAL_CARD_HEIGHT};
use crate::theme::Theme;

const HEADING: &str = "What clients say";
/// Row where the columns rest before parallax
const COLUMNS_ROW: u16 = 6;
const MARGIN: u16 = 2;
const GAP: u16 = 2;

/// Testimonial columns drifting at their own parallax factors
pub(super) fn render(area: Rect, buf: &mut Buffer, app: &App) {
    let theme = &app.theme;

    Paragraph::new(Line::from(HEADING))
        .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .render(row(area, 1), buf);

    let columns = card_columns(area.width);
    let usable = area.width.saturating_sub(MARGIN * 2 + GAP * (columns - 1));
    let card_width = usable / columns;

    if columns == 1 {
        // Narrow screens stack every column without drift
        let all = app.content.testimonials.iter().flatten();
        for (i, testimonial) in all.enumerate() {
            let card_area = Rect::new(
                area.x + MARGIN,
                area.y + COLUMNS_ROW + i as u16 * TESTIMONIAL_CARD_HEIGHT,
                card_width,
                TESTIMONIAL_CARD_HEIGHT - 1,
            );
            render_offset(card(theme, testimonial), card_area, 0, 0, buf);
        }
        return;
    }

    let drift = app.testimonials.offsets(app.scroll.current_scroll() as f64);
    for (c, column) in app.content.testimonials.iter().take(columns as usize).enumerate() {
        let dy = drift.get(c).map(|rows| rows.round() as i32).unwrap_or(0);
        let x = area.x + MARGIN + c as u16 * (card_width + GAP);
        for (i, testimonial) in column.iter().enumerate() {
            let card_area = Rect::new(
                x,
                area.y + COLUMNS_ROW + i as u16 * TESTIMONIAL_CARD_HEIGHT,
                card_width,
                TESTIMONIAL_CARD_HEIGHT - 1,
            );
            render_offset(card(theme, testimonial), card_area, 0, dy, buf);
        }
    }
}

fn card<'a>(theme: &Theme, testimonial: &'a Testimonial) -> Paragraph<'a> {
    let lines = vec![
        Line::from(Span::styled(
            format!("“{}”", testimonial.quote),
            Style::default().fg(theme.text).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(testimonial.name.as_str(), Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", testimonial.title), Style::default().fg(theme.muted)),
        ]),
    ];
    Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.surface)),
    )
}
