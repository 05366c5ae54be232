use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use super::forms::{error_line, input_field};
use super::{centered_columns, faded, letter_line, render_offset, render_revealed, row};
use crate::app::{App, Mode, CELL_WIDTH_PX};
use crate::page::{wrapped_rows, Block};
use crate::reveals::RevealKey;

const TEXT_WIDTH: u16 = 70;
const BAND_WORDS: [&str; 3] = ["DESIGN", "BUILD", "SHIP"];

/// Product teaser with the waitlist signup
pub(super) fn render(area: Rect, buf: &mut Buffer, app: &App, now_ms: f64) {
    let theme = &app.theme;
    let products = &app.content.products;

    Paragraph::new(letter_line(app, RevealKey::ProductsTitle, &products.heading, theme.text, now_ms))
        .alignment(Alignment::Center)
        .render(row(area, 1), buf);

    let teaser_frame = app.reveals.frame(RevealKey::ProductsTeaser, 0, now_ms);
    let teaser = Paragraph::new(Line::from(products.teaser.as_str()))
        .style(faded(theme, theme.accent, &teaser_frame).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    render_revealed(teaser, row(area, 3), &teaser_frame, buf);

    let column = centered_columns(area, area.width.saturating_sub(8).max(10).min(TEXT_WIDTH));
    let blurb_rows = wrapped_rows(&products.blurb, column.width);
    Paragraph::new(products.blurb.as_str())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .render(Rect::new(column.x, column.y + 5, column.width, blurb_rows).intersection(area), buf);

    let focused = app.mode == Mode::Waitlist;
    let input_row = column.y + 6 + blurb_rows;
    let label = if app.waitlist_pending { "Joining..." } else { "Join the waitlist (w)" };
    render_offset(
        input_field(theme, label, app.waitlist.email(), focused),
        Rect::new(column.x, input_row, column.width, 3),
        0,
        0,
        buf,
    );
    render_offset(
        error_line(theme, app.waitlist.error()),
        Rect::new(column.x + 1, input_row + 3, column.width.saturating_sub(1), 1),
        0,
        0,
        buf,
    );
}

/// Decorative band whose words drift sideways as it crosses the viewport
pub(super) fn render_band(area: Rect, buf: &mut Buffer, app: &App) {
    let theme = &app.theme;
    let Some(rect) = app.layout.get(Block::Band) else {
        return;
    };
    let offsets = app.band.offsets(&rect, &app.viewport());

    for (i, word) in BAND_WORDS.iter().enumerate() {
        let columns = offsets.get(i).map(|px| (px / CELL_WIDTH_PX).round() as i32).unwrap_or(0);
        let y = area.y + 2 + i as u16 * 3;
        // Start left of the block so the drift never exposes an empty edge
        let width = area.width.saturating_add(80);
        let unit = format!("{}  ·  ", word);
        let repeats = width as usize / unit.chars().count() + 1;
        let color = if i == 1 { theme.accent } else { theme.muted };
        let line = Paragraph::new(Line::from(unit.repeat(repeats)))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        render_offset(line, Rect::new(0, y, width, 1), columns - 80, 0, buf);
    }
}
