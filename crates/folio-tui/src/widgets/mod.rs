mod document;
mod footer;
mod forms;
mod gallery;
mod hero;
mod navbar;
mod popup;
mod products;
mod services;
mod skills;
mod status_bar;
mod testimonials;
mod thank_you;

pub use document::DocumentWidget;
pub use hero::LoadingWidget;
pub use navbar::NavbarWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
pub use thank_you::ThankYouWidget;

use folio_core::motion::reveal::StyleFrame;
use folio_core::navigation::Route;
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};

use crate::app::{App, Mode};
use crate::reveals::RevealKey;
use crate::theme::{fade, Theme};

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App, now_ms: f64) {
    let area = frame.area();
    let [page_area, status_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(Block::default().style(Style::default().bg(app.theme.background)), area);

    match app.route {
        Route::ThankYou => ThankYouWidget::render(frame, page_area, app, now_ms),
        Route::Home if !app.is_mounted() => LoadingWidget::render(frame, page_area, app, now_ms),
        Route::Home => {
            DocumentWidget::render(frame, page_area, app, now_ms);
            NavbarWidget::render(frame, page_area, app);
        }
    }

    StatusBarWidget::render(frame, status_area, app);

    match &app.mode {
        Mode::Alert(message) => PopupWidget::render_alert(frame, &app.theme, message),
        Mode::Sent => PopupWidget::render_sent(frame, &app.theme),
        Mode::Help => PopupWidget::render_help(frame, &app.theme),
        _ => {}
    }
}

/// Copy `src` onto `dst` with its top-left corner at (`x`, `y`), clipped to `clip`
///
/// Untouched source cells are skipped and a reset background keeps the
/// destination's, so scratch buffers layer over a painted canvas.
pub(crate) fn blit(src: &Buffer, dst: &mut Buffer, x: i32, y: i32, clip: Rect) {
    let clip = clip.intersection(dst.area);
    let blank = Cell::default();
    for row in 0..src.area.height {
        let ty = y + row as i32;
        if ty < clip.y as i32 || ty >= clip.bottom() as i32 {
            continue;
        }
        for col in 0..src.area.width {
            let tx = x + col as i32;
            if tx < clip.x as i32 || tx >= clip.right() as i32 {
                continue;
            }
            let Some(cell) = src.cell((src.area.x + col, src.area.y + row)) else {
                continue;
            };
            if *cell == blank {
                continue;
            }
            if let Some(target) = dst.cell_mut((tx as u16, ty as u16)) {
                let bg = target.bg;
                *target = cell.clone();
                if cell.bg == Color::Reset {
                    target.bg = bg;
                }
            }
        }
    }
}

/// Render `widget` into `area` moved by (`dx`, `dy`), clipped to `buf`
pub(crate) fn render_offset<W: Widget>(widget: W, area: Rect, dx: i32, dy: i32, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, area.height));
    widget.render(scratch.area, &mut scratch);
    let clip = buf.area;
    blit(&scratch, buf, area.x as i32 + dx, area.y as i32 + dy, clip);
}

/// Rows a reveal's vertical translate moves an element (four units per row)
pub(crate) fn shift_rows(frame: &StyleFrame) -> i32 {
    (frame.translate_y / 4.0).round() as i32
}

/// Whether a frame is visible at all
#[inline]
pub(crate) fn is_drawn(frame: &StyleFrame) -> bool {
    frame.opacity > 0.02
}

/// `fg` faded toward the page background by the frame's opacity
pub(crate) fn faded(theme: &Theme, fg: Color, frame: &StyleFrame) -> Style {
    Style::default().fg(fade(fg, theme.background, frame.opacity))
}

/// Render a revealed element: shifted by its translate, faded by its opacity
pub(crate) fn render_revealed<W: Widget>(widget: W, area: Rect, frame: &StyleFrame, buf: &mut Buffer) {
    if is_drawn(frame) {
        render_offset(widget, area, 0, shift_rows(frame), buf);
    }
}

/// Title whose letters pop in one after another
pub(crate) fn letter_line(app: &App, key: RevealKey, text: &str, color: Color, now_ms: f64) -> Line<'static> {
    let spans: Vec<Span> = text
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let frame = app.reveals.frame(key, i, now_ms);
            let style = faded(&app.theme, color, &frame).add_modifier(Modifier::BOLD);
            Span::styled(c.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

/// Width-limited area centered horizontally in `area`
pub(crate) fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Single-row slice of `area` starting `row` rows down
pub(crate) fn row(area: Rect, row: u16) -> Rect {
    let y = area.y.saturating_add(row).min(area.bottom());
    Rect::new(area.x, y, area.width, 1.min(area.bottom() - y))
}

/// Truncate a string to max length with ellipsis
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
