use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{blit, faded, render_revealed, row};
use super::{footer, forms, gallery, hero, products, services, skills, testimonials};
use crate::app::App;
use crate::page::Block;
use crate::reveals::RevealKey;

/// The scrolling page: each visible block is painted on its own canvas and
/// copied into the viewport at its document position
pub struct DocumentWidget;

impl DocumentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now_ms: f64) {
        let viewport = app.viewport();
        let scroll = app.scroll.current_scroll() as i32;

        for (block, rect) in app.layout.blocks() {
            if viewport.intersection_ratio(rect) <= 0.0 {
                continue;
            }
            let canvas_area = Rect::new(0, 0, area.width, rect.height as u16);
            let mut canvas = Buffer::empty(canvas_area);
            let background = match block {
                Block::Hero | Block::Band | Block::Footer => app.theme.surface,
                _ => app.theme.background,
            };
            canvas.set_style(canvas_area, Style::default().bg(background));

            render_block(*block, canvas_area, &mut canvas, app, now_ms);

            let screen_top = area.y as i32 + rect.top as i32 - scroll;
            blit(&canvas, frame.buffer_mut(), area.x as i32, screen_top, area);
        }
    }
}

fn render_block(block: Block, area: Rect, buf: &mut Buffer, app: &App, now_ms: f64) {
    match block {
        Block::Hero => hero::render_hero(area, buf, app),
        Block::About => render_about(area, buf, app, now_ms),
        Block::Skills => skills::render(area, buf, app, now_ms),
        Block::Projects => gallery::render(area, buf, app, now_ms),
        Block::Services => services::render(area, buf, app, now_ms),
        Block::Testimonials => testimonials::render(area, buf, app),
        Block::Products => products::render(area, buf, app, now_ms),
        Block::Band => products::render_band(area, buf, app),
        Block::Contact => forms::render_contact(area, buf, app, now_ms),
        Block::Footer => footer::render(area, buf, app),
    }
}

/// About: heading and body fade up together
fn render_about(area: Rect, buf: &mut Buffer, app: &App, now_ms: f64) {
    let theme = &app.theme;
    let about = &app.content.about;
    let frame = app.reveals.frame(RevealKey::About, 0, now_ms);

    let heading = Paragraph::new(Line::from(about.heading.as_str()))
        .style(faded(theme, theme.accent, &frame).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    render_revealed(heading, row(area, 1), &frame, buf);

    let inner = area.width.saturating_sub(8).max(10).min(70);
    let body_area = super::centered_columns(
        Rect::new(area.x, area.y + 3, area.width, area.height.saturating_sub(4)),
        inner,
    );
    let body = Paragraph::new(about.body.as_str())
        .style(faded(theme, theme.text, &frame))
        .wrap(Wrap { trim: true });
    render_revealed(body, body_area, &frame, buf);
}
