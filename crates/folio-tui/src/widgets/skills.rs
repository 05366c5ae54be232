use folio_core::motion::carousel::duplicate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::{faded, is_drawn, render_offset, row, shift_rows, truncate_str};
use crate::app::App;
use crate::page::{SKILLS_STRIP_HEIGHT, SKILLS_STRIP_ROW, SKILL_BADGE_WIDTH};
use crate::reveals::RevealKey;

const HEADING: &str = "Skills & Tools";

/// Skills carousel: the list drawn twice side by side, moved by the carousel offset
pub(super) fn render(area: Rect, buf: &mut Buffer, app: &App, now_ms: f64) {
    let theme = &app.theme;

    Paragraph::new(Line::from(HEADING))
        .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .render(row(area, 1), buf);

    let hint = if app.carousel.is_dragging() { "dragging" } else { "drag to browse" };
    Paragraph::new(Line::from(hint))
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center)
        .render(row(area, 2), buf);

    let skills = &app.content.skills;
    if skills.is_empty() {
        return;
    }

    let offset = app.carousel.offset().round() as i32;
    let badge_width = SKILL_BADGE_WIDTH.saturating_sub(2);
    let strip_y = area.y + SKILLS_STRIP_ROW;

    for (i, skill) in duplicate(skills).iter().enumerate() {
        let x = i as i32 * SKILL_BADGE_WIDTH as i32 - offset;
        if x + badge_width as i32 <= 0 || x >= area.width as i32 {
            continue;
        }
        let frame = app.reveals.frame(RevealKey::Skills, i % skills.len(), now_ms);
        if !is_drawn(&frame) {
            continue;
        }

        let style = faded(theme, theme.text, &frame);
        let badge = Paragraph::new(Line::from(truncate_str(&skill.name, badge_width.saturating_sub(2) as usize)))
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(faded(theme, theme.border, &frame)),
            );
        let badge_area = Rect::new(0, strip_y, badge_width, SKILLS_STRIP_HEIGHT);
        render_offset(badge, badge_area, x, shift_rows(&frame), buf);
    }
}
