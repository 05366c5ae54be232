use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::{centered_rect, faded, render_revealed, row};
use crate::app::App;

const CARD_WIDTH: u16 = 60;
const CARD_HEIGHT: u16 = 11;

/// Waitlist confirmation page; the card settles in, then its lines follow
pub struct ThankYouWidget;

impl ThankYouWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now_ms: f64) {
        let theme = &app.theme;
        let card = app.thank_you_frame(0, now_ms);

        let width = ((CARD_WIDTH as f64) * card.scale).round() as u16;
        let card_area = centered_rect(width, CARD_HEIGHT, area);
        let border = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(faded(theme, theme.accent, &card));
        let inner = border.inner(card_area);
        render_revealed(border, card_area, &card, frame.buffer_mut());

        let parts: [(u16, Line, Color); 3] = [
            (2, Line::from("Thank you for joining the waitlist!"), theme.text),
            (4, Line::from("You'll be the first to hear when it launches."), theme.muted),
            (7, Line::from("[Enter] Back to site"), theme.accent),
        ];
        for (i, (offset, line, color)) in parts.into_iter().enumerate() {
            let part = app.thank_you_frame(i + 1, now_ms);
            let mut style = faded(theme, color, &part);
            if i == 0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            let paragraph = Paragraph::new(line).style(style).alignment(Alignment::Center);
            render_revealed(paragraph, row(inner, offset), &part, frame.buffer_mut());
        }
    }
}
