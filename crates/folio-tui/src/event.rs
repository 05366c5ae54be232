use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while something is animating
    animation_rate: Duration,
}

/// Outcome of a background submission
#[derive(Debug)]
pub enum SubmitResult {
    /// Contact relay answered; `Err` carries the failure text
    Contact(std::result::Result<(), String>),
    /// Mailing-list post answered
    Waitlist(std::result::Result<(), String>),
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        let frame_ms = if animation_fps == 0 {
            16
        } else {
            (1000 / animation_fps as u64).max(1)
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_rate: Duration::from_millis(frame_ms),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Clicks, drags and wheel
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
