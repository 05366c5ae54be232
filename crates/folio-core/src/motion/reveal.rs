//! Reveal animation controller
//!
//! Maps a visibility boolean to a style contract. The mapping is pure: the
//! caller passes the visibility, the call-site `RevealSpec` and the item index, and
//! gets back the target style plus the transition timing to reach it.

use serde::{Deserialize, Serialize};

use super::easing::EasingType;
use super::timing::{is_complete, lerp, progress};

/// Per-call-site transition parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealSpec {
    /// Vertical offset while hidden (positive = below the resting position)
    pub offset: f64,
    /// Scale while hidden
    pub scale_from: f64,
    pub duration_ms: u64,
    pub easing: EasingType,
    /// Delay of the first item
    pub base_delay_ms: u64,
    /// Additional delay per item index
    pub step_delay_ms: u64,
}

impl Default for RevealSpec {
    fn default() -> Self {
        Self::section()
    }
}

impl RevealSpec {
    /// Whole-section fade and rise
    pub const fn section() -> Self {
        Self {
            offset: 10.0,
            scale_from: 1.0,
            duration_ms: 1000,
            easing: EasingType::EaseOut,
            base_delay_ms: 0,
            step_delay_ms: 0,
        }
    }

    /// About section, which rises from further down
    pub const fn about() -> Self {
        Self { offset: 16.0, ..Self::section() }
    }

    /// Project cards: after the header and filter bar, one card at a time
    pub const fn project_card() -> Self {
        Self {
            base_delay_ms: 400,
            step_delay_ms: 100,
            ..Self::section()
        }
    }

    /// Skill badges in the carousel
    pub const fn skill_badge() -> Self {
        Self {
            duration_ms: 700,
            step_delay_ms: 75,
            ..Self::section()
        }
    }

    /// Letter-by-letter title pop-in
    pub const fn letter() -> Self {
        Self {
            offset: 20.0,
            scale_from: 0.8,
            duration_ms: 600,
            easing: EasingType::BackOut,
            base_delay_ms: 0,
            step_delay_ms: 100,
        }
    }

    /// Thank-you card; its children use base delays of 300/500/700 ms
    pub const fn thank_you_card() -> Self {
        Self {
            offset: -8.0,
            scale_from: 0.95,
            ..Self::section()
        }
    }

    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub const fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub const fn with_base_delay(mut self, base_delay_ms: u64) -> Self {
        self.base_delay_ms = base_delay_ms;
        self
    }

    pub const fn with_step_delay(mut self, step_delay_ms: u64) -> Self {
        self.step_delay_ms = step_delay_ms;
        self
    }

    /// `base + index × step`
    #[inline]
    pub fn delay_for(&self, index: usize) -> u64 {
        self.base_delay_ms + index as u64 * self.step_delay_ms
    }
}

/// Static visual properties at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleFrame {
    pub opacity: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl StyleFrame {
    pub const SHOWN: StyleFrame = StyleFrame { opacity: 1.0, translate_y: 0.0, scale: 1.0 };

    fn hidden(spec: &RevealSpec) -> Self {
        Self {
            opacity: 0.0,
            translate_y: spec.offset,
            scale: spec.scale_from,
        }
    }
}

/// Target style plus the transition that reaches it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub target: StyleFrame,
    /// State the transition starts from (the opposite end)
    pub from: StyleFrame,
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub easing: EasingType,
}

impl RevealStyle {
    #[inline]
    pub fn opacity(&self) -> f64 {
        self.target.opacity
    }

    #[inline]
    pub fn translate_y(&self) -> f64 {
        self.target.translate_y
    }

    /// Style `elapsed_ms` after the visibility last changed
    pub fn at(&self, elapsed_ms: f64) -> StyleFrame {
        let t = progress(elapsed_ms, self.delay_ms as f64, self.duration_ms as f64);
        let eased = self.easing.apply(t);
        StyleFrame {
            opacity: lerp(self.from.opacity, self.target.opacity, eased).clamp(0.0, 1.0),
            translate_y: lerp(self.from.translate_y, self.target.translate_y, eased),
            scale: lerp(self.from.scale, self.target.scale, eased),
        }
    }

    /// Whether the transition has settled `elapsed_ms` after the change
    pub fn is_settled(&self, elapsed_ms: f64) -> bool {
        is_complete(elapsed_ms, self.delay_ms as f64, self.duration_ms as f64)
    }
}

/// Style contract for item `index` at a call site
pub fn reveal(visible: bool, spec: &RevealSpec, index: usize) -> RevealStyle {
    let hidden = StyleFrame::hidden(spec);
    let (target, from) = if visible {
        (StyleFrame::SHOWN, hidden)
    } else {
        (hidden, StyleFrame::SHOWN)
    };
    RevealStyle {
        target,
        from,
        delay_ms: spec.delay_for(index),
        duration_ms: spec.duration_ms,
        easing: spec.easing,
    }
}
