//! Page scroll controller
//!
//! Anchor jumps glide to their target; line and page steps are batched and
//! glide too. Time is passed in by the caller as milliseconds on the app
//! clock, which keeps every step reproducible.

use folio_core::motion::timing::{is_complete, lerp, progress};
use folio_core::motion::EasingType;

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start_ms: f64,
    from: u16,
    to: u16,
}

/// Scroll animation controller for the document
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    smooth: bool,
    duration_ms: f64,
    easing: EasingType,
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: i32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(true, 400)
    }
}

impl ScrollAnimator {
    pub fn new(smooth: bool, duration_ms: u64) -> Self {
        Self {
            animation: None,
            smooth,
            duration_ms: duration_ms as f64,
            easing: EasingType::EaseInOut,
            current_scroll: 0,
            pending_delta: 0,
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth && self.duration_ms > 0.0
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether another frame is needed soon
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Final position once the current animation ends
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Jump without animation
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Glide to `target` starting at `now_ms`
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now_ms: f64) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.is_smooth() {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        if self.current_scroll == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start_ms: now_ms,
            from: self.current_scroll,
            to: target,
        });
    }

    /// Scroll by a delta (positive = down); applied on the next `update`
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.is_smooth() {
            self.current_scroll = (self.current_scroll as i32 + delta).clamp(0, max_scroll as i32) as u16;
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    /// Advance to `now_ms` and return the current position
    pub fn update(&mut self, max_scroll: u16, now_ms: f64) -> u16 {
        if self.pending_delta != 0 {
            let new_target = (self.target_scroll() as i32 + self.pending_delta).clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    start_ms: now_ms,
                    from: self.current_scroll,
                    to: new_target,
                });
            } else {
                self.animation = None;
            }
        }

        if let Some(ref anim) = self.animation {
            let elapsed = now_ms - anim.start_ms;
            if is_complete(elapsed, 0.0, self.duration_ms) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = self.easing.apply(progress(elapsed, 0.0, self.duration_ms));
                let position = lerp(anim.from as f64, anim.to as f64, t).round().max(0.0) as u16;
                self.current_scroll = position.min(max_scroll);
            }
        } else {
            self.current_scroll = self.current_scroll.min(max_scroll);
        }

        self.current_scroll
    }

    /// Stop at the current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_scroll_when_disabled() {
        let mut animator = ScrollAnimator::new(false, 400);
        animator.scroll_to(100, 200, 0.0);
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());

        animator.scroll_by(-150, 200);
        assert_eq!(animator.current_scroll(), 0);
    }

    #[test]
    fn test_glide_reaches_target() {
        let mut animator = ScrollAnimator::new(true, 400);
        animator.scroll_to(100, 200, 1000.0);
        assert!(animator.is_animating());
        assert_eq!(animator.target_scroll(), 100);

        let mid = animator.update(200, 1200.0);
        assert!(mid > 0 && mid < 100);

        assert_eq!(animator.update(200, 1400.0), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = ScrollAnimator::new(true, 100);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        assert!(animator.needs_update());

        animator.update(200, 0.0);
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_scroll_clamp_max() {
        let mut animator = ScrollAnimator::default();
        animator.set_scroll(50);
        animator.scroll_to(300, 100, 0.0);
        assert_eq!(animator.target_scroll(), 100);
        assert_eq!(animator.update(100, 10_000.0), 100);
    }

    #[test]
    fn test_shrinking_document_clamps_position() {
        let mut animator = ScrollAnimator::new(false, 0);
        animator.set_scroll(80);
        assert_eq!(animator.update(50, 0.0), 50);
    }
}
