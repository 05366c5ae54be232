//! Horizontal carousel engine
//!
//! Two drivers compete for one offset: the per-frame autoscroll and the
//! user's drag. The phase decides which one may write; pointer transitions
//! are applied synchronously so the offset never has two writers.
//!
//! The rendered content is assumed to be the item sequence concatenated with
//! itself, so wrapping at half the content width is seamless.

/// Which driver currently owns the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    Autoscrolling,
    UserDragging,
}

/// Pointer position and offset captured when a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub start_x: f64,
    pub start_offset: f64,
}

/// Autoscrolling, draggable, wrapping horizontal strip
#[derive(Debug, Clone)]
pub struct CarouselEngine {
    /// Width of the doubled content
    content_width: f64,
    /// Width of the visible window
    viewport_width: f64,
    offset: f64,
    phase: CarouselPhase,
    drag_anchor: Option<DragAnchor>,
    /// Autoscroll speed in px/ms
    autoscroll_rate: f64,
    /// Whether the frame loop is registered
    attached: bool,
    last_frame_ms: Option<f64>,
}

impl Default for CarouselEngine {
    fn default() -> Self {
        Self::new(0.5 / 16.67)
    }
}

impl CarouselEngine {
    pub fn new(autoscroll_rate: f64) -> Self {
        Self {
            content_width: 0.0,
            viewport_width: 0.0,
            offset: 0.0,
            phase: CarouselPhase::Autoscrolling,
            drag_anchor: None,
            autoscroll_rate: autoscroll_rate.max(0.0),
            attached: false,
            last_frame_ms: None,
        }
    }

    /// Set measured widths; `content_width` is the doubled strip
    pub fn with_widths(mut self, content_width: f64, viewport_width: f64) -> Self {
        self.set_widths(content_width, viewport_width);
        self
    }

    pub fn set_widths(&mut self, content_width: f64, viewport_width: f64) {
        self.content_width = content_width.max(0.0);
        self.viewport_width = viewport_width.max(0.0);
    }

    /// Register the frame loop
    pub fn attach(&mut self) {
        if !self.attached {
            tracing::debug!(rate = self.autoscroll_rate, "Carousel frame loop attached");
        }
        self.attached = true;
        self.last_frame_ms = None;
    }

    /// Cancel the frame loop; later frames and pointer events are ignored
    pub fn detach(&mut self) {
        if self.attached {
            tracing::debug!("Carousel frame loop detached");
        }
        self.attached = false;
        self.phase = CarouselPhase::Autoscrolling;
        self.drag_anchor = None;
        self.last_frame_ms = None;
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.phase == CarouselPhase::UserDragging
    }

    pub fn drag_anchor(&self) -> Option<DragAnchor> {
        self.drag_anchor
    }

    pub fn autoscroll_rate(&self) -> f64 {
        self.autoscroll_rate
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Wrap point: the end of the first copy
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.content_width / 2.0
    }

    /// Largest offset a drag can reach
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Pointer or touch pressed inside the strip
    pub fn pointer_down(&mut self, x: f64) {
        if !self.attached || self.is_dragging() {
            return;
        }
        self.phase = CarouselPhase::UserDragging;
        self.drag_anchor = Some(DragAnchor {
            start_x: x,
            start_offset: self.offset,
        });
    }

    /// Pointer moved; only a drag moves the offset
    ///
    /// Returns the new offset while dragging.
    pub fn pointer_move(&mut self, x: f64) -> Option<f64> {
        if !self.is_dragging() {
            return None;
        }
        let anchor = self.drag_anchor?;
        let walk = x - anchor.start_x;
        self.offset = (anchor.start_offset - walk).clamp(0.0, self.max_offset());
        Some(self.offset)
    }

    /// Pointer or touch released
    pub fn pointer_up(&mut self) {
        self.end_drag();
    }

    /// Pointer left the tracking area
    pub fn pointer_leave(&mut self) {
        self.end_drag();
    }

    fn end_drag(&mut self) {
        self.phase = CarouselPhase::Autoscrolling;
        self.drag_anchor = None;
    }

    /// Per-frame callback with a monotonic timestamp
    ///
    /// The timestamp is recorded in every phase so autoscroll resumes without
    /// a jump; the first frame after attach advances by zero.
    pub fn frame(&mut self, timestamp_ms: f64) -> f64 {
        if !self.attached {
            return self.offset;
        }
        let elapsed = self
            .last_frame_ms
            .map(|last| (timestamp_ms - last).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_ms = Some(timestamp_ms);
        self.advance(elapsed)
    }

    /// Advance autoscroll by an explicit elapsed time
    pub fn advance(&mut self, elapsed_ms: f64) -> f64 {
        if !self.attached || self.is_dragging() {
            return self.offset;
        }
        self.offset += self.autoscroll_rate * elapsed_ms.max(0.0);
        let half = self.half_width();
        if half > 0.0 && self.offset >= half {
            self.offset = self.offset.rem_euclid(half);
        }
        self.offset
    }
}

/// The item sequence concatenated with itself
pub fn duplicate<T: Clone>(items: &[T]) -> Vec<T> {
    let mut doubled = Vec::with_capacity(items.len() * 2);
    doubled.extend_from_slice(items);
    doubled.extend_from_slice(items);
    doubled
}
