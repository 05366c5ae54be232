//! Parallax offsets
//!
//! Stateless per scroll tick: every offset is recomputed from the global
//! scroll position and the tracked container's top, no smoothing.

use super::observer::{ElementRect, Viewport};
use super::timing::map_range;

/// One layer drifting at its own speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    /// Multiplier on relative scroll; negative drifts the other way
    pub speed_factor: f64,
    pub base_offset: f64,
}

impl ParallaxLayer {
    pub fn new(speed_factor: f64) -> Self {
        Self {
            speed_factor,
            base_offset: 0.0,
        }
    }

    pub fn with_base(mut self, base_offset: f64) -> Self {
        self.base_offset = base_offset;
        self
    }

    #[inline]
    pub fn offset(&self, relative_scroll: f64) -> f64 {
        self.base_offset + relative_scroll * self.speed_factor
    }
}

/// Layers tracking one container
#[derive(Debug, Clone, Default)]
pub struct ParallaxScene {
    /// Document-relative top of the tracked container, once measured
    tracked_top: Option<f64>,
    layers: Vec<ParallaxLayer>,
}

impl ParallaxScene {
    pub fn new(layers: Vec<ParallaxLayer>) -> Self {
        Self {
            tracked_top: None,
            layers,
        }
    }

    /// Layers from plain speed factors
    pub fn from_factors(factors: &[f64]) -> Self {
        Self::new(factors.iter().copied().map(ParallaxLayer::new).collect())
    }

    /// Record (or clear) the container measurement
    pub fn track(&mut self, top: Option<f64>) {
        self.tracked_top = top;
    }

    pub fn tracked_top(&self) -> Option<f64> {
        self.tracked_top
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    /// `scroll_y − container_top`, if the container is measured
    pub fn relative_scroll(&self, scroll_y: f64) -> Option<f64> {
        self.tracked_top.map(|top| scroll_y - top)
    }

    /// Offsets for every layer; empty while the container is unmeasured
    pub fn offsets(&self, scroll_y: f64) -> Vec<f64> {
        let Some(relative) = self.relative_scroll(scroll_y) else {
            tracing::debug!("Parallax container not measured, layers stay put");
            return Vec::new();
        };
        self.layers.iter().map(|layer| layer.offset(relative)).collect()
    }

    /// Offset for a single layer
    pub fn layer_offset(&self, index: usize, scroll_y: f64) -> Option<f64> {
        let relative = self.relative_scroll(scroll_y)?;
        self.layers.get(index).map(|layer| layer.offset(relative))
    }
}

/// Progress of a section through the viewport
///
/// 0 when the section's top touches the viewport's bottom edge, 1 when its
/// bottom leaves through the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollProgress {
    /// Output range per layer, e.g. `(0, 500)`
    ranges: Vec<(f64, f64)>,
}

impl ScrollProgress {
    pub fn new(ranges: Vec<(f64, f64)>) -> Self {
        Self { ranges }
    }

    /// Parallax band defaults: slow, medium and short drifts
    pub fn band() -> Self {
        Self::new(vec![(0.0, 500.0), (0.0, 700.0), (0.0, 100.0)])
    }

    pub fn progress(section: &ElementRect, viewport: &Viewport) -> f64 {
        let start = section.top - viewport.height;
        let end = section.bottom();
        map_range(viewport.top, (start, end), (0.0, 1.0))
    }

    pub fn offsets(&self, section: &ElementRect, viewport: &Viewport) -> Vec<f64> {
        let t = Self::progress(section, viewport);
        self.ranges
            .iter()
            .map(|&(from, to)| map_range(t, (0.0, 1.0), (from, to)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_offsets_by_factor() {
        let mut scene = ParallaxScene::from_factors(&[0.15, -0.2, 0.25]);
        scene.track(Some(1000.0));

        let offsets = scene.offsets(1400.0);
        assert!((offsets[0] - 60.0).abs() < 1e-9);
        assert!((offsets[1] + 80.0).abs() < 1e-9);
        assert!((offsets[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_offsets_before_container_are_negative_drift() {
        let mut scene = ParallaxScene::from_factors(&[0.3]);
        scene.track(Some(500.0));
        assert!((scene.offsets(0.0)[0] + 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_offset_added() {
        let mut scene = ParallaxScene::new(vec![ParallaxLayer::new(0.5).with_base(12.0)]);
        scene.track(Some(0.0));
        assert_eq!(scene.layer_offset(0, 10.0), Some(17.0));
        assert_eq!(scene.layer_offset(3, 10.0), None);
    }

    #[test]
    fn test_unmeasured_container_produces_nothing() {
        let scene = ParallaxScene::from_factors(&[0.3, -0.2]);
        assert!(scene.offsets(300.0).is_empty());
        assert_eq!(scene.relative_scroll(300.0), None);
    }

    #[test]
    fn test_recomputed_every_tick_without_state() {
        let mut scene = ParallaxScene::from_factors(&[0.3]);
        scene.track(Some(100.0));
        let a = scene.offsets(200.0);
        scene.offsets(900.0);
        assert_eq!(scene.offsets(200.0), a);
    }

    #[test]
    fn test_scroll_progress_band() {
        let section = ElementRect::new(1000.0, 500.0);
        let viewport_height = 400.0;

        // Section top at viewport bottom
        let at_start = Viewport::new(600.0, viewport_height);
        assert_eq!(ScrollProgress::progress(&section, &at_start), 0.0);

        // Section bottom at viewport top
        let at_end = Viewport::new(1500.0, viewport_height);
        assert_eq!(ScrollProgress::progress(&section, &at_end), 1.0);

        let halfway = Viewport::new(1050.0, viewport_height);
        let offsets = ScrollProgress::band().offsets(&section, &halfway);
        assert!((offsets[0] - 250.0).abs() < 1e-9);
        assert!((offsets[1] - 350.0).abs() < 1e-9);
        assert!((offsets[2] - 50.0).abs() < 1e-9);
    }
}
