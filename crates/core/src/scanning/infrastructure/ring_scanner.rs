use crate::scanning::domain::alpha_classifier::AlphaClassifier;
use crate::scanning::domain::boundary_scanner::BoundaryScanner;
use crate::scanning::domain::pixel_source::PixelSource;
use crate::scanning::domain::ring_schedule::{FoundEdges, RingSchedule};
use crate::shared::bounding_box::BoundingBox;

/// Finds the bounding box by walking the image's rings from the outside in.
///
/// Each ring is swept clockwise. When an opaque pixel turns up on an edge,
/// that edge's bound is final: every pixel outside the current ring has
/// already been visited, and every pixel left to visit lies on the inner side
/// of that row or column. The walk stops as soon as all four bounds are final,
/// so images whose content reaches near the borders are resolved after
/// touching only a few rings.
pub struct RingScanner;

impl RingScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RingScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryScanner for RingScanner {
    fn find_bounding_box(&self, source: &dyn PixelSource, tolerance: u8) -> BoundingBox {
        let width = i64::from(source.width());
        let height = i64::from(source.height());
        let mut bounds = BoundingBox::empty(width, height);
        if width == 0 || height == 0 {
            return bounds;
        }

        let classifier = AlphaClassifier::new(tolerance);
        let mut schedule = RingSchedule::initial(width, height);
        let mut found = FoundEdges::default();
        let mut pos = schedule.start();

        loop {
            if classifier.is_opaque(source, pos) {
                bounds.extend(pos);

                let current = schedule.current();
                let previous = schedule.previous();
                if found.mark(current) {
                    break;
                }
                // A corner belongs to two edges.
                if pos == schedule.stop_corner(previous) && found.mark(previous) {
                    break;
                }
                if pos == schedule.stop_corner(current) && found.mark(current.next()) {
                    break;
                }
            }

            pos = pos + schedule.current().step();

            if pos == schedule.stop_corner(schedule.current()) && schedule.turn() {
                if schedule.is_exhausted() {
                    break;
                }
                pos = schedule.start();
            }
        }

        bounds
    }

    fn name(&self) -> &'static str {
        "ring"
    }
}
