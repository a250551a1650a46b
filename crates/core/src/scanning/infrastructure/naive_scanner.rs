use crate::scanning::domain::alpha_classifier::AlphaClassifier;
use crate::scanning::domain::boundary_scanner::BoundaryScanner;
use crate::scanning::domain::pixel_source::PixelSource;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::point::Point;

/// Visits every pixel in raster order. O(width × height) regardless of
/// content; kept as the reference the ring walk is checked against and as
/// the benchmark baseline.
pub struct NaiveScanner;

impl NaiveScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NaiveScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryScanner for NaiveScanner {
    fn find_bounding_box(&self, source: &dyn PixelSource, tolerance: u8) -> BoundingBox {
        let width = i64::from(source.width());
        let height = i64::from(source.height());
        let classifier = AlphaClassifier::new(tolerance);
        let mut bounds = BoundingBox::empty(width, height);

        for y in 0..height {
            for x in 0..width {
                let point = Point::new(x, y);
                if classifier.is_opaque(source, point) {
                    bounds.extend(point);
                }
            }
        }

        bounds
    }

    fn name(&self) -> &'static str {
        "naive"
    }
}
