use crate::scanning::domain::pixel_source::PixelSource;
use crate::shared::point::Point;

/// Tolerant opacity test: a pixel is opaque iff its alpha exceeds the
/// tolerance. Coordinates outside the source are never opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlphaClassifier {
    tolerance: u8,
}

impl AlphaClassifier {
    pub fn new(tolerance: u8) -> Self {
        Self { tolerance }
    }

    pub fn is_opaque(&self, source: &dyn PixelSource, point: Point) -> bool {
        let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
            return false;
        };
        if x >= source.width() || y >= source.height() {
            return false;
        }
        source.alpha_at(x, y) > self.tolerance
    }
}
