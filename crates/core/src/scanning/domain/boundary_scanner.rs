use crate::scanning::domain::pixel_source::PixelSource;
use crate::shared::bounding_box::BoundingBox;

/// Domain interface for locating the bounding box of opaque pixels.
///
/// Implementations are interchangeable: every scanner must return exactly
/// the box a full raster scan would, including the sentinel
/// `BoundingBox::empty(width, height)` when nothing is opaque.
pub trait BoundaryScanner: Send + Sync {
    fn find_bounding_box(&self, source: &dyn PixelSource, tolerance: u8) -> BoundingBox;

    /// Short strategy name for logs and benchmarks.
    fn name(&self) -> &'static str;
}
