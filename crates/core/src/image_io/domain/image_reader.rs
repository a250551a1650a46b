use std::path::Path;

use crate::shared::raster::Raster;

/// Decodes an image file into an RGBA raster.
///
/// Implementations own format detection and conversion; the rest of the
/// pipeline only sees [`Raster`].
pub trait ImageReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<Raster, Box<dyn std::error::Error>>;
}
