use image::GenericImageView;

use crate::shared::raster::Raster;

/// Read-only view of an image's alpha channel.
///
/// Scans only ever borrow a source; `alpha_at` is called with in-bounds
/// coordinates (the classifier does the bounds check).
pub trait PixelSource {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn alpha_at(&self, x: u32, y: u32) -> u8;
}

/// Direct buffer access.
impl PixelSource for Raster {
    fn width(&self) -> u32 {
        Raster::width(self)
    }

    fn height(&self) -> u32 {
        Raster::height(self)
    }

    fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y)[3]
    }
}

/// Generic sampler over any decoded `image` type, converting each pixel to
/// RGBA8 on access.
impl PixelSource for image::DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y).0[3]
    }
}
