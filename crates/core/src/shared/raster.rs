use crate::shared::constants::RGBA_CHANNELS;

/// A decoded image: contiguous RGBA8 bytes in row-major order.
///
/// Decoders convert to RGBA at the I/O boundary so the scanning and cropping
/// code only ever sees one layout. `index` is the image's position within its
/// batch (0 for single files).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Raster {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * RGBA_CHANNELS,
            "data length must equal width * height * 4"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// A fully transparent canvas.
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * RGBA_CHANNELS;
        Self::new(vec![0; len], width, height, 0)
    }

    pub fn from_rgba_image(image: image::RgbaImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, index)
    }

    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// RGBA of the pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = self.offset(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.data[offset..offset + RGBA_CHANNELS]);
        rgba
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let offset = self.offset(x, y);
        self.data[offset..offset + RGBA_CHANNELS].copy_from_slice(&rgba);
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.offset(0, y);
        &self.data[start..start + self.stride()]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = self.offset(0, y);
        let stride = self.stride();
        &mut self.data[start..start + stride]
    }

    fn stride(&self) -> usize {
        self.width as usize * RGBA_CHANNELS
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS
    }
}
