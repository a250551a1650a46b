pub const DEFAULT_OUTPUT_DIR: &str = "./centered";

/// Alpha values at or below this are treated as transparent by default.
pub const DEFAULT_TOLERANCE: u8 = 0;

pub const RGBA_CHANNELS: usize = 4;

/// Largest output canvas, in pixels, a crop may allocate (4 GiB of RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 30;

/// Output name stem for images read from a stream rather than a file.
pub const STREAM_OUTPUT_STEM: &str = "image";

pub const PNG_EXTENSION: &str = "png";
