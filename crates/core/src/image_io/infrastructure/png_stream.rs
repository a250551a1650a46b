use image::ImageFormat;
use thiserror::Error;

use crate::shared::raster::Raster;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const CHUNK_HEADER_LEN: usize = 8;
const CHUNK_CRC_LEN: usize = 4;
const IEND: &[u8; 4] = b"IEND";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PngStreamError {
    #[error("image {index} at byte {offset}: missing png signature")]
    BadSignature { index: usize, offset: usize },
    #[error("image {index} at byte {offset}: stream ended before IEND")]
    Truncated { index: usize, offset: usize },
}

/// Splits a byte stream holding several PNG files back to back.
///
/// Only chunk lengths are inspected; CRCs and chunk contents are left to the
/// decoder. After the first error the iterator is exhausted.
pub struct PngStreamSplitter<'a> {
    bytes: &'a [u8],
    offset: usize,
    index: usize,
}

impl<'a> PngStreamSplitter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            index: 0,
        }
    }

    fn image_end(&self, start: usize) -> Result<usize, PngStreamError> {
        let truncated = PngStreamError::Truncated {
            index: self.index,
            offset: start,
        };
        let mut pos = start + PNG_SIGNATURE.len();
        loop {
            let header = self
                .bytes
                .get(pos..pos + CHUNK_HEADER_LEN)
                .ok_or_else(|| truncated.clone())?;
            let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
            let chunk_end = pos
                .checked_add(CHUNK_HEADER_LEN + CHUNK_CRC_LEN)
                .and_then(|end| end.checked_add(length))
                .filter(|&end| end <= self.bytes.len())
                .ok_or_else(|| truncated.clone())?;
            if &header[4..8] == IEND {
                return Ok(chunk_end);
            }
            pos = chunk_end;
        }
    }
}

impl<'a> Iterator for PngStreamSplitter<'a> {
    type Item = Result<&'a [u8], PngStreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.offset;
        if start >= self.bytes.len() {
            return None;
        }

        if !self.bytes[start..].starts_with(&PNG_SIGNATURE) {
            self.offset = self.bytes.len();
            return Some(Err(PngStreamError::BadSignature {
                index: self.index,
                offset: start,
            }));
        }

        match self.image_end(start) {
            Ok(end) => {
                self.offset = end;
                self.index += 1;
                Some(Ok(&self.bytes[start..end]))
            }
            Err(e) => {
                self.offset = self.bytes.len();
                Some(Err(e))
            }
        }
    }
}

/// Decodes one PNG file's bytes into a raster tagged with `index`.
pub fn decode_png(bytes: &[u8], index: usize) -> Result<Raster, image::ImageError> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    Ok(Raster::from_rgba_image(decoded.to_rgba8(), index))
}
