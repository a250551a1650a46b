use thiserror::Error;

use crate::cropping::domain::padding::{PaddingSpec, ResolvedPadding};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::{MAX_CANVAS_PIXELS, RGBA_CHANNELS};
use crate::shared::point::Point;
use crate::shared::raster::Raster;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CropError {
    #[error("empty image: no visible pixels (bounds {top_left} to {bottom_right})")]
    EmptyRegion {
        top_left: Point,
        bottom_right: Point,
    },
    #[error("output canvas of {width}x{height} pixels is too large")]
    CanvasTooLarge { width: i64, height: i64 },
}

/// Copies `bounds` out of `source` onto a new transparent canvas, surrounded
/// by `padding` resolved against the cropped region.
pub fn crop(
    source: &Raster,
    bounds: &BoundingBox,
    padding: &PaddingSpec,
) -> Result<Raster, CropError> {
    ensure_not_empty(bounds)?;
    crop_resolved(source, bounds, &padding.resolve(bounds))
}

/// Like [`crop`] with padding already in pixels.
///
/// The canvas is `(w + left + right) × (h + top + bottom)`. Pixels are copied
/// verbatim, alpha included; whatever the copy does not cover stays fully
/// transparent. Negative padding shrinks the canvas and clips the copy.
/// Canvases beyond `u32` per side or [`MAX_CANVAS_PIXELS`] in total are
/// refused with [`CropError::CanvasTooLarge`].
pub fn crop_resolved(
    source: &Raster,
    bounds: &BoundingBox,
    padding: &ResolvedPadding,
) -> Result<Raster, CropError> {
    ensure_not_empty(bounds)?;

    let (canvas_width, canvas_height) = canvas_size(bounds, padding)?;
    let mut canvas = Raster::transparent(canvas_width, canvas_height).with_index(source.index());

    // Source columns that land on the canvas and exist in the source.
    let offset_x = padding.left.saturating_sub(bounds.top_left.x);
    let offset_y = padding.top.saturating_sub(bounds.top_left.y);
    let x_start = bounds.top_left.x.max(0).max(offset_x.saturating_neg());
    let x_end = (bounds.bottom_right.x + 1)
        .min(i64::from(source.width()))
        .min(i64::from(canvas_width).saturating_sub(offset_x));
    if x_start >= x_end {
        return Ok(canvas);
    }

    let src_range = byte_range(x_start, x_end);
    let dst_range = byte_range(x_start + offset_x, x_end + offset_x);

    let y_start = bounds.top_left.y.max(0).max(offset_y.saturating_neg());
    let y_end = (bounds.bottom_right.y + 1)
        .min(i64::from(source.height()))
        .min(i64::from(canvas_height).saturating_sub(offset_y));
    for y in y_start..y_end {
        let src_row = source.row(y as u32);
        let dst_row = canvas.row_mut((y + offset_y) as u32);
        dst_row[dst_range.clone()].copy_from_slice(&src_row[src_range.clone()]);
    }

    Ok(canvas)
}

fn ensure_not_empty(bounds: &BoundingBox) -> Result<(), CropError> {
    if bounds.is_empty() {
        return Err(CropError::EmptyRegion {
            top_left: bounds.top_left,
            bottom_right: bounds.bottom_right,
        });
    }
    Ok(())
}

/// Canvas dimensions, clamped at zero below.
fn canvas_size(bounds: &BoundingBox, padding: &ResolvedPadding) -> Result<(u32, u32), CropError> {
    let width = bounds
        .width()
        .saturating_add(padding.left)
        .saturating_add(padding.right)
        .max(0);
    let height = bounds
        .height()
        .saturating_add(padding.top)
        .saturating_add(padding.bottom)
        .max(0);
    let too_large = CropError::CanvasTooLarge { width, height };

    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(too_large);
    };
    if u64::from(w) * u64::from(h) > MAX_CANVAS_PIXELS {
        return Err(too_large);
    }
    Ok((w, h))
}

fn byte_range(start: i64, end: i64) -> std::ops::Range<usize> {
    start as usize * RGBA_CHANNELS..end as usize * RGBA_CHANNELS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cropping::domain::padding::PaddingArg;

    /// Raster where each pixel encodes its own coordinates.
    fn coordinate_raster(width: u32, height: u32) -> Raster {
        let mut raster = Raster::transparent(width, height);
        for y in 0..height {
            for x in 0..width {
                raster.set_pixel(x, y, [x as u8, y as u8, 7, 100 + (x + y) as u8]);
            }
        }
        raster
    }

    fn bounds(tl: (i64, i64), br: (i64, i64)) -> BoundingBox {
        BoundingBox::new(Point::new(tl.0, tl.1), Point::new(br.0, br.1))
    }

    #[test]
    fn test_zero_padding_reproduces_sub_image() {
        let source = coordinate_raster(5, 5);
        let out = crop(&source, &bounds((1, 1), (3, 3)), &PaddingSpec::default()).unwrap();
        assert_eq!((out.width(), out.height()), (3, 3));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(out.pixel(x, y), source.pixel(x + 1, y + 1));
            }
        }
    }

    #[test]
    fn test_sentinel_is_rejected() {
        let source = coordinate_raster(5, 5);
        let err = crop(&source, &BoundingBox::empty(5, 5), &PaddingSpec::default()).unwrap_err();
        assert_eq!(
            err,
            CropError::EmptyRegion {
                top_left: Point::new(5, 5),
                bottom_right: Point::new(-1, -1),
            }
        );
    }

    #[test]
    fn test_resolved_crop_also_rejects_sentinel() {
        let source = coordinate_raster(2, 2);
        let result = crop_resolved(&source, &BoundingBox::empty(2, 2), &ResolvedPadding::default());
        assert!(matches!(result, Err(CropError::EmptyRegion { .. })));
    }

    #[test]
    fn test_padding_offsets_content_and_leaves_border_transparent() {
        let source = coordinate_raster(5, 5);
        let padding = ResolvedPadding {
            top: 1,
            right: 2,
            bottom: 3,
            left: 4,
        };
        let out = crop_resolved(&source, &bounds((2, 1), (3, 2)), &padding).unwrap();
        assert_eq!((out.width(), out.height()), (2 + 4 + 2, 2 + 1 + 3));

        for y in 0..out.height() {
            for x in 0..out.width() {
                let inside = (4..6).contains(&x) && (1..3).contains(&y);
                if inside {
                    assert_eq!(out.pixel(x, y), source.pixel(x - 4 + 2, y - 1 + 1));
                } else {
                    assert_eq!(out.pixel(x, y), [0, 0, 0, 0], "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_percent_padding_is_resolved_against_region() {
        let source = coordinate_raster(10, 10);
        let spec = PaddingSpec::default().with_top(PaddingArg::percent(50));
        // 4×10 region → 5 rows of top padding
        let out = crop(&source, &bounds((2, 0), (5, 9)), &spec).unwrap();
        assert_eq!((out.width(), out.height()), (4, 15));
        assert_eq!(out.pixel(0, 4), [0, 0, 0, 0]);
        assert_eq!(out.pixel(0, 5), source.pixel(2, 0));
    }

    #[test]
    fn test_alpha_is_copied_verbatim() {
        let mut source = Raster::transparent(3, 1);
        source.set_pixel(1, 0, [200, 100, 50, 3]);
        let out = crop(&source, &bounds((1, 0), (1, 0)), &PaddingSpec::default()).unwrap();
        assert_eq!(out.pixel(0, 0), [200, 100, 50, 3]);
    }

    #[test]
    fn test_negative_padding_clips_the_copy() {
        let source = coordinate_raster(5, 5);
        let padding = ResolvedPadding {
            top: -1,
            right: 0,
            bottom: 0,
            left: -2,
        };
        let out = crop_resolved(&source, &bounds((0, 0), (4, 4)), &padding).unwrap();
        assert_eq!((out.width(), out.height()), (3, 4));
        assert_eq!(out.pixel(0, 0), source.pixel(2, 1));
        assert_eq!(out.pixel(2, 3), source.pixel(4, 4));
    }

    #[test]
    fn test_padding_consuming_the_region_yields_empty_canvas() {
        let source = coordinate_raster(2, 2);
        let padding = ResolvedPadding {
            top: -5,
            right: 0,
            bottom: 0,
            left: 0,
        };
        let out = crop_resolved(&source, &bounds((0, 0), (1, 1)), &padding).unwrap();
        assert_eq!((out.width(), out.height()), (2, 0));
        assert!(out.data().is_empty());
    }

    #[test]
    fn test_bounds_beyond_source_copy_only_existing_pixels() {
        let source = coordinate_raster(3, 3);
        let out = crop(&source, &bounds((1, 1), (4, 4)), &PaddingSpec::default()).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        assert_eq!(out.pixel(1, 1), source.pixel(2, 2));
        assert_eq!(out.pixel(3, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn test_maximal_pixel_padding_is_refused() {
        let source = coordinate_raster(1, 1);
        let padding = PaddingSpec::uniform("4294967295".parse().unwrap());
        let err = crop(&source, &bounds((0, 0), (0, 0)), &padding).unwrap_err();
        assert_eq!(
            err,
            CropError::CanvasTooLarge {
                width: 1 + 2 * 4_294_967_295,
                height: 1 + 2 * 4_294_967_295,
            }
        );
    }

    #[test]
    fn test_canvas_over_pixel_cap_is_refused() {
        let source = coordinate_raster(1, 1);
        let padding = ResolvedPadding {
            top: 0,
            right: 70_000,
            bottom: 70_000,
            left: 0,
        };
        let result = crop_resolved(&source, &bounds((0, 0), (0, 0)), &padding);
        assert!(matches!(result, Err(CropError::CanvasTooLarge { .. })));
    }

    #[test]
    fn test_extreme_negative_padding_yields_empty_canvas() {
        let source = coordinate_raster(2, 2);
        let padding = ResolvedPadding {
            top: i64::MIN,
            right: i64::MIN,
            bottom: 0,
            left: i64::MIN,
        };
        let out = crop_resolved(&source, &bounds((0, 0), (1, 1)), &padding).unwrap();
        assert_eq!((out.width(), out.height()), (0, 0));
    }

    #[test]
    fn test_output_keeps_batch_index() {
        let source = coordinate_raster(2, 2).with_index(4);
        let out = crop(&source, &bounds((0, 0), (0, 0)), &PaddingSpec::default()).unwrap();
        assert_eq!(out.index(), 4);
    }
}
