use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::shared::bounding_box::BoundingBox;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaddingUnit {
    #[default]
    Pixel,
    /// Percentage of the cropped region's width (left/right) or height
    /// (top/bottom).
    Percent,
}

/// Padding for one side of the output canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaddingArg {
    pub value: i64,
    pub unit: PaddingUnit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaddingParseError {
    #[error("empty padding value")]
    Empty,
    #[error("invalid padding '{0}': expected a pixel count like '12' or a percentage like '5%'")]
    Invalid(String),
}

impl PaddingArg {
    pub const fn pixels(value: i64) -> Self {
        Self {
            value,
            unit: PaddingUnit::Pixel,
        }
    }

    pub const fn percent(value: i64) -> Self {
        Self {
            value,
            unit: PaddingUnit::Percent,
        }
    }

    /// Pixel count for a side whose cropped extent is `dimension` pixels.
    ///
    /// Percentages round toward negative infinity and saturate instead of
    /// overflowing. Negative values are passed through; the caller owns their
    /// meaning.
    pub fn resolve(&self, dimension: i64) -> i64 {
        match self.unit {
            PaddingUnit::Pixel => self.value,
            PaddingUnit::Percent => dimension.saturating_mul(self.value).div_euclid(100),
        }
    }
}

/// Parses `"12"` (pixels) or `"12%"` (percent). Only non-negative integers
/// are accepted.
impl FromStr for PaddingArg {
    type Err = PaddingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PaddingParseError::Empty);
        }
        let (digits, unit) = match s.strip_suffix('%') {
            Some(digits) => (digits, PaddingUnit::Percent),
            None => (s, PaddingUnit::Pixel),
        };
        let value: u32 = digits
            .parse()
            .map_err(|_| PaddingParseError::Invalid(s.to_string()))?;
        Ok(Self {
            value: i64::from(value),
            unit,
        })
    }
}

impl fmt::Display for PaddingArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            PaddingUnit::Pixel => write!(f, "{}px", self.value),
            PaddingUnit::Percent => write!(f, "{}%", self.value),
        }
    }
}

/// Padding for all four sides, before resolution against a region.
///
/// The `with_*` builders apply in call order, so broader settings should be
/// applied first and per-side overrides last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaddingSpec {
    pub top: PaddingArg,
    pub right: PaddingArg,
    pub bottom: PaddingArg,
    pub left: PaddingArg,
}

impl PaddingSpec {
    pub fn uniform(arg: PaddingArg) -> Self {
        Self {
            top: arg,
            right: arg,
            bottom: arg,
            left: arg,
        }
    }

    pub fn with_all(self, arg: PaddingArg) -> Self {
        Self::uniform(arg)
    }

    pub fn with_horizontal(mut self, arg: PaddingArg) -> Self {
        self.left = arg;
        self.right = arg;
        self
    }

    pub fn with_vertical(mut self, arg: PaddingArg) -> Self {
        self.top = arg;
        self.bottom = arg;
        self
    }

    pub fn with_top(mut self, arg: PaddingArg) -> Self {
        self.top = arg;
        self
    }

    pub fn with_right(mut self, arg: PaddingArg) -> Self {
        self.right = arg;
        self
    }

    pub fn with_bottom(mut self, arg: PaddingArg) -> Self {
        self.bottom = arg;
        self
    }

    pub fn with_left(mut self, arg: PaddingArg) -> Self {
        self.left = arg;
        self
    }

    /// Concrete pixel padding around `bounds`. Percentages are taken of the
    /// cropped region, not of the source image.
    pub fn resolve(&self, bounds: &BoundingBox) -> ResolvedPadding {
        let width = bounds.width();
        let height = bounds.height();
        ResolvedPadding {
            top: self.top.resolve(height),
            right: self.right.resolve(width),
            bottom: self.bottom.resolve(height),
            left: self.left.resolve(width),
        }
    }
}

/// Pixel padding per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolvedPadding {
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub left: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::point::Point;
    use rstest::rstest;

    fn region(width: i64, height: i64) -> BoundingBox {
        BoundingBox::new(Point::new(3, 4), Point::new(3 + width - 1, 4 + height - 1))
    }

    #[rstest]
    #[case::pixels("12", PaddingArg::pixels(12))]
    #[case::zero("0", PaddingArg::pixels(0))]
    #[case::percent("50%", PaddingArg::percent(50))]
    #[case::large_percent("250%", PaddingArg::percent(250))]
    #[case::surrounding_whitespace(" 7 ", PaddingArg::pixels(7))]
    fn test_parse_valid(#[case] input: &str, #[case] expected: PaddingArg) {
        assert_eq!(input.parse::<PaddingArg>(), Ok(expected));
    }

    #[rstest]
    #[case::negative("-3")]
    #[case::negative_percent("-3%")]
    #[case::bare_percent("%")]
    #[case::unit_suffix("10px")]
    #[case::fraction("1.5")]
    #[case::double_percent("5%%")]
    fn test_parse_invalid(#[case] input: &str) {
        assert_eq!(
            input.parse::<PaddingArg>(),
            Err(PaddingParseError::Invalid(input.to_string()))
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!("".parse::<PaddingArg>(), Err(PaddingParseError::Empty));
    }

    #[test]
    fn test_display() {
        assert_eq!(PaddingArg::pixels(4).to_string(), "4px");
        assert_eq!(PaddingArg::percent(10).to_string(), "10%");
    }

    #[test]
    fn test_pixels_pass_through() {
        let spec = PaddingSpec {
            top: PaddingArg::pixels(1),
            right: PaddingArg::pixels(2),
            bottom: PaddingArg::pixels(3),
            left: PaddingArg::pixels(4),
        };
        assert_eq!(
            spec.resolve(&region(100, 100)),
            ResolvedPadding {
                top: 1,
                right: 2,
                bottom: 3,
                left: 4
            }
        );
    }

    #[test]
    fn test_half_of_cropped_height() {
        let spec = PaddingSpec::default().with_top(PaddingArg::percent(50));
        assert_eq!(spec.resolve(&region(3, 10)).top, 5);
    }

    #[test]
    fn test_percent_uses_width_for_horizontal_sides() {
        let spec = PaddingSpec::uniform(PaddingArg::percent(10));
        let resolved = spec.resolve(&region(40, 20));
        assert_eq!(resolved.left, 4);
        assert_eq!(resolved.right, 4);
        assert_eq!(resolved.top, 2);
        assert_eq!(resolved.bottom, 2);
    }

    #[rstest]
    #[case::rounds_down(33, 10, 3)]
    #[case::exact(25, 8, 2)]
    #[case::below_one_pixel(10, 9, 0)]
    #[case::negative_rounds_toward_negative_infinity(-10, 9, -1)]
    fn test_percent_floor(#[case] percent: i64, #[case] dimension: i64, #[case] expected: i64) {
        assert_eq!(PaddingArg::percent(percent).resolve(dimension), expected);
    }

    #[test]
    fn test_huge_percent_saturates() {
        let arg: PaddingArg = "4294967295%".parse().unwrap();
        assert_eq!(arg.resolve(i64::from(u32::MAX) + 1), i64::MAX.div_euclid(100));
    }

    #[test]
    fn test_builders_apply_in_order() {
        let spec = PaddingSpec::default()
            .with_all(PaddingArg::pixels(1))
            .with_horizontal(PaddingArg::pixels(2))
            .with_vertical(PaddingArg::percent(3))
            .with_left(PaddingArg::pixels(4));
        assert_eq!(spec.top, PaddingArg::percent(3));
        assert_eq!(spec.bottom, PaddingArg::percent(3));
        assert_eq!(spec.right, PaddingArg::pixels(2));
        assert_eq!(spec.left, PaddingArg::pixels(4));
    }

    #[test]
    fn test_default_is_zero_pixels() {
        let resolved = PaddingSpec::default().resolve(&region(8, 8));
        assert_eq!(resolved, ResolvedPadding::default());
    }
}
