//! Spec: CSS 2.2 §10.8.1 Leading and half-leading

use css_box::LayoutUnit;
use style_engine::LineHeight;

/// Ascent and descent of an inline box once half-leading is applied.
///
/// The difference between the used `line-height` and the glyph height
/// (`ascent + descent`) is split evenly above and below; the two results
/// always add up to the used line height.
pub fn leading_extents(
    line_height: LineHeight,
    font_size: f32,
    ascent: LayoutUnit,
    descent: LayoutUnit,
) -> (LayoutUnit, LayoutUnit) {
    let glyph_height = ascent + descent;
    let used = match line_height {
        LineHeight::Normal => glyph_height,
        LineHeight::Number(factor) => LayoutUnit::from_px(factor * font_size),
        LineHeight::Px(pixels) => LayoutUnit::from_px(pixels),
    };
    let half_leading = (used - glyph_height) / 2;
    let top = ascent + half_leading;
    (top, used - top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_px_i32(value)
    }

    /// Extra line height is split evenly; `normal` keeps the glyph extents.
    ///
    /// # Panics
    /// Panics if the leading is split incorrectly.
    #[test]
    fn test_half_leading() {
        assert_eq!(leading_extents(LineHeight::Normal, 16.0, px(12), px(4)), (px(12), px(4)));
        assert_eq!(leading_extents(LineHeight::Px(24.0), 16.0, px(12), px(4)), (px(16), px(8)));
        assert_eq!(leading_extents(LineHeight::Number(1.5), 16.0, px(12), px(4)), (px(16), px(8)));
        assert_eq!(leading_extents(LineHeight::Px(10.0), 16.0, px(12), px(4)), (px(9), px(1)));
    }
}
