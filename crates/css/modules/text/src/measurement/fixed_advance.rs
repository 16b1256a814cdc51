use log::trace;
use style_engine::FontSpec;

use super::{MeasureError, TextMeasurer, TextMetrics};

/// Deterministic measurer: every character advances by the same amount.
///
/// Widths scale from a 16px baseline, so the default 8px advance gives
/// `0.5em` per character. Ascent and descent are fixed fractions of the font
/// size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance of one character at a 16px font size.
    pub advance_at_16px: f32,
    pub ascent_ratio: f32,
    pub descent_ratio: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance_at_16px: 8.0,
            ascent_ratio: 0.75,
            descent_ratio: 0.25,
        }
    }
}

impl FixedAdvanceMeasurer {
    pub const fn with_advance(advance_at_16px: f32) -> Self {
        Self {
            advance_at_16px,
            ascent_ratio: 0.75,
            descent_ratio: 0.25,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, font: FontSpec<'_>) -> Result<TextMetrics, MeasureError> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(MeasureError::InvalidFontSize { size: font.size });
        }
        if font.family.trim().is_empty() {
            return Err(MeasureError::UnknownFont {
                family: font.family.to_owned(),
            });
        }
        let scale = font.size / 16.0;
        let width = text.chars().count() as f32 * self.advance_at_16px * scale;
        trace!("[MEASURE] {text:?} @ {}px -> {width}", font.size);
        Ok(TextMetrics {
            width,
            ascent: font.size * self.ascent_ratio,
            descent: font.size * self.descent_ratio,
        })
    }
}
