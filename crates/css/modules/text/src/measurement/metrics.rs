//! Text measurement metrics and run fitting.

use css_box::LayoutUnit;
use style_engine::FontSpec;
use unicode_linebreak::{BreakOpportunity, linebreaks};

use super::{MeasureError, TextMeasurer};

/// Measured text dimensions, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the text.
    pub width: f32,
    /// Ascent from the baseline (positive, upward).
    pub ascent: f32,
    /// Descent from the baseline (positive, downward).
    pub descent: f32,
}

/// How much of a run fits on the current line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunMeasurement {
    /// Bytes of the run placed on this line, including trailing spaces and a
    /// consumed newline.
    pub consumed_bytes: usize,
    /// Width of the placed text without trailing white space.
    pub width: LayoutUnit,
    /// Width of the placed text including trailing white space.
    pub advance: LayoutUnit,
    /// The placed text ends at a soft wrap opportunity inside the run.
    pub break_opportunity: bool,
    /// The placed text ends with a forced line break.
    pub mandatory_break: bool,
    /// Widest unbreakable segment among the placed text.
    pub widest_segment: LayoutUnit,
    pub ascent: LayoutUnit,
    pub descent: LayoutUnit,
}

impl RunMeasurement {
    /// Nothing from the run was placed.
    pub const fn is_empty(&self) -> bool {
        self.consumed_bytes == 0
    }
}

const fn is_newline(character: char) -> bool {
    matches!(
        character,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

fn visible_part(text: &str) -> &str {
    text.trim_end_matches(is_newline).trim_end_matches([' ', '\t'])
}

fn advance_part(text: &str) -> &str {
    text.trim_end_matches(is_newline)
}

fn width_of<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    font: FontSpec<'_>,
) -> Result<LayoutUnit, MeasureError> {
    if text.is_empty() {
        return Ok(LayoutUnit::zero());
    }
    let metrics = measurer.measure(text, font)?;
    LayoutUnit::from_px_checked(metrics.width).ok_or(MeasureError::InvalidMetrics {
        text: text.to_owned(),
    })
}

/// Fit as much of `run` as possible into `available` width.
///
/// Breaks only at UAX #14 opportunities. `available: None` means the run may
/// not wrap (or is being measured at max-content) and is consumed up to the
/// first forced break. When `first_on_line` is set nothing precedes the run on
/// the line, so the first segment is placed even if it overflows; otherwise a
/// first segment that does not fit yields an empty measurement.
pub(super) fn fit_run<M: TextMeasurer + ?Sized>(
    measurer: &M,
    run: &str,
    font: FontSpec<'_>,
    available: Option<LayoutUnit>,
    first_on_line: bool,
) -> Result<RunMeasurement, MeasureError> {
    let font_metrics = measurer.measure("", font)?;
    let ascent = LayoutUnit::from_px(font_metrics.ascent);
    let descent = LayoutUnit::from_px(font_metrics.descent);

    let mut placed = 0;
    let mut placed_width = LayoutUnit::zero();
    let mut widest_segment = LayoutUnit::zero();
    let mut mandatory_break = false;
    let mut segment_start = 0;

    for (index, opportunity) in linebreaks(run) {
        let candidate = &run[..index];
        let forced = opportunity == BreakOpportunity::Mandatory
            && candidate.chars().next_back().is_some_and(is_newline);
        let width = width_of(measurer, visible_part(candidate), font)?;
        if let Some(limit) = available
            && width > limit
            && (placed > 0 || !first_on_line)
        {
            break;
        }
        let segment = width_of(measurer, visible_part(&run[segment_start..index]), font)?;
        widest_segment = widest_segment.max(segment);
        placed = index;
        placed_width = width;
        segment_start = index;
        if forced {
            mandatory_break = true;
            break;
        }
    }

    if placed == 0 {
        return Ok(RunMeasurement {
            ascent,
            descent,
            ..RunMeasurement::default()
        });
    }

    let advance = width_of(measurer, advance_part(&run[..placed]), font)?;
    Ok(RunMeasurement {
        consumed_bytes: placed,
        width: placed_width,
        advance,
        break_opportunity: placed < run.len() && !mandatory_break,
        mandatory_break,
        widest_segment,
        ascent,
        descent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedAdvanceMeasurer;

    fn font() -> FontSpec<'static> {
        FontSpec {
            family: "sans-serif",
            size: 16.0,
        }
    }

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_px_i32(value)
    }

    /// Words are placed until the next one would overflow; the trailing space is excluded from width.
    ///
    /// # Panics
    /// Panics if the break lands in the wrong place.
    #[test]
    fn test_breaks_before_overflowing_word() {
        let measurer = FixedAdvanceMeasurer::default();
        // 8px per character at 16px.
        let fitted = fit_run(&measurer, "aaa bbb ccc", font(), Some(px(60)), true).unwrap();
        assert_eq!(fitted.consumed_bytes, 8);
        assert_eq!(fitted.width, px(56));
        assert_eq!(fitted.advance, px(64));
        assert!(fitted.break_opportunity);
        assert!(!fitted.mandatory_break);
    }

    /// An overflowing first word is forced onto an empty line only.
    ///
    /// # Panics
    /// Panics if forcing is applied incorrectly.
    #[test]
    fn test_overflowing_first_segment() {
        let measurer = FixedAdvanceMeasurer::default();
        let forced = fit_run(&measurer, "abcdefgh ij", font(), Some(px(20)), true).unwrap();
        assert_eq!(forced.consumed_bytes, 9);
        assert_eq!(forced.width, px(64));
        let refused = fit_run(&measurer, "abcdefgh ij", font(), Some(px(20)), false).unwrap();
        assert!(refused.is_empty());
        assert_eq!(refused.ascent, px(12));
    }

    /// Newlines force a break and are consumed but not measured.
    ///
    /// # Panics
    /// Panics if the newline is not treated as mandatory.
    #[test]
    fn test_mandatory_break() {
        let measurer = FixedAdvanceMeasurer::default();
        let fitted = fit_run(&measurer, "ab\ncd", font(), None, true).unwrap();
        assert_eq!(fitted.consumed_bytes, 3);
        assert_eq!(fitted.width, px(16));
        assert!(fitted.mandatory_break);
        assert!(!fitted.break_opportunity);
    }

    /// Unconstrained measurement consumes everything and reports the widest word.
    ///
    /// # Panics
    /// Panics if the widest segment is wrong.
    #[test]
    fn test_unconstrained_widest_segment() {
        let measurer = FixedAdvanceMeasurer::default();
        let fitted = fit_run(&measurer, "a bbbb cc", font(), None, true).unwrap();
        assert_eq!(fitted.consumed_bytes, 9);
        assert_eq!(fitted.width, px(72));
        assert_eq!(fitted.widest_segment, px(32));
        assert!(!fitted.break_opportunity);
    }
}
