//! Text measurement.
//!
//! Layout treats font shaping as an oracle: a [`TextMeasurer`] reports the
//! advance width and vertical extents of a string in a given font. Line
//! fitting on top of that oracle lives here too, so every measurer shares the
//! same UAX #14 break rules.

mod fixed_advance;
mod metrics;

pub use fixed_advance::FixedAdvanceMeasurer;
pub use metrics::{RunMeasurement, TextMetrics};

use css_box::LayoutUnit;
use style_engine::FontSpec;

/// Failure reported by a text measurer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    #[error("no font available for family {family:?}")]
    UnknownFont { family: String },
    #[error("font size {size} is not a positive finite number")]
    InvalidFontSize { size: f32 },
    #[error("measurement of {text:?} produced non-finite metrics")]
    InvalidMetrics { text: String },
    #[error("text backend failed: {0}")]
    Backend(String),
}

/// Measurement oracle for text runs.
///
/// Implementations must be deterministic and free of side effects visible to
/// layout; they are shared across threads when documents are laid out in
/// parallel.
pub trait TextMeasurer: Send + Sync {
    /// Measure `text` set in `font`. Empty text still reports the font's ascent and descent.
    ///
    /// # Errors
    /// Returns an error if the font cannot be resolved or the backend fails.
    fn measure(&self, text: &str, font: FontSpec<'_>) -> Result<TextMetrics, MeasureError>;

    /// Fit as much of `run` as possible into `available` width.
    ///
    /// See [`RunMeasurement`] for the reported values. `available: None`
    /// disables soft wrapping. With `first_on_line` the first unbreakable
    /// segment is placed even when it overflows.
    ///
    /// # Errors
    /// Propagates failures from [`TextMeasurer::measure`].
    fn measure_run(
        &self,
        run: &str,
        font: FontSpec<'_>,
        available: Option<LayoutUnit>,
        first_on_line: bool,
    ) -> Result<RunMeasurement, MeasureError> {
        metrics::fit_run(self, run, font, available, first_on_line)
    }
}
