//! Formatters for elements whose size does not come from their children.
//!
//! Each [`SpecialContent`] variant maps to one entry of [`intrinsic_size_for`];
//! the size it reports goes through the replaced-element rules of CSS 2.2
//! §10.3.2 and the element is then placed like any other block, float or
//! atomic inline.

use std::collections::HashMap;

use css_box::LayoutUnit;
use css_text::{MeasureError, TextMeasurer};
use log::trace;
use style_engine::{ComputedStyle, LineHeight};

pub use dom::{FormControl, SpecialContent};

/// Natural dimensions of replaced content. Any part may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntrinsicSize {
    pub width: Option<LayoutUnit>,
    pub height: Option<LayoutUnit>,
    /// Width divided by height.
    pub ratio: Option<f32>,
}

impl IntrinsicSize {
    /// Both dimensions known; the ratio follows from them.
    pub fn sized(width: LayoutUnit, height: LayoutUnit) -> Self {
        let ratio = height
            .is_positive()
            .then(|| width.to_px() / height.to_px());
        Self {
            width: Some(width),
            height: Some(height),
            ratio,
        }
    }

    pub fn from_px(width: f32, height: f32) -> Self {
        Self::sized(LayoutUnit::from_px(width), LayoutUnit::from_px(height))
    }

    /// The width/height ratio, derived from the dimensions when not given.
    pub fn aspect_ratio(&self) -> Option<f32> {
        self.ratio
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
            .or_else(|| match (self.width, self.height) {
                (Some(width), Some(height)) if height.is_positive() => {
                    Some(width.to_px() / height.to_px())
                }
                _ => None,
            })
    }
}

/// Source of intrinsic sizes for images and embedded objects.
///
/// Like the text measurer, implementations are shared between threads and
/// must answer without side effects.
pub trait IntrinsicSizeProvider: Send + Sync {
    /// Natural size of `resource`; unknown resources report nothing.
    fn intrinsic_size(&self, resource: &str) -> IntrinsicSize;
}

/// Map-backed provider.
#[derive(Debug, Clone, Default)]
pub struct StaticResources {
    sizes: HashMap<String, IntrinsicSize>,
}

impl StaticResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resource`, replacing an earlier entry.
    pub fn insert(&mut self, resource: &str, size: IntrinsicSize) -> &mut Self {
        self.sizes.insert(resource.to_owned(), size);
        self
    }

    #[must_use]
    pub fn with(mut self, resource: &str, size: IntrinsicSize) -> Self {
        self.insert(resource, size);
        self
    }
}

impl IntrinsicSizeProvider for StaticResources {
    fn intrinsic_size(&self, resource: &str) -> IntrinsicSize {
        self.sizes.get(resource).copied().unwrap_or_default()
    }
}

/// Height of one line of text in `style`, from the font's ascent and descent.
fn line_height_of(style: &ComputedStyle, ascent: f32, descent: f32) -> f32 {
    match style.line_height {
        LineHeight::Normal => ascent + descent,
        LineHeight::Number(factor) => factor * style.font_size,
        LineHeight::Px(pixels) => pixels,
    }
}

/// Intrinsic size of special content.
///
/// Images and embedded objects ask the resource provider; form controls are
/// sized from the element's font.
///
/// # Errors
/// Returns the measurer's error when a form control cannot be measured.
pub fn intrinsic_size_for(
    special: &SpecialContent,
    style: &ComputedStyle,
    measurer: &dyn TextMeasurer,
    resources: &dyn IntrinsicSizeProvider,
) -> Result<IntrinsicSize, MeasureError> {
    let size = match special {
        SpecialContent::Image { resource } | SpecialContent::Embedded { resource } => {
            resources.intrinsic_size(resource)
        }
        SpecialContent::FormControl(FormControl::TextInput { size }) => {
            let zero = measurer.measure("0", style.font())?;
            let line = line_height_of(style, zero.ascent, zero.descent);
            IntrinsicSize::from_px(zero.width * (*size).max(1) as f32, line)
        }
        SpecialContent::FormControl(FormControl::Checkbox | FormControl::Radio) => {
            IntrinsicSize::from_px(style.font_size, style.font_size)
        }
        SpecialContent::FormControl(FormControl::Button { label }) => {
            let metrics = measurer.measure(label, style.font())?;
            IntrinsicSize::from_px(metrics.width, metrics.ascent + metrics.descent)
        }
    };
    trace!("[SPECIAL] {special:?} -> {size:?}");
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_text::FixedAdvanceMeasurer;

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_px_i32(value)
    }

    /// Form controls take their size from the font; text inputs from `size` zeros.
    ///
    /// # Panics
    /// Panics if a control is sized incorrectly.
    #[test]
    fn test_form_control_sizes() {
        let measurer = FixedAdvanceMeasurer::default();
        let resources = StaticResources::new();
        let style = ComputedStyle::default();

        let input = intrinsic_size_for(
            &SpecialContent::FormControl(FormControl::TextInput { size: 5 }),
            &style,
            &measurer,
            &resources,
        )
        .unwrap();
        assert_eq!((input.width, input.height), (Some(px(40)), Some(px(16))));

        let checkbox = intrinsic_size_for(
            &SpecialContent::FormControl(FormControl::Checkbox),
            &style,
            &measurer,
            &resources,
        )
        .unwrap();
        assert_eq!((checkbox.width, checkbox.height), (Some(px(16)), Some(px(16))));

        let button = intrinsic_size_for(
            &SpecialContent::FormControl(FormControl::Button {
                label: "OK".to_owned(),
            }),
            &style,
            &measurer,
            &resources,
        )
        .unwrap();
        assert_eq!(button.width, Some(px(16)));
    }

    /// Unknown resources report no intrinsic data; known ones report their ratio.
    ///
    /// # Panics
    /// Panics if resource lookup is wrong.
    #[test]
    fn test_static_resources() {
        let resources =
            StaticResources::new().with("logo.png", IntrinsicSize::from_px(100.0, 50.0));
        let known = resources.intrinsic_size("logo.png");
        assert_eq!(known.width, Some(px(100)));
        assert_eq!(known.aspect_ratio(), Some(2.0));
        assert_eq!(resources.intrinsic_size("missing.png"), IntrinsicSize::default());
    }
}
