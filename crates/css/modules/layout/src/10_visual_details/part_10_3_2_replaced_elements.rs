//! Spec: CSS 2.2 §10.3.2 Inline, replaced elements (and §10.6.2 for heights)
//! Used size of replaced content from style and intrinsic dimensions.

use css_box::LayoutUnit;
use log::trace;
use style_engine::{BoxSizing, UsedValues};

use super::{clamp_size, content_box_size};
use crate::special::IntrinsicSize;

fn height_from_width(width: LayoutUnit, intrinsic: &IntrinsicSize, ratio: f32) -> LayoutUnit {
    match (intrinsic.width, intrinsic.height) {
        (Some(natural_width), Some(natural_height)) if natural_width.is_positive() => {
            width.mul_div(natural_height, natural_width)
        }
        _ => LayoutUnit::from_px(width.to_px() / ratio),
    }
}

fn width_from_height(height: LayoutUnit, intrinsic: &IntrinsicSize, ratio: f32) -> LayoutUnit {
    match (intrinsic.width, intrinsic.height) {
        (Some(natural_width), Some(natural_height)) if natural_height.is_positive() => {
            height.mul_div(natural_width, natural_height)
        }
        _ => LayoutUnit::from_px(height.to_px() * ratio),
    }
}

/// Content-box size of a replaced element.
///
/// - Both `width` and `height` given: used as is.
/// - One given: with `preserve_aspect_ratio` and a known ratio the other
///   follows from it; otherwise the other takes its intrinsic value.
/// - Neither given: the intrinsic size, a missing side derived from the ratio.
///
/// Any side still unknown takes `fallback`. min/max clamp each axis last.
pub fn resolve_replaced_size(
    intrinsic: &IntrinsicSize,
    used: &UsedValues,
    box_sizing: BoxSizing,
    preserve_aspect_ratio: bool,
    fallback: (LayoutUnit, LayoutUnit),
) -> (LayoutUnit, LayoutUnit) {
    let frame_x = used.padding.horizontal() + used.border.horizontal();
    let frame_y = used.padding.vertical() + used.border.vertical();
    let width = used
        .width
        .definite()
        .map(|value| content_box_size(value, box_sizing, frame_x));
    let height = used
        .height
        .definite()
        .map(|value| content_box_size(value, box_sizing, frame_y));
    let ratio = intrinsic.aspect_ratio();
    let kept_ratio = ratio.filter(|_| preserve_aspect_ratio);
    let (fallback_width, fallback_height) = fallback;

    let (width, height) = match (width, height) {
        (Some(width), Some(height)) => (width, height),
        (Some(width), None) => (
            width,
            kept_ratio.map_or_else(
                || intrinsic.height.unwrap_or(fallback_height),
                |kept| height_from_width(width, intrinsic, kept),
            ),
        ),
        (None, Some(height)) => (
            kept_ratio.map_or_else(
                || intrinsic.width.unwrap_or(fallback_width),
                |kept| width_from_height(height, intrinsic, kept),
            ),
            height,
        ),
        (None, None) => match (intrinsic.width, intrinsic.height, ratio) {
            (Some(natural_width), Some(natural_height), _) => (natural_width, natural_height),
            (Some(natural_width), None, Some(natural_ratio)) => (
                natural_width,
                height_from_width(natural_width, intrinsic, natural_ratio),
            ),
            (None, Some(natural_height), Some(natural_ratio)) => (
                width_from_height(natural_height, intrinsic, natural_ratio),
                natural_height,
            ),
            (natural_width, natural_height, _) => (
                natural_width.unwrap_or(fallback_width),
                natural_height.unwrap_or(fallback_height),
            ),
        },
    };

    let min_width = content_box_size(used.min_width, box_sizing, frame_x);
    let max_width = used.max_width.map(|limit| content_box_size(limit, box_sizing, frame_x));
    let min_height = content_box_size(used.min_height, box_sizing, frame_y);
    let max_height = used.max_height.map(|limit| content_box_size(limit, box_sizing, frame_y));
    let size = (
        clamp_size(width.non_negative(), min_width, max_width),
        clamp_size(height.non_negative(), min_height, max_height),
    );
    trace!("[REPLACED] intrinsic={intrinsic:?} -> {}x{}", size.0, size.1);
    size
}
