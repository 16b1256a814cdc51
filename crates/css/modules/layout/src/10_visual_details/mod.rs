//! CSS 2.2 Chapter 10: Visual formatting model details
//! Spec: <https://www.w3.org/TR/CSS22/visudet.html>

use css_box::LayoutUnit;
use style_engine::BoxSizing;

pub mod part_10_3_2_replaced_elements;
pub mod part_10_3_3_block_widths;
pub mod part_10_3_5_shrink_to_fit;
pub mod part_10_6_3_height_of_blocks;
pub mod part_10_8_line_height;

/// Content-box size for a `width`/`height` value given in `box_sizing` space.
///
/// `frame` is the padding plus border along the same axis.
pub fn content_box_size(value: LayoutUnit, box_sizing: BoxSizing, frame: LayoutUnit) -> LayoutUnit {
    match box_sizing {
        BoxSizing::ContentBox => value.non_negative(),
        BoxSizing::BorderBox => (value - frame).non_negative(),
    }
}

/// Apply `max` then `min`, so `min` wins when they conflict.
pub fn clamp_size(size: LayoutUnit, min: LayoutUnit, max: Option<LayoutUnit>) -> LayoutUnit {
    max.map_or(size, |limit| size.min(limit)).max(min)
}
