//! Spec: CSS 2.2 §10.6.3 Block-level non-replaced elements in normal flow when 'overflow' computes to 'visible'
//! (and §10.7 min/max heights)

use css_box::LayoutUnit;
use style_engine::{BoxSizing, UsedValues};

use super::{clamp_size, content_box_size};
use crate::box_tree::HeightRule;

/// How the content height of a block will be found.
///
/// A definite `height` is converted to content-box space and clamped now; an
/// `auto` (or unresolvable) height waits for the content and carries the
/// clamps along.
pub fn height_rule(used: &UsedValues, box_sizing: BoxSizing) -> HeightRule {
    let frame = used.padding.vertical() + used.border.vertical();
    let min = content_box_size(used.min_height, box_sizing, frame);
    let max = used
        .max_height
        .map(|limit| content_box_size(limit, box_sizing, frame));
    match used.height.definite() {
        Some(height) => HeightRule::Fixed(clamp_size(content_box_size(height, box_sizing, frame), min, max)),
        None => HeightRule::Auto { min, max },
    }
}

/// Content height of a block whose content ends `auto_height` below its content top.
pub fn used_content_height(rule: HeightRule, auto_height: LayoutUnit) -> LayoutUnit {
    match rule {
        HeightRule::Fixed(height) => height,
        HeightRule::Auto { min, max } => clamp_size(auto_height.non_negative(), min, max),
    }
}
