//! Spec: CSS 2.2 §8.3.1 Collapsing margins
//!
//! Margins are collected in a [`MarginStrut`](crate::box_tree::MarginStrut)
//! and collapsed once the position of the next in-flow content is known. The
//! predicates here decide which edges of a block let margins through.

use css_box::LayoutUnit;

use crate::box_tree::{BlockSizing, HeightRule};

/// Spec: §8.3.1. The top margin of a box adjoins the top margin of its first in-flow child.
///
/// Requires no top border or padding and a box that does not establish a new
/// block formatting context. Clearance is checked by the caller.
pub fn top_margin_collapses_through(sizing: &BlockSizing, establishes_bfc: bool) -> bool {
    !establishes_bfc
        && sizing.border.top == LayoutUnit::zero()
        && sizing.padding.top == LayoutUnit::zero()
}

/// Spec: §8.3.1. The bottom margin of a box adjoins the bottom margin of its last in-flow child.
///
/// Requires no bottom border or padding, an `auto` height, and a box that
/// does not establish a new block formatting context.
pub fn bottom_margin_collapses_through(sizing: &BlockSizing, establishes_bfc: bool) -> bool {
    !establishes_bfc
        && sizing.border.bottom == LayoutUnit::zero()
        && sizing.padding.bottom == LayoutUnit::zero()
        && matches!(sizing.height, HeightRule::Auto { .. })
}
