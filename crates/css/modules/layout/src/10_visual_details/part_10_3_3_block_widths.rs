//! Spec: CSS 2.2 §10.3.3 Block-level, non-replaced elements in normal flow
//! Width and horizontal margins.

use css_box::LayoutUnit;
use log::trace;
use style_engine::{BoxSizing, UsedValues};

use super::{clamp_size, content_box_size};

/// Used horizontal values of a block-level box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizontalSolution {
    pub content_width: LayoutUnit,
    pub margin_left: LayoutUnit,
    pub margin_right: LayoutUnit,
    /// `width` was `auto` (or an unresolvable percentage).
    pub auto_width: bool,
}

/// Clamp a content width by `min-width`/`max-width`, converting them to content-box space.
pub fn clamp_content_width(width: LayoutUnit, used: &UsedValues, box_sizing: BoxSizing) -> LayoutUnit {
    let frame = used.padding.horizontal() + used.border.horizontal();
    let min = content_box_size(used.min_width, box_sizing, frame);
    let max = used
        .max_width
        .map(|limit| content_box_size(limit, box_sizing, frame));
    clamp_size(width, min, max)
}

/// Horizontal margins around a box whose content width is already known.
///
/// Used for definite widths and for replaced content. The free space goes to
/// the `auto` margins; when both are `auto` the box is centered, flush left if
/// it does not fit.
pub fn place_fixed_width(available: LayoutUnit, content_width: LayoutUnit, used: &UsedValues) -> HorizontalSolution {
    let frame = used.padding.horizontal() + used.border.horizontal();
    let free = available - content_width - frame;
    let (margin_left, margin_right) = match (used.margin.left, used.margin.right) {
        (None, None) => {
            let left = (free / 2).non_negative();
            (left, free - left)
        }
        (None, Some(right)) => (free - right, right),
        (Some(left), None) => (left, free - left),
        (Some(left), Some(right)) => (left, right),
    };
    HorizontalSolution {
        content_width,
        margin_left,
        margin_right,
        auto_width: false,
    }
}

/// Solve width and horizontal margins inside `available` (the containing block's content width).
///
/// - `auto` width fills what the margins, borders and padding leave.
/// - A definite width with both margins `auto` is centered; free space below
///   zero puts the box flush left.
/// - A definite width with one `auto` margin gives that margin the free space.
/// - Otherwise the specified margins are kept and the box may overflow.
pub fn resolve_block_width(
    available: LayoutUnit,
    used: &UsedValues,
    box_sizing: BoxSizing,
) -> HorizontalSolution {
    let frame = used.padding.horizontal() + used.border.horizontal();
    let solution = match used.width.definite() {
        None => {
            let margin_left = used.margin.left.unwrap_or_default();
            let margin_right = used.margin.right.unwrap_or_default();
            let fill = (available - margin_left - margin_right - frame).non_negative();
            HorizontalSolution {
                content_width: clamp_content_width(fill, used, box_sizing),
                margin_left,
                margin_right,
                auto_width: true,
            }
        }
        Some(specified) => place_fixed_width(
            available,
            clamp_content_width(content_box_size(specified, box_sizing, frame), used, box_sizing),
            used,
        ),
    };
    trace!(
        "[WIDTH] available={available} -> content={} margins=({}, {})",
        solution.content_width, solution.margin_left, solution.margin_right
    );
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use style_engine::{
        ComputedStyle, Edges, MarginEdges, SizeSpecified, UsedValuesContext, resolve_used_values,
    };

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_px_i32(value)
    }

    fn used(style: &ComputedStyle) -> UsedValues {
        resolve_used_values(
            style,
            &UsedValuesContext {
                width_basis: Some(px(400)),
                height_basis: None,
            },
        )
    }

    /// Auto width fills the containing block minus margins, borders and padding.
    ///
    /// # Panics
    /// Panics if the filled width is wrong.
    #[test]
    fn test_auto_width_fills() {
        let style = ComputedStyle {
            margin: MarginEdges::uniform(SizeSpecified::Px(10.0)),
            padding: Edges::uniform(5.0),
            border_width: Edges::uniform(1.0),
            ..ComputedStyle::block()
        };
        let solution = resolve_block_width(px(400), &used(&style), style.box_sizing);
        assert_eq!(solution.content_width, px(368));
        assert_eq!(solution.margin_left, px(10));
        assert!(solution.auto_width);
    }

    /// Both auto margins center a fixed-width box; percentages resolve against the basis.
    ///
    /// # Panics
    /// Panics if the margins are not centered.
    #[test]
    fn test_auto_margins_center() {
        let style = ComputedStyle {
            width: SizeSpecified::Percent(0.5),
            margin: MarginEdges {
                left: SizeSpecified::Auto,
                right: SizeSpecified::Auto,
                ..MarginEdges::default()
            },
            ..ComputedStyle::block()
        };
        let solution = resolve_block_width(px(400), &used(&style), style.box_sizing);
        assert_eq!(solution.content_width, px(200));
        assert_eq!((solution.margin_left, solution.margin_right), (px(100), px(100)));

        let narrow = resolve_block_width(px(100), &used(&style), style.box_sizing);
        assert_eq!(narrow.margin_left, px(0));
    }

    /// `border-box` widths subtract the frame; min/max clamp in the same space.
    ///
    /// # Panics
    /// Panics if box-sizing conversion or clamping is wrong.
    #[test]
    fn test_border_box_and_clamps() {
        let style = ComputedStyle {
            box_sizing: BoxSizing::BorderBox,
            width: SizeSpecified::Px(100.0),
            max_width: Some(SizeSpecified::Px(80.0)),
            padding: Edges::uniform(10.0),
            ..ComputedStyle::block()
        };
        let solution = resolve_block_width(px(400), &used(&style), style.box_sizing);
        assert_eq!(solution.content_width, px(60));
        assert_eq!(solution.margin_right, px(0));

        let floor = ComputedStyle {
            min_width: Some(SizeSpecified::Px(500.0)),
            ..ComputedStyle::block()
        };
        let clamped = resolve_block_width(px(400), &used(&floor), floor.box_sizing);
        assert_eq!(clamped.content_width, px(500));
    }
}
