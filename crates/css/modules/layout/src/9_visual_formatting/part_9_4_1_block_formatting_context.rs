//! Spec: CSS 2.2 §9.4.1 Block formatting contexts
//!
//! Block-level boxes are laid out one after another, vertically, starting at
//! the top of the containing block. The vertical distance between siblings is
//! determined by their margins, which collapse as described in §8.3.1.

use css_box::{ComputedBox, Edges, LayoutUnit, Rect};
use dom::{DOMNode, NodeId};
use log::debug;
use style_engine::{Display, Overflow, UsedValues};

use crate::LayoutError;
use crate::box_tree::{
    BlockClose, BlockSizing, FloatScope, HeightRule, IntrinsicWidths, LayoutBlockBox, MarginStrut,
};
use crate::chapter8::part_8_3_1_collapsing_margins::{
    bottom_margin_collapses_through, top_margin_collapses_through,
};
use crate::chapter10::content_box_size;
use crate::chapter10::part_10_3_3_block_widths::{
    HorizontalSolution, clamp_content_width, place_fixed_width, resolve_block_width,
};
use crate::chapter10::part_10_3_5_shrink_to_fit::shrink_to_fit_width;
use crate::chapter10::part_10_6_3_height_of_blocks::{height_rule, used_content_height};
use crate::orchestrator::LayoutPass;

/// Spec: §9.4.1. Floats, inline-blocks, elements with `overflow` other than
/// `visible`, and the root establish new block formatting contexts.
///
/// Replaced (special) content is treated the same way: nothing inside it
/// takes part in the surrounding context.
pub fn establishes_block_formatting_context(node: &DOMNode, is_root: bool) -> bool {
    is_root
        || node.special.is_some()
        || node.style.overflow != Overflow::Visible
        || node.style.is_floated()
        || node.style.display == Display::InlineBlock
}

/// Edges and height rule from used values, with vertical `auto` margins as zero.
fn block_sizing(used: &UsedValues, horizontal: HorizontalSolution, height: HeightRule) -> BlockSizing {
    BlockSizing {
        margin: Edges::new(
            used.margin.top.unwrap_or_default(),
            horizontal.margin_right,
            used.margin.bottom.unwrap_or_default(),
            horizontal.margin_left,
        ),
        border: used.border,
        padding: used.padding,
        height,
        auto_width: horizontal.auto_width,
        inline_margins: used.margin.left.unwrap_or_default() + used.margin.right.unwrap_or_default(),
    }
}

impl LayoutPass<'_, '_> {
    /// Lay out a block-level element in normal flow inside `parent`.
    pub(crate) fn format_block(
        &mut self,
        parent: &mut LayoutBlockBox<'_>,
        element: NodeId,
        node: &DOMNode,
        is_root: bool,
    ) -> Result<(), LayoutError> {
        self.close_line(parent)?;
        let style = &node.style;
        let used = self.used_values(element, style, parent.content_width, parent.definite_height)?;
        let establishes_bfc = establishes_block_formatting_context(node, is_root);
        let (horizontal, height) = self.solve_block_size(element, node, parent.content_width, &used)?;
        let sizing = block_sizing(&used, horizontal, height);
        let frame = sizing.frame();
        let margin_top = sizing.margin.top;
        let content_x = parent.content_x + horizontal.margin_left + frame.left;

        let mut incoming = parent.strut;
        incoming.append(margin_top);
        let clearance = parent
            .float_list()
            .clearance_offset(style.clear)
            .filter(|floor| *floor > parent.cursor + incoming.collapse());

        let (content_top, cursor, strut) = match clearance {
            None if top_margin_collapses_through(&sizing, establishes_bfc) => {
                (None, parent.cursor, incoming)
            }
            None => {
                parent.strut = incoming;
                let border_top = parent.resolve_strut();
                let top = border_top + frame.top;
                (Some(top), top, MarginStrut::new())
            }
            Some(floor) => {
                parent.resolve_strut();
                let border_top = floor.max(parent.cursor + margin_top);
                debug!("[CLEAR] node={element} cleared to {border_top}");
                let top = border_top + frame.top;
                (Some(top), top, MarginStrut::new())
            }
        };

        let closed = {
            let floats = if establishes_bfc {
                self.owned_floats()
            } else {
                FloatScope::Borrowed(parent.float_list_mut())
            };
            let mut block = LayoutBlockBox::element(
                element,
                sizing,
                content_x,
                horizontal.content_width,
                content_top,
                cursor,
                strut,
                establishes_bfc,
                floats,
            );
            self.prepare_lines(&mut block, element, style)?;
            if node.special.is_none() {
                self.format_children(&mut block, element)?;
            }
            self.close_block(block)?
        };
        parent.apply_child(&closed);
        Ok(())
    }

    /// Width and height rule of an in-flow block.
    fn solve_block_size(
        &mut self,
        element: NodeId,
        node: &DOMNode,
        available: LayoutUnit,
        used: &UsedValues,
    ) -> Result<(HorizontalSolution, HeightRule), LayoutError> {
        let style = &node.style;
        if let Some(special) = &node.special {
            let (width, height) = self.replaced_size(element, special, style, used)?;
            return Ok((place_fixed_width(available, width, used), HeightRule::Fixed(height)));
        }
        let mut horizontal = resolve_block_width(available, used, style.box_sizing);
        if style.shrink_to_fit && horizontal.auto_width {
            let fill = (available
                - horizontal.margin_left
                - horizontal.margin_right
                - used.padding.horizontal()
                - used.border.horizontal())
            .non_negative();
            let widths = self.measure_intrinsic_widths(element, node)?;
            let width = clamp_content_width(shrink_to_fit_width(fill, widths), used, style.box_sizing);
            horizontal = HorizontalSolution {
                auto_width: true,
                ..place_fixed_width(available, width, used)
            };
        }
        Ok((horizontal, height_rule(used, style.box_sizing)))
    }

    /// Finish a block: fix its height, record its box and report what the parent needs.
    pub(crate) fn close_block(&mut self, mut block: LayoutBlockBox<'_>) -> Result<BlockClose, LayoutError> {
        self.close_line(&mut block)?;
        self.finalize_inline_nodes(&mut block);
        let element = block.node;
        let Some(sizing) = block.sizing else {
            return Err(LayoutError::structural(element, "containing block closed as an element"));
        };
        let zero = LayoutUnit::zero();
        let collapses_bottom = bottom_margin_collapses_through(&sizing, block.establishes_bfc);
        let self_collapsing = block.content_top.is_none()
            && collapses_bottom
            && used_content_height(sizing.height, zero) == zero;

        let (top, height, mut trailing) = if self_collapsing {
            (block.hypothetical_top(), zero, block.strut)
        } else {
            let top = match block.content_top {
                Some(top) => top,
                None => block.resolve_strut(),
            };
            let mut end = block.cursor;
            let mut trailing = MarginStrut::new();
            if collapses_bottom {
                trailing = block.strut;
            } else {
                end += block.strut.collapse();
            }
            if block.establishes_bfc
                && let Some(floats_bottom) = block.float_list().last_float_bottom()
            {
                end = end.max(floats_bottom);
            }
            let auto_height = (end - top).non_negative();
            let height = used_content_height(sizing.height, auto_height);
            if height != auto_height {
                trailing = MarginStrut::new();
            }
            (top, height, trailing)
        };
        trailing.append(sizing.margin.bottom);

        let content = Rect::new(block.content_x, top, block.content_width, height);
        let layout_box = ComputedBox::new(content, sizing.padding, sizing.border, sizing.margin);
        self.geometry.set_box(element, layout_box);

        let own = if sizing.auto_width {
            block.intrinsic
        } else {
            IntrinsicWidths {
                preferred: block.content_width,
                minimum: block.content_width,
            }
        };
        let contribution = own.widen(sizing.frame().horizontal() + sizing.inline_margins);
        self.release_floats(block.floats);
        debug!(
            "[BLOCK] node={element} content=({}, {}) {}x{} self_collapsing={self_collapsing}",
            content.x, content.y, content.width, content.height
        );
        Ok(BlockClose {
            layout_box,
            trailing,
            self_collapsing,
            contribution,
        })
    }

    /// Lay out a float, inline-block or inline replaced element with its margin box at the origin.
    ///
    /// The caller moves the subtree into place once the position is known.
    /// `available` is the containing block's content width.
    pub(crate) fn format_detached(
        &mut self,
        element: NodeId,
        node: &DOMNode,
        available: LayoutUnit,
        height_basis: Option<LayoutUnit>,
    ) -> Result<BlockClose, LayoutError> {
        let style = &node.style;
        let used = self.used_values(element, style, available, height_basis)?;
        let margin = Edges::new(
            used.margin.top.unwrap_or_default(),
            used.margin.right.unwrap_or_default(),
            used.margin.bottom.unwrap_or_default(),
            used.margin.left.unwrap_or_default(),
        );
        let frame = used.border.plus(&used.padding);

        let (content_width, height, auto_width) = if let Some(special) = &node.special {
            let (width, height) = self.replaced_size(element, special, style, &used)?;
            (width, HeightRule::Fixed(height), false)
        } else if let Some(width) = used.width.definite() {
            let width = content_box_size(width, style.box_sizing, frame.horizontal());
            (
                clamp_content_width(width, &used, style.box_sizing),
                height_rule(&used, style.box_sizing),
                false,
            )
        } else {
            let fill = (available - margin.horizontal() - frame.horizontal()).non_negative();
            let widths = self.measure_intrinsic_widths(element, node)?;
            (
                clamp_content_width(shrink_to_fit_width(fill, widths), &used, style.box_sizing),
                height_rule(&used, style.box_sizing),
                true,
            )
        };

        let sizing = BlockSizing {
            margin,
            border: used.border,
            padding: used.padding,
            height,
            auto_width,
            inline_margins: margin.horizontal(),
        };
        let content_top = margin.top + frame.top;
        let floats = self.owned_floats();
        let mut block = LayoutBlockBox::element(
            element,
            sizing,
            margin.left + frame.left,
            content_width,
            Some(content_top),
            content_top,
            MarginStrut::new(),
            true,
            floats,
        );
        self.prepare_lines(&mut block, element, style)?;
        if node.special.is_none() {
            self.format_children(&mut block, element)?;
        }
        self.close_block(block)
    }
}
