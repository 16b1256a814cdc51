//! Spec: CSS 2.2 §9.5 Floats (placement rules of §9.5.1, clearance of §9.5.2)
//!
//! A float is laid out on its own first, with its margin box at the origin,
//! then moved to the position the float list finds for it. Line boxes beside
//! it shorten; block boxes do not.

use std::mem;

use css_box::{LayoutUnit, Rect};
use dom::{DOMNode, NodeId};
use log::debug;
use style_engine::Float;

use crate::LayoutError;
use crate::box_tree::{DeferredFloat, FloatEntry, FloatSide, IntrinsicWidths, LayoutBlockBox};
use crate::orchestrator::LayoutPass;

/// Side a floated style places on. Non-floated special content placed as a float goes left.
pub const fn float_side(float: Float) -> FloatSide {
    match float {
        Float::Right => FloatSide::Right,
        Float::Left | Float::None => FloatSide::Left,
    }
}

impl LayoutPass<'_, '_> {
    /// Lay out a floated element and place it in the float list of `block`'s context.
    pub(crate) fn format_float(
        &mut self,
        block: &mut LayoutBlockBox<'_>,
        element: NodeId,
        node: &DOMNode,
    ) -> Result<(), LayoutError> {
        let closed = self.format_detached(element, node, block.content_width, block.definite_height)?;
        let side = float_side(node.style.float);
        let margin_box = closed.layout_box.margin_box();
        let (width, height) = (margin_box.width, margin_box.height);
        let floor = block.float_list().clearance_offset(node.style.clear);
        block.intrinsic.include(closed.contribution);
        let (left_limit, right_limit) = (block.content_x, block.content_right());
        let strut_height = block.line_strut.ascent + block.line_strut.descent;

        if let Some(line) = block.line.as_ref()
            && !line.is_empty()
        {
            let line_top = line.top;
            let used = line.content_width();
            let min_top = floor.map_or(line_top, |cleared| cleared.max(line_top));
            let (x, y) = block
                .float_list()
                .place(side, width, height, min_top, left_limit, right_limit);
            let beside = block
                .float_list()
                .available_span(line_top, strut_height, left_limit, right_limit);
            if y == line_top && beside.width - width >= used {
                self.commit_float(block, element, side, (width, height), (x, y));
                Self::narrow_open_line(block);
            } else {
                debug!("[FLOAT] node={element} deferred below the current line");
                block.deferred_floats.push(DeferredFloat {
                    node: element,
                    side,
                    width,
                    height,
                    min_top: floor.unwrap_or_default(),
                });
            }
            return Ok(());
        }

        let base = block
            .line
            .as_ref()
            .map_or_else(|| block.hypothetical_top(), |line| line.top);
        let min_top = floor.map_or(base, |cleared| cleared.max(base));
        let (x, y) = block
            .float_list()
            .place(side, width, height, min_top, left_limit, right_limit);
        self.commit_float(block, element, side, (width, height), (x, y));
        Self::narrow_open_line(block);
        Ok(())
    }

    /// Move a float laid out at the origin to `position` and record it.
    ///
    /// The block's preferred width grows to reach the float's outer edge, so
    /// floats placed side by side while measuring stay side by side.
    fn commit_float(
        &mut self,
        block: &mut LayoutBlockBox<'_>,
        element: NodeId,
        side: FloatSide,
        size: (LayoutUnit, LayoutUnit),
        position: (LayoutUnit, LayoutUnit),
    ) {
        let (width, height) = size;
        let (x, y) = position;
        self.geometry.translate_subtree(self.document, element, x, y);
        let reach = match side {
            FloatSide::Left => x + width - block.content_x,
            FloatSide::Right => block.content_right() - x,
        };
        block.intrinsic.include(IntrinsicWidths {
            preferred: reach,
            minimum: LayoutUnit::zero(),
        });
        block.float_list_mut().push(FloatEntry {
            node: element,
            margin_box: Rect::new(x, y, width, height),
            side,
        });
        if self.counting() {
            self.stats.floats_placed += 1;
        }
        debug!("[FLOAT] node={element} {side:?} at ({x}, {y}) {width}x{height}");
    }

    /// Refit the open line to the span the float list leaves at its top.
    fn narrow_open_line(block: &mut LayoutBlockBox<'_>) {
        let Some(top) = block.line.as_ref().map(|line| line.top) else {
            return;
        };
        let height = block.line_strut.ascent + block.line_strut.descent;
        let span = block
            .float_list()
            .available_span(top, height, block.content_x, block.content_right());
        if let Some(line) = block.line.as_mut() {
            line.narrow(span.left, span.width);
        }
    }

    /// Place floats that waited for a line to close, no higher than `min_top`.
    pub(crate) fn place_deferred_floats(&mut self, block: &mut LayoutBlockBox<'_>, min_top: LayoutUnit) {
        let deferred = mem::take(&mut block.deferred_floats);
        for float in deferred {
            let (x, y) = block.float_list().place(
                float.side,
                float.width,
                float.height,
                float.min_top.max(min_top),
                block.content_x,
                block.content_right(),
            );
            self.commit_float(block, float.node, float.side, (float.width, float.height), (x, y));
        }
    }
}
