//! Spec: CSS 2.2 §9.4.2 Inline formatting contexts
//!
//! Inline content is flowed into line boxes stacked inside the block. Lines
//! open lazily on the first fragment, take their width from the float list,
//! and are closed on overflow, forced breaks, block-level siblings, or the end
//! of the block.

use std::mem;

use css_box::{ComputedBox, Edges, LayoutUnit, Rect};
use css_text::{is_collapsible_only, process_white_space};
use dom::{DOMNode, NodeId, TextFragment};
use log::trace;
use smallvec::SmallVec;
use style_engine::WhiteSpace;

use crate::LayoutError;
use crate::box_tree::{
    FragmentKind, InlineNode, IntrinsicWidths, LayoutBlockBox, LineBox, LineFragment,
};
use crate::chapter10::part_10_8_line_height::leading_extents;
use crate::orchestrator::LayoutPass;

/// Text of a fragment as handed to the renderer.
fn visible_text(text: &str, white_space: WhiteSpace) -> String {
    let text = text.trim_end_matches('\n');
    if white_space.collapses() {
        text.trim_end_matches(' ').to_owned()
    } else {
        text.to_owned()
    }
}

/// Enclosing inline elements of new fragments, optionally followed by `node`.
fn owners_of(block: &LayoutBlockBox<'_>, node: Option<NodeId>) -> SmallVec<[NodeId; 4]> {
    let mut owners = block.open_inlines.clone();
    owners.extend(node);
    owners
}

impl LayoutPass<'_, '_> {
    /// The open line of `block`, opening one at the resolved cursor if needed.
    pub(crate) fn ensure_line<'block>(&mut self, block: &'block mut LayoutBlockBox<'_>) -> &'block mut LineBox {
        let line = match block.line.take() {
            Some(line) => line,
            None => {
                let top = block.resolve_strut();
                let height = block.line_strut.ascent + block.line_strut.descent;
                let span = block
                    .float_list()
                    .available_span(top, height, block.content_x, block.content_right());
                let mut line = LineBox::open(
                    top,
                    span.left,
                    span.width,
                    self.arena.fragments.allocate(),
                    block.line_strut,
                );
                for marker in block.pending_markers.drain(..) {
                    line.push(marker);
                }
                line
            }
        };
        block.line.insert(line)
    }

    /// Whether the open line is empty and squeezed by floats.
    fn line_is_narrowed(block: &LayoutBlockBox<'_>) -> bool {
        block
            .line
            .as_ref()
            .is_some_and(|line| line.is_empty() && line.width < block.content_width)
    }

    /// Move an empty line down to the bottom of the nearest float beside it.
    ///
    /// Without a float to pass the line gets the block's full width, so the
    /// next placement is forced.
    fn push_line_below_floats(block: &mut LayoutBlockBox<'_>) {
        let height = block.line_strut.ascent + block.line_strut.descent;
        let Some(top) = block.line.as_ref().map(|line| line.top) else {
            return;
        };
        let (content_x, content_width) = (block.content_x, block.content_width);
        let next = block.float_list().next_float_bottom(top, height);
        let span = next.map(|lower| {
            (
                lower,
                block
                    .float_list()
                    .available_span(lower, height, content_x, content_x + content_width),
            )
        });
        if let Some(line) = block.line.as_mut() {
            match span {
                Some((lower, span)) => {
                    trace!("[LINE] moved below floats to {lower}");
                    line.relocate(lower, span.left, span.width);
                }
                None => line.narrow(content_x, content_width),
            }
        }
    }

    /// Flow a text node's run into lines.
    pub(crate) fn format_text(
        &mut self,
        block: &mut LayoutBlockBox<'_>,
        element: NodeId,
        node: &DOMNode,
    ) -> Result<(), LayoutError> {
        let Some(raw) = node.text() else {
            return Ok(());
        };
        let style = &node.style;
        let mode = style.white_space;
        if block.line.is_none() && is_collapsible_only(raw, mode) {
            trace!("[TEXT] node={element} collapsible white space skipped");
            return Ok(());
        }
        block.inline_nodes.push(InlineNode {
            node: element,
            margin: Edges::zero(),
            border: Edges::zero(),
            padding: Edges::zero(),
        });

        let processed = process_white_space(raw, mode);
        let font = style.font();
        let mut rest = processed.as_str();
        while !rest.is_empty() {
            let at_line_start = block
                .line
                .as_ref()
                .is_none_or(|line| line.is_empty() || line.ends_with_space());
            if mode.collapses()
                && at_line_start
                && let Some(stripped) = rest.strip_prefix(' ')
            {
                rest = stripped;
                continue;
            }

            self.ensure_line(block);
            let narrowed = Self::line_is_narrowed(block);
            let line = self.ensure_line(block);
            let empty = line.is_empty();
            let available = mode.wraps().then(|| line.remaining());
            let measured = self
                .engine
                .measurer()
                .measure_run(rest, font, available, empty && !narrowed)
                .map_err(|source| LayoutError::MeasurementFailure {
                    node: element,
                    source,
                })?;

            if measured.is_empty() {
                if !empty {
                    self.close_line(block)?;
                } else if narrowed {
                    Self::push_line_below_floats(block);
                } else {
                    trace!("[TEXT] node={element} {} bytes could not be placed", rest.len());
                    break;
                }
                continue;
            }

            let (piece, remainder) = rest
                .split_at_checked(measured.consumed_bytes)
                .unwrap_or((rest, ""));
            let (ascent, descent) =
                leading_extents(style.line_height, style.font_size, measured.ascent, measured.descent);
            let fragment = LineFragment {
                kind: FragmentKind::Text {
                    node: element,
                    text: piece.to_owned(),
                },
                owners: owners_of(block, Some(element)),
                offset: LayoutUnit::zero(),
                width: measured.width,
                advance: measured.advance,
                ascent,
                descent,
                glyph_ascent: measured.ascent,
                glyph_descent: measured.descent,
                min_width: measured.widest_segment,
            };
            self.ensure_line(block).push(fragment);
            if self.counting() {
                self.stats.text_runs += 1;
            }
            rest = remainder;
            if measured.mandatory_break || !rest.is_empty() {
                self.close_line(block)?;
            }
        }
        Ok(())
    }

    /// Lay out a non-atomic inline element: its edges become markers on the line around its children.
    pub(crate) fn format_inline(
        &mut self,
        block: &mut LayoutBlockBox<'_>,
        element: NodeId,
        node: &DOMNode,
    ) -> Result<(), LayoutError> {
        let style = &node.style;
        let used = self.used_values(element, style, block.content_width, block.definite_height)?;
        let margin = Edges::new(
            used.margin.top.unwrap_or_default(),
            used.margin.right.unwrap_or_default(),
            used.margin.bottom.unwrap_or_default(),
            used.margin.left.unwrap_or_default(),
        );
        let (glyph_ascent, glyph_descent) = self.font_extents(element, style)?;
        let marker = |kind: FragmentKind, owners: SmallVec<[NodeId; 4]>, advance: LayoutUnit| {
            LineFragment {
                kind,
                owners,
                offset: LayoutUnit::zero(),
                width: advance,
                advance,
                ascent: LayoutUnit::zero(),
                descent: LayoutUnit::zero(),
                glyph_ascent,
                glyph_descent,
                min_width: LayoutUnit::zero(),
            }
        };

        let lead = margin.left + used.border.left + used.padding.left;
        let start = marker(
            FragmentKind::InlineStart { node: element },
            owners_of(block, None),
            lead,
        );
        match block.line.as_mut() {
            Some(line) => line.push(start),
            None => block.pending_markers.push(start),
        }
        block.inline_nodes.push(InlineNode {
            node: element,
            margin,
            border: used.border,
            padding: used.padding,
        });

        block.open_inlines.push(element);
        let result = self.format_children(block, element);
        block.open_inlines.pop();
        result?;

        let trail = margin.right + used.border.right + used.padding.right;
        let end = marker(
            FragmentKind::InlineEnd { node: element },
            owners_of(block, None),
            trail,
        );
        match block.line.as_mut() {
            Some(line) => line.push(end),
            None => block
                .pending_markers
                .retain(|pending| pending.kind != FragmentKind::InlineStart { node: element }),
        }
        Ok(())
    }

    /// Place an inline-block or inline replaced element as one unbreakable fragment.
    pub(crate) fn format_atomic_inline(
        &mut self,
        block: &mut LayoutBlockBox<'_>,
        element: NodeId,
        node: &DOMNode,
    ) -> Result<(), LayoutError> {
        let closed = self.format_detached(element, node, block.content_width, block.definite_height)?;
        let margin_box = closed.layout_box.margin_box();
        let (width, height) = (margin_box.width, margin_box.height);

        if block
            .line
            .as_ref()
            .is_some_and(|line| !line.is_empty() && width > line.remaining())
        {
            self.close_line(block)?;
        }
        loop {
            let remaining = self.ensure_line(block).remaining();
            if !Self::line_is_narrowed(block) || width <= remaining {
                break;
            }
            Self::push_line_below_floats(block);
        }

        let fragment = LineFragment {
            kind: FragmentKind::Atomic { node: element },
            owners: owners_of(block, None),
            offset: LayoutUnit::zero(),
            width,
            advance: width,
            ascent: height,
            descent: LayoutUnit::zero(),
            glyph_ascent: height,
            glyph_descent: LayoutUnit::zero(),
            min_width: closed.contribution.minimum,
        };
        self.ensure_line(block).push(fragment);
        trace!("[ATOMIC] node={element} {width}x{height}");
        Ok(())
    }

    /// A `br` element: ends the current line, opening an empty one if needed.
    pub(crate) fn format_line_break(
        &mut self,
        block: &mut LayoutBlockBox<'_>,
        element: NodeId,
        node: &DOMNode,
    ) -> Result<(), LayoutError> {
        let style = &node.style;
        let (glyph_ascent, glyph_descent) = self.font_extents(element, style)?;
        let (ascent, descent) =
            leading_extents(style.line_height, style.font_size, glyph_ascent, glyph_descent);
        block.inline_nodes.push(InlineNode {
            node: element,
            margin: Edges::zero(),
            border: Edges::zero(),
            padding: Edges::zero(),
        });
        let fragment = LineFragment {
            kind: FragmentKind::Break { node: element },
            owners: owners_of(block, Some(element)),
            offset: LayoutUnit::zero(),
            width: LayoutUnit::zero(),
            advance: LayoutUnit::zero(),
            ascent,
            descent,
            glyph_ascent,
            glyph_descent,
            min_width: LayoutUnit::zero(),
        };
        self.ensure_line(block).push(fragment);
        self.close_line(block)
    }

    /// Close the open line of `block`, if any, and write its fragments out.
    pub(crate) fn close_line(&mut self, block: &mut LayoutBlockBox<'_>) -> Result<(), LayoutError> {
        let Some(line) = block.line.take() else {
            return Ok(());
        };
        let mut closed = line.close(block.text_align);
        let mut fragments = mem::take(&mut closed.fragments);
        let document = self.document;
        let baseline = closed.baseline;
        let mut minimum = LayoutUnit::zero();

        for fragment in fragments.drain(..) {
            let x = closed.fragment_x(&fragment);
            minimum = minimum.max(fragment.min_width);
            let glyph_top = baseline - fragment.glyph_ascent;
            let glyph_height = fragment.glyph_ascent + fragment.glyph_descent;
            let rect = match &fragment.kind {
                FragmentKind::Text { node, text } => {
                    let rect = Rect::new(x, glyph_top, fragment.width, glyph_height);
                    let white_space = document
                        .node(*node)
                        .map_or(WhiteSpace::Normal, |text_node| text_node.style.white_space);
                    self.geometry.push_fragment(
                        *node,
                        TextFragment {
                            rect,
                            baseline,
                            text: visible_text(text, white_space),
                        },
                    );
                    rect
                }
                FragmentKind::Atomic { node } => {
                    let top = baseline - fragment.ascent;
                    self.geometry.translate_subtree(document, *node, x, top);
                    Rect::new(x, top, fragment.width, fragment.ascent)
                }
                FragmentKind::InlineStart { node } => {
                    let inner = Rect::new(x + fragment.advance, glyph_top, LayoutUnit::zero(), glyph_height);
                    self.geometry.extend_extent(*node, inner);
                    Rect::new(x, glyph_top, fragment.advance, glyph_height)
                }
                FragmentKind::InlineEnd { node } => {
                    let inner = Rect::new(x, glyph_top, LayoutUnit::zero(), glyph_height);
                    self.geometry.extend_extent(*node, inner);
                    Rect::new(x, glyph_top, fragment.advance, glyph_height)
                }
                FragmentKind::Break { .. } => Rect::new(x, glyph_top, LayoutUnit::zero(), glyph_height),
            };
            for owner in &fragment.owners {
                self.geometry.extend_extent(*owner, rect);
            }
        }
        self.arena.fragments.deallocate(fragments);

        block.intrinsic.include(IntrinsicWidths {
            preferred: (closed.left - block.content_x) + closed.content_width,
            minimum,
        });
        let bottom = closed.bottom();
        block.cursor = block.cursor.max(bottom);
        if self.counting() {
            self.stats.line_boxes += 1;
        }
        trace!(
            "[LINE] top={} height={} width={} in block {}",
            closed.top,
            closed.height,
            closed.content_width,
            block.node()
        );
        self.place_deferred_floats(block, bottom);
        Ok(())
    }

    /// Turn the recorded extents of inline elements and text nodes into boxes.
    pub(crate) fn finalize_inline_nodes(&mut self, block: &mut LayoutBlockBox<'_>) {
        for inline in block.inline_nodes.drain(..) {
            if let Some(extent) = self.geometry.take_extent(inline.node) {
                self.geometry.set_box(
                    inline.node,
                    ComputedBox::new(extent, inline.padding, inline.border, inline.margin),
                );
            }
        }
    }
}
