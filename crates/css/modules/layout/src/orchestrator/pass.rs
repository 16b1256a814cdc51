//! One layout pass over a document.
//!
//! A [`LayoutPass`] owns everything transient: the arena, the geometry side
//! table and the counters. Formatters for the individual chapters are
//! `impl LayoutPass` blocks in their own modules; this file holds the
//! dispatcher and the helpers they share.

use css_box::LayoutUnit;
use dom::{DOMNode, Document, NodeId, SpecialContent};
use log::{debug, trace};
use smallvec::SmallVec;
use style_engine::{ComputedStyle, UsedValues, UsedValuesContext, resolve_used_values};

use super::output::{LayoutOutput, PassGeometry};
use super::{ContainingBlock, LayoutEngine};
use crate::arena::LayoutArena;
use crate::box_tree::{FloatScope, FloatedBoxList, LayoutBlockBox, LineStrut};
use crate::chapter9::part_9_2_box_generation::{FormattingKind, SpecialPlacement, classify};
use crate::chapter10::part_10_3_2_replaced_elements::resolve_replaced_size;
use crate::chapter10::part_10_8_line_height::leading_extents;
use crate::special::intrinsic_size_for;
use crate::{LayoutError, LayoutStats};

/// State of one layout pass.
///
/// Obtained from [`LayoutEngine::begin_pass`]. The usual sequence is
/// [`open_root`](Self::open_root), [`format_element`](Self::format_element)
/// for each element to place, [`close_root`](Self::close_root), then
/// [`finish`](Self::finish) and [`LayoutOutput::commit`].
#[derive(Debug)]
pub struct LayoutPass<'engine, 'doc> {
    pub(crate) engine: &'engine LayoutEngine,
    pub(crate) document: &'doc Document,
    pub(crate) geometry: PassGeometry,
    pub(crate) arena: LayoutArena,
    pub(crate) stats: LayoutStats,
    depth: usize,
    /// Nesting of max-content probes. Percentages stay unresolved while non-zero.
    pub(crate) measuring: usize,
}

impl<'engine, 'doc> LayoutPass<'engine, 'doc> {
    pub(crate) fn new(engine: &'engine LayoutEngine, document: &'doc Document) -> Self {
        Self {
            engine,
            document,
            geometry: PassGeometry::default(),
            arena: LayoutArena::new(engine.config().arena_chunk_capacity),
            stats: LayoutStats::default(),
            depth: 0,
            measuring: 0,
        }
    }

    /// Whether work done now is kept. Max-content probes are thrown away and not counted.
    pub(crate) const fn counting(&self) -> bool {
        self.measuring == 0
    }

    /// Open the block formatting context of a containing block at the origin.
    ///
    /// `element` is only used to attribute errors; the container itself gets no box.
    pub fn open_root(
        &mut self,
        element: NodeId,
        containing_block: ContainingBlock,
    ) -> LayoutBlockBox<'static> {
        LayoutBlockBox::container(
            element,
            (LayoutUnit::zero(), LayoutUnit::zero()),
            containing_block.width,
            containing_block.height,
            FloatedBoxList::new(self.arena.floats.allocate()),
        )
    }

    /// Lay out `element` and its subtree inside an already open block context.
    ///
    /// # Errors
    /// See [`LayoutError`]. On error the pass should be dropped; nothing has
    /// been written to the document.
    pub fn format_element(
        &mut self,
        block_box: &mut LayoutBlockBox<'_>,
        element: NodeId,
    ) -> Result<(), LayoutError> {
        self.format_node(block_box, element, false)
    }

    /// Lay out `element` as the root of a new block formatting context.
    pub(crate) fn format_root_element(
        &mut self,
        block_box: &mut LayoutBlockBox<'_>,
        element: NodeId,
    ) -> Result<(), LayoutError> {
        self.format_node(block_box, element, true)
    }

    fn format_node(
        &mut self,
        block_box: &mut LayoutBlockBox<'_>,
        element: NodeId,
        is_root: bool,
    ) -> Result<(), LayoutError> {
        let node = self.node(element)?;
        let max_depth = self.engine.config().max_tree_depth;
        if self.depth >= max_depth {
            return Err(LayoutError::structural(
                element,
                format!("element nesting exceeds {max_depth} levels"),
            ));
        }
        self.depth += 1;
        let result = self.dispatch(block_box, element, node, is_root);
        self.depth -= 1;
        result
    }

    fn dispatch(
        &mut self,
        block_box: &mut LayoutBlockBox<'_>,
        element: NodeId,
        node: &'doc DOMNode,
        is_root: bool,
    ) -> Result<(), LayoutError> {
        if is_root && node.special.is_some() && element == self.document.root() {
            return Err(LayoutError::structural(
                element,
                "document root declares special content",
            ));
        }
        let kind = classify(node, is_root);
        if self.counting() {
            self.stats.elements_formatted += 1;
        }
        trace!("[DISPATCH] node={element} kind={kind:?} depth={}", self.depth);
        match kind {
            FormattingKind::Hidden => Ok(()),
            FormattingKind::Text => self.format_text(block_box, element, node),
            FormattingKind::LineBreak => self.format_line_break(block_box, element, node),
            FormattingKind::Special(SpecialPlacement::Float) | FormattingKind::Float => {
                self.format_float(block_box, element, node)
            }
            FormattingKind::Special(SpecialPlacement::Block) | FormattingKind::Block => {
                self.format_block(block_box, element, node, is_root)
            }
            FormattingKind::Special(SpecialPlacement::Inline) | FormattingKind::InlineBlock => {
                self.format_atomic_inline(block_box, element, node)
            }
            FormattingKind::Inline => self.format_inline(block_box, element, node),
        }
    }

    /// Close a container opened with [`open_root`](Self::open_root).
    ///
    /// Returns the height of its content, floats included.
    ///
    /// # Errors
    /// Propagates failures from placing the last line.
    pub fn close_root(&mut self, mut block_box: LayoutBlockBox<'_>) -> Result<LayoutUnit, LayoutError> {
        self.close_line(&mut block_box)?;
        self.finalize_inline_nodes(&mut block_box);
        let top = block_box.content_top.unwrap_or_default();
        let floats_bottom = block_box.float_list().last_float_bottom().unwrap_or(top);
        let bottom = block_box.hypothetical_top().max(floats_bottom);
        self.release_floats(block_box.floats);
        Ok((bottom - top).non_negative())
    }

    /// End the pass, handing over the recorded geometry.
    pub fn finish(mut self) -> LayoutOutput {
        self.stats.arena_chunks_allocated = self.arena.chunks_allocated();
        self.stats.arena_chunks_reused = self.arena.chunks_reused();
        debug!("[PASS] finished: {:?}", self.stats);
        LayoutOutput {
            geometry: self.geometry,
            stats: self.stats,
        }
    }

    pub const fn stats(&self) -> &LayoutStats {
        &self.stats
    }

    pub(crate) fn node(&self, element: NodeId) -> Result<&'doc DOMNode, LayoutError> {
        self.document
            .node(element)
            .ok_or_else(|| LayoutError::structural(element, "not part of the document"))
    }

    /// Children of `element` in document order.
    pub(crate) fn children(&self, element: NodeId) -> SmallVec<[NodeId; 8]> {
        self.document.children(element).collect()
    }

    /// Lay out every child of `element` into `block_box`.
    pub(crate) fn format_children(
        &mut self,
        block_box: &mut LayoutBlockBox<'_>,
        element: NodeId,
    ) -> Result<(), LayoutError> {
        for child in self.children(element) {
            self.format_element(block_box, child)?;
        }
        Ok(())
    }

    /// Used values of `style` against a containing block of `width` by `height`.
    ///
    /// Percentages without a basis become `auto`; with strict dimensions they
    /// are reported instead, except while measuring max-content sizes.
    pub(crate) fn used_values(
        &self,
        element: NodeId,
        style: &ComputedStyle,
        width: LayoutUnit,
        height: Option<LayoutUnit>,
    ) -> Result<UsedValues, LayoutError> {
        let measuring = self.measuring > 0;
        let context = UsedValuesContext {
            width_basis: (!measuring).then_some(width),
            height_basis: height.filter(|_| !measuring),
        };
        let used = resolve_used_values(style, &context);
        if let Some(property) = used.unresolved.first().copied() {
            if self.engine.config().strict_dimensions && !measuring {
                return Err(LayoutError::UnresolvedDimension {
                    node: element,
                    property,
                });
            }
            debug!(
                "[UNRESOLVED] node={element} {:?} against an indefinite size -> auto",
                used.unresolved
            );
        }
        Ok(used)
    }

    /// Ascent and descent of the font of `style`.
    pub(crate) fn font_extents(
        &self,
        element: NodeId,
        style: &ComputedStyle,
    ) -> Result<(LayoutUnit, LayoutUnit), LayoutError> {
        let metrics = self
            .engine
            .measurer()
            .measure("", style.font())
            .map_err(|source| LayoutError::MeasurementFailure {
                node: element,
                source,
            })?;
        Ok((
            LayoutUnit::from_px(metrics.ascent),
            LayoutUnit::from_px(metrics.descent),
        ))
    }

    /// Line strut and alignment of a block's lines, from the block's own style.
    pub(crate) fn prepare_lines(
        &self,
        block_box: &mut LayoutBlockBox<'_>,
        element: NodeId,
        style: &ComputedStyle,
    ) -> Result<(), LayoutError> {
        let (ascent, descent) = self.font_extents(element, style)?;
        let (ascent, descent) = leading_extents(style.line_height, style.font_size, ascent, descent);
        block_box.line_strut = LineStrut { ascent, descent };
        block_box.text_align = style.text_align;
        Ok(())
    }

    /// Content-box size of special content under `style`.
    pub(crate) fn replaced_size(
        &self,
        element: NodeId,
        special: &SpecialContent,
        style: &ComputedStyle,
        used: &UsedValues,
    ) -> Result<(LayoutUnit, LayoutUnit), LayoutError> {
        let engine = self.engine;
        let intrinsic = intrinsic_size_for(special, style, engine.measurer(), engine.resources())
            .map_err(|source| LayoutError::MeasurementFailure {
                node: element,
                source,
            })?;
        Ok(resolve_replaced_size(
            &intrinsic,
            used,
            style.box_sizing,
            style.preserve_aspect_ratio,
            engine.config().default_replaced_size,
        ))
    }

    /// A fresh float list for a block that establishes a formatting context.
    pub(crate) fn owned_floats(&mut self) -> FloatScope<'static> {
        FloatScope::Owned(FloatedBoxList::new(self.arena.floats.allocate()))
    }

    /// Give an owned float list back to the arena.
    pub(crate) fn release_floats(&mut self, floats: FloatScope<'_>) {
        if let FloatScope::Owned(list) = floats {
            self.arena.floats.deallocate(list.into_buffer());
        }
    }
}
