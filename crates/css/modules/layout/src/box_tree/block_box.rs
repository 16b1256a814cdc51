//! Open block boxes.
//!
//! A [`LayoutBlockBox`] exists while its element's children are being
//! formatted. It tracks the vertical cursor, the margins that have not
//! collapsed yet, the line being filled, and the float list of the block
//! formatting context it belongs to. Blocks that establish a formatting
//! context own their float list; every other block borrows its parent's.

use css_box::{ComputedBox, Edges, LayoutUnit};
use dom::NodeId;
use smallvec::SmallVec;
use style_engine::TextAlign;

use super::float_list::{FloatSide, FloatedBoxList};
use super::line_box::{LineBox, LineFragment, LineStrut};
use super::margin_strut::MarginStrut;

/// The float list a block places into.
#[derive(Debug)]
pub enum FloatScope<'floats> {
    Owned(FloatedBoxList),
    Borrowed(&'floats mut FloatedBoxList),
}

impl FloatScope<'_> {
    pub fn get(&self) -> &FloatedBoxList {
        match self {
            Self::Owned(list) => list,
            Self::Borrowed(list) => list,
        }
    }

    pub fn get_mut(&mut self) -> &mut FloatedBoxList {
        match self {
            Self::Owned(list) => list,
            Self::Borrowed(list) => list,
        }
    }
}

/// How the content height is found on close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightRule {
    /// From the content, clamped to min/max (content-box values).
    Auto {
        min: LayoutUnit,
        max: Option<LayoutUnit>,
    },
    /// Already resolved, clamps applied.
    Fixed(LayoutUnit),
}

/// Used edges and height rule of the element a block box belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSizing {
    /// Margins with `auto` resolved.
    pub margin: Edges,
    pub border: Edges,
    pub padding: Edges,
    pub height: HeightRule,
    /// The width came from `auto` rather than the element's own `width`.
    pub auto_width: bool,
    /// Horizontal margins as specified, `auto` counted as zero.
    pub inline_margins: LayoutUnit,
}

impl BlockSizing {
    /// Border plus padding on each side.
    pub fn frame(&self) -> Edges {
        self.border.plus(&self.padding)
    }

    /// Margin, border and padding on each side.
    pub fn outer_frame(&self) -> Edges {
        self.margin.plus(&self.frame())
    }
}

/// Preferred (max-content) and minimum (min-content) widths of content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntrinsicWidths {
    pub preferred: LayoutUnit,
    pub minimum: LayoutUnit,
}

impl IntrinsicWidths {
    pub fn include(&mut self, other: Self) {
        self.preferred = self.preferred.max(other.preferred);
        self.minimum = self.minimum.max(other.minimum);
    }

    /// Add `extra` to both widths.
    pub fn widen(self, extra: LayoutUnit) -> Self {
        Self {
            preferred: (self.preferred + extra).non_negative(),
            minimum: (self.minimum + extra).non_negative(),
        }
    }
}

/// A float that met a non-empty line it did not fit on; placed once the line closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredFloat {
    pub node: NodeId,
    pub side: FloatSide,
    /// Margin box size.
    pub width: LayoutUnit,
    pub height: LayoutUnit,
    /// Lowest offset allowed by clearance.
    pub min_top: LayoutUnit,
}

/// An inline element or text node whose box is built from line extents on close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineNode {
    pub node: NodeId,
    pub margin: Edges,
    pub border: Edges,
    pub padding: Edges,
}

/// Result of closing a block box, applied to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockClose {
    pub layout_box: ComputedBox,
    /// Margins still open below the box.
    pub trailing: MarginStrut,
    /// Top and bottom margins collapsed through the box.
    pub self_collapsing: bool,
    /// Contribution to the parent's intrinsic widths, margins included.
    pub contribution: IntrinsicWidths,
}

/// A block box whose children are being formatted.
#[derive(Debug)]
pub struct LayoutBlockBox<'floats> {
    /// The element; for a containing-block container, the element it was opened for.
    pub(crate) node: NodeId,
    /// `None` for a containing-block container, which has no box of its own.
    pub(crate) sizing: Option<BlockSizing>,
    pub(crate) content_x: LayoutUnit,
    pub(crate) content_width: LayoutUnit,
    /// Absolute y of the content top, `None` while it still collapses with the margins above.
    pub(crate) content_top: Option<LayoutUnit>,
    /// Percentage basis for children's heights.
    pub(crate) definite_height: Option<LayoutUnit>,
    pub(crate) cursor: LayoutUnit,
    pub(crate) strut: MarginStrut,
    pub(crate) establishes_bfc: bool,
    pub(crate) floats: FloatScope<'floats>,
    pub(crate) line: Option<LineBox>,
    pub(crate) line_strut: LineStrut,
    pub(crate) text_align: TextAlign,
    pub(crate) deferred_floats: Vec<DeferredFloat>,
    /// Inline elements currently open, outermost first.
    pub(crate) open_inlines: SmallVec<[NodeId; 4]>,
    /// Inline start edges seen while no line was open; they lead the next line.
    pub(crate) pending_markers: Vec<LineFragment>,
    pub(crate) inline_nodes: Vec<InlineNode>,
    pub(crate) intrinsic: IntrinsicWidths,
}

impl<'floats> LayoutBlockBox<'floats> {
    /// A box with no element geometry of its own: content at `(x, y)` spanning `width`.
    pub fn container(
        node: NodeId,
        origin: (LayoutUnit, LayoutUnit),
        width: LayoutUnit,
        height: Option<LayoutUnit>,
        floats: FloatedBoxList,
    ) -> Self {
        let (x, y) = origin;
        Self {
            node,
            sizing: None,
            content_x: x,
            content_width: width,
            content_top: Some(y),
            definite_height: height,
            cursor: y,
            strut: MarginStrut::new(),
            establishes_bfc: true,
            floats: FloatScope::Owned(floats),
            line: None,
            line_strut: LineStrut::default(),
            text_align: TextAlign::Left,
            deferred_floats: Vec::new(),
            open_inlines: SmallVec::new(),
            pending_markers: Vec::new(),
            inline_nodes: Vec::new(),
            intrinsic: IntrinsicWidths::default(),
        }
    }

    /// An element's block box.
    ///
    /// `content_top` is `None` when the box's top margin collapses with
    /// `strut`; `cursor` is then the position the strut is measured from.
    #[expect(clippy::too_many_arguments, reason = "plain constructor")]
    pub fn element(
        node: NodeId,
        sizing: BlockSizing,
        content_x: LayoutUnit,
        content_width: LayoutUnit,
        content_top: Option<LayoutUnit>,
        cursor: LayoutUnit,
        strut: MarginStrut,
        establishes_bfc: bool,
        floats: FloatScope<'floats>,
    ) -> Self {
        let definite_height = match sizing.height {
            HeightRule::Fixed(height) => Some(height),
            HeightRule::Auto { .. } => None,
        };
        Self {
            node,
            sizing: Some(sizing),
            content_x,
            content_width,
            content_top,
            definite_height,
            cursor,
            strut,
            establishes_bfc,
            floats,
            line: None,
            line_strut: LineStrut::default(),
            text_align: TextAlign::Left,
            deferred_floats: Vec::new(),
            open_inlines: SmallVec::new(),
            pending_markers: Vec::new(),
            inline_nodes: Vec::new(),
            intrinsic: IntrinsicWidths::default(),
        }
    }

    pub const fn node(&self) -> NodeId {
        self.node
    }

    pub fn content_right(&self) -> LayoutUnit {
        self.content_x + self.content_width
    }

    /// Where the next in-flow content would start if the open margins collapsed now.
    pub fn hypothetical_top(&self) -> LayoutUnit {
        self.cursor + self.strut.collapse()
    }

    /// Collapse the open margins into the cursor. Fixes the content top if it was pending.
    ///
    /// Negative collapsed margins move the cursor up; that is the one case
    /// where it decreases.
    pub fn resolve_strut(&mut self) -> LayoutUnit {
        self.cursor += self.strut.collapse();
        self.strut = MarginStrut::new();
        self.content_top.get_or_insert(self.cursor);
        self.cursor
    }

    pub fn float_list(&self) -> &FloatedBoxList {
        self.floats.get()
    }

    pub fn float_list_mut(&mut self) -> &mut FloatedBoxList {
        self.floats.get_mut()
    }

    /// Take over the state left behind by a closed in-flow child.
    pub fn apply_child(&mut self, closed: &BlockClose) {
        self.intrinsic.include(closed.contribution);
        self.strut = closed.trailing;
        if !closed.self_collapsing {
            let border_box = closed.layout_box.border_box();
            self.content_top.get_or_insert(border_box.y);
            self.cursor = border_box.bottom();
        }
    }
}
