//! Line boxes of an inline formatting context.
//!
//! A line collects fragments left to right at offsets relative to its left
//! edge. Vertical placement waits until the line closes: only then are the
//! line's ascent and descent known, and with them the baseline every fragment
//! aligns to.

use css_box::LayoutUnit;
use dom::NodeId;
use smallvec::SmallVec;
use style_engine::TextAlign;

/// What a line fragment stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    /// Part of a text node's run.
    Text { node: NodeId, text: String },
    /// An inline-block or inline replaced element, laid out at the origin and moved in on close.
    Atomic { node: NodeId },
    /// Left edges (margin, border, padding) of an inline element.
    InlineStart { node: NodeId },
    /// Right edges of an inline element.
    InlineEnd { node: NodeId },
    /// A forced break (`br`).
    Break { node: NodeId },
}

/// One placed piece of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFragment {
    pub kind: FragmentKind,
    /// Nodes whose extents grow by this fragment: enclosing inline elements,
    /// and the text node itself for text.
    pub owners: SmallVec<[NodeId; 4]>,
    /// Offset from the line's left edge; set when pushed.
    pub offset: LayoutUnit,
    /// Visible width.
    pub width: LayoutUnit,
    /// Width consumed on the line, including trailing white space.
    pub advance: LayoutUnit,
    /// Extents above and below the baseline that count towards the line height.
    pub ascent: LayoutUnit,
    pub descent: LayoutUnit,
    /// Extents of the fragment's own rectangle.
    pub glyph_ascent: LayoutUnit,
    pub glyph_descent: LayoutUnit,
    /// Contribution to the containing block's min-content width.
    pub min_width: LayoutUnit,
}

impl LineFragment {
    /// Whether the fragment makes the line non-empty.
    pub const fn is_content(&self) -> bool {
        matches!(
            self.kind,
            FragmentKind::Text { .. } | FragmentKind::Atomic { .. } | FragmentKind::Break { .. }
        )
    }
}

/// Ascent and descent every line of a block starts with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStrut {
    pub ascent: LayoutUnit,
    pub descent: LayoutUnit,
}

/// An open line.
#[derive(Debug)]
pub struct LineBox {
    pub top: LayoutUnit,
    pub left: LayoutUnit,
    /// Inline space offered by the float list when the line opened.
    pub width: LayoutUnit,
    fragments: Vec<LineFragment>,
    cursor: LayoutUnit,
    trailing_space: LayoutUnit,
    ends_with_space: bool,
    has_content: bool,
    strut: LineStrut,
}

/// A line whose height and baseline are fixed.
#[derive(Debug)]
pub struct ClosedLine {
    pub top: LayoutUnit,
    pub height: LayoutUnit,
    /// Absolute y of the baseline.
    pub baseline: LayoutUnit,
    /// Absolute x of the first fragment after alignment.
    pub origin_x: LayoutUnit,
    /// Width of the content without trailing white space.
    pub content_width: LayoutUnit,
    /// The line's left edge before alignment.
    pub left: LayoutUnit,
    pub fragments: Vec<LineFragment>,
}

impl ClosedLine {
    pub fn bottom(&self) -> LayoutUnit {
        self.top + self.height
    }

    /// Absolute x of `fragment`.
    pub fn fragment_x(&self, fragment: &LineFragment) -> LayoutUnit {
        self.origin_x + fragment.offset
    }
}

impl LineBox {
    /// Open a line at `top` spanning `width` from `left`, storing fragments in `buffer`.
    pub fn open(
        top: LayoutUnit,
        left: LayoutUnit,
        width: LayoutUnit,
        buffer: Vec<LineFragment>,
        strut: LineStrut,
    ) -> Self {
        Self {
            top,
            left,
            width,
            fragments: buffer,
            cursor: LayoutUnit::zero(),
            trailing_space: LayoutUnit::zero(),
            ends_with_space: false,
            has_content: false,
            strut,
        }
    }

    /// Space left before the line's right edge.
    pub fn remaining(&self) -> LayoutUnit {
        self.width - self.cursor
    }

    /// No text, atomic box or break has been placed yet.
    pub const fn is_empty(&self) -> bool {
        !self.has_content
    }

    /// The last placed text ended in collapsible white space.
    pub const fn ends_with_space(&self) -> bool {
        self.ends_with_space
    }

    /// Width used so far, trailing white space excluded.
    pub fn content_width(&self) -> LayoutUnit {
        self.cursor - self.trailing_space
    }

    /// Move the line's left edge and width, e.g. after a float was placed beside it.
    pub const fn narrow(&mut self, left: LayoutUnit, width: LayoutUnit) {
        self.left = left;
        self.width = width;
    }

    /// Move a line that has no content yet down to `top`, with a new span.
    pub const fn relocate(&mut self, top: LayoutUnit, left: LayoutUnit, width: LayoutUnit) {
        self.top = top;
        self.left = left;
        self.width = width;
    }

    /// Append a fragment at the current position.
    pub fn push(&mut self, mut fragment: LineFragment) {
        fragment.offset = self.cursor;
        self.cursor += fragment.advance;
        match &fragment.kind {
            FragmentKind::Text { text, .. } => {
                self.trailing_space = fragment.advance - fragment.width;
                self.ends_with_space = text.ends_with(' ');
            }
            FragmentKind::Atomic { .. } | FragmentKind::Break { .. } => {
                self.trailing_space = LayoutUnit::zero();
                self.ends_with_space = false;
            }
            FragmentKind::InlineStart { .. } | FragmentKind::InlineEnd { .. } => {
                if fragment.advance != LayoutUnit::zero() {
                    self.trailing_space = LayoutUnit::zero();
                }
            }
        }
        self.has_content |= fragment.is_content();
        self.fragments.push(fragment);
    }

    /// Fix the line's height and baseline and apply `align`.
    ///
    /// A line with no content (only empty inline elements, or nothing) gets
    /// zero height.
    pub fn close(self, align: TextAlign) -> ClosedLine {
        let content_width = self.content_width();
        let (ascent, descent) = if self.has_content {
            self.fragments.iter().fold(
                (self.strut.ascent, self.strut.descent),
                |(ascent, descent), fragment| {
                    (ascent.max(fragment.ascent), descent.max(fragment.descent))
                },
            )
        } else {
            (LayoutUnit::zero(), LayoutUnit::zero())
        };
        let free = self.width - content_width;
        let shift = if free.is_positive() {
            match align {
                TextAlign::Left => LayoutUnit::zero(),
                TextAlign::Right => free,
                TextAlign::Center => free / 2,
            }
        } else {
            LayoutUnit::zero()
        };
        ClosedLine {
            top: self.top,
            height: ascent + descent,
            baseline: self.top + ascent,
            origin_x: self.left + shift,
            content_width,
            left: self.left,
            fragments: self.fragments,
        }
    }
}
