//! CSS Box Model Module Level 3: Box dimensions, margins, borders, padding.
//! <https://www.w3.org/TR/css-box-3/>
//!
//! The types here are the values layout hands to rendering and hit-testing.
//! They are plain `Copy` data; a re-layout replaces them wholesale.

pub mod layout_unit;
pub use layout_unit::LayoutUnit;

/// An axis-aligned rectangle in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: LayoutUnit,
    pub y: LayoutUnit,
    pub width: LayoutUnit,
    pub height: LayoutUnit,
}

impl Rect {
    #[inline]
    pub const fn new(x: LayoutUnit, y: LayoutUnit, width: LayoutUnit, height: LayoutUnit) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convenience constructor from whole pixels.
    #[inline]
    pub const fn from_px_i32(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(
            LayoutUnit::from_px_i32(x),
            LayoutUnit::from_px_i32(y),
            LayoutUnit::from_px_i32(width),
            LayoutUnit::from_px_i32(height),
        )
    }

    #[inline]
    pub fn right(&self) -> LayoutUnit {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> LayoutUnit {
        self.y + self.height
    }

    /// Grow the rectangle outward by `edges`.
    #[inline]
    #[must_use]
    pub fn outset(&self, edges: &Edges) -> Self {
        Self {
            x: self.x - edges.left,
            y: self.y - edges.top,
            width: self.width + edges.horizontal(),
            height: self.height + edges.vertical(),
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    #[inline]
    #[must_use]
    pub fn translate(&self, dx: LayoutUnit, dy: LayoutUnit) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Widths of the four sides of one box area (margin, border or padding).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Edges {
    pub top: LayoutUnit,
    pub right: LayoutUnit,
    pub bottom: LayoutUnit,
    pub left: LayoutUnit,
}

impl Edges {
    #[inline]
    pub const fn new(
        top: LayoutUnit,
        right: LayoutUnit,
        bottom: LayoutUnit,
        left: LayoutUnit,
    ) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(
            LayoutUnit::zero(),
            LayoutUnit::zero(),
            LayoutUnit::zero(),
            LayoutUnit::zero(),
        )
    }

    /// Left + right.
    #[inline]
    pub fn horizontal(&self) -> LayoutUnit {
        self.left + self.right
    }

    /// Top + bottom.
    #[inline]
    pub fn vertical(&self) -> LayoutUnit {
        self.top + self.bottom
    }

    /// Side-wise sum, used to fold padding and border into one inset.
    #[inline]
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }

    /// True when no side is negative.
    #[inline]
    pub fn is_non_negative(&self) -> bool {
        !(self.top.is_negative()
            || self.right.is_negative()
            || self.bottom.is_negative()
            || self.left.is_negative())
    }
}

/// Which of the nested areas of a box to address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxArea {
    Content,
    Padding,
    Border,
    Margin,
}

/// Final geometry of one element: its content rectangle plus the three edge rings.
///
/// Coordinates are absolute (relative to the root containing block). Padding and
/// border are never negative; margins may be.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComputedBox {
    pub content: Rect,
    pub padding: Edges,
    pub border: Edges,
    pub margin: Edges,
}

impl ComputedBox {
    #[inline]
    pub const fn new(content: Rect, padding: Edges, border: Edges, margin: Edges) -> Self {
        Self {
            content,
            padding,
            border,
            margin,
        }
    }

    #[inline]
    pub fn padding_box(&self) -> Rect {
        self.content.outset(&self.padding)
    }

    #[inline]
    pub fn border_box(&self) -> Rect {
        self.padding_box().outset(&self.border)
    }

    #[inline]
    pub fn margin_box(&self) -> Rect {
        self.border_box().outset(&self.margin)
    }

    /// The rectangle for one area.
    pub fn area(&self, area: BoxArea) -> Rect {
        match area {
            BoxArea::Content => self.content,
            BoxArea::Padding => self.padding_box(),
            BoxArea::Border => self.border_box(),
            BoxArea::Margin => self.margin_box(),
        }
    }

    /// Margin-box width: content + padding + border + margin, left and right.
    #[inline]
    pub fn outer_width(&self) -> LayoutUnit {
        self.content.width
            + self.padding.horizontal()
            + self.border.horizontal()
            + self.margin.horizontal()
    }

    /// Margin-box height: content + padding + border + margin, top and bottom.
    #[inline]
    pub fn outer_height(&self) -> LayoutUnit {
        self.content.height
            + self.padding.vertical()
            + self.border.vertical()
            + self.margin.vertical()
    }

    /// Border-box width.
    #[inline]
    pub fn border_width(&self) -> LayoutUnit {
        self.content.width + self.padding.horizontal() + self.border.horizontal()
    }

    /// Border-box height.
    #[inline]
    pub fn border_height(&self) -> LayoutUnit {
        self.content.height + self.padding.vertical() + self.border.vertical()
    }

    /// A copy of this box moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: LayoutUnit, dy: LayoutUnit) -> Self {
        Self {
            content: self.content.translate(dx, dy),
            ..*self
        }
    }

    /// A copy whose margin box's top-left corner sits at `(x, y)`.
    #[inline]
    #[must_use]
    pub fn with_margin_origin(&self, x: LayoutUnit, y: LayoutUnit) -> Self {
        let current = self.margin_box();
        self.translate(x - current.x, y - current.y)
    }

    /// Content, padding and border extents are non-negative.
    pub fn is_well_formed(&self) -> bool {
        !self.content.width.is_negative()
            && !self.content.height.is_negative()
            && self.padding.is_non_negative()
            && self.border.is_non_negative()
    }
}
