//! Margin strut for tracking collapsing margins.
//!
//! Tracks the "biggest positive" and "smallest negative" margins that haven't
//! collapsed yet as layout walks down and across the tree.

use css_box::LayoutUnit;

/// Margin strut accumulates adjoining vertical margins.
///
/// Instead of collapsing immediately, margins are accumulated in a strut and
/// collapsed once the position of the next piece of in-flow content is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarginStrut {
    /// Largest positive margin accumulated
    pub positive_margin: LayoutUnit,

    /// Smallest negative margin accumulated (most negative)
    pub negative_margin: LayoutUnit,
}

impl MarginStrut {
    /// Create a new empty margin strut.
    pub const fn new() -> Self {
        Self {
            positive_margin: LayoutUnit::zero(),
            negative_margin: LayoutUnit::zero(),
        }
    }

    /// A strut holding a single margin.
    pub fn from_margin(margin: LayoutUnit) -> Self {
        let mut strut = Self::new();
        strut.append(margin);
        strut
    }

    /// Append a margin to this strut.
    ///
    /// - Multiple positive margins: use the largest
    /// - Multiple negative margins: use the most negative (smallest)
    /// - Mix of positive/negative: add them on collapse
    pub fn append(&mut self, margin: LayoutUnit) {
        if margin.is_positive() {
            self.positive_margin = self.positive_margin.max(margin);
        } else if margin.is_negative() {
            self.negative_margin = self.negative_margin.min(margin);
        }
    }

    /// Merge another strut's margins into this one.
    pub fn append_strut(&mut self, other: Self) {
        self.append(other.positive_margin);
        self.append(other.negative_margin);
    }

    /// Collapse the accumulated margins into a single value.
    pub fn collapse(self) -> LayoutUnit {
        self.positive_margin + self.negative_margin
    }

    /// Check if this strut has any margins.
    pub fn is_empty(self) -> bool {
        self.positive_margin == LayoutUnit::zero() && self.negative_margin == LayoutUnit::zero()
    }
}
