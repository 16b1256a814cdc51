//! Floats placed in one block formatting context.
//!
//! Coordinates are absolute. Each entry is the margin box of a placed float;
//! queries answer how much inline space is left between the floats over a
//! vertical range, clipped to the content edges of the asking block.

use css_box::{LayoutUnit, Rect};
use dom::NodeId;
use style_engine::Clear;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatSide {
    Left,
    Right,
}

/// A positioned float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatEntry {
    pub node: NodeId,
    pub margin_box: Rect,
    pub side: FloatSide,
}

impl FloatEntry {
    fn overlaps(&self, top: LayoutUnit, bottom: LayoutUnit) -> bool {
        self.margin_box.y < bottom && self.margin_box.bottom() > top
    }
}

/// Usable inline range at some vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineSpan {
    pub left: LayoutUnit,
    pub width: LayoutUnit,
}

impl InlineSpan {
    pub fn right(self) -> LayoutUnit {
        self.left + self.width
    }
}

/// Float exclusions of one block formatting context.
#[derive(Debug, Default)]
pub struct FloatedBoxList {
    entries: Vec<FloatEntry>,
    /// Top of the most recently placed float; later floats never go above it.
    last_top: LayoutUnit,
}

/// A range query always covers at least one unit so zero-height probes still see floats.
fn probe_bottom(top: LayoutUnit, height: LayoutUnit) -> LayoutUnit {
    (top + height).max(top + LayoutUnit::from_raw(1))
}

impl FloatedBoxList {
    /// Wrap an (empty) entry buffer.
    pub fn new(buffer: Vec<FloatEntry>) -> Self {
        Self {
            entries: buffer,
            last_top: LayoutUnit::zero(),
        }
    }

    /// Give the entry buffer back, e.g. to the arena it came from.
    pub fn into_buffer(self) -> Vec<FloatEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloatEntry> {
        self.entries.iter()
    }

    pub fn push(&mut self, entry: FloatEntry) {
        self.last_top = self.last_top.max(entry.margin_box.y);
        self.entries.push(entry);
    }

    /// Inline span left free by floats over `[top, top + height)`, within `[left_limit, right_limit)`.
    pub fn available_span(
        &self,
        top: LayoutUnit,
        height: LayoutUnit,
        left_limit: LayoutUnit,
        right_limit: LayoutUnit,
    ) -> InlineSpan {
        let bottom = probe_bottom(top, height);
        let mut left = left_limit;
        let mut right = right_limit;
        for entry in self.entries.iter().filter(|entry| entry.overlaps(top, bottom)) {
            match entry.side {
                FloatSide::Left => left = left.max(entry.margin_box.right()),
                FloatSide::Right => right = right.min(entry.margin_box.x),
            }
        }
        InlineSpan {
            left,
            width: (right - left).non_negative(),
        }
    }

    /// Whether any float cuts into `[left_limit, right_limit)` over the range.
    pub fn narrows(
        &self,
        top: LayoutUnit,
        height: LayoutUnit,
        left_limit: LayoutUnit,
        right_limit: LayoutUnit,
    ) -> bool {
        let bottom = probe_bottom(top, height);
        self.entries
            .iter()
            .filter(|entry| entry.overlaps(top, bottom))
            .any(|entry| match entry.side {
                FloatSide::Left => entry.margin_box.right() > left_limit,
                FloatSide::Right => entry.margin_box.x < right_limit,
            })
    }

    /// Nearest float bottom below `top` among floats overlapping the range.
    pub fn next_float_bottom(&self, top: LayoutUnit, height: LayoutUnit) -> Option<LayoutUnit> {
        let bottom = probe_bottom(top, height);
        self.entries
            .iter()
            .filter(|entry| entry.overlaps(top, bottom))
            .map(|entry| entry.margin_box.bottom())
            .filter(|float_bottom| *float_bottom > top)
            .min()
    }

    /// Position for a float's margin box of `width` × `height`.
    ///
    /// The float goes at or below `min_top` and never above an earlier float;
    /// it moves down past float bottoms until the span is wide enough or
    /// nothing narrows it any more.
    pub fn place(
        &self,
        side: FloatSide,
        width: LayoutUnit,
        height: LayoutUnit,
        min_top: LayoutUnit,
        left_limit: LayoutUnit,
        right_limit: LayoutUnit,
    ) -> (LayoutUnit, LayoutUnit) {
        let mut top = min_top.max(self.last_top);
        loop {
            let span = self.available_span(top, height, left_limit, right_limit);
            let fits = span.width >= width || !self.narrows(top, height, left_limit, right_limit);
            let next = if fits {
                None
            } else {
                self.next_float_bottom(top, height)
            };
            match next {
                Some(lower) if lower > top => top = lower,
                _ => {
                    let x = match side {
                        FloatSide::Left => span.left,
                        FloatSide::Right => span.right() - width,
                    };
                    return (x, top);
                }
            }
        }
    }

    /// Lowest bottom edge of the floats `clear` has to pass, if any.
    pub fn clearance_offset(&self, clear: Clear) -> Option<LayoutUnit> {
        self.entries
            .iter()
            .filter(|entry| match entry.side {
                FloatSide::Left => clear.clears_left(),
                FloatSide::Right => clear.clears_right(),
            })
            .map(|entry| entry.margin_box.bottom())
            .max()
    }

    /// Bottom edge of the deepest float.
    pub fn last_float_bottom(&self) -> Option<LayoutUnit> {
        self.entries.iter().map(|entry| entry.margin_box.bottom()).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::Document;
    use style_engine::ComputedStyle;

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_px_i32(value)
    }

    fn node_ids(count: usize) -> Vec<NodeId> {
        let mut document = Document::new();
        let root = document.root();
        (0..count)
            .map(|_| document.append_element(root, "div", ComputedStyle::block()).unwrap())
            .collect()
    }

    fn entry(node: NodeId, side: FloatSide, rect: Rect) -> FloatEntry {
        FloatEntry {
            node,
            margin_box: rect,
            side,
        }
    }

    /// A left float narrows the span beside it and nowhere else.
    ///
    /// # Panics
    /// Panics if the span is wrong.
    #[test]
    fn test_span_beside_left_float() {
        let ids = node_ids(1);
        let mut list = FloatedBoxList::default();
        list.push(entry(ids[0], FloatSide::Left, Rect::from_px_i32(0, 0, 50, 40)));

        let beside = list.available_span(px(10), px(16), px(0), px(200));
        assert_eq!(beside, InlineSpan { left: px(50), width: px(150) });
        let below = list.available_span(px(40), px(16), px(0), px(200));
        assert_eq!(below, InlineSpan { left: px(0), width: px(200) });
        assert_eq!(list.next_float_bottom(px(10), px(16)), Some(px(40)));
    }

    /// Floats stack sideways while they fit, then drop below earlier floats.
    ///
    /// # Panics
    /// Panics if a float is placed at the wrong position.
    #[test]
    fn test_place_moves_down_when_too_narrow() {
        let ids = node_ids(2);
        let mut list = FloatedBoxList::default();
        list.push(entry(ids[0], FloatSide::Left, Rect::from_px_i32(0, 0, 120, 30)));
        list.push(entry(ids[1], FloatSide::Right, Rect::from_px_i32(150, 0, 50, 60)));

        assert_eq!(
            list.place(FloatSide::Left, px(30), px(10), px(0), px(0), px(200)),
            (px(120), px(0))
        );
        assert_eq!(
            list.place(FloatSide::Left, px(100), px(10), px(0), px(0), px(200)),
            (px(0), px(30))
        );
        assert_eq!(
            list.place(FloatSide::Right, px(180), px(10), px(0), px(0), px(200)),
            (px(20), px(60))
        );
    }

    /// Clearance only considers floats on the cleared side.
    ///
    /// # Panics
    /// Panics if the clearance offset is wrong.
    #[test]
    fn test_clearance_offset() {
        let ids = node_ids(2);
        let mut list = FloatedBoxList::default();
        assert_eq!(list.clearance_offset(Clear::Both), None);
        list.push(entry(ids[0], FloatSide::Left, Rect::from_px_i32(0, 0, 10, 30)));
        list.push(entry(ids[1], FloatSide::Right, Rect::from_px_i32(90, 0, 10, 70)));

        assert_eq!(list.clearance_offset(Clear::Left), Some(px(30)));
        assert_eq!(list.clearance_offset(Clear::Right), Some(px(70)));
        assert_eq!(list.clearance_offset(Clear::Both), Some(px(70)));
        assert_eq!(list.clearance_offset(Clear::None), None);
        assert_eq!(list.last_float_bottom(), Some(px(70)));
    }
}
