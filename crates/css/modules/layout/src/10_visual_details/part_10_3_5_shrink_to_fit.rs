//! Spec: CSS 2.2 §10.3.5 Floating, non-replaced elements (and §10.3.9 inline-block)
//! Shrink-to-fit width.
//!
//! Computed in two passes over the same formatting code. The first lays the
//! children out in a box as wide as
//! [`LayoutConfig::max_content_width`](crate::LayoutConfig::max_content_width),
//! so nothing wraps but at forced breaks, and collects
//! the preferred and minimum widths; its geometry is thrown away. The caller
//! then formats the element again at the chosen width.

use css_box::{Edges, LayoutUnit};
use dom::{DOMNode, NodeId};
use log::trace;
use tracing::debug_span;

use crate::LayoutError;
use crate::box_tree::{BlockSizing, HeightRule, IntrinsicWidths, LayoutBlockBox, MarginStrut};
use crate::orchestrator::LayoutPass;

/// `min(max(preferred minimum width, available width), preferred width)`.
///
/// Never below the minimum, even when `available` is smaller.
pub fn shrink_to_fit_width(available: LayoutUnit, widths: IntrinsicWidths) -> LayoutUnit {
    available.min(widths.preferred).max(widths.minimum)
}

impl LayoutPass<'_, '_> {
    /// Preferred and minimum content widths of `element`'s children.
    ///
    /// Percentages inside are left unresolved and strict dimension checks are
    /// suspended while measuring.
    pub(crate) fn measure_intrinsic_widths(
        &mut self,
        element: NodeId,
        node: &DOMNode,
    ) -> Result<IntrinsicWidths, LayoutError> {
        let _span = debug_span!("layout.shrink_to_fit").entered();
        self.stats.shrink_to_fit_passes += 1;
        self.measuring += 1;
        let measured = self.measure_children(element, node);
        self.measuring -= 1;
        self.geometry.clear_descendants(self.document, element);
        let widths = measured?;
        trace!(
            "[SHRINK] node={element} preferred={} minimum={}",
            widths.preferred, widths.minimum
        );
        Ok(widths)
    }

    fn measure_children(&mut self, element: NodeId, node: &DOMNode) -> Result<IntrinsicWidths, LayoutError> {
        let sizing = BlockSizing {
            margin: Edges::zero(),
            border: Edges::zero(),
            padding: Edges::zero(),
            height: HeightRule::Auto {
                min: LayoutUnit::zero(),
                max: None,
            },
            auto_width: true,
            inline_margins: LayoutUnit::zero(),
        };
        let floats = self.owned_floats();
        let mut probe = LayoutBlockBox::element(
            element,
            sizing,
            LayoutUnit::zero(),
            self.engine.config().max_content_width,
            Some(LayoutUnit::zero()),
            LayoutUnit::zero(),
            MarginStrut::new(),
            true,
            floats,
        );
        self.prepare_lines(&mut probe, element, &node.style)?;
        self.format_children(&mut probe, element)?;
        Ok(self.close_block(probe)?.contribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_px_i32(value)
    }

    /// The available width is used between the minimum and preferred widths.
    ///
    /// # Panics
    /// Panics if the clamp is wrong.
    #[test]
    fn test_shrink_to_fit_clamp() {
        let widths = IntrinsicWidths {
            preferred: px(300),
            minimum: px(40),
        };
        assert_eq!(shrink_to_fit_width(px(120), widths), px(120));
        assert_eq!(shrink_to_fit_width(px(500), widths), px(300));
        assert_eq!(shrink_to_fit_width(px(10), widths), px(40));
    }
}
