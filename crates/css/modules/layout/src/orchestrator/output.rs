//! Geometry recorded by a pass before it is committed to the document.
//!
//! Formatters never write to the [`Document`] directly. Boxes and text
//! fragments go into a [`PassGeometry`] side table, and only a pass that
//! finished without error copies them onto the elements. A failing pass
//! therefore leaves every element either with its previous box or, under
//! [`FailurePolicy::ClearGeometry`](crate::FailurePolicy), with none.

use std::collections::HashMap;

use css_box::{ComputedBox, LayoutUnit, Rect};
use dom::{Document, NodeId, TextFragment, TextFragments};
use log::debug;

use crate::{LayoutError, LayoutStats};

/// Boxes, text fragments and inline extents produced so far.
#[derive(Debug, Default)]
pub struct PassGeometry {
    boxes: HashMap<NodeId, ComputedBox>,
    fragments: HashMap<NodeId, TextFragments>,
    /// Union of line fragments per inline element or text node, until its box is built.
    extents: HashMap<NodeId, Rect>,
}

impl PassGeometry {
    pub fn layout_box(&self, node: NodeId) -> Option<&ComputedBox> {
        self.boxes.get(&node)
    }

    pub fn set_box(&mut self, node: NodeId, layout_box: ComputedBox) {
        self.boxes.insert(node, layout_box);
    }

    pub fn push_fragment(&mut self, node: NodeId, fragment: TextFragment) {
        self.fragments.entry(node).or_default().push(fragment);
    }

    pub fn text_fragments(&self, node: NodeId) -> &[TextFragment] {
        self.fragments.get(&node).map_or(&[], |fragments| fragments.as_slice())
    }

    /// Grow the recorded extent of `node` by `rect`.
    pub fn extend_extent(&mut self, node: NodeId, rect: Rect) {
        self.extents
            .entry(node)
            .and_modify(|extent| *extent = extent.union(&rect))
            .or_insert(rect);
    }

    pub fn take_extent(&mut self, node: NodeId) -> Option<Rect> {
        self.extents.remove(&node)
    }

    /// Move every box and fragment in the subtree of `node`.
    pub fn translate_subtree(&mut self, document: &Document, node: NodeId, dx: LayoutUnit, dy: LayoutUnit) {
        if dx == LayoutUnit::zero() && dy == LayoutUnit::zero() {
            return;
        }
        for id in document.descendants(node) {
            if let Some(layout_box) = self.boxes.get_mut(&id) {
                *layout_box = layout_box.translate(dx, dy);
            }
            if let Some(fragments) = self.fragments.get_mut(&id) {
                for fragment in fragments.iter_mut() {
                    fragment.rect = fragment.rect.translate(dx, dy);
                    fragment.baseline += dy;
                }
            }
        }
    }

    /// Forget everything recorded for the subtree of `node`, `node` included.
    pub fn clear_subtree(&mut self, document: &Document, node: NodeId) {
        for id in document.descendants(node) {
            self.boxes.remove(&id);
            self.fragments.remove(&id);
            self.extents.remove(&id);
        }
    }

    /// Forget what was recorded below `node`, keeping `node` itself.
    pub fn clear_descendants(&mut self, document: &Document, node: NodeId) {
        for id in document.descendants(node).skip(1) {
            self.boxes.remove(&id);
            self.fragments.remove(&id);
            self.extents.remove(&id);
        }
    }
}

/// Result of a finished pass, ready to be written onto the document.
#[derive(Debug)]
pub struct LayoutOutput {
    pub(crate) geometry: PassGeometry,
    pub(crate) stats: LayoutStats,
}

impl LayoutOutput {
    pub const fn stats(&self) -> &LayoutStats {
        &self.stats
    }

    pub fn layout_box(&self, node: NodeId) -> Option<&ComputedBox> {
        self.geometry.layout_box(node)
    }

    /// Replace the geometry of the subtree under `scope` with this pass's result.
    ///
    /// Nodes of the subtree the pass gave no box (e.g. `display: none`) end up
    /// without geometry.
    ///
    /// # Errors
    /// Returns [`LayoutError::StructuralViolation`] if a recorded node is not
    /// part of `document`.
    pub fn commit(self, document: &mut Document, scope: NodeId) -> Result<LayoutStats, LayoutError> {
        if !document.contains(scope) {
            return Err(LayoutError::structural(scope, "not part of the document"));
        }
        document.clear_geometry(scope);
        let boxes = self.geometry.boxes.len();
        for (node, layout_box) in self.geometry.boxes {
            document
                .set_layout_box(node, Some(layout_box))
                .map_err(|error| LayoutError::structural(node, error.to_string()))?;
        }
        for (node, fragments) in self.geometry.fragments {
            document
                .set_text_fragments(node, fragments)
                .map_err(|error| LayoutError::structural(node, error.to_string()))?;
        }
        debug!("[COMMIT] scope={scope} boxes={boxes}");
        Ok(self.stats)
    }
}
