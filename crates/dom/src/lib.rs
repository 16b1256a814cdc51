//! Element tree handed to layout.
//!
//! Nodes live in an `indextree` arena; a parent exclusively owns its children
//! and document order is the arena's child order. Layout reads kind, style and
//! special-content declarations, and writes back only geometry: one
//! [`ComputedBox`] per node and, for text nodes, the line fragments.

use anyhow::{Context as _, Error, anyhow};
use css_box::{ComputedBox, LayoutUnit, Rect};
use indextree::{Arena, Node};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use style_engine::{ComputedStyle, Display};

pub mod fixture;

pub use indextree::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
}

/// Form controls sized from font metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormControl {
    /// Single-line text field `size` characters wide.
    TextInput { size: u32 },
    Checkbox,
    Radio,
    Button { label: String },
}

/// Content that is not laid out from the element's children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialContent {
    Image { resource: String },
    Embedded { resource: String },
    FormControl(FormControl),
}

/// One line's worth of a text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    /// Absolute rectangle covering the glyphs' advance and line-box-relative extents.
    pub rect: Rect,
    /// Absolute y of the baseline.
    pub baseline: LayoutUnit,
    /// The white-space-processed text shown on this line.
    pub text: String,
}

pub type TextFragments = SmallVec<[TextFragment; 2]>;

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub style: ComputedStyle,
    pub special: Option<SpecialContent>,
    layout_box: Option<ComputedBox>,
    fragments: TextFragments,
}

impl DOMNode {
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Document | NodeKind::Text { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { text } => Some(text),
            NodeKind::Document | NodeKind::Element { .. } => None,
        }
    }

    /// Geometry from the last successful layout; `None` means no geometry.
    pub fn layout_box(&self) -> Option<&ComputedBox> {
        self.layout_box.as_ref()
    }

    pub fn text_fragments(&self) -> &[TextFragment] {
        &self.fragments
    }
}

#[derive(Debug)]
pub struct Document {
    dom: Arena<DOMNode>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document whose root node has `display: block`.
    pub fn new() -> Self {
        let mut dom = Arena::new();
        let root = dom.new_node(DOMNode {
            style: ComputedStyle::block(),
            ..DOMNode::default()
        });
        Self { dom, root }
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `node` belongs to this document and has not been removed.
    pub fn contains(&self, node: NodeId) -> bool {
        self.dom.get(node).is_some() && !node.is_removed(&self.dom)
    }

    pub fn node(&self, node: NodeId) -> Option<&DOMNode> {
        if self.contains(node) {
            self.dom.get(node).map(Node::get)
        } else {
            None
        }
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut DOMNode, Error> {
        if !self.contains(node) {
            return Err(anyhow!("node {node} is not part of this document"));
        }
        self.dom
            .get_mut(node)
            .map(Node::get_mut)
            .ok_or_else(|| anyhow!("node {node} is not part of this document"))
    }

    /// Append an element with `style` as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if `parent` is not in this document or is a text node.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        style: ComputedStyle,
    ) -> Result<NodeId, Error> {
        self.append(
            parent,
            DOMNode {
                kind: NodeKind::Element {
                    tag: tag.to_owned(),
                },
                style,
                ..DOMNode::default()
            },
        )
    }

    /// Append a text node inheriting its text properties from `parent`.
    ///
    /// # Errors
    /// Returns an error if `parent` is not in this document or is a text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, Error> {
        let parent_style = self
            .node(parent)
            .map(|node| node.style.clone())
            .ok_or_else(|| anyhow!("node {parent} is not part of this document"))?;
        let style = ComputedStyle {
            display: Display::Inline,
            ..ComputedStyle::inherit_from(&parent_style)
        };
        self.append(
            parent,
            DOMNode {
                kind: NodeKind::Text {
                    text: text.to_owned(),
                },
                style,
                ..DOMNode::default()
            },
        )
    }

    fn append(&mut self, parent: NodeId, data: DOMNode) -> Result<NodeId, Error> {
        let parent_node = self
            .node(parent)
            .ok_or_else(|| anyhow!("node {parent} is not part of this document"))?;
        if parent_node.is_text() {
            return Err(anyhow!("text node {parent} cannot have children"));
        }
        let child = self.dom.new_node(data);
        parent
            .checked_append(child, &mut self.dom)
            .with_context(|| format!("appending {child} to {parent}"))?;
        Ok(child)
    }

    /// Declare special content on an element.
    ///
    /// # Errors
    /// Returns an error if `node` is not in this document.
    pub fn set_special(&mut self, node: NodeId, special: SpecialContent) -> Result<(), Error> {
        self.node_mut(node)?.special = Some(special);
        Ok(())
    }

    /// Replace an element's style.
    ///
    /// # Errors
    /// Returns an error if `node` is not in this document.
    pub fn set_style(&mut self, node: NodeId, style: ComputedStyle) -> Result<(), Error> {
        self.node_mut(node)?.style = style;
        Ok(())
    }

    /// Children of `node` in document order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.dom)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.get(node).and_then(Node::parent)
    }

    /// `node` followed by all of its descendants, in document order.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.dom)
    }

    pub fn layout_box(&self, node: NodeId) -> Option<&ComputedBox> {
        self.node(node).and_then(DOMNode::layout_box)
    }

    pub fn text_fragments(&self, node: NodeId) -> &[TextFragment] {
        self.node(node).map_or(&[], DOMNode::text_fragments)
    }

    /// Write (or clear, with `None`) the geometry of one node.
    ///
    /// # Errors
    /// Returns an error if `node` is not in this document.
    pub fn set_layout_box(&mut self, node: NodeId, layout_box: Option<ComputedBox>) -> Result<(), Error> {
        self.node_mut(node)?.layout_box = layout_box;
        Ok(())
    }

    /// Replace the line fragments of a text node.
    ///
    /// # Errors
    /// Returns an error if `node` is not in this document.
    pub fn set_text_fragments(&mut self, node: NodeId, fragments: TextFragments) -> Result<(), Error> {
        self.node_mut(node)?.fragments = fragments;
        Ok(())
    }

    /// Remove geometry from `node` and its descendants.
    pub fn clear_geometry(&mut self, node: NodeId) {
        let ids: Vec<NodeId> = self.descendants(node).collect();
        for id in ids {
            if let Ok(data) = self.node_mut(id) {
                data.layout_box = None;
                data.fragments.clear();
            }
        }
    }
}
