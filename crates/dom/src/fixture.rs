//! JSON descriptions of element trees, used by tests and benchmarks.
//!
//! ```json
//! { "tag": "div", "id": "outer", "style": { "display": "block" },
//!   "children": [ { "text": "hello" }, { "tag": "img", "special": { "image": { "resource": "a" } } } ] }
//! ```
//!
//! `style` is merged over the values inherited from the parent, so a fixture
//! only lists what differs.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Error, anyhow};
use indextree::NodeId;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use style_engine::ComputedStyle;

use crate::{Document, SpecialContent};

/// One node of a fixture tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FixtureNode {
    Text {
        text: String,
    },
    Element {
        tag: String,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        style: Map<String, Value>,
        #[serde(default)]
        special: Option<SpecialContent>,
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
}

/// A document built from a fixture plus a lookup from fixture ids to nodes.
#[derive(Debug)]
pub struct LoadedDocument {
    pub document: Document,
    /// The element the fixture's top node became.
    pub element: NodeId,
    pub ids: HashMap<String, NodeId>,
}

impl LoadedDocument {
    /// Node for a fixture id.
    ///
    /// # Errors
    /// Returns an error if no element carries `id`.
    pub fn id(&self, id: &str) -> Result<NodeId, Error> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| anyhow!("fixture has no element with id {id:?}"))
    }
}

/// Build a document whose root holds `tree` as its only child.
///
/// # Errors
/// Returns an error if a style object does not deserialize or a text node is given children.
pub fn build_document(tree: &FixtureNode) -> Result<LoadedDocument, Error> {
    let mut document = Document::new();
    let mut ids = HashMap::new();
    let root = document.root();
    let element = append_node(&mut document, root, tree, &mut ids)?;
    debug!("[FIXTURE] built document with {} ids", ids.len());
    Ok(LoadedDocument {
        document,
        element,
        ids,
    })
}

/// Parse a fixture tree from JSON text.
///
/// # Errors
/// Returns an error if the text is not a valid fixture.
pub fn from_json_str(json: &str) -> Result<LoadedDocument, Error> {
    let tree: FixtureNode = serde_json::from_str(json).context("parsing fixture tree")?;
    build_document(&tree)
}

/// Read and parse a fixture tree from a file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid fixture.
pub fn load_document(path: &Path) -> Result<LoadedDocument, Error> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    from_json_str(&json).with_context(|| format!("loading fixture {}", path.display()))
}

fn append_node(
    document: &mut Document,
    parent: NodeId,
    node: &FixtureNode,
    ids: &mut HashMap<String, NodeId>,
) -> Result<NodeId, Error> {
    match node {
        FixtureNode::Text { text } => document.append_text(parent, text),
        FixtureNode::Element {
            tag,
            id,
            style,
            special,
            children,
        } => {
            let parent_style = document
                .node(parent)
                .map(|data| data.style.clone())
                .unwrap_or_default();
            let style = merge_style(&parent_style, style)
                .with_context(|| format!("style of <{tag}>"))?;
            let element = document.append_element(parent, tag, style)?;
            if let Some(special) = special {
                document.set_special(element, special.clone())?;
            }
            if let Some(id) = id {
                ids.insert(id.clone(), element);
            }
            for child in children {
                append_node(document, element, child, ids)?;
            }
            Ok(element)
        }
    }
}

fn merge_style(parent: &ComputedStyle, overrides: &Map<String, Value>) -> Result<ComputedStyle, Error> {
    let mut merged = serde_json::to_value(ComputedStyle::inherit_from(parent))?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            fields.insert(key.clone(), value.clone());
        }
    }
    Ok(serde_json::from_value(merged)?)
}
