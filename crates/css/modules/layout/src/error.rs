//! Failures surfaced by a layout pass.

use css_text::MeasureError;
use dom::NodeId;

/// Error returned from [`crate::LayoutEngine::format_element`] and the pass-level entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A percentage had no definite basis and strict dimension checking is on.
    #[error("{property} of node {node} is a percentage of an indefinite size")]
    UnresolvedDimension { node: NodeId, property: &'static str },
    /// The text measurement collaborator failed.
    #[error("measuring text of node {node} failed")]
    MeasurementFailure {
        node: NodeId,
        #[source]
        source: MeasureError,
    },
    /// The tree cannot be laid out at all.
    #[error("node {node}: {reason}")]
    StructuralViolation { node: NodeId, reason: String },
}

impl LayoutError {
    pub(crate) fn structural(node: NodeId, reason: impl Into<String>) -> Self {
        Self::StructuralViolation {
            node,
            reason: reason.into(),
        }
    }

    /// The node the error was raised for.
    pub const fn node(&self) -> NodeId {
        match self {
            Self::UnresolvedDimension { node, .. }
            | Self::MeasurementFailure { node, .. }
            | Self::StructuralViolation { node, .. } => *node,
        }
    }
}
