//! Entry point of the layout engine.
//!
//! [`LayoutEngine::format_element`] runs one pass over a subtree and commits
//! the result; [`LayoutEngine::begin_pass`] exposes the same machinery for
//! callers that drive the pass themselves.

mod output;
mod pass;

use core::fmt;

use css_box::LayoutUnit;
use css_text::{FixedAdvanceMeasurer, TextMeasurer};
use dom::{Document, NodeId};
use log::{debug, warn};
use tracing::info_span;

pub use output::{LayoutOutput, PassGeometry};
pub use pass::LayoutPass;

use crate::special::{IntrinsicSizeProvider, StaticResources};
use crate::{FailurePolicy, LayoutConfig, LayoutError, LayoutStats};

/// Size of the box an element is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainingBlock {
    pub width: LayoutUnit,
    /// `None` when the height is indefinite; percentage heights then become `auto`.
    pub height: Option<LayoutUnit>,
}

impl ContainingBlock {
    pub const fn new(width: LayoutUnit, height: Option<LayoutUnit>) -> Self {
        Self { width, height }
    }

    pub fn from_px(width: f32, height: Option<f32>) -> Self {
        Self::new(LayoutUnit::from_px(width), height.map(LayoutUnit::from_px))
    }
}

/// Layout engine: configuration plus the measurement collaborators.
///
/// Holds no per-document state, so one engine can serve many documents,
/// including concurrently.
pub struct LayoutEngine {
    config: LayoutConfig,
    measurer: Box<dyn TextMeasurer>,
    resources: Box<dyn IntrinsicSizeProvider>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LayoutEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    /// An engine measuring text with [`FixedAdvanceMeasurer`] and knowing no resources.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            measurer: Box::new(FixedAdvanceMeasurer::default()),
            resources: Box::new(StaticResources::new()),
        }
    }

    #[must_use]
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: impl IntrinsicSizeProvider + 'static) -> Self {
        self.resources = Box::new(resources);
        self
    }

    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    pub fn resources(&self) -> &dyn IntrinsicSizeProvider {
        self.resources.as_ref()
    }

    /// Start a pass over `document` without writing anything back yet.
    pub fn begin_pass<'engine, 'doc>(&'engine self, document: &'doc Document) -> LayoutPass<'engine, 'doc> {
        LayoutPass::new(self, document)
    }

    /// Lay out `element` and its subtree in a new block formatting context of
    /// `containing_block`, and write the resulting boxes onto the document.
    ///
    /// # Errors
    /// Returns the first [`LayoutError`] of the pass. The subtree then keeps
    /// the geometry of the previous pass, or none under
    /// [`FailurePolicy::ClearGeometry`].
    pub fn format_element(
        &self,
        document: &mut Document,
        element: NodeId,
        containing_block: ContainingBlock,
    ) -> Result<LayoutStats, LayoutError> {
        let _span = info_span!("layout.format_element").entered();
        let result = self.run_pass(document, element, containing_block);
        match result {
            Ok(output) => output.commit(document, element),
            Err(error) => {
                warn!("[LAYOUT] pass for node {element} failed: {error}");
                if self.config.failure_policy == FailurePolicy::ClearGeometry && document.contains(element) {
                    document.clear_geometry(element);
                }
                Err(error)
            }
        }
    }

    fn run_pass(
        &self,
        document: &Document,
        element: NodeId,
        containing_block: ContainingBlock,
    ) -> Result<LayoutOutput, LayoutError> {
        let mut pass = self.begin_pass(document);
        pass.node(element)?;
        let mut container = pass.open_root(element, containing_block);
        pass.format_root_element(&mut container, element)?;
        let height = pass.close_root(container)?;
        debug!("[LAYOUT] node {element} laid out, content height {height}");
        Ok(pass.finish())
    }
}
