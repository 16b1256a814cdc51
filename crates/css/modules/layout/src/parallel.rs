//! Batch layout of independent documents on the rayon pool.
//!
//! Each job owns its document; passes share nothing but the engine, which is
//! read-only during layout.

use dom::{Document, NodeId};
use rayon::prelude::*;

use crate::{ContainingBlock, LayoutEngine, LayoutError, LayoutStats};

/// One document and the element to lay out in it.
#[derive(Debug)]
pub struct LayoutJob {
    pub document: Document,
    pub element: NodeId,
    pub containing_block: ContainingBlock,
}

impl LayoutJob {
    /// A job laying out the whole document.
    pub fn whole_document(document: Document, containing_block: ContainingBlock) -> Self {
        let element = document.root();
        Self {
            document,
            element,
            containing_block,
        }
    }
}

/// Run [`LayoutEngine::format_element`] for every job, in parallel.
///
/// Results are in job order.
pub fn format_documents(engine: &LayoutEngine, jobs: &mut [LayoutJob]) -> Vec<Result<LayoutStats, LayoutError>> {
    jobs.par_iter_mut()
        .map(|job| engine.format_element(&mut job.document, job.element, job.containing_block))
        .collect()
}
