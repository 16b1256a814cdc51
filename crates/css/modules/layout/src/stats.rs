//! Counters gathered during one layout pass.

/// Work done by one call to [`crate::LayoutEngine::format_element`].
///
/// Only kept work is counted: the max-content pass of shrink-to-fit sizing
/// shows up in `shrink_to_fit_passes` alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Elements and text nodes routed through the dispatcher.
    pub elements_formatted: usize,
    pub line_boxes: usize,
    /// Text fragments written to lines.
    pub text_runs: usize,
    pub floats_placed: usize,
    /// Max-content measurement passes run for shrink-to-fit sizing.
    pub shrink_to_fit_passes: usize,
    pub arena_chunks_allocated: usize,
    pub arena_chunks_reused: usize,
}
