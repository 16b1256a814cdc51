//! Layout configuration.
//!
//! Configuration can be loaded from environment variables or constructed
//! programmatically; [`LayoutConfig::default`] matches an empty environment.

use std::env;

use css_box::LayoutUnit;

/// What happens to a subtree's geometry when a pass fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Leave the geometry from the previous successful pass in place.
    #[default]
    RetainPrevious,
    /// Remove all geometry from the subtree.
    ClearGeometry,
}

impl FailurePolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "retain" | "retain-previous" => Some(Self::RetainPrevious),
            "clear" | "clear-geometry" => Some(Self::ClearGeometry),
            _ => None,
        }
    }
}

/// Runtime configuration for the layout engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Report percentages against indefinite sizes instead of treating them as `auto`.
    pub strict_dimensions: bool,
    pub failure_policy: FailurePolicy,
    /// Deepest element nesting accepted before the tree is rejected.
    pub max_tree_depth: usize,
    /// Initial capacity of each buffer handed out by the per-pass arena.
    pub arena_chunk_capacity: usize,
    /// Width offered to content when measuring its max-content size.
    pub max_content_width: LayoutUnit,
    /// Size used for replaced content without intrinsic dimensions.
    pub default_replaced_size: (LayoutUnit, LayoutUnit),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(false, FailurePolicy::RetainPrevious, 512)
    }
}

impl LayoutConfig {
    /// Construct a `LayoutConfig` with explicit values; the rest take their defaults.
    #[inline]
    #[must_use]
    pub const fn new(
        strict_dimensions: bool,
        failure_policy: FailurePolicy,
        max_tree_depth: usize,
    ) -> Self {
        Self {
            strict_dimensions,
            failure_policy,
            max_tree_depth: if max_tree_depth < 1 { 1 } else { max_tree_depth },
            arena_chunk_capacity: 16,
            max_content_width: LayoutUnit::from_px_i32(1_000_000),
            default_replaced_size: (LayoutUnit::from_px_i32(300), LayoutUnit::from_px_i32(150)),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `LAYOUT_STRICT_DIMENSIONS`: Set to "1" to report unresolvable percentages (default: disabled)
    /// - `LAYOUT_FAILURE_POLICY`: `retain` or `clear` (default: `retain`)
    /// - `LAYOUT_MAX_TREE_DEPTH`: Maximum element nesting (default: 512)
    /// - `LAYOUT_ARENA_CHUNK`: Capacity of arena buffers (default: 16)
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let strict_dimensions = lookup("LAYOUT_STRICT_DIMENSIONS").as_deref() == Some("1");
        let failure_policy = lookup("LAYOUT_FAILURE_POLICY")
            .and_then(|val| FailurePolicy::parse(&val))
            .unwrap_or(defaults.failure_policy);
        let max_tree_depth = lookup("LAYOUT_MAX_TREE_DEPTH")
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(defaults.max_tree_depth)
            .max(1);
        let arena_chunk_capacity = lookup("LAYOUT_ARENA_CHUNK")
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(defaults.arena_chunk_capacity);
        Self {
            strict_dimensions,
            failure_policy,
            max_tree_depth,
            arena_chunk_capacity,
            ..defaults
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_strict_dimensions(mut self, strict_dimensions: bool) -> Self {
        self.strict_dimensions = strict_dimensions;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_max_tree_depth(mut self, max_tree_depth: usize) -> Self {
        self.max_tree_depth = if max_tree_depth < 1 { 1 } else { max_tree_depth };
        self
    }
}
