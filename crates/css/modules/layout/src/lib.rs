//! CSS 2.2 box-model layout: block and inline formatting, floats, replaced content.
//! Spec: <https://www.w3.org/TR/CSS22/>
//!
//! [`LayoutEngine::format_element`] lays out a subtree of a [`dom::Document`]
//! inside a containing block and writes a [`css_box::ComputedBox`] onto every
//! element that generates a box, plus text fragments onto text nodes. All
//! geometry is computed in [`css_box::LayoutUnit`]s.

pub mod arena;
pub mod box_tree;
mod config;
mod error;
mod orchestrator;
pub mod special;
mod stats;

#[cfg(feature = "parallel_layout")]
pub mod parallel;

// Chapter modules mapped to the CSS 2.2 structure.
// Spec: Chapter 8: Box model
#[path = "8_box_model/mod.rs"]
mod chapter8;
// Spec: Chapter 9: Visual formatting model
#[path = "9_visual_formatting/mod.rs"]
mod chapter9;
// Spec: Chapter 10: Visual formatting model details
#[path = "10_visual_details/mod.rs"]
mod chapter10;

pub use arena::LayoutArena;
pub use box_tree::{FloatedBoxList, LayoutBlockBox, LineBox};
pub use chapter9::part_9_2_box_generation::{FormattingKind, SpecialPlacement, classify};
pub use chapter9::part_9_4_1_block_formatting_context::establishes_block_formatting_context;
pub use chapter10::part_10_3_5_shrink_to_fit::shrink_to_fit_width;
pub use config::{FailurePolicy, LayoutConfig};
pub use error::LayoutError;
pub use orchestrator::{ContainingBlock, LayoutEngine, LayoutOutput, LayoutPass, PassGeometry};
pub use special::{IntrinsicSize, IntrinsicSizeProvider, StaticResources};
pub use stats::LayoutStats;
