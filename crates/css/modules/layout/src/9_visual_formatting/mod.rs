//! CSS 2.2 Chapter 9: Visual formatting model
//! Spec: <https://www.w3.org/TR/CSS22/visuren.html>

pub mod part_9_2_box_generation;
pub mod part_9_4_1_block_formatting_context;
pub mod part_9_4_2_inline_formatting_context;
pub mod part_9_5_floats;
