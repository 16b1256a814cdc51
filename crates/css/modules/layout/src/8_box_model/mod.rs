//! CSS 2.2 Chapter 8: Box model
//! Spec: <https://www.w3.org/TR/CSS22/box.html>

pub mod part_8_3_1_collapsing_margins;
