//! Computed style values consumed by layout.
//!
//! Cascade and selector matching happen upstream; this crate only carries the
//! resolved per-element style and the helpers that turn it into used values
//! once a containing block is known.

mod computed_style;
mod used_values;

pub use used_values::{
    UsedMargins, UsedSize, UsedValues, UsedValuesContext, resolve_size, resolve_used_values,
};

pub use computed_style::{
    BoxSizing, Clear, ComputedStyle, Display, Edges, Float, FontSpec, LineHeight, MarginEdges,
    Overflow, SizeSpecified, TextAlign, WhiteSpace,
};
