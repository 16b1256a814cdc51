//! Used values resolution.
//!
//! Turns specified sizes into layout units once the containing block is known.
//! Percentages need a definite basis; when there is none the value resolves to
//! [`UsedSize::Indefinite`] and the property name is recorded so layout can
//! decide whether to fall back to `auto` or report the failure.

use crate::{ComputedStyle, Edges, MarginEdges, SizeSpecified};
use css_box::{Edges as BoxEdges, LayoutUnit};

/// Context required to resolve used values, typically provided by layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsedValuesContext {
    /// Basis for horizontal percentages (widths, and all margins).
    pub width_basis: Option<LayoutUnit>,
    /// Basis for percentage heights; `None` when the containing block height is auto.
    pub height_basis: Option<LayoutUnit>,
}

/// A size after percentage resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsedSize {
    Auto,
    Definite(LayoutUnit),
    /// A percentage against an indefinite basis.
    Indefinite,
}

impl UsedSize {
    /// The definite value, treating `Auto` and `Indefinite` alike.
    pub const fn definite(self) -> Option<LayoutUnit> {
        match self {
            Self::Definite(value) => Some(value),
            Self::Auto | Self::Indefinite => None,
        }
    }
}

/// Margin sides; `None` marks `auto`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsedMargins {
    pub top: Option<LayoutUnit>,
    pub right: Option<LayoutUnit>,
    pub bottom: Option<LayoutUnit>,
    pub left: Option<LayoutUnit>,
}

/// Resolved used values for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedValues {
    pub width: UsedSize,
    pub height: UsedSize,
    pub min_width: LayoutUnit,
    pub max_width: Option<LayoutUnit>,
    pub min_height: LayoutUnit,
    pub max_height: Option<LayoutUnit>,
    pub margin: UsedMargins,
    pub padding: BoxEdges,
    pub border: BoxEdges,
    /// Properties whose percentages had no definite basis.
    pub unresolved: Vec<&'static str>,
}

/// Resolve a single size against an optional basis.
pub fn resolve_size(spec: SizeSpecified, basis: Option<LayoutUnit>) -> UsedSize {
    match spec {
        SizeSpecified::Auto => UsedSize::Auto,
        SizeSpecified::Px(px) => UsedSize::Definite(LayoutUnit::from_px(px)),
        SizeSpecified::Percent(fraction) => basis.map_or(UsedSize::Indefinite, |base| {
            UsedSize::Definite(base * fraction)
        }),
    }
}

fn px_edges(edges: &Edges) -> BoxEdges {
    BoxEdges::new(
        LayoutUnit::from_px(edges.top.max(0.0)),
        LayoutUnit::from_px(edges.right.max(0.0)),
        LayoutUnit::from_px(edges.bottom.max(0.0)),
        LayoutUnit::from_px(edges.left.max(0.0)),
    )
}

/// Resolve the size-related properties of `computed` using the provided context.
///
/// - width/height: px kept as-is; percentages resolved against the basis; auto stays auto.
/// - min-*: absent or unresolvable → 0. max-*: absent or unresolvable → none.
/// - margins: percentages against the width basis on all four sides; auto → `None`.
/// - padding and border: negative values are clamped to zero.
pub fn resolve_used_values(computed: &ComputedStyle, context: &UsedValuesContext) -> UsedValues {
    let mut unresolved = Vec::new();
    let mut track = |name: &'static str, size: UsedSize| {
        if size == UsedSize::Indefinite {
            unresolved.push(name);
        }
        size
    };

    let width = track("width", resolve_size(computed.width, context.width_basis));
    let height = track("height", resolve_size(computed.height, context.height_basis));
    let min_width = computed.min_width.map_or(UsedSize::Auto, |spec| {
        track("min-width", resolve_size(spec, context.width_basis))
    });
    let max_width = computed.max_width.map_or(UsedSize::Auto, |spec| {
        track("max-width", resolve_size(spec, context.width_basis))
    });
    let min_height = computed.min_height.map_or(UsedSize::Auto, |spec| {
        track("min-height", resolve_size(spec, context.height_basis))
    });
    let max_height = computed.max_height.map_or(UsedSize::Auto, |spec| {
        track("max-height", resolve_size(spec, context.height_basis))
    });
    let margin = resolve_margins(&computed.margin, context.width_basis, &mut track);

    UsedValues {
        width,
        height,
        min_width: min_width.definite().unwrap_or_default().non_negative(),
        max_width: max_width.definite().map(LayoutUnit::non_negative),
        min_height: min_height.definite().unwrap_or_default().non_negative(),
        max_height: max_height.definite().map(LayoutUnit::non_negative),
        margin,
        padding: px_edges(&computed.padding),
        border: px_edges(&computed.border_width),
        unresolved,
    }
}

fn resolve_margins(
    margin: &MarginEdges,
    basis: Option<LayoutUnit>,
    track: &mut impl FnMut(&'static str, UsedSize) -> UsedSize,
) -> UsedMargins {
    let mut side = |name: &'static str, spec: SizeSpecified| match track(name, resolve_size(spec, basis)) {
        UsedSize::Auto => None,
        UsedSize::Definite(value) => Some(value),
        UsedSize::Indefinite => Some(LayoutUnit::zero()),
    };
    UsedMargins {
        top: side("margin-top", margin.top),
        right: side("margin-right", margin.right),
        bottom: side("margin-bottom", margin.bottom),
        left: side("margin-left", margin.left),
    }
}
