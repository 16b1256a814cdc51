use serde::{Deserialize, Serialize};

/// Outer display type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    None,
    Block,
    #[default]
    Inline,
    InlineBlock,
}

impl Display {
    /// Block-level boxes participate in a block formatting context.
    pub const fn is_block_level(self) -> bool {
        matches!(self, Self::Block)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Clear {
    #[default]
    None,
    Left,
    Right,
    Both,
}

impl Clear {
    pub const fn clears_left(self) -> bool {
        matches!(self, Self::Left | Self::Both)
    }

    pub const fn clears_right(self) -> bool {
        matches!(self, Self::Right | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    #[default]
    Normal,
    Nowrap,
    Pre,
}

impl WhiteSpace {
    /// Runs of spaces and newlines are folded into one space.
    pub const fn collapses(self) -> bool {
        !matches!(self, Self::Pre)
    }

    /// Lines may break at soft wrap opportunities.
    pub const fn wraps(self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// `line-height` as specified.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineHeight {
    /// Use the font's ascent + descent.
    #[default]
    Normal,
    /// Multiplier of the font size.
    Number(f32),
    Px(f32),
}

/// Edge widths in CSS pixels (padding, border).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeSpecified {
    #[default]
    Auto,
    Px(f32),
    Percent(f32), // 0.0..=1.0
}

impl SizeSpecified {
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Margin edges; unlike padding and border these may be `auto` or percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginEdges {
    pub top: SizeSpecified,
    pub right: SizeSpecified,
    pub bottom: SizeSpecified,
    pub left: SizeSpecified,
}

impl Default for MarginEdges {
    fn default() -> Self {
        Self::uniform(SizeSpecified::Px(0.0))
    }
}

impl MarginEdges {
    pub const fn uniform(value: SizeSpecified) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Resolved style of one element, as consumed by layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub display: Display,
    pub box_sizing: BoxSizing,
    pub width: SizeSpecified,
    pub height: SizeSpecified,
    pub min_width: Option<SizeSpecified>,
    pub max_width: Option<SizeSpecified>,
    pub min_height: Option<SizeSpecified>,
    pub max_height: Option<SizeSpecified>,
    pub margin: MarginEdges,
    pub padding: Edges,
    pub border_width: Edges,
    pub float: Float,
    pub clear: Clear,
    pub overflow: Overflow,
    pub font_size: f32, // px
    pub font_family: String,
    pub line_height: LineHeight,
    pub text_align: TextAlign,
    pub white_space: WhiteSpace,
    /// Replaced content keeps its intrinsic ratio when one axis is auto.
    pub preserve_aspect_ratio: bool,
    /// Size the element to its content even when it is in normal block flow.
    pub shrink_to_fit: bool,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::default(),
            box_sizing: BoxSizing::default(),
            width: SizeSpecified::default(),
            height: SizeSpecified::default(),
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            margin: MarginEdges::default(),
            padding: Edges::default(),
            border_width: Edges::default(),
            float: Float::default(),
            clear: Clear::default(),
            overflow: Overflow::default(),
            font_size: 16.0,
            font_family: String::from("sans-serif"),
            line_height: LineHeight::default(),
            text_align: TextAlign::default(),
            white_space: WhiteSpace::default(),
            preserve_aspect_ratio: true,
            shrink_to_fit: false,
        }
    }
}

impl ComputedStyle {
    /// Initial values for every property, with the inherited ones taken from `parent`.
    pub fn inherit_from(parent: &Self) -> Self {
        Self {
            font_size: parent.font_size,
            font_family: parent.font_family.clone(),
            line_height: parent.line_height,
            text_align: parent.text_align,
            white_space: parent.white_space,
            ..Self::default()
        }
    }

    /// Initial values with `display: block`.
    pub fn block() -> Self {
        Self {
            display: Display::Block,
            ..Self::default()
        }
    }

    pub fn is_floated(&self) -> bool {
        self.float != Float::None
    }

    /// Style for the text of this element: family and size.
    pub fn font(&self) -> FontSpec<'_> {
        FontSpec {
            family: &self.font_family,
            size: self.font_size,
        }
    }
}

/// Borrowed font description handed to text measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec<'style> {
    pub family: &'style str,
    pub size: f32,
}
