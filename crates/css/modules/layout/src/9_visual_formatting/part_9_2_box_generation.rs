//! Spec: CSS 2.2 §9.2 Controlling box generation
//! Classify each element into the formatter that lays it out.

use dom::DOMNode;
use style_engine::Display;

/// How an element with special content is placed once its size is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialPlacement {
    Block,
    Float,
    Inline,
}

/// The formatter an element is routed to. Computed once per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattingKind {
    /// `display: none`; the subtree gets no geometry.
    Hidden,
    Text,
    /// A `br` element.
    LineBreak,
    Special(SpecialPlacement),
    /// Floated, blockified.
    Float,
    Block,
    InlineBlock,
    Inline,
}

/// Spec: §9.2 and §9.7. Classify `node`.
///
/// Priority: hidden, special content, floats, block-level, inline-block,
/// inline. The element a pass starts from is always formatted as a block.
pub fn classify(node: &DOMNode, is_root: bool) -> FormattingKind {
    if node.is_text() {
        return FormattingKind::Text;
    }
    let style = &node.style;
    if style.display == Display::None {
        return FormattingKind::Hidden;
    }
    if is_root {
        return if node.special.is_some() {
            FormattingKind::Special(SpecialPlacement::Block)
        } else {
            FormattingKind::Block
        };
    }
    if node.special.is_some() {
        let placement = if style.is_floated() {
            SpecialPlacement::Float
        } else if style.display.is_block_level() {
            SpecialPlacement::Block
        } else {
            SpecialPlacement::Inline
        };
        return FormattingKind::Special(placement);
    }
    if style.is_floated() {
        return FormattingKind::Float;
    }
    match style.display {
        Display::Block => FormattingKind::Block,
        Display::InlineBlock => FormattingKind::InlineBlock,
        Display::Inline if node.tag() == Some("br") => FormattingKind::LineBreak,
        Display::Inline | Display::None => FormattingKind::Inline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::{Document, SpecialContent};
    use style_engine::{ComputedStyle, Float};

    /// Hidden wins over everything; special content over floats; floats over display.
    ///
    /// # Panics
    /// Panics if an element is routed to the wrong formatter.
    #[test]
    fn test_classification_priority() {
        let mut document = Document::new();
        let root = document.root();
        let floated_block = document
            .append_element(
                root,
                "div",
                ComputedStyle {
                    float: Float::Left,
                    ..ComputedStyle::block()
                },
            )
            .unwrap();
        let image = document.append_element(root, "img", ComputedStyle::default()).unwrap();
        document
            .set_special(
                image,
                SpecialContent::Image {
                    resource: "a.png".to_owned(),
                },
            )
            .unwrap();
        let hidden = document
            .append_element(
                root,
                "img",
                ComputedStyle {
                    display: Display::None,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        let line_break = document.append_element(root, "br", ComputedStyle::default()).unwrap();
        let span = document.append_element(root, "span", ComputedStyle::default()).unwrap();
        let text = document.append_text(span, "x").unwrap();

        let kind = |id| classify(document.node(id).unwrap(), false);
        assert_eq!(kind(floated_block), FormattingKind::Float);
        assert_eq!(kind(image), FormattingKind::Special(SpecialPlacement::Inline));
        assert_eq!(kind(hidden), FormattingKind::Hidden);
        assert_eq!(kind(line_break), FormattingKind::LineBreak);
        assert_eq!(kind(span), FormattingKind::Inline);
        assert_eq!(kind(text), FormattingKind::Text);
        assert_eq!(classify(document.node(span).unwrap(), true), FormattingKind::Block);
    }
}
