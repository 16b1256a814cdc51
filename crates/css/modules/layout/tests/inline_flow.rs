use anyhow::Context as _;
use css_box::Rect;
use css_layout::{ContainingBlock, LayoutEngine};
use dom::{Document, NodeId};
use style_engine::{ComputedStyle, Display, Edges, SizeSpecified, TextAlign, WhiteSpace};

/// A document whose root holds one block of the given width; returns it with the block.
fn document_with_block(width: f32) -> anyhow::Result<(Document, NodeId)> {
    let mut document = Document::new();
    let root = document.root();
    let block = document.append_element(
        root,
        "div",
        ComputedStyle {
            width: SizeSpecified::Px(width),
            ..ComputedStyle::block()
        },
    )?;
    Ok((document, block))
}

fn lay_out(document: &mut Document) -> anyhow::Result<()> {
    let root = document.root();
    LayoutEngine::default().format_element(document, root, ContainingBlock::from_px(400.0, None))?;
    Ok(())
}

fn block_height(document: &Document, node: NodeId) -> anyhow::Result<i32> {
    let layout_box = document.layout_box(node).context("block has no box")?;
    Ok(layout_box.content.height.to_px() as i32)
}

#[test]
fn text_wraps_at_word_boundaries() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut document, block) = document_with_block(80.0)?;
    let text = document.append_text(block, "the quick brown fox jumps")?;
    lay_out(&mut document)?;

    let fragments = document.text_fragments(text);
    let lines: Vec<_> = fragments.iter().map(|fragment| (fragment.text.as_str(), fragment.rect)).collect();
    assert_eq!(
        lines,
        vec![
            ("the quick", Rect::from_px_i32(0, 0, 72, 16)),
            ("brown fox", Rect::from_px_i32(0, 16, 72, 16)),
            ("jumps", Rect::from_px_i32(0, 32, 40, 16)),
        ]
    );
    assert_eq!(fragments[0].baseline.to_px() as i32, 12);
    assert_eq!(block_height(&document, block)?, 48);
    let text_box = document.layout_box(text).context("text node has no box")?;
    assert_eq!(text_box.content, Rect::from_px_i32(0, 0, 72, 48));
    Ok(())
}

#[test]
fn inline_block_too_wide_gets_its_own_line() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut document, block) = document_with_block(100.0)?;
    let before = document.append_text(block, "ab ")?;
    let atomic = document.append_element(
        block,
        "span",
        ComputedStyle {
            display: Display::InlineBlock,
            width: SizeSpecified::Px(150.0),
            height: SizeSpecified::Px(20.0),
            ..ComputedStyle::default()
        },
    )?;
    let after = document.append_text(block, "cd")?;
    lay_out(&mut document)?;

    assert_eq!(document.text_fragments(before)[0].rect, Rect::from_px_i32(0, 0, 16, 16));
    let atomic_box = document.layout_box(atomic).context("inline-block has no box")?;
    assert_eq!(atomic_box.margin_box(), Rect::from_px_i32(0, 16, 150, 20));
    assert_eq!(document.text_fragments(after)[0].rect, Rect::from_px_i32(0, 40, 16, 16));
    assert_eq!(block_height(&document, block)?, 56);
    Ok(())
}

#[test]
fn line_breaks_end_lines() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut document, block) = document_with_block(200.0)?;
    let first = document.append_text(block, "ab")?;
    let line_break = document.append_element(block, "br", ComputedStyle::default())?;
    document.append_element(block, "br", ComputedStyle::default())?;
    let last = document.append_text(block, "cd")?;
    lay_out(&mut document)?;

    assert_eq!(document.text_fragments(first)[0].rect.y.to_px() as i32, 0);
    assert_eq!(document.text_fragments(last)[0].rect.y.to_px() as i32, 32);
    let break_box = document.layout_box(line_break).context("br has no box")?;
    assert_eq!(break_box.content, Rect::from_px_i32(16, 0, 0, 16));
    assert_eq!(block_height(&document, block)?, 48);
    Ok(())
}

#[test]
fn text_align_shifts_lines() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    for (align, expected_x) in [(TextAlign::Left, 0), (TextAlign::Center, 42), (TextAlign::Right, 84)] {
        let mut document = Document::new();
        let root = document.root();
        let block = document.append_element(
            root,
            "div",
            ComputedStyle {
                width: SizeSpecified::Px(100.0),
                text_align: align,
                ..ComputedStyle::block()
            },
        )?;
        let text = document.append_text(block, "ab")?;
        lay_out(&mut document)?;
        assert_eq!(document.text_fragments(text)[0].rect.x.to_px() as i32, expected_x, "{align:?}");
    }
    Ok(())
}

#[test]
fn preformatted_text_keeps_spaces_and_newlines() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let block = document.append_element(
        root,
        "pre",
        ComputedStyle {
            width: SizeSpecified::Px(20.0),
            white_space: WhiteSpace::Pre,
            ..ComputedStyle::block()
        },
    )?;
    let text = document.append_text(block, "a  b\nc")?;
    lay_out(&mut document)?;

    let fragments = document.text_fragments(text);
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].text, "a  b");
    assert_eq!(fragments[0].rect, Rect::from_px_i32(0, 0, 32, 16));
    assert_eq!(fragments[1].text, "c");
    assert_eq!(fragments[1].rect.y.to_px() as i32, 16);
    Ok(())
}

#[test]
fn nowrap_overflows_instead_of_breaking() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let block = document.append_element(
        root,
        "div",
        ComputedStyle {
            width: SizeSpecified::Px(40.0),
            white_space: WhiteSpace::Nowrap,
            ..ComputedStyle::block()
        },
    )?;
    let text = document.append_text(block, "aaa   bbb ccc")?;
    lay_out(&mut document)?;

    let fragments = document.text_fragments(text);
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text, "aaa bbb ccc");
    assert_eq!(fragments[0].rect.width.to_px() as i32, 88);
    assert_eq!(block_height(&document, block)?, 16);
    Ok(())
}

#[test]
fn inline_padding_offsets_content() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut document, block) = document_with_block(200.0)?;
    let span = document.append_element(
        block,
        "span",
        ComputedStyle {
            padding: Edges {
                left: 4.0,
                right: 4.0,
                ..Edges::default()
            },
            ..ComputedStyle::default()
        },
    )?;
    let inner = document.append_text(span, "ab")?;
    let after = document.append_text(block, "cd")?;
    lay_out(&mut document)?;

    assert_eq!(document.text_fragments(inner)[0].rect, Rect::from_px_i32(4, 0, 16, 16));
    assert_eq!(document.text_fragments(after)[0].rect.x.to_px() as i32, 24);
    let span_box = document.layout_box(span).context("span has no box")?;
    assert_eq!(span_box.content, Rect::from_px_i32(4, 0, 16, 16));
    assert_eq!(span_box.padding_box(), Rect::from_px_i32(0, 0, 24, 16));
    Ok(())
}

#[test]
fn white_space_between_blocks_is_dropped() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut document, block) = document_with_block(200.0)?;
    let blank = document.append_text(block, "  \n ")?;
    let child = document.append_element(
        block,
        "div",
        ComputedStyle {
            height: SizeSpecified::Px(10.0),
            ..ComputedStyle::block()
        },
    )?;
    lay_out(&mut document)?;

    assert!(document.layout_box(blank).is_none());
    assert!(document.text_fragments(blank).is_empty());
    let child_box = document.layout_box(child).context("child has no box")?;
    assert_eq!(child_box.content.y.to_px() as i32, 0);
    assert_eq!(block_height(&document, block)?, 10);
    Ok(())
}

#[test]
fn stats_count_lines_and_runs() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut document, block) = document_with_block(80.0)?;
    document.append_text(block, "the quick brown fox jumps")?;
    let root = document.root();
    let stats =
        LayoutEngine::default().format_element(&mut document, root, ContainingBlock::from_px(400.0, None))?;

    assert_eq!(stats.line_boxes, 3);
    assert_eq!(stats.text_runs, 3);
    assert_eq!(stats.floats_placed, 0);
    assert!(stats.arena_chunks_reused >= 2);
    Ok(())
}
