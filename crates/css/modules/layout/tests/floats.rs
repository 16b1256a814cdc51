use anyhow::Context as _;
use css_box::Rect;
use css_layout::{ContainingBlock, LayoutEngine};
use dom::{Document, NodeId};
use style_engine::{Clear, ComputedStyle, Display, Float, Overflow, SizeSpecified};

fn floated(float: Float, width: f32, height: f32) -> ComputedStyle {
    ComputedStyle {
        float,
        width: SizeSpecified::Px(width),
        height: SizeSpecified::Px(height),
        ..ComputedStyle::block()
    }
}

fn lay_out(document: &mut Document, width: f32) -> anyhow::Result<()> {
    let root = document.root();
    LayoutEngine::default().format_element(document, root, ContainingBlock::from_px(width, None))?;
    Ok(())
}

fn margin_box(document: &Document, node: NodeId) -> anyhow::Result<Rect> {
    Ok(document
        .layout_box(node)
        .with_context(|| format!("node {node} has no box"))?
        .margin_box())
}

#[test]
fn lines_shorten_beside_a_left_float() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let float = document.append_element(root, "div", floated(Float::Left, 50.0, 40.0))?;
    let text = document.append_text(root, "hello")?;
    lay_out(&mut document, 200.0)?;

    assert_eq!(margin_box(&document, float)?, Rect::from_px_i32(0, 0, 50, 40));
    assert_eq!(document.text_fragments(text)[0].rect, Rect::from_px_i32(50, 0, 40, 16));
    assert_eq!(margin_box(&document, root)?.height.to_px() as i32, 40);
    Ok(())
}

#[test]
fn right_float_hugs_the_right_edge() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let float = document.append_element(root, "div", floated(Float::Right, 50.0, 40.0))?;
    let text = document.append_text(root, "hello")?;
    lay_out(&mut document, 200.0)?;

    assert_eq!(margin_box(&document, float)?, Rect::from_px_i32(150, 0, 50, 40));
    assert_eq!(document.text_fragments(text)[0].rect.x.to_px() as i32, 0);
    Ok(())
}

#[test]
fn floats_on_one_side_stack_horizontally() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let first = document.append_element(root, "div", floated(Float::Left, 80.0, 30.0))?;
    let second = document.append_element(root, "div", floated(Float::Left, 80.0, 20.0))?;
    let third = document.append_element(root, "div", floated(Float::Left, 80.0, 10.0))?;
    lay_out(&mut document, 200.0)?;

    assert_eq!(margin_box(&document, first)?, Rect::from_px_i32(0, 0, 80, 30));
    assert_eq!(margin_box(&document, second)?, Rect::from_px_i32(80, 0, 80, 20));
    // No room beside the first two; it drops below the shorter one.
    assert_eq!(margin_box(&document, third)?, Rect::from_px_i32(80, 20, 80, 10));
    Ok(())
}

#[test]
fn plain_block_does_not_contain_its_floats() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let plain = document.append_element(root, "div", ComputedStyle::block())?;
    document.append_element(plain, "div", floated(Float::Left, 50.0, 40.0))?;
    document.append_text(plain, "hello")?;
    let clipped = document.append_element(
        root,
        "div",
        ComputedStyle {
            overflow: Overflow::Hidden,
            ..ComputedStyle::block()
        },
    )?;
    document.append_element(clipped, "div", floated(Float::Left, 50.0, 40.0))?;
    document.append_text(clipped, "hello")?;
    lay_out(&mut document, 200.0)?;

    assert_eq!(margin_box(&document, plain)?.height.to_px() as i32, 16);
    let clipped_box = margin_box(&document, clipped)?;
    assert_eq!(clipped_box.y.to_px() as i32, 16);
    assert_eq!(clipped_box.height.to_px() as i32, 40);
    Ok(())
}

#[test]
fn clearance_moves_block_below_floats() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    document.append_element(root, "div", floated(Float::Left, 50.0, 40.0))?;
    let beside = document.append_element(
        root,
        "div",
        ComputedStyle {
            height: SizeSpecified::Px(10.0),
            ..ComputedStyle::block()
        },
    )?;
    let cleared = document.append_element(
        root,
        "div",
        ComputedStyle {
            clear: Clear::Left,
            height: SizeSpecified::Px(10.0),
            ..ComputedStyle::block()
        },
    )?;
    let ignores_right = document.append_element(
        root,
        "div",
        ComputedStyle {
            clear: Clear::Right,
            height: SizeSpecified::Px(10.0),
            ..ComputedStyle::block()
        },
    )?;
    lay_out(&mut document, 200.0)?;

    assert_eq!(margin_box(&document, beside)?, Rect::from_px_i32(0, 0, 200, 10));
    assert_eq!(margin_box(&document, cleared)?, Rect::from_px_i32(0, 40, 200, 10));
    assert_eq!(margin_box(&document, ignores_right)?.y.to_px() as i32, 50);
    Ok(())
}

#[test]
fn float_after_text_waits_for_the_line_when_it_does_not_fit() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let text = document.append_text(root, "aaaaaaaaaaaaaaaaaaaa")?;
    let float = document.append_element(root, "div", floated(Float::Left, 50.0, 20.0))?;
    let stats = LayoutEngine::default().format_element(&mut document, root, ContainingBlock::from_px(200.0, None))?;

    assert_eq!(document.text_fragments(text)[0].rect, Rect::from_px_i32(0, 0, 160, 16));
    assert_eq!(margin_box(&document, float)?, Rect::from_px_i32(0, 16, 50, 20));
    assert_eq!(stats.floats_placed, 1);
    Ok(())
}

#[test]
fn float_after_text_joins_the_line_when_it_fits() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let text = document.append_text(root, "abcd ")?;
    let float = document.append_element(root, "div", floated(Float::Left, 50.0, 20.0))?;
    let more = document.append_text(root, "ef")?;
    lay_out(&mut document, 200.0)?;

    assert_eq!(margin_box(&document, float)?, Rect::from_px_i32(0, 0, 50, 20));
    assert_eq!(document.text_fragments(text)[0].rect.x.to_px() as i32, 50);
    assert_eq!(document.text_fragments(more)[0].rect.x.to_px() as i32, 90);
    Ok(())
}

#[test]
fn line_too_narrow_beside_a_float_moves_below_it() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let float = document.append_element(root, "div", floated(Float::Left, 190.0, 40.0))?;
    let text = document.append_text(root, "hello")?;
    lay_out(&mut document, 200.0)?;

    assert_eq!(margin_box(&document, float)?, Rect::from_px_i32(0, 0, 190, 40));
    assert_eq!(document.text_fragments(text)[0].rect, Rect::from_px_i32(0, 40, 40, 16));
    Ok(())
}

#[test]
fn inline_block_too_wide_beside_a_float_moves_below_it() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut document = Document::new();
    let root = document.root();
    let float = document.append_element(root, "div", floated(Float::Left, 150.0, 40.0))?;
    let atomic = document.append_element(
        root,
        "span",
        ComputedStyle {
            display: Display::InlineBlock,
            width: SizeSpecified::Px(80.0),
            height: SizeSpecified::Px(20.0),
            ..ComputedStyle::default()
        },
    )?;
    lay_out(&mut document, 200.0)?;

    assert_eq!(margin_box(&document, float)?, Rect::from_px_i32(0, 0, 150, 40));
    assert_eq!(margin_box(&document, atomic)?, Rect::from_px_i32(0, 40, 80, 20));
    Ok(())
}
