use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use css_layout::{ContainingBlock, LayoutEngine};
use dom::{Document, NodeId};
use log::error;
use style_engine::{ComputedStyle, Display, Float, SizeSpecified};

const PARAGRAPH: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                         tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam.";

/// `<body>` with `paragraphs` blocks of wrapped text.
fn build_text_page(paragraphs: usize) -> anyhow::Result<Document> {
    let mut document = Document::new();
    let body = document.append_element(document.root(), "body", ComputedStyle::block())?;
    for _ in 0..paragraphs {
        let paragraph = document.append_element(body, "p", ComputedStyle::block())?;
        document.append_text(paragraph, PARAGRAPH)?;
    }
    Ok(document)
}

/// Paragraphs interleaved with floats and inline-blocks, which need shrink-to-fit passes.
fn build_mixed_page(sections: usize) -> anyhow::Result<Document> {
    let mut document = Document::new();
    let body = document.append_element(document.root(), "body", ComputedStyle::block())?;
    for index in 0..sections {
        let section = document.append_element(body, "section", ComputedStyle::block())?;
        let side = if index % 2 == 0 { Float::Left } else { Float::Right };
        let aside = document.append_element(
            section,
            "aside",
            ComputedStyle {
                float: side,
                ..ComputedStyle::block()
            },
        )?;
        document.append_text(aside, "sidebar note")?;
        document.append_text(section, PARAGRAPH)?;
        append_badge(&mut document, section)?;
        document.append_text(section, PARAGRAPH)?;
    }
    Ok(document)
}

fn append_badge(document: &mut Document, parent: NodeId) -> anyhow::Result<()> {
    let badge = document.append_element(
        parent,
        "span",
        ComputedStyle {
            display: Display::InlineBlock,
            width: SizeSpecified::Px(60.0),
            ..ComputedStyle::default()
        },
    )?;
    document.append_text(badge, "new")?;
    Ok(())
}

fn bench_page(criterion: &mut Criterion, name: &str, built: anyhow::Result<Document>) {
    let mut document = match built {
        Ok(document) => document,
        Err(build_error) => {
            error!("[BENCH] could not build {name}: {build_error:#}");
            return;
        }
    };
    let engine = LayoutEngine::default();
    let root = document.root();
    let containing_block = ContainingBlock::from_px(800.0, None);
    criterion.bench_function(name, |bencher| {
        bencher.iter(|| {
            let stats = engine.format_element(&mut document, root, containing_block);
            black_box(stats.map(|done| done.line_boxes).ok());
        });
    });
}

fn bench_layout_baseline(criterion: &mut Criterion) {
    bench_page(criterion, "layout_text_paragraphs_100", build_text_page(100));
    bench_page(criterion, "layout_mixed_sections_50", build_mixed_page(50));
}

criterion_group!(layout_benches, bench_layout_baseline);
criterion_main!(layout_benches);
