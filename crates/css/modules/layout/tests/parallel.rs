#![cfg(feature = "parallel_layout")]

use anyhow::Context as _;
use css_layout::parallel::{LayoutJob, format_documents};
use css_layout::{ContainingBlock, LayoutEngine};
use dom::Document;
use style_engine::{ComputedStyle, SizeSpecified};

fn document_with_blocks(count: usize) -> anyhow::Result<Document> {
    let mut document = Document::new();
    let root = document.root();
    for _ in 0..count {
        let block = document.append_element(
            root,
            "div",
            ComputedStyle {
                height: SizeSpecified::Px(10.0),
                ..ComputedStyle::block()
            },
        )?;
        document.append_text(block, "parallel")?;
    }
    Ok(document)
}

#[test]
fn documents_are_laid_out_independently() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let engine = LayoutEngine::default();
    let mut jobs = (1..=8)
        .map(|count| {
            document_with_blocks(count)
                .map(|document| LayoutJob::whole_document(document, ContainingBlock::from_px(300.0, None)))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let results = format_documents(&engine, &mut jobs);
    assert_eq!(results.len(), jobs.len());
    for (index, (job, result)) in jobs.iter().zip(results).enumerate() {
        let stats = result?;
        let blocks = index + 1;
        assert_eq!(stats.elements_formatted, 1 + 2 * blocks);
        let root_box = job
            .document
            .layout_box(job.element)
            .context("document root has no box")?;
        assert_eq!(root_box.content.height.to_px() as usize, 10 * blocks);
    }
    Ok(())
}

#[test]
fn parallel_results_match_sequential_layout() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let engine = LayoutEngine::default();
    let containing_block = ContainingBlock::from_px(120.0, None);
    let mut sequential = document_with_blocks(3)?;
    let root = sequential.root();
    engine.format_element(&mut sequential, root, containing_block)?;

    let mut jobs = vec![LayoutJob::whole_document(document_with_blocks(3)?, containing_block)];
    for result in format_documents(&engine, &mut jobs) {
        result?;
    }
    let parallel = &jobs[0].document;
    for (expected, actual) in sequential.descendants(root).zip(parallel.descendants(parallel.root())) {
        assert_eq!(sequential.layout_box(expected), parallel.layout_box(actual));
        assert_eq!(sequential.text_fragments(expected), parallel.text_fragments(actual));
    }
    Ok(())
}
