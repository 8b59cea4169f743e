//! Benchmarks for unnotion parsing and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic block lists mixing every supported type.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use unnotion::model::{Annotations, Block, BlockRecord, CodePayload, Color, ImagePayload, Span};
use unnotion::render::{self, RenderOptions};
use unnotion::Page;

/// Creates a synthetic page with the given number of blocks.
fn create_test_page(block_count: usize) -> Page {
    let styled = Span::text("styled").with_annotations(Annotations {
        bold: true,
        italic: true,
        color: Color::parse("blue_background"),
        ..Default::default()
    });

    let mut page = Page::new();
    for i in 0..block_count {
        let id = format!("b{}", i);
        let block = match i % 8 {
            0 => Block::heading(&id, 2, vec![Span::text(format!("Section {}", i))]),
            1 | 2 => Block::bulleted(&id, vec![Span::text("item "), styled.clone()]),
            3 => Block::numbered(&id, vec![Span::text("step").with_link("https://example.com")]),
            4 => Block::quote(&id, vec![Span::italic("quoted text")]),
            5 => Block::code(
                &id,
                CodePayload::new(vec![Span::text("fn main() {}")]).with_language("rust"),
            ),
            6 => Block::image(
                &id,
                ImagePayload::external("https://example.com/a.png")
                    .with_caption(vec![Span::text("caption")]),
            ),
            _ => {
                page.add_record(BlockRecord::Partial { id: id.clone() });
                Block::paragraph(&id, vec![Span::text("Benchmark paragraph content.")])
            }
        };
        page.add_block(block);
    }
    page
}

/// Creates block list JSON with the given number of paragraphs.
fn create_test_json(block_count: usize) -> String {
    let blocks: Vec<String> = (0..block_count)
        .map(|i| {
            format!(
                r#"{{"object":"block","id":"b{}","type":"paragraph","paragraph":{{"rich_text":[{{"type":"text","plain_text":"Paragraph {}","annotations":{{"bold":true,"color":"red"}}}}]}}}}"#,
                i, i
            )
        })
        .collect();
    format!(r#"{{"object":"list","results":[{}],"has_more":false}}"#, blocks.join(","))
}

/// Benchmark input shape detection.
fn bench_format_detection(c: &mut Criterion) {
    let json = create_test_json(10);
    let non_json = b"Not JSON at all, just random text content";

    c.bench_function("detect_list_response", |b| {
        b.iter(|| unnotion::detect_format_from_bytes(black_box(json.as_bytes())).is_ok());
    });

    c.bench_function("detect_non_json", |b| {
        b.iter(|| unnotion::detect_format_from_bytes(black_box(non_json)).is_err());
    });
}

/// Benchmark JSON parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for block_count in [10, 100, 1000].iter() {
        let json = create_test_json(*block_count);

        group.bench_function(format!("{}_blocks", block_count), |b| {
            b.iter(|| unnotion::parse_str(black_box(&json)).is_ok());
        });
    }

    group.finish();
}

/// Benchmark tree building and rendering.
fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let page = create_test_page(1000);
    let options = RenderOptions::default();

    group.bench_function("build", |b| {
        b.iter(|| render::build(black_box(&page.blocks)));
    });
    group.bench_function("html", |b| {
        b.iter(|| render::to_html(black_box(&page), &options));
    });
    group.bench_function("markdown", |b| {
        b.iter(|| render::to_markdown(black_box(&page), &options));
    });

    group.finish();
}

criterion_group!(benches, bench_format_detection, bench_parsing, bench_rendering);
criterion_main!(benches);
