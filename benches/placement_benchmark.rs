//! Benchmarks for running content placement.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio::engine::{build_descriptors, resolve_numbers};
use folio::{Band, ContentTemplate, Layout, NumberingStart, PlacementOptions, Theme};

/// Creates a book layout with the given number of body pages.
fn create_test_layout(body_pages: usize) -> Layout {
    Layout::parse(&format!("title,toc*2,body*{},back*4", body_pages)).unwrap()
}

/// Benchmark the sequential numbering pass.
fn bench_numbering(c: &mut Criterion) {
    let layout = create_test_layout(1000);
    let descriptors = build_descriptors(&layout.pages);

    c.bench_function("resolve_numbers_1000", |b| {
        b.iter(|| resolve_numbers(black_box(NumberingStart::Toc), black_box(&descriptors)));
    });
}

/// Benchmark the full pipeline at various sizes.
fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    let theme = Theme::default()
        .with_band_content(Band::Header, ContentTemplate::center("{document-title}"));
    let options = PlacementOptions::new().with_title("Benchmark Document");

    for body_pages in [10, 100, 1000].iter() {
        let layout = create_test_layout(*body_pages);

        group.bench_function(format!("{}_pages", body_pages), |b| {
            b.iter(|| folio::place(black_box(&layout), &theme, &options));
        });
    }

    group.finish();
}

/// Benchmark template parsing.
fn bench_template_parsing(c: &mut Criterion) {
    c.bench_function("template_parsing", |b| {
        b.iter(|| ContentTemplate::right(black_box("{document-title} | {page-number} of {page-count}")));
    });
}

criterion_group!(benches, bench_numbering, bench_placement, bench_template_parsing);
criterion_main!(benches);
