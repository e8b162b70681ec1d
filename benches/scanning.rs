//! Benchmarks for rendering and filtering.
//!
//! Measures throughput of:
//! - HTML conversion with and without whitespace preservation
//! - Spell-check filtering with every pass enabled
//! - Link enumeration

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use plainlink::censor::{SpellingFilter, SpellingFilterConfig};
use plainlink::render::{HtmlFlags, HtmlRenderer};
use plainlink::scan::find_links;
use plainlink::ScanLimits;

// ============================================================================
// Helper Functions
// ============================================================================

const PARAGRAPH: &str = "Hi all,\n\
> On Monday someone wrote:\n\
> see http://www.kde.org/announcements/ for details\n\
\n\
Thanks! The *new* release is at <ftp://ftp.kde.org/pub/kde/\n stable/>, \
mail bugs to kde-devel@kde.org or visit www.kde.org.  Cheers :-)\n";

/// Builds a message of `paragraphs` repetitions.
fn message(paragraphs: usize) -> String {
    PARAGRAPH.repeat(paragraphs)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for paragraphs in [1, 10, 100] {
        let text = message(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));

        let plain = HtmlRenderer::new();
        group.bench_with_input(BenchmarkId::new("plain", paragraphs), &text, |b, text| {
            b.iter(|| plain.render(black_box(text)));
        });

        let preserving =
            HtmlRenderer::new().with_flags(HtmlFlags::PRESERVE_SPACES | HtmlFlags::HIGHLIGHT_TEXT);
        group.bench_with_input(
            BenchmarkId::new("preserve_highlight", paragraphs),
            &text,
            |b, text| {
                b.iter(|| preserving.render(black_box(text)));
            },
        );
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let config = SpellingFilterConfig::new()
        .with_quote_prefix("> ")
        .with_filter_string("KDE");

    for paragraphs in [1, 10, 100] {
        let text = message(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &text, |b, text| {
            b.iter(|| SpellingFilter::new(black_box(text), &config));
        });
    }

    group.finish();
}

fn bench_find_links(c: &mut Criterion) {
    let text = message(100);
    c.bench_function("find_links_100", |b| {
        b.iter(|| find_links(black_box(&text), ScanLimits::default()));
    });
}

criterion_group!(benches, bench_render, bench_filter, bench_find_links);
criterion_main!(benches);
