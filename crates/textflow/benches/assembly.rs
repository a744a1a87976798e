//! Performance benchmarks for textflow.
//!
//! Benchmarks cover the page pipeline stages over synthetic pages:
//! - Prose: 1 column of 60 lines, each painted as several short events
//! - Columns: 3-column layout of 60 rows plus scattered superscripts
//! - Document: 10 column pages, sequential and (with `parallel`) parallel

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use textflow::{
    AssemblerOptions, BBox, ColorState, Document, ExtractOptions, GlyphEvent, GraphicsState,
    LineLayout, MemorySource, PageInput, PageThread, Point, TextState,
    textflow_core::assemble,
};

// ---------------------------------------------------------------------------
// Synthetic page generators
// ---------------------------------------------------------------------------

fn state(size: f32) -> GraphicsState {
    GraphicsState::new(TextState::new("Helvetica", size).with_space_width(size / 4.0))
        .with_fill(ColorState::rgb(20, 20, 20))
}

/// Event for `text` at `(x, y)` with a half-em advance per character.
fn event(text: &str, x: f64, y: f64, size: f32, char_index: usize) -> GlyphEvent {
    let s = size as f64;
    let width = s / 2.0 * text.chars().count() as f64;
    GlyphEvent::new(
        text,
        Point::new(x, y),
        BBox::new(x, y - 0.2 * s, x + width, y + 0.8 * s),
        state(size),
    )
    .with_char_index(char_index)
}

fn prose_page(lines: usize) -> PageInput {
    let words = ["The", " quick", " brown", " fox", " jumps", " over", " the", " dog."];
    let mut events = Vec::new();
    let mut index = 0;
    for line in 0..lines {
        let y = 760.0 - 12.0 * line as f64;
        let mut x = 72.0;
        for w in words {
            events.push(event(w, x, y, 10.0, index));
            x += 5.0 * w.chars().count() as f64;
            index += w.chars().count();
        }
    }
    PageInput::new(events)
}

fn column_page(rows: usize) -> PageInput {
    let mut events = Vec::new();
    let mut index = 0;
    for row in 0..rows {
        let y = 760.0 - 12.0 * row as f64;
        for col in 0..3 {
            let text = format!("cell {row}-{col}");
            let x = 72.0 + 170.0 * col as f64;
            let width = 5.0 * text.chars().count() as f64;
            events.push(event(&text, x, y, 10.0, index));
            index += text.chars().count();
            if row % 7 == 0 {
                events.push(event("2", x + width + 0.5, y + 4.0, 6.0, index));
                index += 1;
            }
        }
    }
    PageInput::new(events)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_assembly(c: &mut Criterion) {
    let prose = prose_page(60);
    let columns = column_page(60);
    let opts = AssemblerOptions::default();

    let mut group = c.benchmark_group("run_assembly");
    group.bench_function("prose_60lines", |b| {
        b.iter(|| black_box(assemble(&prose.events, &opts).len()));
    });
    group.bench_function("columns_60rows", |b| {
        b.iter(|| black_box(assemble(&columns.events, &opts).len()));
    });
    group.finish();
}

fn bench_line_layout(c: &mut Criterion) {
    let opts = ExtractOptions::default();
    let elements = assemble(&column_page(60).events, &opts.assembler);

    let mut group = c.benchmark_group("line_layout");
    group.bench_function("columns_60rows", |b| {
        b.iter(|| black_box(LineLayout::build(&elements, &opts.lines).groups.len()));
    });
    group.finish();
}

fn bench_page_pipeline(c: &mut Criterion) {
    let opts = ExtractOptions::default();
    let prose = prose_page(60);
    let columns = column_page(60);

    let mut group = c.benchmark_group("page_pipeline");
    group.bench_function("prose_60lines", |b| {
        b.iter(|| black_box(PageThread::build(0, prose.clone(), &opts).text().len()));
    });
    group.bench_function("columns_60rows", |b| {
        b.iter(|| black_box(PageThread::build(0, columns.clone(), &opts).html().len()));
    });
    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let pages = (0..10).map(|_| column_page(60)).collect();
    let doc = Document::open(MemorySource::new(pages)).unwrap();

    let mut group = c.benchmark_group("document");
    group.bench_function("sequential_10page", |b| {
        b.iter(|| {
            for page in doc.pages() {
                black_box(page.unwrap().elements().len());
            }
        });
    });
    #[cfg(feature = "parallel")]
    group.bench_function("parallel_10page", |b| {
        b.iter(|| {
            for page in doc.pages_parallel() {
                black_box(page.unwrap().elements().len());
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_assembly,
    bench_line_layout,
    bench_page_pipeline,
    bench_document
);
criterion_main!(benches);
