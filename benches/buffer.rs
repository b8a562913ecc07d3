//! Text buffer editing and layout benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use cubecode::backend::headless::{FixedFont, RecordingCanvas};
use cubecode::{Rect, TextBuffer};
use std::hint::black_box;
use std::rc::Rc;

fn build_source(lines: usize) -> String {
    let line = "if x == y then Color = red else Color = 0x102030FF end -- héllo\n";
    let mut text = String::with_capacity(lines * line.len());
    for _ in 0..lines {
        text.push_str(line);
    }
    text
}

fn new_buffer() -> TextBuffer {
    let font = Rc::new(FixedFont::new(20.0, 10.0, 20.0));
    TextBuffer::new(font, Rect::new(0.0, 0.0, 800.0, 600.0))
}

fn bench_insert_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_insert_text");
    for lines in [100, 1_000] {
        let source = build_source(lines);
        group.bench_with_input(BenchmarkId::new("lines", lines), &source, |b, src| {
            b.iter_batched(
                new_buffer,
                |mut buffer| {
                    buffer.insert_text(black_box(src));
                    black_box(buffer);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_typing(c: &mut Criterion) {
    let source = build_source(500);
    c.bench_function("buffer_type_100_chars_mid_buffer", |b| {
        b.iter_batched(
            || {
                let mut buffer = new_buffer();
                buffer.insert_text(&source);
                buffer.move_up(250, false);
                buffer
            },
            |mut buffer| {
                for _ in 0..100 {
                    buffer.insert_codepoint(u32::from('a'));
                }
                black_box(buffer);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_motion(c: &mut Criterion) {
    let source = build_source(1_000);
    let mut buffer = new_buffer();
    buffer.insert_text(&source);
    c.bench_function("buffer_word_motion_20_words", |b| {
        b.iter(|| {
            buffer.jump_to_buffer_top(false);
            black_box(buffer.move_word(black_box(20), false));
        });
    });
}

fn bench_rewrap(c: &mut Criterion) {
    let source = build_source(1_000);
    let mut buffer = new_buffer();
    buffer.insert_text(&source);
    c.bench_function("buffer_toggle_wrap_1k_lines", |b| {
        b.iter(|| {
            buffer.toggle_wrap_lines();
            black_box(buffer.total_height());
        });
    });
}

fn bench_draw(c: &mut Criterion) {
    let source = build_source(1_000);
    let mut buffer = new_buffer();
    buffer.insert_text(&source);
    buffer.set_wrap_lines(true);
    let mut canvas = RecordingCanvas::new();
    c.bench_function("buffer_draw_visible_rows", |b| {
        b.iter(|| {
            canvas.clear();
            buffer.draw(&mut canvas);
            black_box(canvas.commands.len());
        });
    });
}

criterion_group!(
    benches,
    bench_insert_text,
    bench_typing,
    bench_motion,
    bench_rewrap,
    bench_draw
);
criterion_main!(benches);
