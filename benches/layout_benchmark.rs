//! Row layout benchmarks: cold computation versus memoised lookups.
//!
//! A warm pass over an unchanged list should cost a hash lookup per row, independent of
//! body length.
//!
//! Run with: cargo bench --bench layout_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use reviewlist::model::Review;
use reviewlist::state::RowFactory;
use reviewlist::text::CellMeasurer;
use reviewlist::view_state::{MaxLines, ReviewRow, RowLayoutEngine, RowMetrics};

fn make_rows(count: usize) -> (Vec<ReviewRow>, RowFactory) {
    let metrics = RowMetrics::cells();
    let mut factory = RowFactory::new(&metrics, MaxLines::COLLAPSED);
    let rows = (0..count)
        .map(|i| {
            factory.make_row(&Review {
                first_name: "Анна".to_string(),
                last_name: format!("{i}"),
                avatar_url: Some("avatars/0.png".to_string()),
                rating: (i % 5) as i64 + 1,
                text: "Очень вкусно и быстро привезли. ".repeat(1 + i % 12),
                photo_urls: (0..i % 4).map(|p| format!("photos/{p}.png")).collect(),
                created: "5 июля 2024".to_string(),
            })
        })
        .collect();
    (rows, factory)
}

fn engine(factory: &RowFactory, capacity: usize) -> RowLayoutEngine<CellMeasurer> {
    RowLayoutEngine::new(
        CellMeasurer,
        RowMetrics::cells(),
        factory.styles().show_more_label(),
        capacity,
    )
}

fn benchmark_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_layout");

    for count in [100, 1_000] {
        let (rows, factory) = make_rows(count);

        group.bench_with_input(BenchmarkId::new("cold", count), &rows, |b, rows| {
            b.iter(|| {
                let mut engine = engine(&factory, count);
                let total: f64 = rows
                    .iter()
                    .map(|row| engine.compute_layout(row, 80.0).height)
                    .sum();
                black_box(total)
            });
        });

        let mut warm = engine(&factory, count);
        for row in &rows {
            warm.compute_layout(row, 80.0);
        }
        group.bench_with_input(BenchmarkId::new("warm", count), &rows, |b, rows| {
            b.iter(|| {
                let total: f64 = rows
                    .iter()
                    .map(|row| warm.compute_layout(row, 80.0).height)
                    .sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_layout);
criterion_main!(benches);
