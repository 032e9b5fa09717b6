// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use worldline_axis::{AxisWindow, DividerConfig, DividerGenerator};
use worldline_calendar::{PatternFormatter, presets};
use worldline_view::{ScaleLevel, ScaleTable};

fn window(table: &ScaleTable, level: i32, scroll: f64) -> AxisWindow {
    let level = ScaleLevel(level);
    AxisWindow {
        scroll_pixels: scroll,
        scale_level: level,
        time_per_pixel: table.time_per_pixel(level),
        width: 1_600.0,
    }
}

fn bench_dividers(c: &mut Criterion) {
    let mut group = c.benchmark_group("worldline_axis");
    group.sample_size(50);

    let calendar = presets::earth();
    let table = ScaleTable::from_settings(calendar.scale());

    for &level in &[4_i32, 10, 20] {
        group.bench_function(format!("regenerate(level={level})"), |b| {
            let mut axis = DividerGenerator::new(DividerConfig::default());
            let w = window(&table, level, 0.0);
            b.iter(|| {
                axis.regenerate(&calendar, &PatternFormatter, w);
                black_box(axis.len());
            });
        });

        group.bench_function(format!("scroll_incremental(level={level},steps=64)"), |b| {
            b.iter_batched(
                || {
                    let mut axis = DividerGenerator::new(DividerConfig::default());
                    axis.update(&calendar, &PatternFormatter, window(&table, level, 0.0));
                    axis
                },
                |mut axis| {
                    for step in 1..=64 {
                        let scroll = -f64::from(step) * 150.0;
                        black_box(axis.update(
                            &calendar,
                            &PatternFormatter,
                            window(&table, level, scroll),
                        ));
                    }
                    axis
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dividers);
criterion_main!(benches);
