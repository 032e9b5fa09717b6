// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use worldline_layout::{EventInput, LayoutEngine, TimelineLayout};
use worldline_view::ScaleLevel;
use worldline_virtual::{CullConfig, CullView, MarkerCuller};

fn build_layout(n: u32) -> TimelineLayout {
    let events: Vec<EventInput> = (0..n)
        .map(|i| {
            let issued = i64::from(i) * 97;
            let event = EventInput::new(format!("e{i}"), issued);
            if i % 5 == 0 {
                event.revoked(issued + 40_000)
            } else {
                event
            }
        })
        .collect();
    LayoutEngine::default().layout(&events, &[], None)
}

fn view(scroll: f64) -> CullView {
    CullView {
        scroll_pixels: scroll,
        scale_level: ScaleLevel(0),
        time_per_pixel: 1.0,
        width: 1_600.0,
    }
}

fn bench_culling(c: &mut Criterion) {
    let mut group = c.benchmark_group("worldline_virtual");
    group.sample_size(50);

    for &n in &[1_024_u32, 16_384_u32] {
        let layout = build_layout(n);
        group.bench_function(format!("markers_fresh(n={n})"), |b| {
            b.iter_batched(
                || MarkerCuller::new(CullConfig::markers()),
                |mut culler| {
                    culler.update(&layout, view(-50_000.0));
                    black_box(culler)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("markers_scroll(n={n},steps=256)"), |b| {
            b.iter_batched(
                || MarkerCuller::new(CullConfig::markers()),
                |mut culler| {
                    for step in 0..256 {
                        culler.update(&layout, view(-f64::from(step) * 40.0));
                    }
                    black_box(culler)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_culling);
criterion_main!(benches);
