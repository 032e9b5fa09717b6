// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use worldline_layout::{EventInput, LayoutEngine, TrackInput};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn below(&mut self, upper: u32) -> u32 {
        self.next_u32() % upper.max(1)
    }
}

fn build_events(n: u32, tracks: u32, seed: u64) -> Vec<EventInput> {
    let mut rng = Lcg(seed);
    (0..n)
        .map(|i| {
            let issued = i64::from(rng.below(1_000_000));
            let mut event = EventInput::new(format!("e{i}"), issued);
            if tracks > 0 {
                event = event.on_track(format!("t{}", rng.below(tracks)));
            }
            for d in 0..rng.below(4) {
                let at = issued + i64::from(rng.below(50_000));
                event = event.with_delta(format!("d{d}"), at);
            }
            if rng.below(3) == 0 {
                event = event.revoked(issued + i64::from(rng.below(200_000)));
            }
            event
        })
        .collect()
}

fn build_tracks(n: u32) -> Vec<TrackInput> {
    (0..n)
        .map(|i| TrackInput::new(format!("t{i}"), format!("Track {i}"), f64::from(i)))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("worldline_layout");
    group.sample_size(30);

    for &(n, tracks) in &[(256_u32, 0_u32), (4_096_u32, 0_u32), (4_096_u32, 16_u32)] {
        let events = build_events(n, tracks, 0x5EED_0000_0000_0001);
        let track_inputs = build_tracks(tracks);
        group.bench_function(format!("layout(n={n},tracks={tracks})"), |b| {
            b.iter_batched(
                LayoutEngine::default,
                |mut engine| black_box(engine.layout(&events, &track_inputs, None)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
