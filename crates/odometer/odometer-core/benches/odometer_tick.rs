use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use odometer_core::{Config, ManualClock, NullSurface, OdometerController};

const FRAME: Duration = Duration::from_micros(16_667);

fn cascade_to_rest(c: &mut Criterion) {
    c.bench_function("cascade 9_999_999 -> 10_000_000 to rest", |b| {
        b.iter_batched(
            || {
                let clock = ManualClock::default();
                let mut odo =
                    OdometerController::new(NullSurface, clock.clone(), Config::default())
                        .expect("default config");
                odo.set_target(9_999_999u64).expect("valid target");
                odo.set_target(10_000_000u64).expect("valid target");
                (odo, clock)
            },
            |(mut odo, clock)| {
                while odo.is_animating() {
                    clock.advance(FRAME);
                    black_box(odo.tick());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn steady_ticks(c: &mut Criterion) {
    let clock = ManualClock::default();
    let mut odo = OdometerController::new(NullSurface, clock.clone(), Config::default())
        .expect("default config");
    odo.set_target(0u64).expect("valid target");
    let mut value = 0u64;
    c.bench_function("tick while counting up", |b| {
        b.iter(|| {
            value += 37;
            odo.set_target(value).expect("valid target");
            clock.advance(FRAME);
            black_box(odo.tick());
        })
    });
}

criterion_group!(benches, cascade_to_rest, steady_ticks);
criterion_main!(benches);
