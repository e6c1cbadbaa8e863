use criterion::{black_box, criterion_group, criterion_main, Criterion};
use motion_planner::{Planner, Settings, Stepper};

struct NullStepper;

impl Stepper for NullStepper {
    fn synchronize(&mut self) {}
    fn sleep_until_progress(&mut self) {}
}

fn benchmark_plan_buffer_line(c: &mut Criterion) {
    let settings = Settings::new(1200.0, 8.0, [80.0, 80.0, 400.0]).unwrap();
    let mut stepper = NullStepper;

    c.bench_function("plan_buffer_line_fills_a_32_block_queue", |b| {
        b.iter(|| {
            let mut planner: Planner<32> = Planner::new(settings);
            for i in 0..31 {
                let dx = 800 + (i % 5) * 10;
                planner.plan_buffer_line(
                    black_box(dx),
                    black_box(i % 3),
                    black_box(0),
                    black_box(1_000_000),
                    black_box(10.0),
                    &mut stepper,
                );
            }
            black_box(&planner);
        })
    });
}

fn benchmark_recalculate(c: &mut Criterion) {
    let settings = Settings::new(1200.0, 8.0, [80.0, 80.0, 400.0]).unwrap();
    let mut stepper = NullStepper;
    let mut planner: Planner<32> = Planner::new(settings);
    for i in 0..31 {
        planner.plan_buffer_line(800 + (i % 5), i % 3, 0, 1_000_000, 10.0, &mut stepper);
    }

    c.bench_function("recalculate_over_a_full_queue", |b| {
        b.iter(|| {
            planner.recalculate();
            black_box(&planner);
        })
    });
}

criterion_group!(benches, benchmark_plan_buffer_line, benchmark_recalculate);
criterion_main!(benches);
