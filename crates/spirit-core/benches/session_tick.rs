use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spirit_core::prelude::*;

fn running_session(obstacles: u32) -> GameSession {
    let config = GameConfig {
        obstacle_speed: 0.001,
        initial_obstacles: obstacles,
        max_obstacles: obstacles,
        ..GameConfig::seeded(42)
    };
    let mut session = GameSession::with_config(config).expect("bench config is valid");
    session.start().expect("fresh session starts");
    session
}

fn bench_tick(c: &mut Criterion) {
    let dt = 1.0 / 60.0;
    let mut group = c.benchmark_group("spirit-core/tick");

    for &n in &[5u32, 10, 100] {
        let mut session = running_session(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| {
                if session.state() != SessionState::Running {
                    session.restart().expect("over session restarts");
                }
                session.push_drag(3.0, -1.0);
                black_box(session.tick(dt));
            })
        });
    }

    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let session = running_session(10);
    c.bench_function("spirit-core/scene", |b| b.iter(|| black_box(session.scene())));
}

criterion_group!(benches, bench_tick, bench_scene);
criterion_main!(benches);
