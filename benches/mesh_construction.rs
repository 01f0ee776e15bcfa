//! Benchmarks for scene construction and the circumcircle solver.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use meshlight::core::Scene;
use meshlight::geometry::{Point, circumcircle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

fn bench_scene_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_generation");
    for &field_vertices in &[20_usize, 80, 160] {
        group.bench_with_input(
            BenchmarkId::from_parameter(field_vertices),
            &field_vertices,
            |b, &field_vertices| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(7);
                    Scene::generate(1280.0, 720.0, black_box(field_vertices), &mut rng).unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_circumcircle(c: &mut Criterion) {
    let a = Point::new(12.5, 80.0);
    let b = Point::new(512.0, 33.0);
    let p = Point::new(300.0, 640.0);
    c.bench_function("circumcircle", |bench| {
        bench.iter(|| circumcircle(black_box(&a), black_box(&b), black_box(&p)).unwrap());
    });
}

criterion_group!(benches, bench_scene_generation, bench_circumcircle);
criterion_main!(benches);
