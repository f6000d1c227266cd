//! Collision engine benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench collision
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench collision -- broadphase

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::Vec2;

use clash2d::physics::{broadphase, narrowphase};
use clash2d::{
    BoundsGroup, Collider, CollisionConfig, CollisionEngine, Motion, Player, Projectile,
    StaticObstacle,
};

// ---------------------------------------------------------------------------
// Scene setup
// ---------------------------------------------------------------------------

/// Grid of moving circles, spaced so neighbours overlap their padded
/// broad-phase circles but rarely their shapes.
fn setup_crowd(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let side = (n as f32).sqrt().ceil() as usize;
    for i in 0..n {
        let pos = Vec2::new((i % side) as f32 * 60.0, (i / side) as f32 * 60.0);
        let vel = Vec2::new(((i % 7) as f32 - 3.0) * 20.0, ((i % 5) as f32 - 2.0) * 20.0);
        world.spawn((
            Motion::from_position(pos).with_velocity(vel),
            Collider::circle(12.0),
        ));
    }
    world
}

/// Crowd plus a ring of static wall segments sharing one bounds group.
fn setup_walled_scene(n: usize) -> hecs::World {
    let mut world = setup_crowd(n);
    let extent = (n as f32).sqrt().ceil() * 60.0;
    let group = BoundsGroup {
        center: Vec2::splat(extent * 0.5),
        half_extents: Vec2::splat(extent * 0.5 + 40.0),
    };
    for i in 0..20 {
        let along = extent * (i as f32 / 19.0);
        world.spawn((
            Motion::from_position(Vec2::new(along, -40.0)),
            Collider::rect(Vec2::new(30.0, 10.0)),
            StaticObstacle,
            group,
        ));
    }
    world
}

/// Crowd with a player and a stream of projectiles mixed in.
fn setup_combat_scene(n: usize) -> hecs::World {
    let mut world = setup_crowd(n);
    world.spawn((
        Motion::from_position(Vec2::new(-50.0, -50.0)).with_velocity(Vec2::new(120.0, 80.0)),
        Collider::circle(16.0),
        Player,
    ));
    for i in 0..(n / 10).max(1) {
        world.spawn((
            Motion::from_position(Vec2::new(-30.0, i as f32 * 25.0))
                .with_velocity(Vec2::new(900.0, 0.0)),
            Collider::circle(4.0),
            Projectile,
        ));
    }
    world
}

fn regular_polygon(sides: usize, radius: f32, center: Vec2) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = std::f32::consts::TAU * (i as f32) / (sides as f32);
            center + radius * Vec2::new(angle.cos(), angle.sin())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Broadphase
// ---------------------------------------------------------------------------

fn bench_broadphase(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("broadphase/collect");
        for &n in &[100, 500, 1000, 2000] {
            let world = setup_crowd(n);
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| broadphase::collect_dynamic(&world));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("broadphase/pair_cull");
        for &n in &[100, 500, 1000] {
            let world = setup_crowd(n);
            let entries = broadphase::collect_dynamic(&world);
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| {
                    let mut survivors = 0usize;
                    for i in 0..entries.len() {
                        for j in (i + 1)..entries.len() {
                            if broadphase::circles_may_overlap(
                                entries[i].center,
                                entries[i].radius,
                                entries[j].center,
                                entries[j].radius,
                                100.0,
                            ) {
                                survivors += 1;
                            }
                        }
                    }
                    survivors
                });
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Narrowphase
// ---------------------------------------------------------------------------

fn bench_narrowphase(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("narrowphase/circle_circle");
        group.bench_function("intersecting", |b| {
            b.iter(|| narrowphase::circle_circle(Vec2::ZERO, 5.0, Vec2::new(8.0, 0.0), 5.0));
        });
        group.bench_function("separated", |b| {
            b.iter(|| narrowphase::circle_circle(Vec2::ZERO, 5.0, Vec2::new(25.0, 0.0), 5.0));
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/circle_polygon");
        let square = regular_polygon(4, 10.0, Vec2::ZERO);
        group.bench_function("intersecting", |b| {
            b.iter(|| narrowphase::circle_polygon(Vec2::new(12.0, 0.0), 5.0, &square));
        });
        group.bench_function("separated", |b| {
            b.iter(|| narrowphase::circle_polygon(Vec2::new(40.0, 0.0), 5.0, &square));
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/polygon_polygon");
        for &sides in &[4usize, 8, 16, 32] {
            let a = regular_polygon(sides, 10.0, Vec2::ZERO);
            let b_hit = regular_polygon(sides, 10.0, Vec2::new(15.0, 0.0));
            let b_miss = regular_polygon(sides, 10.0, Vec2::new(50.0, 0.0));
            group.bench_with_input(
                BenchmarkId::new("intersecting", sides),
                &sides,
                |bch, _| {
                    bch.iter(|| narrowphase::polygon_polygon(&a, &b_hit));
                },
            );
            group.bench_with_input(BenchmarkId::new("separated", sides), &sides, |bch, _| {
                bch.iter(|| narrowphase::polygon_polygon(&a, &b_miss));
            });
        }
        group.finish();
    }

    {
        // The concave guard dominates polygon pairs whose SAT overlaps are
        // all narrow; measure it on an L-shape against a probe square.
        let mut group = c.benchmark_group("narrowphase/concave_guard");
        let l_shape = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(40.0, 0.0),
            Vec2::new(40.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 40.0),
            Vec2::new(0.0, 40.0),
        ];
        let in_notch = regular_polygon(4, 4.0, Vec2::new(25.0, 25.0));
        let on_arm = regular_polygon(4, 4.0, Vec2::new(25.0, 8.0));
        group.bench_function("notch_rejected", |b| {
            b.iter(|| narrowphase::polygon_polygon(&l_shape, &in_notch));
        });
        group.bench_function("arm_confirmed", |b| {
            b.iter(|| narrowphase::polygon_polygon(&l_shape, &on_arm));
        });
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Full step
// ---------------------------------------------------------------------------

fn bench_step(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("step/crowd");
        group.sample_size(30);
        for &n in &[50, 100, 500, 1000] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || {
                        (
                            setup_crowd(n),
                            CollisionEngine::new(CollisionConfig::default()),
                        )
                    },
                    |(mut world, mut engine)| {
                        engine.step(&mut world, 1.0 / 60.0);
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("step/walled");
        group.sample_size(30);
        for &n in &[100, 500] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || {
                        (
                            setup_walled_scene(n),
                            CollisionEngine::new(CollisionConfig::default()),
                        )
                    },
                    |(mut world, mut engine)| {
                        engine.step(&mut world, 1.0 / 60.0);
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("step/combat_sustained_10steps");
        group.sample_size(20);
        for &n in &[100, 500] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || {
                        (
                            setup_combat_scene(n),
                            CollisionEngine::new(CollisionConfig::default()),
                        )
                    },
                    |(mut world, mut engine)| {
                        for _ in 0..10 {
                            engine.step(&mut world, 1.0 / 60.0);
                        }
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_broadphase, bench_narrowphase, bench_step);
criterion_main!(benches);
