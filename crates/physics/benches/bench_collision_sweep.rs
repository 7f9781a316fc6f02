use std::hint::black_box;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tickworld_events::EventBus;
use tickworld_kernel::{SimObject, State, World};
use tickworld_physics::{overlapping_pairs, CollisionTask, CollisionTracker};
use tickworld_scheduler::Task;
use tickworld_spatial::{Location, Volume};

fn make_world(object_count: usize, spacing: f64) -> World {
    let mut world = World::new("bench");
    let side = (object_count as f64).sqrt().ceil() as usize;
    for i in 0..object_count {
        let x = (i % side) as f64 * spacing;
        let z = (i / side) as f64 * spacing;
        let object = SimObject::transient(Location::new(world.id(), x, 0.0, z))
            .with_volume(Volume::cube(1.0).expect("unit cube"));
        world.add_object(object).expect("fresh object");
    }
    world
}

fn bench_overlapping_pairs(object_count: usize, spacing: f64, iterations: usize) {
    let world = make_world(object_count, spacing);

    let start = Instant::now();
    let mut found = 0;
    for _ in 0..iterations {
        found = black_box(overlapping_pairs(black_box(&world))).len();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  overlapping pairs ({object_count} objects, spacing {spacing}, {iterations} iters): {per_iter:?}/iter, {found} pairs, total {elapsed:?}"
    );
}

fn bench_tracker_update(object_count: usize, iterations: usize) {
    let world = make_world(object_count, 0.9);
    let pairs = overlapping_pairs(&world);
    let mut tracker = CollisionTracker::new();

    let start = Instant::now();
    for i in 0..iterations {
        // Alternate between full contact and none so every update does work.
        let current = if i % 2 == 0 { pairs.clone() } else { Default::default() };
        let _ = black_box(tracker.update(world.id(), current));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  tracker update ({object_count} objects, {} pairs, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        pairs.len()
    );
}

fn bench_collision_task(object_count: usize, iterations: usize) {
    let mut state = State::new();
    state
        .add_world(make_world(object_count, 0.9))
        .expect("fresh world");
    let mut task = CollisionTask::new(state.shared(), Arc::new(EventBus::new()));
    let tick = Duration::from_millis(15);

    let start = Instant::now();
    for _ in 0..iterations {
        task.execute(black_box(tick)).expect("collision sweep");
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  collision task ({object_count} objects, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== tickworld collision benchmarks ===\n");

    println!("[overlapping_pairs]");
    bench_overlapping_pairs(100, 4.0, 1000);
    bench_overlapping_pairs(400, 4.0, 200);
    bench_overlapping_pairs(400, 0.9, 200);
    bench_overlapping_pairs(1000, 0.9, 20);
    println!();

    println!("[tracker_update]");
    bench_tracker_update(100, 1000);
    bench_tracker_update(1000, 100);
    println!();

    println!("[collision_task]");
    bench_collision_task(100, 1000);
    bench_collision_task(400, 100);
    println!();

    println!("=== done ===");
}
