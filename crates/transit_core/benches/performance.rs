use bevy_ecs::prelude::{Entity, World};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use transit_core::ecs::{Bus, BusStatus, SignalMode};
use transit_core::matching;
use transit_core::scenario::{LineRoute, ScenarioParams};
use transit_core::simulation::Simulation;
use transit_core::test_helpers::test_stops;
use transit_core::topology::Route;

fn bench_assignment(c: &mut Criterion) {
    let mut world = World::new();
    let route: Vec<usize> = (0..40).collect();
    for i in 0..1_000u64 {
        world.spawn(Bus {
            line: 1,
            route: Route::new(route.clone()),
            position: (i as usize) % 40,
            countdown_secs: (i * 7) % 90,
            status: BusStatus::Running,
        });
    }
    let mut query = world.query::<(Entity, &Bus)>();
    let mut fleet: Vec<(Entity, &Bus)> = query.iter(&world).collect();
    fleet.sort_by_key(|&(entity, _)| entity);

    c.bench_function("assign_1000_buses", |b| {
        b.iter(|| matching::assign(black_box(17), black_box(1), &fleet, 90, 30, 0))
    });
}

fn bench_tick(c: &mut Criterion) {
    let stop_count = 40;
    let params = ScenarioParams::default()
        .with_topology(
            test_stops(stop_count),
            (1..=8)
                .map(|line| LineRoute::new(line, (0..stop_count).collect()))
                .collect(),
        )
        .with_buses_per_line(25)
        .with_seed(1);
    let mut sim = Simulation::new(params).expect("scenario");
    for i in 0..100 {
        let stop = format!("Stop {}", i % stop_count);
        sim.send_signal(&stop, (i % 8) as u32 + 1, SignalMode::Generic)
            .expect("signal");
    }

    c.bench_function("tick_200_buses_100_signals", |b| {
        b.iter(|| sim.run_for(black_box(1)))
    });
}

criterion_group!(benches, bench_assignment, bench_tick);
criterion_main!(benches);
