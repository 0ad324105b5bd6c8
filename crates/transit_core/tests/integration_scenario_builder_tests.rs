use transit_core::ecs::BusStatus;
use transit_core::scenario::{LineRoute, ScenarioParams};
use transit_core::simulation::Simulation;
use transit_core::test_helpers::{loop_params, test_stops};
use transit_core::topology::TopologyError;

#[test]
fn fleet_spawns_evenly_spaced_with_bounded_countdowns() {
    let mut sim = Simulation::new(
        loop_params(1, 7, 3).with_countdown_bounds(10, 90),
    )
    .expect("scenario");

    let buses = sim.buses();
    assert_eq!(buses.len(), 3);

    let positions: Vec<usize> = buses.iter().map(|bus| bus.position).collect();
    assert_eq!(positions, vec![0, 2, 4]);

    for bus in &buses {
        assert_eq!(bus.line, 1);
        assert_eq!(bus.status, BusStatus::Running);
        assert!((10..=90).contains(&bus.countdown_secs));
    }
}

#[test]
fn same_seed_reproduces_the_same_initial_fleet() {
    let fleet = |seed: u64| {
        let mut sim = Simulation::new(loop_params(1, 7, 4).with_seed(seed)).expect("scenario");
        sim.buses()
            .into_iter()
            .map(|bus| (bus.position, bus.countdown_secs))
            .collect::<Vec<_>>()
    };

    assert_eq!(fleet(7), fleet(7));
}

#[test]
fn invalid_topologies_are_rejected_at_build_time() {
    let out_of_range = ScenarioParams::default()
        .with_topology(test_stops(3), vec![LineRoute::new(1, vec![0, 3])]);
    assert_eq!(
        Simulation::new(out_of_range).unwrap_err(),
        TopologyError::StopIndexOutOfRange {
            line: 1,
            index: 3,
            stop_count: 3
        }
    );

    let empty_route =
        ScenarioParams::default().with_topology(test_stops(3), vec![LineRoute::new(4, vec![])]);
    assert_eq!(
        Simulation::new(empty_route).unwrap_err(),
        TopologyError::EmptyRoute { line: 4 }
    );

    let no_stops = ScenarioParams::default().with_topology(vec![], vec![]);
    assert_eq!(
        Simulation::new(no_stops).unwrap_err(),
        TopologyError::EmptyStopList
    );
}

#[test]
fn default_scenario_matches_the_oulu_topology() {
    let mut sim = Simulation::new(ScenarioParams::default().with_seed(1)).expect("scenario");

    let stops = sim.stops();
    assert_eq!(stops.len(), 7);
    assert_eq!(stops[0].name, "Kaupungintalo");
    assert_eq!(stops[0].name_en, "City Hall");
    assert_eq!(stops[6].name, "Linnanmaa");

    assert_eq!(sim.lines_serving(0), vec![1, 5]);
    assert_eq!(sim.buses().len(), 4, "two buses on each of two lines");
    assert!(sim.is_armed(), "a live fleet keeps time moving");
}
