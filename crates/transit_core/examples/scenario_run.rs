//! Run the default Oulu scenario, raise two signals, and print dispatch
//! snapshots after five simulated minutes.
//!
//! Run with: cargo run -p transit_core --example scenario_run

use transit_core::ecs::SignalMode;
use transit_core::scenario::ScenarioParams;
use transit_core::simulation::Simulation;

fn main() {
    const SIMULATED_SECS: u64 = 300;

    let mut sim =
        Simulation::new(ScenarioParams::default().with_seed(123)).expect("default scenario");
    sim.send_signal("Teknologiakylä", 1, SignalMode::Single)
        .expect("signal on line 1");
    sim.send_signal("Yliopisto", 5, SignalMode::Generic)
        .expect("signal on line 5");

    let steps = sim.run_for(SIMULATED_SECS);
    println!(
        "--- Scenario run (seed 123, {} simulated seconds, {} events) ---",
        SIMULATED_SECS, steps
    );

    println!("\nBuses:");
    for bus in sim.buses() {
        println!(
            "  {:?}  line={}  next_stop={}  countdown={}s  status={}",
            bus.entity,
            bus.line,
            bus.next_stop,
            bus.countdown_secs,
            bus.status.as_str(),
        );
    }

    let signals = sim.signals();
    if signals.is_empty() {
        println!("\nAll signals served.");
    } else {
        println!("\nOpen signals (newest first):");
        for signal in &signals {
            println!(
                "  {:?}  stop={}  line={}  mode={}  eta={}s  bus={:?}",
                signal.entity,
                signal.stop_name,
                signal.line,
                signal.mode.as_str(),
                signal.remaining_secs,
                signal.assigned_bus,
            );
        }
    }

    sim.metrics().print_summary();
}
