//! Lightweight event counters for diagnosing a simulation run.

use bevy_ecs::prelude::Resource;

use crate::clock::EventKind;

#[derive(Debug, Default, Resource)]
pub struct EventMetrics {
    pub events_processed: u64,
    pub ticks_processed: u64,
    pub arrivals_recorded: u64,
    pub signals_served: u64,
    pub signals_expired: u64,
}

impl EventMetrics {
    pub fn record_event(&mut self, kind: EventKind) {
        self.events_processed += 1;
        if kind == EventKind::Tick {
            self.ticks_processed += 1;
        }
    }

    pub fn print_summary(&self) {
        println!("\n=== Dispatch Summary ===");
        println!("Events processed: {}", self.events_processed);
        println!("Ticks processed: {}", self.ticks_processed);
        println!("Bus arrivals: {}", self.arrivals_recorded);
        println!("Signals served: {}", self.signals_served);
        println!("Signals expired: {}", self.signals_expired);
    }
}
