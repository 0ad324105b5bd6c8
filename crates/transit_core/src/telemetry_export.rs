//! JSON export of simulation snapshots for offline inspection.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::telemetry::{BusSnapshot, SignalSnapshot};

#[derive(Debug, Serialize)]
struct BusRow<'a> {
    id: u32,
    line: u32,
    position: usize,
    next_stop: usize,
    countdown_secs: u64,
    status: &'a str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    accuracy_m: Option<f64>,
}

#[derive(Debug, Serialize)]
struct SignalRow<'a> {
    id: u32,
    stop: usize,
    stop_name: &'a str,
    line: u32,
    mode: &'a str,
    requested_at: u64,
    remaining_secs: u64,
    assigned_bus: Option<u32>,
}

#[derive(Debug, Serialize)]
struct SnapshotDocument<'a> {
    captured_at_secs: u64,
    buses: Vec<BusRow<'a>>,
    signals: Vec<SignalRow<'a>>,
}

fn document<'a>(
    captured_at_secs: u64,
    buses: &'a [BusSnapshot],
    signals: &'a [SignalSnapshot],
) -> SnapshotDocument<'a> {
    SnapshotDocument {
        captured_at_secs,
        buses: buses
            .iter()
            .map(|bus| BusRow {
                id: bus.entity.index(),
                line: bus.line,
                position: bus.position,
                next_stop: bus.next_stop,
                countdown_secs: bus.countdown_secs,
                status: bus.status.as_str(),
                latitude: bus.latitude,
                longitude: bus.longitude,
                accuracy_m: bus.accuracy_m,
            })
            .collect(),
        signals: signals
            .iter()
            .map(|signal| SignalRow {
                id: signal.entity.index(),
                stop: signal.stop,
                stop_name: &signal.stop_name,
                line: signal.line,
                mode: signal.mode.as_str(),
                requested_at: signal.requested_at,
                remaining_secs: signal.remaining_secs,
                assigned_bus: signal.assigned_bus.map(|bus| bus.index()),
            })
            .collect(),
    }
}

pub fn export_snapshot_to_writer<W: Write>(
    writer: W,
    captured_at_secs: u64,
    buses: &[BusSnapshot],
    signals: &[SignalSnapshot],
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(writer, &document(captured_at_secs, buses, signals))?;
    Ok(())
}

pub fn export_snapshot_to_file(
    path: &Path,
    captured_at_secs: u64,
    buses: &[BusSnapshot],
    signals: &[SignalSnapshot],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    export_snapshot_to_writer(file, captured_at_secs, buses, signals)
}

#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::World;

    use super::*;
    use crate::ecs::{BusStatus, SignalMode};

    #[test]
    fn serializes_entities_as_indices_and_enums_as_labels() {
        let mut world = World::new();
        let bus_entity = world.spawn_empty().id();
        let signal_entity = world.spawn_empty().id();

        let buses = vec![BusSnapshot {
            entity: bus_entity,
            line: 1,
            position: 2,
            next_stop: 2,
            countdown_secs: 45,
            status: BusStatus::Running,
            latitude: Some(65.01),
            longitude: Some(25.47),
            accuracy_m: None,
        }];
        let signals = vec![SignalSnapshot {
            entity: signal_entity,
            stop: 3,
            stop_name: "Teknologiakylä".to_string(),
            line: 1,
            mode: SignalMode::Generic,
            requested_at: 12,
            remaining_secs: 300,
            assigned_bus: Some(bus_entity),
        }];

        let mut out = Vec::new();
        export_snapshot_to_writer(&mut out, 12, &buses, &signals).expect("export");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");

        assert_eq!(value["captured_at_secs"], 12);
        assert_eq!(value["buses"][0]["status"], "running");
        assert_eq!(value["signals"][0]["mode"], "generic");
        assert_eq!(
            value["signals"][0]["assigned_bus"],
            serde_json::json!(bus_entity.index())
        );
    }
}
