//! Radar Gauge Engine
//!
//! This crate exposes a shared radar device to host gauges as a set of
//! numbered, named properties, and saves/restores the device state as a
//! binary snapshot.
//!
//! # Architecture
//!
//! The radar is one device shared by any number of gauges:
//!
//! - A [`SurfaceRegistry`] hands out [`SurfaceHandle`]s to the device
//! - A [`RadarPanel`] resolves property names, ids and units, and creates a
//!   [`RadarAircraft`] per container, which creates gauges
//! - Each gauge is a [`PropertyController`] that reads and writes properties
//!   and serializes/deserializes snapshots
//!
//! Gauges never initialize the device up front. The first gauge to write a
//! property (or restore a snapshot) while the device is uninitialized
//! initializes it and receives its [`InitToken`]; only that gauge
//! deinitializes the device when dropped, and only that gauge writes
//! snapshots.
//!
//! # Example
//!
//! ```rust
//! use radar_gauge::{RadarPanel, SurfaceHandle};
//! use radar_protocol::SnapshotWriter;
//! use radar_sim::SimulatedRadar;
//!
//! let panel = RadarPanel::new(SurfaceHandle::new(SimulatedRadar::new("Nose Radar")));
//! let mut gauge = panel.create_aircraft(1).create_gauge();
//!
//! let range = panel.convert_string_to_property("RangeMiles").unwrap();
//! gauge.set_value(range, 80.0).unwrap();
//! assert_eq!(gauge.get_value(range).unwrap(), 80.0);
//!
//! let mut out = SnapshotWriter::new();
//! gauge.serialize(&mut out);
//! assert!(out.position() > 0);
//! ```

pub mod controller;
pub mod error;
pub mod panel;
pub mod registry;
pub mod snapshot;

pub use controller::{GaugeConfig, PropertyController};
pub use error::ControlError;
pub use panel::{RadarAircraft, RadarPanel};
pub use registry::{InitToken, SurfaceHandle, SurfaceRegistry, SIMULATED_RADAR_SERVICE};
pub use snapshot::DeserializeOutcome;
