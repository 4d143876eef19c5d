//! Radar Protocol Library
//!
//! This crate describes how a host addresses a simulated radar device:
//!
//! - **Property catalog**: name ⇄ id ⇄ units mapping, with each entry
//!   carrying the accessor that reads or writes the device
//! - **Control surface**: the capability interface of the shared device
//! - **Snapshot**: the fixed-layout, versioned binary copy of the device state
//! - **Streams**: cursor-addressed buffers that snapshots are embedded in
//!
//! # Example
//!
//! ```rust
//! use radar_protocol::{PropertyId, PropertyTable, StandardUnits};
//!
//! let mut table = PropertyTable::new();
//! table.resolve_units(&StandardUnits);
//!
//! let id = table.resolve_id("rangemiles").unwrap();
//! assert_eq!(id, PropertyId(8));
//! assert_eq!(table.resolve_name(id).unwrap(), "RangeMiles");
//! ```

pub mod error;
pub mod property;
pub mod snapshot;
pub mod stream;
pub mod surface;
pub mod units;

pub use error::{PropertyError, SnapshotError};
pub use property::{Accessor, Component, PropertyDescriptor, PropertyId, PropertyTable};
pub use snapshot::{
    RadarState, SnapshotHeader, SnapshotRecord, HEADER_SIZE, RECORD_SIZE, SNAPSHOT_MAGIC,
    SNAPSHOT_VERSION,
};
pub use stream::{SnapshotReader, SnapshotWriter};
pub use surface::{ControlSurface, Lla};
pub use units::{StandardUnits, UnitsId, UnitsRegistry, UnitsTag};
