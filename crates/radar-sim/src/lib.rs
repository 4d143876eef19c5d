//! Radar Simulation Library
//!
//! This crate provides a simulated radar device for exercising radar gauges
//! without a host flight simulator. It includes:
//!
//! - **SimulatedRadar**: Implements the full `ControlSurface` capability
//!   interface, counts lifecycle calls and sweeps its beam over time
//!
//! # Example
//!
//! ```rust
//! use radar_sim::SimulatedRadar;
//! use radar_protocol::ControlSurface;
//!
//! let mut radar = SimulatedRadar::new("Nose Radar");
//! radar.init("RadarTexture", 256, 256);
//! radar.set_range_miles(80.0);
//! radar.advance(0.5);
//!
//! assert!(radar.is_initialized());
//! println!("{}", radar.state_summary());
//! ```

pub mod radar;

pub use radar::{SimulatedRadar, SimulatedRadarConfig};
