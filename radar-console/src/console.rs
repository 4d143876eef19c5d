//! Console session
//!
//! Wires a simulated radar into a registry, builds the panel/aircraft/gauge
//! chain on top of it and exposes the operations the subcommands need.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use radar_gauge::{
    DeserializeOutcome, PropertyController, RadarPanel, SurfaceHandle, SurfaceRegistry,
    SIMULATED_RADAR_SERVICE,
};
use radar_protocol::{
    ControlSurface, RadarState, SnapshotReader, SnapshotWriter, StandardUnits, UnitsTag,
};
use radar_sim::SimulatedRadar;
use serde::Serialize;
use tracing::debug;

use crate::settings::Settings;

/// Container id the console's gauge is created for
pub const CONSOLE_CONTAINER: u32 = 1;

/// What `dump` prints
#[derive(Debug, Serialize)]
struct DumpView {
    summary: String,
    initialized: bool,
    owned: bool,
    beam_offset_degrees: f64,
    scan_elevation_degrees: f64,
    state: RadarState,
}

/// One console run over a simulated radar
pub struct Console {
    radar: Rc<RefCell<SimulatedRadar>>,
    panel: RadarPanel,
    gauge: PropertyController,
}

impl Console {
    /// Build the device, registry and gauge chain from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let radar = Rc::new(RefCell::new(SimulatedRadar::from_config(
            settings.radar.clone(),
        )));

        let mut registry = SurfaceRegistry::new();
        registry.register(
            SIMULATED_RADAR_SERVICE,
            SurfaceHandle::from_shared(radar.clone()),
        );
        let surface = registry
            .query(SIMULATED_RADAR_SERVICE)
            .context("radar service is not registered")?;

        let panel = RadarPanel::with_units(surface, &StandardUnits, settings.gauge.clone());
        let gauge = panel.create_aircraft(CONSOLE_CONTAINER).create_gauge();

        Ok(Self {
            radar,
            panel,
            gauge,
        })
    }

    /// Restore device state from a saved snapshot
    pub fn restore(&mut self, bytes: &[u8]) -> Result<DeserializeOutcome> {
        let mut input = SnapshotReader::new(bytes);
        let outcome = self
            .gauge
            .deserialize(&mut input)
            .context("failed to restore radar snapshot")?;
        debug!(
            "Snapshot restore: {:?}, {} bytes left",
            outcome,
            input.remaining()
        );
        Ok(outcome)
    }

    /// Snapshot the device, if this console's gauge owns it
    pub fn save(&self) -> Option<Vec<u8>> {
        let mut out = SnapshotWriter::new();
        match self.gauge.serialize(&mut out) {
            0 => None,
            _ => Some(out.into_inner()),
        }
    }

    /// One line per property: id, name, access, units
    pub fn list(&self) -> Vec<String> {
        self.panel
            .table()
            .iter()
            .map(|d| {
                format!(
                    "{:>2}  {:<34} {:<10} {:<8} {}",
                    d.id,
                    d.name,
                    d.accessor.shape(),
                    d.units_name,
                    units_label(d.units)
                )
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.gauge
            .get_value_by_name(name)
            .with_context(|| format!("cannot read {}", name))
    }

    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        self.gauge
            .set_value_by_name(name, value)
            .with_context(|| format!("cannot write {}", name))
    }

    /// Whether `name` is a property that can be read back
    pub fn is_readable(&self, name: &str) -> bool {
        let table = self.panel.table();
        table
            .resolve_id(name)
            .and_then(|id| table.get(id))
            .is_ok_and(|d| d.accessor.is_readable())
    }

    /// Trigger the clear-image action
    pub fn clear(&mut self) -> Result<()> {
        self.set("ClearRadarImage", 0.0)
    }

    /// Advance the simulation and return the new beam offset
    pub fn sweep(&mut self, seconds: f64) -> f64 {
        let mut radar = self.radar.borrow_mut();
        radar.advance(seconds);
        radar.current_beam_offset_degrees()
    }

    /// Device state as pretty JSON
    pub fn dump(&self) -> Result<String> {
        let radar = self.radar.borrow();
        let view = DumpView {
            summary: radar.state_summary(),
            initialized: radar.is_initialized(),
            owned: self.gauge.owns_surface(),
            beam_offset_degrees: radar.current_beam_offset_degrees(),
            scan_elevation_degrees: radar.current_scan_elevation_degrees(),
            state: RadarState::capture(&*radar),
        };
        serde_json::to_string_pretty(&view).context("failed to encode radar state")
    }

    pub fn summary(&self) -> String {
        self.radar.borrow().state_summary()
    }
}

fn units_label(tag: UnitsTag) -> String {
    match tag {
        UnitsTag::Known(id) => id.as_u32().to_string(),
        UnitsTag::Unknown => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> Console {
        Console::new(&Settings::default()).unwrap()
    }

    #[test]
    fn test_list_covers_catalog() {
        let console = console();
        let lines = console.list();
        assert_eq!(lines.len(), 23);
        assert!(lines[0].contains("ClearRadarImage"));
        assert!(lines[0].contains("action"));
        assert!(lines[22].contains("CurrentRadarBeamOffset"));
    }

    #[test]
    fn test_set_get_and_save() {
        let mut console = console();
        assert_eq!(console.get("RangeMiles").unwrap(), 40.0);
        assert!(console.save().is_none());

        console.set("RangeMiles", 80.0).unwrap();
        assert_eq!(console.get("rangemiles").unwrap(), 80.0);

        let bytes = console.save().unwrap();
        let mut restored = self::console();
        assert_eq!(
            restored.restore(&bytes).unwrap(),
            DeserializeOutcome::Applied
        );
        assert_eq!(restored.get("RangeMiles").unwrap(), 80.0);
    }

    #[test]
    fn test_unknown_property_errors() {
        let mut console = console();
        assert!(console.get("Altitude").is_err());
        assert!(console.set("CurrentRadarBeamOffset", 1.0).is_err());
        assert!(console.get("ClearRadarImage").is_err());
    }

    #[test]
    fn test_is_readable() {
        let console = console();
        assert!(console.is_readable("rangemiles"));
        assert!(console.is_readable("CurrentRadarBeamOffset"));
        assert!(!console.is_readable("ClearRadarImage"));
        assert!(!console.is_readable("Altitude"));
    }

    #[test]
    fn test_clear_claims_device() {
        let mut console = console();
        console.clear().unwrap();
        assert_eq!(console.radar.borrow().clear_calls(), 1);
        assert!(console.save().is_some());
    }

    #[test]
    fn test_sweep_moves_beam() {
        let mut console = console();
        assert_eq!(console.sweep(1.0), 45.0);
    }

    #[test]
    fn test_dump_is_json() {
        let mut console = console();
        console.set("ScanAzimuth", 60.0).unwrap();
        let json: serde_json::Value = serde_json::from_str(&console.dump().unwrap()).unwrap();
        assert_eq!(json["owned"], true);
        assert_eq!(json["state"]["scan_azimuth"], 60.0);
    }

    #[test]
    fn test_restore_garbage_is_not_present() {
        let mut console = console();
        assert_eq!(
            console.restore(b"not a radar snapshot").unwrap(),
            DeserializeOutcome::NotPresent
        );
        assert!(console.save().is_none());
    }
}
