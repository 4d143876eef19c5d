//! Panel, aircraft and gauge factories
//!
//! The host talks to the radar through a chain of objects: one panel per
//! registered device answers name/id/units questions, hands out one
//! aircraft object per container, and each aircraft hands out gauges.
//! Every gauge shares the panel's property table and device.

use std::rc::Rc;

use radar_protocol::{
    PropertyError, PropertyId, PropertyTable, StandardUnits, UnitsRegistry, UnitsTag,
};

use crate::controller::{GaugeConfig, PropertyController};
use crate::registry::{SurfaceHandle, SurfaceRegistry};

/// Panel-level entry point for one radar device
#[derive(Debug, Clone)]
pub struct RadarPanel {
    table: Rc<PropertyTable>,
    surface: SurfaceHandle,
    config: GaugeConfig,
}

impl RadarPanel {
    /// Create a panel with the built-in units and default gauge configuration
    pub fn new(surface: SurfaceHandle) -> Self {
        Self::with_units(surface, &StandardUnits, GaugeConfig::default())
    }

    /// Create a panel, resolving property units against `units`
    pub fn with_units(
        surface: SurfaceHandle,
        units: &dyn UnitsRegistry,
        config: GaugeConfig,
    ) -> Self {
        let mut table = PropertyTable::new();
        table.resolve_units(units);
        Self {
            table: Rc::new(table),
            surface,
            config,
        }
    }

    /// Create a panel for the device registered under `service_id`
    pub fn from_registry(registry: &SurfaceRegistry, service_id: &str) -> Option<Self> {
        registry.query(service_id).map(Self::new)
    }

    /// The resolved property catalog
    pub fn table(&self) -> &PropertyTable {
        &self.table
    }

    /// Handle to the device this panel serves
    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    /// Resolve a property keyword to its id
    pub fn convert_string_to_property(&self, keyword: &str) -> Result<PropertyId, PropertyError> {
        self.table.resolve_id(keyword)
    }

    /// Resolve a property id to its keyword
    pub fn convert_property_to_string(&self, id: PropertyId) -> Result<&'static str, PropertyError> {
        self.table.resolve_name(id)
    }

    /// Resolve a property id to its units
    pub fn property_units(&self, id: PropertyId) -> Result<UnitsTag, PropertyError> {
        self.table.resolve_units_tag(id)
    }

    /// Create the aircraft-level object for a container
    pub fn create_aircraft(&self, container_id: u32) -> RadarAircraft {
        RadarAircraft {
            container_id,
            table: Rc::clone(&self.table),
            surface: self.surface.clone(),
            config: self.config.clone(),
        }
    }
}

/// Aircraft-level object for one container
#[derive(Debug, Clone)]
pub struct RadarAircraft {
    container_id: u32,
    table: Rc<PropertyTable>,
    surface: SurfaceHandle,
    config: GaugeConfig,
}

impl RadarAircraft {
    /// Container this aircraft object was created for
    pub fn container_id(&self) -> u32 {
        self.container_id
    }

    /// Create a gauge controller over the shared device
    pub fn create_gauge(&self) -> PropertyController {
        PropertyController::with_config(
            Rc::clone(&self.table),
            self.surface.clone(),
            self.config.clone(),
            self.container_id,
        )
    }
}
