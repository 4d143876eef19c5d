//! Property controller
//!
//! Reads and writes radar properties by id against the shared device. The
//! device is claimed lazily: the first write (or restored snapshot) that
//! finds it uninitialized initializes it, and the controller then holds the
//! device's [`InitToken`] until it is dropped.

use std::rc::Rc;

use radar_protocol::{PropertyDescriptor, PropertyId, PropertyTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ControlError;
use crate::registry::{InitToken, SurfaceHandle};

/// Arguments used when a controller initializes the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Name of the texture the device renders into
    pub texture_name: String,
    /// Texture width in pixels
    pub texture_width: u32,
    /// Texture height in pixels
    pub texture_height: u32,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            texture_name: "P3DRadarExampleTexture".to_string(),
            texture_width: 256,
            texture_height: 256,
        }
    }
}

/// Property access for one gauge over the shared radar device
pub struct PropertyController {
    container_id: u32,
    table: Rc<PropertyTable>,
    surface: SurfaceHandle,
    config: GaugeConfig,
    init_token: Option<InitToken>,
}

impl PropertyController {
    /// Create a controller with the default gauge configuration
    pub fn new(table: Rc<PropertyTable>, surface: SurfaceHandle) -> Self {
        Self::with_config(table, surface, GaugeConfig::default(), 0)
    }

    /// Create a controller for a specific container
    pub fn with_config(
        table: Rc<PropertyTable>,
        surface: SurfaceHandle,
        config: GaugeConfig,
        container_id: u32,
    ) -> Self {
        Self {
            container_id,
            table,
            surface,
            config,
            init_token: None,
        }
    }

    /// Container this gauge belongs to
    pub fn container_id(&self) -> u32 {
        self.container_id
    }

    /// The property catalog used for dispatch
    pub fn table(&self) -> &PropertyTable {
        &self.table
    }

    /// Handle to the shared device
    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    /// Whether this controller initialized the device and is responsible
    /// for deinitializing it
    pub fn owns_surface(&self) -> bool {
        self.init_token.is_some()
    }

    /// Read a property value
    ///
    /// Flags read as `1.0`/`0.0`. Fails for ids outside the catalog and for
    /// write-only actions.
    pub fn get_value(&self, id: PropertyId) -> Result<f64, ControlError> {
        let descriptor = self.descriptor(id)?;
        self.surface
            .with(|s| descriptor.accessor.read(s))
            .ok_or_else(|| {
                debug!("Property {} has no read dispatch", descriptor.name);
                ControlError::UnknownId(id)
            })
    }

    /// Write a property value
    ///
    /// Initializes the device first if nobody has yet. Flags are set when
    /// `value >= 1.0`. Fails without touching the device for ids outside
    /// the catalog and for read-only properties.
    pub fn set_value(&mut self, id: PropertyId, value: f64) -> Result<(), ControlError> {
        let accessor = {
            let descriptor = self.descriptor(id)?;
            if !descriptor.accessor.is_writable() {
                debug!("Property {} is read-only", descriptor.name);
                return Err(ControlError::UnknownId(id));
            }
            descriptor.accessor
        };

        self.ensure_initialized();
        self.surface.with_mut(|s| accessor.write(s, value));
        Ok(())
    }

    /// Read a property by name
    pub fn get_value_by_name(&self, name: &str) -> Result<f64, ControlError> {
        let id = self.table.resolve_id(name)?;
        self.get_value(id)
    }

    /// Write a property by name
    pub fn set_value_by_name(&mut self, name: &str, value: f64) -> Result<(), ControlError> {
        let id = self.table.resolve_id(name)?;
        self.set_value(id, value)
    }

    /// Claim the device if it is not initialized yet
    pub(crate) fn ensure_initialized(&mut self) {
        if let Some(token) = self.surface.ensure_initialized(&self.config) {
            debug!("Gauge {} now owns the radar", self.container_id);
            // A controller that already owned the device keeps its original
            // token; the fresh one carries no extra rights.
            if self.init_token.is_none() {
                self.init_token = Some(token);
            }
        }
    }

    fn descriptor(&self, id: PropertyId) -> Result<&PropertyDescriptor, ControlError> {
        self.table.get(id).map_err(|_| {
            debug!("Unknown property id {}", id);
            ControlError::UnknownId(id)
        })
    }
}

impl Drop for PropertyController {
    fn drop(&mut self) {
        if let Some(token) = self.init_token.take() {
            if token.release() {
                info!("Gauge {} released the radar", self.container_id);
            }
        }
    }
}
