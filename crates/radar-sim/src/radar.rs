//! Simulated radar device
//!
//! Holds the full radar state in memory and implements
//! [`ControlSurface`], so gauges can be driven and checked without a host
//! simulator.

use radar_protocol::{ControlSurface, Lla};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A simulated radar that tracks every attribute it is given
#[derive(Debug, Clone)]
pub struct SimulatedRadar {
    /// Identifier for logging
    id: String,
    /// Texture name handed over by `init`, `None` while uninitialized
    texture: Option<String>,
    show_range_rings: bool,
    show_cursor: bool,
    far_shore_enhance: bool,
    visual_zoom: f64,
    data_zoom: f64,
    scan_azimuth: f64,
    sweep_rate: f64,
    range_miles: f64,
    rendering_enabled: bool,
    freeze_enabled: bool,
    cursor_xy: (f64, f64),
    cursor_lla: Lla,
    front_blindspot_degrees: f64,
    side_blindspot_degrees: f64,
    radar_resolution: (f64, f64),
    gauge_resolution: (f64, f64),
    scan_elevation_degrees: f64,
    /// Beam offset from boresight in degrees
    beam_offset_degrees: f64,
    /// +1.0 while sweeping right, -1.0 while sweeping left
    sweep_direction: f64,
    init_calls: u32,
    deinit_calls: u32,
    clear_calls: u32,
}

/// Initial state for a simulated radar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedRadarConfig {
    /// Display name/identifier
    pub id: String,
    pub visual_zoom: f64,
    pub data_zoom: f64,
    /// Scan azimuth width in degrees
    pub scan_azimuth: f64,
    /// Sweep rate in degrees per second
    pub sweep_rate: f64,
    pub range_miles: f64,
    pub front_blindspot_degrees: f64,
    pub side_blindspot_degrees: f64,
    pub gauge_resolution: (f64, f64),
    /// Fixed antenna tilt reported as the current scan elevation
    pub scan_elevation_degrees: f64,
}

impl Default for SimulatedRadarConfig {
    fn default() -> Self {
        Self {
            id: "Simulated Radar".to_string(),
            visual_zoom: 1.0,
            data_zoom: 1.0,
            scan_azimuth: 90.0,
            sweep_rate: 45.0,
            range_miles: 40.0,
            front_blindspot_degrees: 0.0,
            side_blindspot_degrees: 0.0,
            gauge_resolution: (256.0, 256.0),
            scan_elevation_degrees: -2.0,
        }
    }
}

impl SimulatedRadar {
    /// Create a new simulated radar with default settings
    pub fn new(id: impl Into<String>) -> Self {
        Self::from_config(SimulatedRadarConfig {
            id: id.into(),
            ..Default::default()
        })
    }

    /// Create a simulated radar from configuration
    pub fn from_config(config: SimulatedRadarConfig) -> Self {
        Self {
            id: config.id,
            texture: None,
            show_range_rings: true,
            show_cursor: false,
            far_shore_enhance: false,
            visual_zoom: config.visual_zoom,
            data_zoom: config.data_zoom,
            scan_azimuth: config.scan_azimuth,
            sweep_rate: config.sweep_rate,
            range_miles: config.range_miles,
            rendering_enabled: true,
            freeze_enabled: false,
            cursor_xy: (0.0, 0.0),
            cursor_lla: Lla::default(),
            front_blindspot_degrees: config.front_blindspot_degrees,
            side_blindspot_degrees: config.side_blindspot_degrees,
            radar_resolution: (0.0, 0.0),
            gauge_resolution: config.gauge_resolution,
            scan_elevation_degrees: config.scan_elevation_degrees,
            beam_offset_degrees: 0.0,
            sweep_direction: 1.0,
            init_calls: 0,
            deinit_calls: 0,
            clear_calls: 0,
        }
    }

    /// Get the radar's identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Texture name given to the last `init`, if initialized
    pub fn texture_name(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    /// Number of `init` calls so far
    pub fn init_calls(&self) -> u32 {
        self.init_calls
    }

    /// Number of `deinit` calls so far
    pub fn deinit_calls(&self) -> u32 {
        self.deinit_calls
    }

    /// Number of `clear_radar_image` calls so far
    pub fn clear_calls(&self) -> u32 {
        self.clear_calls
    }

    /// Advance the sweep by `seconds`
    ///
    /// The beam swings back and forth across the scan azimuth at the sweep
    /// rate. Nothing moves while frozen.
    pub fn advance(&mut self, seconds: f64) {
        if self.freeze_enabled || self.sweep_rate <= 0.0 || seconds <= 0.0 {
            return;
        }
        let limit = self.scan_azimuth.abs() / 2.0;
        if limit == 0.0 {
            self.beam_offset_degrees = 0.0;
            return;
        }

        // Unfold the back-and-forth motion onto a sawtooth of period 4 * limit
        let period = 4.0 * limit;
        let phase = if self.sweep_direction > 0.0 {
            self.beam_offset_degrees + limit
        } else {
            3.0 * limit - self.beam_offset_degrees
        };
        let phase = (phase + self.sweep_rate * seconds).rem_euclid(period);

        if phase <= 2.0 * limit {
            self.beam_offset_degrees = phase - limit;
            self.sweep_direction = 1.0;
        } else {
            self.beam_offset_degrees = 3.0 * limit - phase;
            self.sweep_direction = -1.0;
        }
    }

    /// Get a summary of current state
    pub fn state_summary(&self) -> String {
        format!(
            "{} - {:.0} mi, {:.0}° @ {:.0}°/s{}",
            self.id,
            self.range_miles,
            self.scan_azimuth,
            self.sweep_rate,
            if self.freeze_enabled { " [FROZEN]" } else { "" }
        )
    }
}

impl ControlSurface for SimulatedRadar {
    fn is_initialized(&self) -> bool {
        self.texture.is_some()
    }

    fn init(&mut self, texture_name: &str, width: u32, height: u32) {
        self.init_calls += 1;
        info!(
            "{}: initialized with texture {} ({}x{})",
            self.id, texture_name, width, height
        );
        self.texture = Some(texture_name.to_string());
        self.radar_resolution = (f64::from(width), f64::from(height));
    }

    fn deinit(&mut self) {
        self.deinit_calls += 1;
        info!("{}: deinitialized", self.id);
        self.texture = None;
    }

    fn clear_radar_image(&mut self) {
        self.clear_calls += 1;
        debug!("{}: radar image cleared", self.id);
    }

    fn show_range_rings(&self) -> bool {
        self.show_range_rings
    }

    fn set_show_range_rings(&mut self, show: bool) {
        self.show_range_rings = show;
    }

    fn show_cursor(&self) -> bool {
        self.show_cursor
    }

    fn set_show_cursor(&mut self, show: bool) {
        self.show_cursor = show;
    }

    fn far_shore_enhance(&self) -> bool {
        self.far_shore_enhance
    }

    fn set_far_shore_enhancement_enabled(&mut self, enabled: bool) {
        self.far_shore_enhance = enabled;
    }

    fn visual_zoom(&self) -> f64 {
        self.visual_zoom
    }

    fn set_visual_zoom(&mut self, zoom: f64) {
        self.visual_zoom = zoom;
    }

    fn data_zoom(&self) -> f64 {
        self.data_zoom
    }

    fn set_data_zoom(&mut self, zoom: f64) {
        self.data_zoom = zoom;
    }

    fn scan_azimuth(&self) -> f64 {
        self.scan_azimuth
    }

    fn set_scan_azimuth_degrees(&mut self, degrees: f64) {
        self.scan_azimuth = degrees;
    }

    fn sweep_rate(&self) -> f64 {
        self.sweep_rate
    }

    fn set_scan_rate_degrees_per_second(&mut self, rate: f64) {
        self.sweep_rate = rate;
    }

    fn range_miles(&self) -> f64 {
        self.range_miles
    }

    fn set_range_miles(&mut self, miles: f64) {
        self.range_miles = miles;
    }

    fn rendering_enabled(&self) -> bool {
        self.rendering_enabled
    }

    fn set_rendering_enabled(&mut self, enabled: bool) {
        self.rendering_enabled = enabled;
    }

    fn freeze_enabled(&self) -> bool {
        self.freeze_enabled
    }

    fn set_freeze(&mut self, freeze: bool) {
        self.freeze_enabled = freeze;
    }

    fn cursor_position_xy(&self) -> (f64, f64) {
        self.cursor_xy
    }

    fn set_cursor_position_xy(&mut self, x: f64, y: f64) {
        self.cursor_xy = (x, y);
    }

    fn cursor_position_lla(&self) -> Lla {
        self.cursor_lla
    }

    fn set_cursor_position_lla(&mut self, lla: Lla) {
        self.cursor_lla = lla;
    }

    fn front_blindspot_degrees(&self) -> f64 {
        self.front_blindspot_degrees
    }

    fn set_front_blindspot_degrees(&mut self, degrees: f64) {
        self.front_blindspot_degrees = degrees;
    }

    fn side_blindspot_degrees(&self) -> f64 {
        self.side_blindspot_degrees
    }

    fn set_side_blindspot_degrees(&mut self, degrees: f64) {
        self.side_blindspot_degrees = degrees;
    }

    fn radar_resolution(&self) -> (f64, f64) {
        self.radar_resolution
    }

    fn set_radar_image_resolution(&mut self, x: f64, y: f64) {
        self.radar_resolution = (x, y);
    }

    fn gauge_resolution(&self) -> (f64, f64) {
        self.gauge_resolution
    }

    fn set_radar_gauge_resolution(&mut self, x: f64, y: f64) {
        self.gauge_resolution = (x, y);
    }

    fn current_scan_elevation_degrees(&self) -> f64 {
        self.scan_elevation_degrees
    }

    fn current_beam_offset_degrees(&self) -> f64 {
        self.beam_offset_degrees
    }
}
