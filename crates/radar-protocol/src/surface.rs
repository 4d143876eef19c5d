//! Capability interface of the radar device
//!
//! The device is owned by the host simulator and shared between every
//! gauge that talks to it. This crate only consumes it through
//! [`ControlSurface`].

/// Geodetic position (degrees, degrees, feet)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lla {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Altitude in feet
    pub alt: f64,
}

impl Lla {
    /// Create a new position
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }
}

/// Read/write access to a live radar device
///
/// Pairwise attributes (cursor position, resolutions) are only exposed as
/// pairs; callers that want one component must read both.
pub trait ControlSurface {
    /// Whether `init` has been called and not yet undone by `deinit`
    fn is_initialized(&self) -> bool;

    /// Initialize the device, allocating its image buffer
    fn init(&mut self, texture_name: &str, width: u32, height: u32);

    /// Release the device
    fn deinit(&mut self);

    /// Wipe the accumulated radar image
    fn clear_radar_image(&mut self);

    fn show_range_rings(&self) -> bool;
    fn set_show_range_rings(&mut self, show: bool);

    fn show_cursor(&self) -> bool;
    fn set_show_cursor(&mut self, show: bool);

    fn far_shore_enhance(&self) -> bool;
    fn set_far_shore_enhancement_enabled(&mut self, enabled: bool);

    fn visual_zoom(&self) -> f64;
    fn set_visual_zoom(&mut self, zoom: f64);

    fn data_zoom(&self) -> f64;
    fn set_data_zoom(&mut self, zoom: f64);

    /// Scan azimuth width in degrees
    fn scan_azimuth(&self) -> f64;
    fn set_scan_azimuth_degrees(&mut self, degrees: f64);

    /// Sweep rate in degrees per second
    fn sweep_rate(&self) -> f64;
    fn set_scan_rate_degrees_per_second(&mut self, rate: f64);

    fn range_miles(&self) -> f64;
    fn set_range_miles(&mut self, miles: f64);

    fn rendering_enabled(&self) -> bool;
    fn set_rendering_enabled(&mut self, enabled: bool);

    fn freeze_enabled(&self) -> bool;
    fn set_freeze(&mut self, freeze: bool);

    /// Cursor position in device-local coordinates
    fn cursor_position_xy(&self) -> (f64, f64);
    fn set_cursor_position_xy(&mut self, x: f64, y: f64);

    /// Cursor position projected onto the ground
    fn cursor_position_lla(&self) -> Lla;
    fn set_cursor_position_lla(&mut self, lla: Lla);

    fn front_blindspot_degrees(&self) -> f64;
    fn set_front_blindspot_degrees(&mut self, degrees: f64);

    fn side_blindspot_degrees(&self) -> f64;
    fn set_side_blindspot_degrees(&mut self, degrees: f64);

    /// Resolution of the radar image buffer
    fn radar_resolution(&self) -> (f64, f64);
    fn set_radar_image_resolution(&mut self, x: f64, y: f64);

    /// Resolution of the gauge the image is drawn into
    fn gauge_resolution(&self) -> (f64, f64);
    fn set_radar_gauge_resolution(&mut self, x: f64, y: f64);

    fn current_scan_elevation_degrees(&self) -> f64;
    fn current_beam_offset_degrees(&self) -> f64;
}
