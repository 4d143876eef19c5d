//! Radar snapshot record
//!
//! A snapshot is a fixed-size, versioned binary copy of the radar state,
//! embedded in a larger buffer shared with other plugins' records.
//!
//! # Record Format
//! ```text
//! offset  size  field
//!      0     4  magic            u32   0xFFA41AF2
//!      4     4  size_bytes       i32   total record size (136)
//!      8     4  version          i32   format version (1)
//!     12     1  show_range_rings
//!     13     1  show_cursor
//!     14     1  far_shore_enhance
//!     16     8  visual_zoom      f64
//!     24     8  data_zoom
//!     32     8  scan_azimuth
//!     40     8  sweep_rate
//!     48     8  range_miles
//!     56     1  rendering_enabled
//!     64     8  cursor_position_x
//!     72     8  cursor_position_y
//!     80     1  freeze_enabled
//!     88     8  front_blindspot_degrees
//!     96     8  side_blindspot_degrees
//!    104     8  radar_resolution_x
//!    112     8  radar_resolution_y
//!    120     8  gauge_resolution_x
//!    128     8  gauge_resolution_y
//! ```
//!
//! All multi-byte fields use host byte order. Booleans are one byte, any
//! non-zero value reads as true. Gaps between fields are zero-filled.

use crate::error::SnapshotError;
use crate::surface::ControlSurface;

/// Magic value identifying a radar snapshot record
pub const SNAPSHOT_MAGIC: u32 = 0xFFA4_1AF2;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: i32 = 1;

/// Size of the record header in bytes
pub const HEADER_SIZE: usize = 12;

/// Size of a complete version 1 record in bytes
pub const RECORD_SIZE: usize = 136;

mod offset {
    pub const MAGIC: usize = 0;
    pub const SIZE_BYTES: usize = 4;
    pub const VERSION: usize = 8;
    pub const SHOW_RANGE_RINGS: usize = 12;
    pub const SHOW_CURSOR: usize = 13;
    pub const FAR_SHORE_ENHANCE: usize = 14;
    pub const VISUAL_ZOOM: usize = 16;
    pub const DATA_ZOOM: usize = 24;
    pub const SCAN_AZIMUTH: usize = 32;
    pub const SWEEP_RATE: usize = 40;
    pub const RANGE_MILES: usize = 48;
    pub const RENDERING_ENABLED: usize = 56;
    pub const CURSOR_POSITION_X: usize = 64;
    pub const CURSOR_POSITION_Y: usize = 72;
    pub const FREEZE_ENABLED: usize = 80;
    pub const FRONT_BLINDSPOT: usize = 88;
    pub const SIDE_BLINDSPOT: usize = 96;
    pub const RADAR_RESOLUTION_X: usize = 104;
    pub const RADAR_RESOLUTION_Y: usize = 112;
    pub const GAUGE_RESOLUTION_X: usize = 120;
    pub const GAUGE_RESOLUTION_Y: usize = 128;
}

/// Record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    /// Record type marker
    pub magic: u32,
    /// Total size of the record as written
    pub size_bytes: i32,
    /// Format version the record was written with
    pub version: i32,
}

impl SnapshotHeader {
    /// Header for a record written by this version
    pub fn current() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            size_bytes: RECORD_SIZE as i32,
            version: SNAPSHOT_VERSION,
        }
    }

    /// Whether the record belongs to the radar
    pub fn is_valid(&self) -> bool {
        self.magic == SNAPSHOT_MAGIC
    }

    /// Whether the record was written with the current format version
    pub fn is_current_version(&self) -> bool {
        self.version == SNAPSHOT_VERSION
    }

    /// Whether the declared size matches the current record layout
    pub fn validate_size(&self) -> bool {
        self.size_bytes == RECORD_SIZE as i32
    }

    /// Decode a header from the start of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < HEADER_SIZE {
            return Err(SnapshotError::Truncated {
                needed: HEADER_SIZE,
                available: bytes.len(),
            });
        }
        Ok(Self {
            magic: u32::from_ne_bytes(array_at(bytes, offset::MAGIC)),
            size_bytes: i32::from_ne_bytes(array_at(bytes, offset::SIZE_BYTES)),
            version: i32::from_ne_bytes(array_at(bytes, offset::VERSION)),
        })
    }

    fn encode_into(&self, out: &mut [u8]) {
        out[offset::MAGIC..offset::MAGIC + 4].copy_from_slice(&self.magic.to_ne_bytes());
        out[offset::SIZE_BYTES..offset::SIZE_BYTES + 4]
            .copy_from_slice(&self.size_bytes.to_ne_bytes());
        out[offset::VERSION..offset::VERSION + 4].copy_from_slice(&self.version.to_ne_bytes());
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::current()
    }
}

/// Radar state carried by a snapshot, in record field order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadarState {
    pub show_range_rings: bool,
    pub show_cursor: bool,
    pub far_shore_enhance: bool,
    pub visual_zoom: f64,
    pub data_zoom: f64,
    pub scan_azimuth: f64,
    pub sweep_rate: f64,
    pub range_miles: f64,
    pub rendering_enabled: bool,
    pub cursor_position_x: f64,
    pub cursor_position_y: f64,
    pub freeze_enabled: bool,
    pub front_blindspot_degrees: f64,
    pub side_blindspot_degrees: f64,
    pub radar_resolution_x: f64,
    pub radar_resolution_y: f64,
    pub gauge_resolution_x: f64,
    pub gauge_resolution_y: f64,
}

impl RadarState {
    /// Copy the current state out of a device
    pub fn capture(surface: &dyn ControlSurface) -> Self {
        let (cursor_position_x, cursor_position_y) = surface.cursor_position_xy();
        let (radar_resolution_x, radar_resolution_y) = surface.radar_resolution();
        let (gauge_resolution_x, gauge_resolution_y) = surface.gauge_resolution();
        Self {
            show_range_rings: surface.show_range_rings(),
            show_cursor: surface.show_cursor(),
            far_shore_enhance: surface.far_shore_enhance(),
            visual_zoom: surface.visual_zoom(),
            data_zoom: surface.data_zoom(),
            scan_azimuth: surface.scan_azimuth(),
            sweep_rate: surface.sweep_rate(),
            range_miles: surface.range_miles(),
            rendering_enabled: surface.rendering_enabled(),
            cursor_position_x,
            cursor_position_y,
            freeze_enabled: surface.freeze_enabled(),
            front_blindspot_degrees: surface.front_blindspot_degrees(),
            side_blindspot_degrees: surface.side_blindspot_degrees(),
            radar_resolution_x,
            radar_resolution_y,
            gauge_resolution_x,
            gauge_resolution_y,
        }
    }

    /// Write every field back onto a device
    ///
    /// Coordinates and resolutions go through the pairwise setters.
    pub fn apply(&self, surface: &mut dyn ControlSurface) {
        surface.set_show_range_rings(self.show_range_rings);
        surface.set_show_cursor(self.show_cursor);
        surface.set_far_shore_enhancement_enabled(self.far_shore_enhance);
        surface.set_visual_zoom(self.visual_zoom);
        surface.set_data_zoom(self.data_zoom);
        surface.set_scan_azimuth_degrees(self.scan_azimuth);
        surface.set_scan_rate_degrees_per_second(self.sweep_rate);
        surface.set_range_miles(self.range_miles);
        surface.set_rendering_enabled(self.rendering_enabled);
        surface.set_cursor_position_xy(self.cursor_position_x, self.cursor_position_y);
        surface.set_freeze(self.freeze_enabled);
        surface.set_front_blindspot_degrees(self.front_blindspot_degrees);
        surface.set_side_blindspot_degrees(self.side_blindspot_degrees);
        surface.set_radar_image_resolution(self.radar_resolution_x, self.radar_resolution_y);
        surface.set_radar_gauge_resolution(self.gauge_resolution_x, self.gauge_resolution_y);
    }
}

/// Complete snapshot record: header plus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRecord {
    pub header: SnapshotHeader,
    pub state: RadarState,
}

impl SnapshotRecord {
    /// Create a record for the current format with the given state
    pub fn new(state: RadarState) -> Self {
        Self {
            header: SnapshotHeader::current(),
            state,
        }
    }

    /// Encode to the fixed record layout
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        let s = &self.state;

        self.header.encode_into(&mut out);
        out[offset::SHOW_RANGE_RINGS] = s.show_range_rings as u8;
        out[offset::SHOW_CURSOR] = s.show_cursor as u8;
        out[offset::FAR_SHORE_ENHANCE] = s.far_shore_enhance as u8;
        put_f64(&mut out, offset::VISUAL_ZOOM, s.visual_zoom);
        put_f64(&mut out, offset::DATA_ZOOM, s.data_zoom);
        put_f64(&mut out, offset::SCAN_AZIMUTH, s.scan_azimuth);
        put_f64(&mut out, offset::SWEEP_RATE, s.sweep_rate);
        put_f64(&mut out, offset::RANGE_MILES, s.range_miles);
        out[offset::RENDERING_ENABLED] = s.rendering_enabled as u8;
        put_f64(&mut out, offset::CURSOR_POSITION_X, s.cursor_position_x);
        put_f64(&mut out, offset::CURSOR_POSITION_Y, s.cursor_position_y);
        out[offset::FREEZE_ENABLED] = s.freeze_enabled as u8;
        put_f64(&mut out, offset::FRONT_BLINDSPOT, s.front_blindspot_degrees);
        put_f64(&mut out, offset::SIDE_BLINDSPOT, s.side_blindspot_degrees);
        put_f64(&mut out, offset::RADAR_RESOLUTION_X, s.radar_resolution_x);
        put_f64(&mut out, offset::RADAR_RESOLUTION_Y, s.radar_resolution_y);
        put_f64(&mut out, offset::GAUGE_RESOLUTION_X, s.gauge_resolution_x);
        put_f64(&mut out, offset::GAUGE_RESOLUTION_Y, s.gauge_resolution_y);
        out
    }

    /// Decode a record from the start of `bytes`
    ///
    /// Only the layout is checked here; magic, version and declared size are
    /// left for the caller to judge through [`SnapshotHeader`].
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < RECORD_SIZE {
            return Err(SnapshotError::Truncated {
                needed: RECORD_SIZE,
                available: bytes.len(),
            });
        }
        let header = SnapshotHeader::decode(bytes)?;
        let state = RadarState {
            show_range_rings: bytes[offset::SHOW_RANGE_RINGS] != 0,
            show_cursor: bytes[offset::SHOW_CURSOR] != 0,
            far_shore_enhance: bytes[offset::FAR_SHORE_ENHANCE] != 0,
            visual_zoom: get_f64(bytes, offset::VISUAL_ZOOM),
            data_zoom: get_f64(bytes, offset::DATA_ZOOM),
            scan_azimuth: get_f64(bytes, offset::SCAN_AZIMUTH),
            sweep_rate: get_f64(bytes, offset::SWEEP_RATE),
            range_miles: get_f64(bytes, offset::RANGE_MILES),
            rendering_enabled: bytes[offset::RENDERING_ENABLED] != 0,
            cursor_position_x: get_f64(bytes, offset::CURSOR_POSITION_X),
            cursor_position_y: get_f64(bytes, offset::CURSOR_POSITION_Y),
            freeze_enabled: bytes[offset::FREEZE_ENABLED] != 0,
            front_blindspot_degrees: get_f64(bytes, offset::FRONT_BLINDSPOT),
            side_blindspot_degrees: get_f64(bytes, offset::SIDE_BLINDSPOT),
            radar_resolution_x: get_f64(bytes, offset::RADAR_RESOLUTION_X),
            radar_resolution_y: get_f64(bytes, offset::RADAR_RESOLUTION_Y),
            gauge_resolution_x: get_f64(bytes, offset::GAUGE_RESOLUTION_X),
            gauge_resolution_y: get_f64(bytes, offset::GAUGE_RESOLUTION_Y),
        };
        Ok(Self { header, state })
    }
}

fn array_at<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[at..at + N]);
    out
}

fn get_f64(bytes: &[u8], at: usize) -> f64 {
    f64::from_ne_bytes(array_at(bytes, at))
}

fn put_f64(out: &mut [u8], at: usize, value: f64) {
    out[at..at + 8].copy_from_slice(&value.to_ne_bytes());
}
