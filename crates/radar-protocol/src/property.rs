//! Property catalog
//!
//! Every radar property is addressable by a case-insensitive name and by a
//! numeric id. The id is the descriptor's position in the table, and each
//! descriptor carries the accessor that reads or writes the device, so the
//! name, id and dispatch for a property can never drift apart.
//!
//! # Property shapes
//!
//! - **Scalar**: passed straight through to the device
//! - **Flag**: device boolean exposed as `1.0`/`0.0`; writes of `>= 1.0` mean true
//! - **Paired**: one component of an attribute the device only exposes as a pair
//! - **Action**: write-only trigger, the written value is ignored
//! - **ReadOnly**: scalar with no write dispatch

use std::fmt;

use crate::error::PropertyError;
use crate::surface::{ControlSurface, Lla};
use crate::units::{UnitsRegistry, UnitsTag};

/// Units name every radar property is declared with
pub const NUMBER_UNITS: &str = "Number";

/// Numeric property identifier, as handed out to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyId(pub i32);

impl PropertyId {
    /// Get the raw id value
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which half of a pair a property addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    First,
    Second,
}

impl Component {
    fn pick(self, pair: (f64, f64)) -> f64 {
        match self {
            Component::First => pair.0,
            Component::Second => pair.1,
        }
    }

    fn replace(self, pair: (f64, f64), value: f64) -> (f64, f64) {
        match self {
            Component::First => (value, pair.1),
            Component::Second => (pair.0, value),
        }
    }
}

pub type ScalarGetter = fn(&dyn ControlSurface) -> f64;
pub type ScalarSetter = fn(&mut dyn ControlSurface, f64);
pub type FlagGetter = fn(&dyn ControlSurface) -> bool;
pub type FlagSetter = fn(&mut dyn ControlSurface, bool);
pub type PairGetter = fn(&dyn ControlSurface) -> (f64, f64);
pub type PairSetter = fn(&mut dyn ControlSurface, (f64, f64));
pub type ActionFn = fn(&mut dyn ControlSurface);

/// How a property reaches the device
#[derive(Clone, Copy)]
pub enum Accessor {
    Action(ActionFn),
    Scalar {
        get: ScalarGetter,
        set: ScalarSetter,
    },
    ReadOnly(ScalarGetter),
    Flag {
        get: FlagGetter,
        set: FlagSetter,
    },
    Paired {
        get: PairGetter,
        set: PairSetter,
        component: Component,
    },
}

impl Accessor {
    /// Short name of the property shape
    pub fn shape(&self) -> &'static str {
        match self {
            Accessor::Action(_) => "action",
            Accessor::Scalar { .. } => "scalar",
            Accessor::ReadOnly(_) => "read-only",
            Accessor::Flag { .. } => "flag",
            Accessor::Paired { .. } => "paired",
        }
    }

    /// Whether the property has a read dispatch
    pub fn is_readable(&self) -> bool {
        !matches!(self, Accessor::Action(_))
    }

    /// Whether the property has a write dispatch
    pub fn is_writable(&self) -> bool {
        !matches!(self, Accessor::ReadOnly(_))
    }

    /// Read the property from the device
    ///
    /// Returns `None` for write-only actions.
    pub fn read(&self, surface: &dyn ControlSurface) -> Option<f64> {
        match *self {
            Accessor::Action(_) => None,
            Accessor::Scalar { get, .. } | Accessor::ReadOnly(get) => Some(get(surface)),
            Accessor::Flag { get, .. } => Some(if get(surface) { 1.0 } else { 0.0 }),
            Accessor::Paired { get, component, .. } => Some(component.pick(get(surface))),
        }
    }

    /// Write the property to the device
    ///
    /// Paired properties read the current pair and write it back with only
    /// the addressed component replaced. Returns `false` for read-only
    /// properties, in which case the device is not touched.
    pub fn write(&self, surface: &mut dyn ControlSurface, value: f64) -> bool {
        match *self {
            Accessor::Action(run) => run(surface),
            Accessor::Scalar { set, .. } => set(surface, value),
            Accessor::ReadOnly(_) => return false,
            Accessor::Flag { set, .. } => set(surface, value >= 1.0),
            Accessor::Paired { get, set, component } => {
                let pair = get(surface);
                set(surface, component.replace(pair, value));
            }
        }
        true
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Paired { component, .. } => {
                write!(f, "Accessor::Paired({:?})", component)
            }
            other => write!(f, "Accessor::{}", other.shape()),
        }
    }
}

/// One entry of the property catalog
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    /// Position in the table
    pub id: PropertyId,
    /// Property name as exposed to the host
    pub name: &'static str,
    /// Units name used for units resolution
    pub units_name: &'static str,
    /// Resolved units tag
    pub units: UnitsTag,
    /// Device dispatch
    pub accessor: Accessor,
}

fn cursor_lat_lon(surface: &dyn ControlSurface) -> (f64, f64) {
    let lla = surface.cursor_position_lla();
    (lla.lat, lla.lon)
}

fn set_cursor_lat_lon(surface: &mut dyn ControlSurface, (lat, lon): (f64, f64)) {
    // Altitude is not addressable as a property, keep whatever the device has
    let alt = surface.cursor_position_lla().alt;
    surface.set_cursor_position_lla(Lla::new(lat, lon, alt));
}

fn catalog() -> Vec<(&'static str, Accessor)> {
    let cursor_xy = |component| Accessor::Paired {
        get: |s| s.cursor_position_xy(),
        set: |s, (x, y)| s.set_cursor_position_xy(x, y),
        component,
    };
    let cursor_lla = |component| Accessor::Paired {
        get: cursor_lat_lon,
        set: set_cursor_lat_lon,
        component,
    };
    let radar_resolution = |component| Accessor::Paired {
        get: |s| s.radar_resolution(),
        set: |s, (x, y)| s.set_radar_image_resolution(x, y),
        component,
    };
    let gauge_resolution = |component| Accessor::Paired {
        get: |s| s.gauge_resolution(),
        set: |s, (x, y)| s.set_radar_gauge_resolution(x, y),
        component,
    };

    vec![
        ("ClearRadarImage", Accessor::Action(|s| s.clear_radar_image())),
        (
            "ShowRangeRings",
            Accessor::Flag {
                get: |s| s.show_range_rings(),
                set: |s, v| s.set_show_range_rings(v),
            },
        ),
        (
            "ShowCursor",
            Accessor::Flag {
                get: |s| s.show_cursor(),
                set: |s, v| s.set_show_cursor(v),
            },
        ),
        (
            "FarShoreEnhance",
            Accessor::Flag {
                get: |s| s.far_shore_enhance(),
                set: |s, v| s.set_far_shore_enhancement_enabled(v),
            },
        ),
        (
            "VisualZoom",
            Accessor::Scalar {
                get: |s| s.visual_zoom(),
                set: |s, v| s.set_visual_zoom(v),
            },
        ),
        (
            "DataZoom",
            Accessor::Scalar {
                get: |s| s.data_zoom(),
                set: |s, v| s.set_data_zoom(v),
            },
        ),
        (
            "ScanAzimuth",
            Accessor::Scalar {
                get: |s| s.scan_azimuth(),
                set: |s, v| s.set_scan_azimuth_degrees(v),
            },
        ),
        (
            "SweepRate",
            Accessor::Scalar {
                get: |s| s.sweep_rate(),
                set: |s, v| s.set_scan_rate_degrees_per_second(v),
            },
        ),
        (
            "RangeMiles",
            Accessor::Scalar {
                get: |s| s.range_miles(),
                set: |s, v| s.set_range_miles(v),
            },
        ),
        (
            "RenderingEnabled",
            Accessor::Flag {
                get: |s| s.rendering_enabled(),
                set: |s, v| s.set_rendering_enabled(v),
            },
        ),
        (
            "FreezeEnabled",
            Accessor::Flag {
                get: |s| s.freeze_enabled(),
                set: |s, v| s.set_freeze(v),
            },
        ),
        ("CursorPositionX", cursor_xy(Component::First)),
        ("CursorPositionY", cursor_xy(Component::Second)),
        ("CursorPositionLat", cursor_lla(Component::First)),
        ("CursorPositionLon", cursor_lla(Component::Second)),
        (
            "FrontBlindSpotDegrees",
            Accessor::Scalar {
                get: |s| s.front_blindspot_degrees(),
                set: |s, v| s.set_front_blindspot_degrees(v),
            },
        ),
        (
            "SideBlindSpotDegrees",
            Accessor::Scalar {
                get: |s| s.side_blindspot_degrees(),
                set: |s, v| s.set_side_blindspot_degrees(v),
            },
        ),
        ("RadarResolutionX", radar_resolution(Component::First)),
        ("RadarResolutionY", radar_resolution(Component::Second)),
        ("GaugeResolutionX", gauge_resolution(Component::First)),
        ("GaugeResolutionY", gauge_resolution(Component::Second)),
        (
            "CurrentRadarScanElevationDegrees",
            Accessor::ReadOnly(|s| s.current_scan_elevation_degrees()),
        ),
        (
            "CurrentRadarBeamOffset",
            Accessor::ReadOnly(|s| s.current_beam_offset_degrees()),
        ),
    ]
}

/// Ordered catalog of radar properties
///
/// Built once, then only read. The only mutation is the optional units
/// resolution pass, which touches entries still tagged [`UnitsTag::Unknown`].
#[derive(Debug, Clone)]
pub struct PropertyTable {
    entries: Vec<PropertyDescriptor>,
}

impl PropertyTable {
    /// Build the radar property catalog with unresolved units
    pub fn new() -> Self {
        let entries = catalog()
            .into_iter()
            .enumerate()
            .map(|(index, (name, accessor))| PropertyDescriptor {
                id: PropertyId(index as i32),
                name,
                units_name: NUMBER_UNITS,
                units: UnitsTag::Unknown,
                accessor,
            })
            .collect();
        Self { entries }
    }

    /// Resolve units names into units tags
    ///
    /// Idempotent: entries that already carry a resolved tag are left alone.
    /// Returns the number of entries resolved by this call.
    pub fn resolve_units(&mut self, registry: &dyn UnitsRegistry) -> usize {
        let mut resolved = 0;
        for entry in self.entries.iter_mut().filter(|e| e.units.is_unknown()) {
            if let Some(id) = registry.units_id(entry.units_name) {
                entry.units = UnitsTag::Known(id);
                resolved += 1;
            }
        }
        tracing::debug!("Resolved units for {} properties", resolved);
        resolved
    }

    /// Number of properties in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all descriptors in id order
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.entries.iter()
    }

    /// Look up a descriptor by id
    pub fn get(&self, id: PropertyId) -> Result<&PropertyDescriptor, PropertyError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|index| self.entries.get(index))
            .ok_or(PropertyError::OutOfRange(id))
    }

    /// Resolve a property name (case-insensitive) to its id
    pub fn resolve_id(&self, name: &str) -> Result<PropertyId, PropertyError> {
        if name.is_empty() {
            return Err(PropertyError::NotFound(String::new()));
        }
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| e.id)
            .ok_or_else(|| PropertyError::NotFound(name.to_string()))
    }

    /// Resolve an id to its property name
    pub fn resolve_name(&self, id: PropertyId) -> Result<&'static str, PropertyError> {
        self.get(id).map(|e| e.name)
    }

    /// Resolve an id to its units tag
    pub fn resolve_units_tag(&self, id: PropertyId) -> Result<UnitsTag, PropertyError> {
        self.get(id).map(|e| e.units)
    }
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::new()
    }
}
