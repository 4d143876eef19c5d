//! Measurement units attached to properties
//!
//! The catalog names units by string; the host maps those names to its own
//! numeric units ids through a [`UnitsRegistry`].

/// Host-assigned units identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitsId(pub u32);

impl UnitsId {
    /// Get the raw id value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Units tag carried by a property descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitsTag {
    /// Not yet resolved against a registry
    #[default]
    Unknown,
    /// Resolved units id
    Known(UnitsId),
}

impl UnitsTag {
    /// Whether this tag still needs resolving
    pub fn is_unknown(&self) -> bool {
        matches!(self, UnitsTag::Unknown)
    }
}

/// Lookup from a units name to the host's units id
pub trait UnitsRegistry {
    /// Resolve a units name, `None` if the registry does not know it
    fn units_id(&self, name: &str) -> Option<UnitsId>;
}

/// Built-in registry for running without a host
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUnits;

const STANDARD_UNITS: &[(&str, u32)] = &[
    ("Number", 1),
    ("Bool", 2),
    ("Degrees", 3),
    ("Miles", 4),
    ("Pixels", 5),
    ("Percent", 6),
];

impl UnitsRegistry for StandardUnits {
    fn units_id(&self, name: &str) -> Option<UnitsId> {
        STANDARD_UNITS
            .iter()
            .find(|(units, _)| units.eq_ignore_ascii_case(name))
            .map(|(_, id)| UnitsId(*id))
    }
}
