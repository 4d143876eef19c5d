//! Integration tests for the radar gauge
//!
//! These tests verify end-to-end behavior across the property catalog, the
//! gauge controllers and the snapshot codec:
//! - Name/id/units lookups through the panel
//! - Lazy device initialization and ownership on teardown
//! - Flag thresholds and paired property writes
//! - Snapshot save/restore in shared buffers, including foreign and
//!   future-version records

use std::cell::RefCell;
use std::rc::Rc;

use radar_gauge::{
    ControlError, DeserializeOutcome, PropertyController, RadarPanel, SurfaceHandle,
    SurfaceRegistry, SIMULATED_RADAR_SERVICE,
};
use radar_protocol::{
    ControlSurface, PropertyError, PropertyId, SnapshotReader, SnapshotWriter, RECORD_SIZE,
    SNAPSHOT_MAGIC, SNAPSHOT_VERSION,
};
use radar_sim::SimulatedRadar;

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    /// Create a panel over a fresh simulated radar, keeping a typed reference
    pub fn panel() -> (Rc<RefCell<SimulatedRadar>>, RadarPanel) {
        let radar = Rc::new(RefCell::new(SimulatedRadar::new("Test Radar")));
        let panel = RadarPanel::new(SurfaceHandle::from_shared(radar.clone()));
        (radar, panel)
    }

    /// Create a gauge for container 1
    pub fn gauge(panel: &RadarPanel) -> PropertyController {
        panel.create_aircraft(1).create_gauge()
    }

    pub fn id(panel: &RadarPanel, name: &str) -> PropertyId {
        panel.convert_string_to_property(name).unwrap()
    }

    /// Every writable property with a representative value
    pub const SETTINGS: &[(&str, f64)] = &[
        ("ShowRangeRings", 0.0),
        ("ShowCursor", 1.0),
        ("FarShoreEnhance", 1.0),
        ("VisualZoom", 2.5),
        ("DataZoom", 1.25),
        ("ScanAzimuth", 45.0),
        ("SweepRate", 33.3),
        ("RangeMiles", 80.0),
        ("RenderingEnabled", 0.0),
        ("FreezeEnabled", 1.0),
        ("CursorPositionX", 0.125),
        ("CursorPositionY", -0.5),
        ("FrontBlindSpotDegrees", 12.0),
        ("SideBlindSpotDegrees", 7.5),
        ("RadarResolutionX", 512.0),
        ("RadarResolutionY", 384.0),
        ("GaugeResolutionX", 320.0),
        ("GaugeResolutionY", 240.0),
    ];

    /// Save a gauge's snapshot into a fresh buffer
    pub fn save(gauge: &PropertyController) -> Vec<u8> {
        let mut out = SnapshotWriter::new();
        gauge.serialize(&mut out);
        out.into_inner()
    }

    /// Build a bare radar header with arbitrary fields
    pub fn header(magic: u32, size_bytes: i32, version: i32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&magic.to_ne_bytes());
        bytes.extend_from_slice(&size_bytes.to_ne_bytes());
        bytes.extend_from_slice(&version.to_ne_bytes());
        bytes
    }
}

// ============================================================================
// Property Catalog Tests
// ============================================================================

mod catalog_tests {
    use super::*;

    #[test]
    fn names_round_trip_through_ids() {
        let (_radar, panel) = helpers::panel();
        for descriptor in panel.table().iter() {
            let id = panel
                .convert_string_to_property(&descriptor.name.to_uppercase())
                .unwrap();
            assert_eq!(id, descriptor.id);
            assert_eq!(panel.convert_property_to_string(id), Ok(descriptor.name));
        }
    }

    #[test]
    fn out_of_range_ids_fail_every_lookup() {
        let (_radar, panel) = helpers::panel();
        let len = panel.table().len() as i32;
        for raw in [-100, -1, len, len + 1, i32::MAX] {
            let id = PropertyId(raw);
            assert_eq!(
                panel.convert_property_to_string(id),
                Err(PropertyError::OutOfRange(id))
            );
            assert_eq!(panel.property_units(id), Err(PropertyError::OutOfRange(id)));
        }
    }

    #[test]
    fn unknown_and_empty_names_fail() {
        let (_radar, panel) = helpers::panel();
        assert!(panel.convert_string_to_property("").is_err());
        assert!(panel.convert_string_to_property("RangeMile").is_err());
        assert!(panel.convert_string_to_property("RangeMilesX").is_err());
    }

    #[test]
    fn catalog_order_matches_host_ids() {
        let (_radar, panel) = helpers::panel();
        let names: Vec<_> = panel.table().iter().map(|d| d.name).collect();
        assert_eq!(names.first(), Some(&"ClearRadarImage"));
        assert_eq!(names[10], "FreezeEnabled");
        assert_eq!(names[13], "CursorPositionLat");
        assert_eq!(names.last(), Some(&"CurrentRadarBeamOffset"));
    }
}

// ============================================================================
// Controller Tests
// ============================================================================

mod controller_tests {
    use super::*;

    #[test]
    fn paired_write_keeps_other_component() {
        let (radar, panel) = helpers::panel();
        let mut gauge = helpers::gauge(&panel);

        gauge
            .set_value(helpers::id(&panel, "CursorPositionY"), 3.0)
            .unwrap();
        gauge
            .set_value(helpers::id(&panel, "CursorPositionX"), 12.0)
            .unwrap();

        assert_eq!(radar.borrow().cursor_position_xy(), (12.0, 3.0));
        assert_eq!(
            gauge.get_value(helpers::id(&panel, "CursorPositionY")),
            Ok(3.0)
        );
    }

    #[test]
    fn show_cursor_threshold() {
        let (_radar, panel) = helpers::panel();
        let mut gauge = helpers::gauge(&panel);
        let show_cursor = helpers::id(&panel, "ShowCursor");

        gauge.set_value(show_cursor, 0.999).unwrap();
        assert_eq!(gauge.get_value(show_cursor), Ok(0.0));

        gauge.set_value(show_cursor, 1.0).unwrap();
        assert_eq!(gauge.get_value(show_cursor), Ok(1.0));
    }

    #[test]
    fn read_only_properties_follow_device() {
        let (radar, panel) = helpers::panel();
        let gauge = helpers::gauge(&panel);
        radar.borrow_mut().set_scan_azimuth_degrees(60.0);
        radar.borrow_mut().set_scan_rate_degrees_per_second(30.0);
        radar.borrow_mut().advance(0.5);

        assert_eq!(
            gauge.get_value(helpers::id(&panel, "CurrentRadarBeamOffset")),
            Ok(15.0)
        );
        assert_eq!(
            gauge.get_value(helpers::id(&panel, "CurrentRadarScanElevationDegrees")),
            Ok(-2.0)
        );
    }

    #[test]
    fn unknown_id_reported_without_side_effects() {
        let (radar, panel) = helpers::panel();
        let mut gauge = helpers::gauge(&panel);

        assert_eq!(
            gauge.set_value(PropertyId(1000), 1.0),
            Err(ControlError::UnknownId(PropertyId(1000)))
        );
        assert_eq!(radar.borrow().init_calls(), 0);
    }

    #[test]
    fn owner_teardown_deinitializes_exactly_once() {
        let (radar, panel) = helpers::panel();
        let mut owner = helpers::gauge(&panel);
        let mut bystander = helpers::gauge(&panel);

        owner.set_value(helpers::id(&panel, "RangeMiles"), 10.0).unwrap();
        bystander
            .set_value(helpers::id(&panel, "RangeMiles"), 20.0)
            .unwrap();
        assert!(owner.owns_surface());
        assert!(!bystander.owns_surface());

        drop(bystander);
        assert_eq!(radar.borrow().deinit_calls(), 0);
        assert!(radar.borrow().is_initialized());

        drop(owner);
        assert_eq!(radar.borrow().deinit_calls(), 1);
        assert!(!radar.borrow().is_initialized());
    }

    #[test]
    fn untouched_gauge_teardown_does_nothing() {
        let (radar, panel) = helpers::panel();
        let gauge = helpers::gauge(&panel);
        gauge.get_value(helpers::id(&panel, "VisualZoom")).unwrap();
        drop(gauge);
        assert_eq!(radar.borrow().init_calls(), 0);
        assert_eq!(radar.borrow().deinit_calls(), 0);
    }

    #[test]
    fn device_can_be_reclaimed_after_owner_leaves() {
        let (radar, panel) = helpers::panel();
        let mut first = helpers::gauge(&panel);
        first.set_value(PropertyId(0), 0.0).unwrap();
        drop(first);

        let mut second = helpers::gauge(&panel);
        second.set_value(PropertyId(0), 0.0).unwrap();
        assert!(second.owns_surface());
        assert_eq!(radar.borrow().init_calls(), 2);
    }

    #[test]
    fn panels_from_registry_share_one_device() {
        let radar = Rc::new(RefCell::new(SimulatedRadar::new("Shared")));
        let mut registry = SurfaceRegistry::new();
        registry.register(
            SIMULATED_RADAR_SERVICE,
            SurfaceHandle::from_shared(radar.clone()),
        );

        let plugin = RadarPanel::from_registry(&registry, SIMULATED_RADAR_SERVICE).unwrap();
        let builtin = RadarPanel::from_registry(&registry, SIMULATED_RADAR_SERVICE).unwrap();

        let mut plugin_gauge = plugin.create_aircraft(1).create_gauge();
        let mut builtin_gauge = builtin.create_aircraft(2).create_gauge();

        builtin_gauge.set_value_by_name("DataZoom", 4.0).unwrap();
        plugin_gauge.set_value_by_name("VisualZoom", 3.0).unwrap();

        assert!(builtin_gauge.owns_surface());
        assert!(!plugin_gauge.owns_surface());
        assert_eq!(radar.borrow().init_calls(), 1);
    }
}

// ============================================================================
// Snapshot Tests
// ============================================================================

mod snapshot_tests {
    use super::*;

    #[test]
    fn save_then_restore_reproduces_every_setting() {
        let (_radar, panel) = helpers::panel();
        let mut gauge = helpers::gauge(&panel);
        for (name, value) in helpers::SETTINGS {
            gauge.set_value_by_name(name, *value).unwrap();
        }
        let bytes = helpers::save(&gauge);
        assert_eq!(bytes.len(), RECORD_SIZE);

        let (restored_radar, restored_panel) = helpers::panel();
        let mut restored = helpers::gauge(&restored_panel);
        let mut input = SnapshotReader::new(&bytes);
        assert_eq!(
            restored.deserialize(&mut input),
            Ok(DeserializeOutcome::Applied)
        );
        assert_eq!(restored_radar.borrow().init_calls(), 1);

        for (name, value) in helpers::SETTINGS {
            let got = restored.get_value_by_name(name).unwrap();
            assert_eq!(got.to_bits(), value.to_bits(), "{} differs", name);
        }
    }

    #[test]
    fn non_owner_saves_nothing() {
        let (radar, panel) = helpers::panel();
        radar.borrow_mut().init("Host", 256, 256);

        let mut gauge = helpers::gauge(&panel);
        gauge.set_value_by_name("RangeMiles", 50.0).unwrap();
        assert!(helpers::save(&gauge).is_empty());
    }

    #[test]
    fn future_version_is_skipped_by_declared_size() {
        let (radar, panel) = helpers::panel();
        let mut gauge = helpers::gauge(&panel);
        let before = radar.borrow().range_miles();

        let declared = RECORD_SIZE as i32 + 24;
        let mut bytes = helpers::header(SNAPSHOT_MAGIC, declared, SNAPSHOT_VERSION + 1);
        bytes.resize(declared as usize, 0x55);
        bytes.extend_from_slice(&[1, 2, 3]);

        let mut input = SnapshotReader::new(&bytes);
        assert_eq!(
            gauge.deserialize(&mut input),
            Ok(DeserializeOutcome::Skipped {
                version: SNAPSHOT_VERSION + 1,
                size_bytes: declared
            })
        );
        assert_eq!(input.position(), declared as usize);
        assert_eq!(radar.borrow().range_miles(), before);
        assert_eq!(radar.borrow().init_calls(), 0);
    }

    #[test]
    fn foreign_record_leaves_cursor() {
        let (radar, panel) = helpers::panel();
        let mut gauge = helpers::gauge(&panel);

        let mut bytes = helpers::header(0x0BAD_F00D, RECORD_SIZE as i32, SNAPSHOT_VERSION);
        bytes.resize(RECORD_SIZE, 0);

        let mut input = SnapshotReader::new(&bytes);
        assert_eq!(
            gauge.deserialize(&mut input),
            Ok(DeserializeOutcome::NotPresent)
        );
        assert_eq!(input.position(), 0);
        assert!(!radar.borrow().is_initialized());
    }

    #[test]
    fn records_embedded_between_siblings() {
        let (_radar, panel) = helpers::panel();
        let mut gauge = helpers::gauge(&panel);
        gauge.set_value_by_name("ScanAzimuth", 45.0).unwrap();

        // A sibling plugin's record precedes ours in the shared buffer
        let sibling = helpers::header(0x5151_5151, 16, 1);
        let mut out = SnapshotWriter::from_vec(sibling);
        out.write_data(&[0; 4]);
        gauge.serialize(&mut out);
        out.write_data(b"tail");
        let bytes = out.into_inner();

        let (restored_radar, restored_panel) = helpers::panel();
        let mut restored = helpers::gauge(&restored_panel);
        let mut input = SnapshotReader::new(&bytes);

        assert_eq!(
            restored.deserialize(&mut input),
            Ok(DeserializeOutcome::NotPresent)
        );
        input.read(16).unwrap();
        assert_eq!(
            restored.deserialize(&mut input),
            Ok(DeserializeOutcome::Applied)
        );
        assert_eq!(input.current(), b"tail");
        assert_eq!(restored_radar.borrow().scan_azimuth(), 45.0);
    }

    #[test]
    fn restore_onto_running_device_does_not_claim() {
        let (_radar, panel) = helpers::panel();
        let mut gauge = helpers::gauge(&panel);
        gauge.set_value_by_name("RangeMiles", 25.0).unwrap();
        let bytes = helpers::save(&gauge);

        let (other_radar, other_panel) = helpers::panel();
        other_radar.borrow_mut().init("Host", 64, 64);
        let mut other = helpers::gauge(&other_panel);

        let mut input = SnapshotReader::new(&bytes);
        assert_eq!(
            other.deserialize(&mut input),
            Ok(DeserializeOutcome::Applied)
        );
        assert!(!other.owns_surface());
        assert_eq!(other_radar.borrow().range_miles(), 25.0);
        assert_eq!(other_radar.borrow().init_calls(), 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn property_name() -> impl Strategy<Value = &'static str> {
        prop::sample::select(
            helpers::SETTINGS
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>(),
        )
    }

    proptest! {
        #[test]
        fn name_lookup_ignores_case(name in property_name(), upper in any::<bool>()) {
            let (_radar, panel) = helpers::panel();
            let keyword = if upper { name.to_uppercase() } else { name.to_lowercase() };

            let id = panel.convert_string_to_property(&keyword).unwrap();
            prop_assert_eq!(panel.convert_property_to_string(id).unwrap(), name);
        }

        #[test]
        fn ids_outside_catalog_fail(raw in prop_oneof![i32::MIN..0i32, 23i32..i32::MAX]) {
            let (_radar, panel) = helpers::panel();
            let mut gauge = helpers::gauge(&panel);
            let id = PropertyId(raw);

            prop_assert!(panel.convert_property_to_string(id).is_err());
            prop_assert!(panel.property_units(id).is_err());
            prop_assert_eq!(gauge.get_value(id), Err(ControlError::UnknownId(id)));
            prop_assert_eq!(gauge.set_value(id, 1.0), Err(ControlError::UnknownId(id)));
        }

        #[test]
        fn scalar_snapshot_is_bit_exact(
            zoom in any::<f64>(),
            azimuth in -360.0f64..360.0,
            range in 0.0f64..500.0,
            x in any::<f64>(),
            y in any::<f64>(),
        ) {
            let (_radar, panel) = helpers::panel();
            let mut gauge = helpers::gauge(&panel);
            gauge.set_value_by_name("VisualZoom", zoom).unwrap();
            gauge.set_value_by_name("ScanAzimuth", azimuth).unwrap();
            gauge.set_value_by_name("RangeMiles", range).unwrap();
            gauge.set_value_by_name("CursorPositionX", x).unwrap();
            gauge.set_value_by_name("CursorPositionY", y).unwrap();
            let bytes = helpers::save(&gauge);

            let (_restored_radar, restored_panel) = helpers::panel();
            let mut restored = helpers::gauge(&restored_panel);
            restored.deserialize(&mut SnapshotReader::new(&bytes)).unwrap();

            for (name, value) in [
                ("VisualZoom", zoom),
                ("ScanAzimuth", azimuth),
                ("RangeMiles", range),
                ("CursorPositionX", x),
                ("CursorPositionY", y),
            ] {
                let got = restored.get_value_by_name(name).unwrap();
                prop_assert_eq!(got.to_bits(), value.to_bits());
            }
        }

        #[test]
        fn flag_follows_threshold(value in -10.0f64..10.0) {
            let (_radar, panel) = helpers::panel();
            let mut gauge = helpers::gauge(&panel);
            gauge.set_value_by_name("FarShoreEnhance", value).unwrap();

            let expected = if value >= 1.0 { 1.0 } else { 0.0 };
            prop_assert_eq!(gauge.get_value_by_name("FarShoreEnhance").unwrap(), expected);
        }

        #[test]
        fn skipped_record_advances_by_declared_size(
            extra in 0usize..256,
            version in (SNAPSHOT_VERSION + 1)..100,
        ) {
            let (radar, panel) = helpers::panel();
            let mut gauge = helpers::gauge(&panel);
            let declared = RECORD_SIZE + extra;

            let mut bytes = helpers::header(SNAPSHOT_MAGIC, declared as i32, version);
            bytes.resize(declared + 8, 0xEE);

            let mut input = SnapshotReader::new(&bytes);
            let outcome = gauge.deserialize(&mut input).unwrap();
            let is_skipped = matches!(outcome, DeserializeOutcome::Skipped { .. });
            prop_assert!(is_skipped);
            prop_assert_eq!(input.position(), declared);
            prop_assert_eq!(radar.borrow().init_calls(), 0);
        }
    }
}
