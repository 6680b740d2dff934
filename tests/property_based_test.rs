//! Property-based tests using proptest
//!
//! Tests that verify the instantiation and matching laws hold for
//! arbitrary device and attribute names.

use proptest::prelude::*;
use smartmon_collector::catalog::build_catalog;
use smartmon_collector::instantiate::instantiate;
use smartmon_collector::matcher::match_subscription;
use smartmon_collector::metric::{MetricTemplate, Namespace};
use smartmon_collector::smart::types::{Assessment, Device, SmartAttribute};
use std::time::SystemTime;

/// Names as they come off real hardware: no path separators, no wildcard
/// token.
const NAME_PATTERN: &str = "[A-Za-z0-9][A-Za-z0-9_.-]{0,23}";

fn attribute(num: u8, name: &str) -> SmartAttribute {
    SmartAttribute {
        num,
        name: name.to_string(),
        value: 100,
        worst: 100,
        thresh: 0,
        attr_type: "Old_age".to_string(),
        updated: "Always".to_string(),
        when_failed: "-".to_string(),
        raw: "0".to_string(),
    }
}

fn device_with(interface: &str, name: &str, attribute_names: &[String]) -> Device {
    Device {
        interface: interface.to_string(),
        name: name.to_string(),
        path: format!("/dev/{}", name),
        serial: "S".to_string(),
        smart_capable: true,
        assessment: Assessment::Pass,
        attributes: attribute_names
            .iter()
            .enumerate()
            .map(|(i, n)| Some(attribute(i as u8, n)))
            .collect(),
    }
}

proptest! {
    #[test]
    fn test_instance_count_law(
        interface in NAME_PATTERN,
        name in NAME_PATTERN,
        attribute_names in prop::collection::vec(NAME_PATTERN, 0..12),
    ) {
        // Given: One device with n non-null attributes
        let devices = vec![device_with(&interface, &name, &attribute_names)];

        // When: Instantiating against the full catalog
        let metrics =
            instantiate(&devices, &build_catalog(), SystemTime::now()).unwrap();

        // Then: Exactly 1 health instance plus 7 per attribute
        prop_assert_eq!(metrics.len(), 1 + 7 * attribute_names.len());
    }

    #[test]
    fn test_wildcard_health_subscription_matches_every_device(
        names in prop::collection::vec(NAME_PATTERN, 1..6),
    ) {
        // Given: Several devices with arbitrary names
        let devices: Vec<Device> = names
            .iter()
            .map(|n| device_with("sat", n, &[]))
            .collect();
        let instances =
            instantiate(&devices, &build_catalog(), SystemTime::now()).unwrap();
        let subscription = MetricTemplate::from_pattern("intel/smartmon/*/*/health");

        // When: Matching the wildcarded health pattern
        let matched = match_subscription(&subscription, &instances).unwrap();

        // Then: One match per device, regardless of what the names contain
        prop_assert_eq!(matched.len(), devices.len());
    }

    #[test]
    fn test_exact_rendered_path_matches_its_own_instance(
        interface in NAME_PATTERN,
        name in NAME_PATTERN,
        attribute_name in NAME_PATTERN,
    ) {
        // Given: A device and the full instance set it produces
        let devices = vec![device_with(
            &interface,
            &name,
            std::slice::from_ref(&attribute_name),
        )];
        let instances =
            instantiate(&devices, &build_catalog(), SystemTime::now()).unwrap();

        // When: Subscribing with each instance's own rendered path
        // Then: The literal path selects at least that instance, even when
        // the name contains regex metacharacters like '.'
        for instance in &instances {
            let subscription =
                MetricTemplate::from_pattern(&instance.namespace.render());
            let matched = match_subscription(&subscription, &instances).unwrap();
            prop_assert!(
                matched.iter().any(|m| m.namespace == instance.namespace),
                "rendered path {} failed to select itself",
                instance.namespace.render()
            );
        }
    }

    #[test]
    fn test_render_reparse_preserves_segment_count(
        interface in NAME_PATTERN,
        name in NAME_PATTERN,
    ) {
        // Given: A bound health namespace
        let devices = vec![device_with(&interface, &name, &[])];
        let instances =
            instantiate(&devices, &build_catalog(), SystemTime::now()).unwrap();

        // When: Rendering and re-parsing the path
        let namespace = &instances[0].namespace;
        let reparsed = Namespace::from_pattern(&namespace.render());

        // Then: Segment count and rendering survive the round trip
        prop_assert_eq!(reparsed.len(), namespace.len());
        prop_assert_eq!(reparsed.render(), namespace.render());
    }

    #[test]
    fn test_health_data_is_always_zero_or_one(
        assessment in prop::sample::select(vec![
            Assessment::Pass,
            Assessment::Fail,
            Assessment::Warn,
            Assessment::Unknown,
        ]),
    ) {
        // Given: Any assessment a device can report
        // Then: The health payload stays in {0, 1}
        let data = assessment.health_data();
        prop_assert!(data == 0 || data == 1);
        prop_assert_eq!(data == 0, assessment == Assessment::Pass);
    }
}
