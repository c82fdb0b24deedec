//! Property-based tests for ControllerSettings serialization round-trip.
//!
//! These tests verify that ControllerSettings can be serialized to JSON
//! and deserialized back without data loss for arbitrary valid inputs, and
//! that generator length clamping always lands inside the configured range.

use pwcheck::types::settings::{
    AnalysisSettings, ControllerSettings, GeneratorSettings, LogSeverity, ServiceSettings,
    TimingSettings,
};
use proptest::prelude::*;

fn arb_log_severity() -> impl Strategy<Value = LogSeverity> {
    prop_oneof![
        Just(LogSeverity::Debug),
        Just(LogSeverity::Info),
        Just(LogSeverity::Warn),
        Just(LogSeverity::Error),
    ]
}

fn arb_service_settings() -> impl Strategy<Value = ServiceSettings> {
    ("https?://[a-z0-9.-]{1,30}(:[0-9]{2,5})?", 1u64..=600u64)
        .prop_map(|(base_url, timeout_secs)| ServiceSettings { base_url, timeout_secs })
}

fn arb_timing_settings() -> impl Strategy<Value = TimingSettings> {
    (0u64..=10_000u64, 0u64..=10_000u64)
        .prop_map(|(debounce_ms, copy_ack_ms)| TimingSettings { debounce_ms, copy_ack_ms })
}

fn arb_generator_settings() -> impl Strategy<Value = GeneratorSettings> {
    (
        1u32..=32u32,
        32u32..=256u32,
        1u32..=256u32,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(min_length, max_length, default_length, upper, digits, symbols)| GeneratorSettings {
                min_length,
                max_length,
                default_length,
                upper,
                digits,
                symbols,
            },
        )
}

fn arb_analysis_settings() -> impl Strategy<Value = AnalysisSettings> {
    (arb_log_severity(), any::<bool>()).prop_map(|(error_level, latest_send_wins)| {
        AnalysisSettings {
            error_level,
            latest_send_wins,
        }
    })
}

fn arb_controller_settings() -> impl Strategy<Value = ControllerSettings> {
    (
        arb_service_settings(),
        arb_timing_settings(),
        arb_generator_settings(),
        arb_analysis_settings(),
    )
        .prop_map(|(service, timing, generator, analysis)| ControllerSettings {
            service,
            timing,
            generator,
            analysis,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn settings_serialization_roundtrip(settings in arb_controller_settings()) {
        let json = serde_json::to_string(&settings)
            .expect("Serialization to JSON should succeed for any valid ControllerSettings");

        let deserialized: ControllerSettings = serde_json::from_str(&json)
            .expect("Deserialization from JSON should succeed for valid JSON");

        prop_assert_eq!(deserialized, settings);
    }

    #[test]
    fn clamp_length_stays_in_range(
        generator in arb_generator_settings(),
        requested in any::<u32>(),
    ) {
        let clamped = generator.clamp_length(requested);
        prop_assert!(clamped >= generator.min_length);
        prop_assert!(clamped <= generator.max_length);
        if (generator.min_length..=generator.max_length).contains(&requested) {
            prop_assert_eq!(clamped, requested);
        }
    }
}
