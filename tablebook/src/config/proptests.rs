//! Property-based tests for the configuration system.

use super::merger::ConfigMerger;
use super::schema::{BookingConfig, Config, OutputFormat};
use super::validator::ConfigValidator;
use crate::availability::MAX_CONFLICT_WINDOW_MINUTES;
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
        Just(OutputFormat::Table),
    ]
}

fn booking_strategy() -> impl Strategy<Value = BookingConfig> {
    (prop::option::of(0u32..600), prop::option::of(1u32..365)).prop_map(
        |(min_lead_minutes, max_advance_days)| BookingConfig {
            min_lead_minutes,
            max_advance_days,
        },
    )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u32..=MAX_CONFLICT_WINDOW_MINUTES),
        prop::option::of(any::<bool>()),
        prop::option::of(booking_strategy()),
        prop::option::of(1u64..=600),
        prop::option::of(any::<bool>()),
        prop::option::of(output_format_strategy()),
    )
        .prop_map(
            |(window, span, booking, lock_wait, autoinit, output_format)| Config {
                conflict_window_minutes: window,
                span_midnight: span,
                booking,
                maximum_lock_wait_seconds: lock_wait,
                disable_autoinit: autoinit,
                output_format,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A set field in the higher layer always wins; an unset one never erases.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.conflict_window_minutes,
            high.conflict_window_minutes.or(low.conflict_window_minutes)
        );
        prop_assert_eq!(merged.span_midnight, high.span_midnight.or(low.span_midnight));
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));

        let lead = |c: &Config| c.booking.and_then(|b| b.min_lead_minutes);
        prop_assert_eq!(lead(&merged), lead(&high).or(lead(&low)));
    }

    #[test]
    fn config_merge_with_default_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(&merged, &config);

        let mut from_empty = Config::default();
        ConfigMerger::merge_into(&mut from_empty, &config);
        prop_assert_eq!(from_empty, config);
    }

    #[test]
    fn config_merge_is_idempotent(config in config_strategy()) {
        let mut once = config.clone();
        ConfigMerger::merge_into(&mut once, &config);
        prop_assert_eq!(once, config);
    }

    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }

    #[test]
    fn windows_in_range_validate(minutes in 1u32..=MAX_CONFLICT_WINDOW_MINUTES) {
        let config = Config {
            conflict_window_minutes: Some(minutes),
            ..Default::default()
        };
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }
}
