//! Tests for `disambiguate` against real-world label spellings

use super::*;
use crate::app::services::label_disambiguator::{
    Batch, BatteryNumber, TemperatureCode, disambiguate, disambiguate_all,
};
use crate::{Error, LabelField};

#[test]
fn test_disambiguate_full_label_with_repetition() {
    let identity = disambiguate("UCT_AST9AH_A01_RT1 2").unwrap();

    assert_eq!(identity.batch, Batch::A);
    assert_eq!(identity.number.to_string(), "01");
    assert_eq!(identity.temperature, TemperatureCode::Room(1));
    assert_eq!(identity.run_repetition, Some(2));
    assert_eq!(identity.repetition_suffix(), " 2");
}

#[test]
fn test_disambiguate_negative_temperature_without_repetition() {
    let identity = disambiguate("UCT_AST9AH_B07_-20").unwrap();

    assert_eq!(identity.batch, Batch::B);
    assert_eq!(identity.number, BatteryNumber::new(7).unwrap());
    assert_eq!(identity.temperature.to_string(), "-20");
    assert_eq!(identity.run_repetition, None);
}

#[test]
fn test_disambiguate_bare_rt_is_first_room_run() {
    let identity = disambiguate("UCT_AST9AH_A03_RT").unwrap();
    assert_eq!(identity.temperature, TemperatureCode::Room(1));

    let repeated = disambiguate("UCT_AST9AH_A03_RT 3").unwrap();
    assert_eq!(repeated.temperature, TemperatureCode::Room(1));
    assert_eq!(repeated.run_repetition, Some(3));
}

#[test]
fn test_disambiguate_second_room_run() {
    let identity = disambiguate("UCT_AST9AH_B10_RT2").unwrap();
    assert_eq!(identity.temperature, TemperatureCode::Room(2));
    assert_eq!(identity.number.value(), 10);
}

#[test]
fn test_disambiguate_legacy_zero_spellings() {
    for label in [
        "UCT_AST9AH_A05_00",
        "UCT_AST9AH_A05_+00",
        "UCT_AST9AH_A05_0",
    ] {
        let identity = disambiguate(label).unwrap();
        assert_eq!(
            identity.temperature,
            TemperatureCode::Celsius(0),
            "label {}",
            label
        );
        assert_eq!(identity.temperature.to_string(), "00");
    }
}

#[test]
fn test_disambiguate_every_temperature_code() {
    for label in labels_for_battery("B04") {
        let identity = disambiguate(&label).unwrap();
        assert_eq!(identity.canonical_label("UCT_AST9AH"), label);
    }
}

#[test]
fn test_disambiguate_tolerates_surrounding_noise() {
    let identity = disambiguate("retest AST A02 -30 after reseat").unwrap();
    assert_eq!(identity.battery_key(), "A02");
    assert_eq!(identity.temperature, TemperatureCode::Celsius(-30));
    assert_eq!(identity.run_repetition, None);
}

#[test]
fn test_disambiguate_left_most_temperature_wins() {
    let identity = disambiguate("UCT_AST9AH_A01_-10_RT2").unwrap();
    assert_eq!(identity.temperature, TemperatureCode::Celsius(-10));
}

#[test]
fn test_disambiguate_left_most_battery_wins() {
    let identity = disambiguate("UCT_A02_B03_-40").unwrap();
    assert_eq!(identity.battery_key(), "A02");
}

#[test]
fn test_disambiguate_is_deterministic() {
    let label = "UCT_AST9AH_B08_-40 1";
    let first = disambiguate(label).unwrap();
    for _ in 0..10 {
        assert_eq!(disambiguate(label).unwrap(), first);
    }
}

#[test]
fn test_disambiguate_missing_battery() {
    let err = disambiguate("UCT_AST9AH_C01_RT1").unwrap_err();
    assert!(err.is_invalid_label());
    assert!(matches!(
        err,
        Error::MissingLabelField {
            field: LabelField::Batch,
            ..
        }
    ));
}

#[test]
fn test_disambiguate_battery_needs_exactly_two_digits() {
    assert!(disambiguate("UCT_AST9AH_A1_RT1").is_err());
    assert!(disambiguate("UCT_AST9AH_A012_RT1").is_err());
}

#[test]
fn test_disambiguate_battery_not_glued_to_word() {
    // "XA01" is part of another token, not a battery
    assert!(disambiguate("UCT_XA01_RT1").is_err());
}

#[test]
fn test_disambiguate_missing_temperature() {
    let err = disambiguate("UCT_AST9AH_A01").unwrap_err();
    assert!(matches!(
        err,
        Error::MissingLabelField {
            field: LabelField::Temperature,
            ..
        }
    ));
}

#[test]
fn test_disambiguate_rejects_unknown_temperature() {
    for label in ["UCT_AST9AH_A01_-25", "UCT_AST9AH_A01_RT3", "UCT_AST9AH_A01_25"] {
        assert!(disambiguate(label).is_err(), "label {}", label);
    }
}

#[test]
fn test_disambiguate_repetition_digit_is_not_a_temperature() {
    // The trailing " 0" is a run index; the label has no temperature
    let err = disambiguate("UCT_AST9AH_A01 0").unwrap_err();
    assert!(matches!(
        err,
        Error::MissingLabelField {
            field: LabelField::Temperature,
            ..
        }
    ));
}

#[test]
fn test_disambiguate_repetition_requires_whitespace() {
    // "RT12" is not RT1 followed by a run index
    assert!(disambiguate("UCT_AST9AH_A01_RT12").is_err());
}

#[test]
fn test_disambiguate_all_isolates_failures() {
    let labels = ["UCT_AST9AH_A01_RT1", "garbage", "UCT_AST9AH_B02_00"];
    let results = disambiguate_all(labels);

    assert_eq!(results.len(), 3);
    assert!(results[0].1.is_ok());
    assert!(results[1].1.is_err());
    assert!(results[2].1.is_ok());
}

#[test]
fn test_disambiguate_temperature_followed_by_noise() {
    let identity = disambiguate("UCT_AST9AH_B07_-20C").unwrap();
    assert_eq!(identity.battery_key(), "B07");
    assert_eq!(identity.temperature, TemperatureCode::Celsius(-20));

    let identity = disambiguate("UCT_AST9AH_B07_RT1(retest)").unwrap();
    assert_eq!(identity.temperature, TemperatureCode::Room(1));
    assert_eq!(identity.run_repetition, None);
}

#[test]
fn test_disambiguate_signed_temperature_glued_to_battery() {
    let identity = disambiguate("UCT_AST9AH_B07-20").unwrap();
    assert_eq!(identity.battery_key(), "B07");
    assert_eq!(identity.temperature, TemperatureCode::Celsius(-20));
    assert_eq!(identity.canonical_label("UCT_AST9AH"), "UCT_AST9AH_B07_-20");
}

#[test]
fn test_disambiguate_code_glued_to_word_is_not_a_temperature() {
    for label in ["UCT_AST9AH_A01_PORT", "UCT_AST9AH_A01_X00", "UCT_AST9AH_A01_-100"] {
        let err = disambiguate(label).unwrap_err();
        assert!(
            matches!(
                err,
                Error::MissingLabelField {
                    field: LabelField::Temperature,
                    ..
                }
            ),
            "label {}",
            label
        );
    }
}
