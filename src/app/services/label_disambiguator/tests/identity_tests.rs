//! Tests for identity rendering and parsing

use crate::app::services::label_disambiguator::{
    Batch, BatteryNumber, Identity, TemperatureCode,
};

#[test]
fn test_temperature_code_round_trip() {
    for code in crate::constants::TEMPERATURE_CODES {
        let parsed: TemperatureCode = code.parse().unwrap();
        assert_eq!(parsed.to_string(), *code);
    }
}

#[test]
fn test_temperature_code_rejects_alias_spellings() {
    // Aliases are resolved by the label search, not by the canonical parser
    assert!("RT".parse::<TemperatureCode>().is_err());
    assert!("+00".parse::<TemperatureCode>().is_err());
}

#[test]
fn test_temperature_code_celsius() {
    assert_eq!(TemperatureCode::Celsius(-40).celsius(), Some(-40));
    assert_eq!(TemperatureCode::Room(2).celsius(), None);
    assert!(TemperatureCode::Room(1).is_room_temperature());
}

#[test]
fn test_battery_number_bounds() {
    assert!(BatteryNumber::new(99).is_some());
    assert!(BatteryNumber::new(100).is_none());
    assert_eq!(BatteryNumber::new(3).unwrap().to_string(), "03");
}

#[test]
fn test_identity_canonical_label() {
    let identity = Identity {
        batch: Batch::B,
        number: BatteryNumber::new(7).unwrap(),
        temperature: TemperatureCode::Celsius(-20),
        run_repetition: Some(2),
    };

    assert_eq!(identity.battery_key(), "B07");
    assert_eq!(identity.to_string(), "B07_-20 2");
    assert_eq!(identity.canonical_label("UCT_AST9AH"), "UCT_AST9AH_B07_-20 2");
}

#[test]
fn test_identity_from_str() {
    let identity: Identity = "UCT_AST9AH_A09_-10".parse().unwrap();
    assert_eq!(identity.battery_key(), "A09");
    assert!("nothing useful".parse::<Identity>().is_err());
}
