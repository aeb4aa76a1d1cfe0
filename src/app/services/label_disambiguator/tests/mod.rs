//! Tests for label disambiguation
//!
//! Label fixtures mirror the spellings operators actually typed on the cycler.

pub mod disambiguate_tests;
pub mod identity_tests;

/// Labels covering every temperature code for one battery
pub fn labels_for_battery(battery: &str) -> Vec<String> {
    crate::constants::TEMPERATURE_CODES
        .iter()
        .map(|code| format!("UCT_AST9AH_{}_{}", battery, code))
        .collect()
}
