#![allow(dead_code)]

use glam_booking_api::models::quote::PriceResult;
use glam_booking_api::models::selection::{BookingForm, BookingSelection};
use glam_booking_api::services::tariff::Tariff;
use serde_json::Value;

pub fn form(value: Value) -> BookingForm {
    serde_json::from_value(value).expect("booking form fixture should deserialize")
}

pub fn selection(value: Value) -> BookingSelection {
    BookingSelection::from(form(value))
}

/// Amounts are unrounded floats, compare them within a tiny tolerance.
pub fn assert_money(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// The invariants every price result must satisfy.
pub fn assert_consistent(result: &PriceResult, deposit_rate: f64) {
    let tariff = Tariff::standard();
    assert_eq!(result.hst, result.subtotal * tariff.hst_rate);
    assert_eq!(result.total, result.subtotal + result.subtotal * tariff.hst_rate);
    assert_eq!(result.deposit, result.total * deposit_rate);
    assert!(result.subtotal >= 0.0);

    let summary = result.summary_lines();
    assert_eq!(summary.len(), 4);
    assert!(summary[0].starts_with("Subtotal: $"));
    assert!(summary[1].starts_with("HST (13%): $"));
    assert!(summary[2].starts_with("Total: $"));
    assert!(summary[3].starts_with("Deposit required ("));
}
