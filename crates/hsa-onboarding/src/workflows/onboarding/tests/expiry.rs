use chrono::NaiveDate;

use super::common::reference_date;
use crate::workflows::onboarding::decisioning::ExpiryCheck;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn expiry_before_reference_is_expired() {
    let check = ExpiryCheck::of(date(2023, 1, 1), reference_date());
    assert!(check.expired);
    assert!(!check.passed());
    assert_eq!(check.days_overdue, 365);
}

#[test]
fn expiry_on_reference_date_is_still_valid() {
    let check = ExpiryCheck::of(reference_date(), reference_date());
    assert!(!check.expired);
    assert!(check.passed());
    assert_eq!(check.days_overdue, 0);
}

#[test]
fn expiry_after_reference_is_valid() {
    let check = ExpiryCheck::of(date(2030, 1, 1), reference_date());
    assert!(!check.expired);
    assert!(check.passed());
}

#[test]
fn same_inputs_always_produce_the_same_check() {
    let first = ExpiryCheck::of(date(2022, 6, 30), reference_date());
    let second = ExpiryCheck::of(date(2022, 6, 30), reference_date());
    assert_eq!(first, second);
}
