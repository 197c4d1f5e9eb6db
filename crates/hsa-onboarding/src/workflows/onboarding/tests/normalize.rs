use chrono::NaiveDate;

use crate::workflows::onboarding::decisioning::normalize;

#[test]
fn names_fold_case_punctuation_and_whitespace() {
    assert_eq!(normalize::name("  Jane   A.  DOE "), "jane a doe");
    assert_eq!(normalize::name("O'Connor, Sean"), "o'connor sean");
}

#[test]
fn dates_parse_iso_and_slash_formats() {
    let expected = NaiveDate::from_ymd_opt(1990, 5, 1).expect("valid date");
    assert_eq!(normalize::date("1990-05-01").expect("iso parses"), expected);
    assert_eq!(normalize::date("05/01/1990").expect("slash parses"), expected);
    assert_eq!(normalize::date(" 1990-05-01 ").expect("trimmed"), expected);
}

#[test]
fn unknown_date_formats_are_typed_errors() {
    let err = normalize::date("May 1st 1990").expect_err("rejects prose dates");
    assert_eq!(err.value, "May 1st 1990");
}

#[test]
fn address_parts_expand_fixed_abbreviations() {
    assert_eq!(normalize::address_part("123 Main St."), "123 main street");
    assert_eq!(normalize::address_part("500 Oak Ave"), "500 oak avenue");
    assert_eq!(
        normalize::address_part("12 Elm Blvd Apt 4"),
        "12 elm boulevard apartment 4"
    );
    // Tokens outside the lookup pass through untouched.
    assert_eq!(normalize::address_part("9 Stone Way"), "9 stone way");
}

#[test]
fn id_numbers_drop_separators_and_fold_case() {
    assert_eq!(normalize::id_number("123-45-6789"), "123456789");
    assert_eq!(normalize::id_number("123 45 6789"), "123456789");
    assert_eq!(normalize::id_number("d-123.456"), "D123456");
}

#[test]
fn employers_drop_corporate_suffixes() {
    assert_eq!(normalize::employer("Acme Inc."), "acme");
    assert_eq!(normalize::employer("Acme Corp"), "acme");
    assert_eq!(normalize::employer("Wayne Enterprises LLC"), "wayne enterprises");
    // Suffix words embedded in a name are not stripped.
    assert_eq!(normalize::employer("Incline Labs"), "incline labs");
}
