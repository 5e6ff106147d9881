use isg_core::{extract_number, ValueError};

#[test]
fn comma_separator_is_decimal_point() {
    assert_eq!(extract_number("23,5 °C").unwrap(), 23.5);
    assert_eq!(extract_number("1,3 bar").unwrap(), 1.3);
}

#[test]
fn dot_separator_and_plain_integers() {
    assert_eq!(extract_number("45.5°C").unwrap(), 45.5);
    assert_eq!(extract_number("1771").unwrap(), 1771.0);
    assert_eq!(extract_number("1771 h").unwrap(), 1771.0);
}

#[test]
fn negative_values_keep_their_sign() {
    assert_eq!(extract_number("-3,2 °C").unwrap(), -3.2);
}

#[test]
fn first_numeric_run_wins() {
    assert_eq!(extract_number("12 of 40").unwrap(), 12.0);
    assert_eq!(extract_number("ca 7 min").unwrap(), 7.0);
}

#[test]
fn text_without_digits_has_no_match() {
    assert_eq!(
        extract_number("n/a"),
        Err(ValueError::NoNumericMatch {
            raw: "n/a".to_string()
        })
    );
    assert!(matches!(
        extract_number(""),
        Err(ValueError::NoNumericMatch { .. })
    ));
}

#[test]
fn multiple_separators_are_malformed() {
    assert_eq!(
        extract_number("1.234,5 kWh"),
        Err(ValueError::MalformedNumber {
            candidate: "1.234,5".to_string()
        })
    );
    assert!(matches!(
        extract_number("- off -"),
        Err(ValueError::MalformedNumber { .. })
    ));
}
