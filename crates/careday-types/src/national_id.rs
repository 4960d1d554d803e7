// ============================================================================
// National Identifier Checksum
// ============================================================================
//
// Validates 11-digit Norwegian national identifiers (fødselsnummer and the
// synthetic variants used by test actors). An identifier is valid when the
// first six digits form a birth date and the two trailing control digits
// verify against the modulo-11 weighted checksums.
//
// ============================================================================

use chrono::NaiveDate;

const WEIGHTS_FIRST: [u32; 9] = [3, 7, 6, 1, 8, 9, 4, 5, 2];
const WEIGHTS_SECOND: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Validate a Norwegian national identifier.
///
/// Pure and total: never panics, any input that is not an 11-digit string
/// with a plausible birth date part and two matching control digits is
/// simply invalid.
pub fn is_valid_national_identifier(value: &str) -> bool {
    if value.len() != 11 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u32> = value.bytes().map(|b| u32::from(b - b'0')).collect();

    if !has_valid_birth_date_part(&digits) {
        return false;
    }

    match control_digit(&digits[..9], &WEIGHTS_FIRST) {
        Some(expected) if expected == digits[9] => {}
        _ => return false,
    }

    matches!(
        control_digit(&digits[..10], &WEIGHTS_SECOND),
        Some(expected) if expected == digits[10]
    )
}

/// Modulo-11 control digit over a digit prefix.
///
/// Remainder 0 maps to control digit 0, remainder 1 has no valid control
/// digit, anything else maps to `11 - remainder`.
fn control_digit(digits: &[u32], weights: &[u32]) -> Option<u32> {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 => Some(0),
        1 => None,
        remainder => Some(11 - remainder),
    }
}

/// The first six digits must parse as a `ddmmyy` date. Synthetic/temporary
/// identifiers add 4 to the leading day digit, so 4-7 is shifted back
/// before parsing.
fn has_valid_birth_date_part(digits: &[u32]) -> bool {
    let mut day_tens = digits[0];
    if (4..=7).contains(&day_tens) {
        day_tens -= 4;
    }

    let date_part = format!(
        "{}{}{}{}{}{}",
        day_tens, digits[1], digits[2], digits[3], digits[4], digits[5]
    );
    NaiveDate::parse_from_str(&date_part, "%d%m%y").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Build an identifier from its date and individual parts, returning
    /// `None` when no valid control digits exist for the combination.
    fn build_identifier(day: u32, month: u32, year: u32, individual: u32) -> Option<String> {
        let base = format!("{:02}{:02}{:02}{:03}", day, month, year, individual);
        let digits: Vec<u32> = base.bytes().map(|b| u32::from(b - b'0')).collect();

        let first = control_digit(&digits, &WEIGHTS_FIRST)?;
        let mut with_first = digits.clone();
        with_first.push(first);
        let second = control_digit(&with_first, &WEIGHTS_SECOND)?;

        Some(format!("{}{}{}", base, first, second))
    }

    #[test]
    fn accepts_known_valid_identifiers() {
        for id in ["26104500284", "02047816826", "07127621904"] {
            assert!(is_valid_national_identifier(id), "expected {} to be valid", id);
        }
    }

    #[test]
    fn accepts_synthetic_identifier_with_shifted_day_digit() {
        assert!(is_valid_national_identifier("45018700011"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_national_identifier(""));
        assert!(!is_valid_national_identifier("2610450028"));
        assert!(!is_valid_national_identifier("261045002841"));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(!is_valid_national_identifier("2610450028a"));
        assert!(!is_valid_national_identifier("26104500 84"));
    }

    #[test]
    fn rejects_impossible_birth_date() {
        // Month 13 can never be a date, regardless of control digits.
        assert!(!is_valid_national_identifier("26134500284"));
        // Day 99 is out of range even after the synthetic shift.
        assert!(!is_valid_national_identifier("99104500284"));
    }

    #[test]
    fn rejects_wrong_control_digits() {
        assert!(!is_valid_national_identifier("26104500285"));
        assert!(!is_valid_national_identifier("26104500294"));
    }

    #[test]
    fn remainder_one_has_no_control_digit() {
        assert_eq!(control_digit(&[0, 0, 0, 0, 0, 0, 0, 0, 1], &[0, 0, 0, 0, 0, 0, 0, 0, 1]), None);
    }

    proptest! {
        #[test]
        fn constructed_identifiers_are_valid(
            day in 1u32..=28,
            month in 1u32..=12,
            year in 0u32..=99,
            individual in 0u32..=999,
        ) {
            if let Some(id) = build_identifier(day, month, year, individual) {
                prop_assert!(is_valid_national_identifier(&id));
            }
        }

        #[test]
        fn flipping_any_single_digit_invalidates(
            day in 1u32..=28,
            month in 1u32..=12,
            year in 0u32..=99,
            individual in 0u32..=999,
            position in 0usize..11,
            bump in 1u32..=9,
        ) {
            if let Some(id) = build_identifier(day, month, year, individual) {
                let mut digits: Vec<u32> =
                    id.bytes().map(|b| u32::from(b - b'0')).collect();
                digits[position] = (digits[position] + bump) % 10;
                let flipped: String =
                    digits.iter().map(|d| char::from(b'0' + *d as u8)).collect();
                prop_assert_ne!(&flipped, &id);
                prop_assert!(!is_valid_national_identifier(&flipped));
            }
        }
    }
}
