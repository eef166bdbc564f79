//! Structural patterns for the two identity number formats.
//!
//! ```text
//! current: \d{6}(18|19|20)\d{2}(0[1-9]|1[012])(0[1-9]|[12]\d|3[01])\d{3}(\d|X)
//! legacy:  \d{6}\d{2}(0[1-9]|1[012])(0[1-9]|[12]\d|3[01])\d{3}
//! ```
//!
//! The day rule is not calendar-exact: `31` passes for every month.

use crate::consts::{
    AREA_CODE_LEN, CENTURY_PREFIXES, CHECK_CODE_TEN, CURRENT_LEN, LEGACY_LEN,
};

const SEQUENCE_LEN: usize = 3;

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// `0[1-9]|1[012]`
fn is_month(pair: &[u8]) -> bool {
    matches!(pair, [b'0', b'1'..=b'9'] | [b'1', b'0'..=b'2'])
}

/// `0[1-9]|[12]\d|3[01]`
fn is_day(pair: &[u8]) -> bool {
    matches!(
        pair,
        [b'0', b'1'..=b'9'] | [b'1' | b'2', b'0'..=b'9'] | [b'3', b'0' | b'1']
    )
}

/// Matches `MMDD` followed by the three sequence digits.
fn is_date_and_sequence(rest: &[u8]) -> bool {
    rest.len() == 4 + SEQUENCE_LEN
        && is_month(&rest[..2])
        && is_day(&rest[2..4])
        && all_digits(&rest[4..])
}

/// Returns true if `bytes` has the shape of an 18-character number.
/// The check symbol slot is recognised but not verified.
pub fn matches_current(bytes: &[u8]) -> bool {
    if bytes.len() != CURRENT_LEN {
        return false;
    }
    let (area, rest) = bytes.split_at(AREA_CODE_LEN);
    let (century, rest) = rest.split_at(2);
    let (year, rest) = rest.split_at(2);
    let (date_and_seq, check) = rest.split_at(rest.len() - 1);

    all_digits(area)
        && CENTURY_PREFIXES.iter().any(|p| p.as_slice() == century)
        && all_digits(year)
        && is_date_and_sequence(date_and_seq)
        && (check[0].is_ascii_digit() || check[0] == CHECK_CODE_TEN)
}

/// Returns true if `bytes` has the shape of a 15-digit legacy number.
pub fn matches_legacy(bytes: &[u8]) -> bool {
    if bytes.len() != LEGACY_LEN {
        return false;
    }
    let (area, rest) = bytes.split_at(AREA_CODE_LEN);
    let (year, rest) = rest.split_at(2);

    all_digits(area) && all_digits(year) && is_date_and_sequence(rest)
}
