//! Modulus-11 weighted check symbol of 18-character numbers.

use crate::consts::{BODY_LEN, CHECK_CODES, CHECKSUM_MODULUS, CURRENT_LEN, WEIGHTS};

/// Computes the check symbol for a 17-digit body.
/// Returns `None` if `body` is not exactly 17 ASCII digits.
pub fn check_code(body: &[u8]) -> Option<char> {
    if body.len() != BODY_LEN || !body.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let sum: u32 = body
        .iter()
        .zip(WEIGHTS)
        .map(|(digit, weight)| u32::from(digit - b'0') * weight)
        .sum();
    Some(CHECK_CODES[(sum % CHECKSUM_MODULUS) as usize])
}

/// Returns true if the trailing symbol of an 18-character number matches its body.
/// Expects the input to be uppercase already.
pub fn verify(raw: &[u8]) -> bool {
    if raw.len() != CURRENT_LEN {
        return false;
    }
    let (body, check) = raw.split_at(BODY_LEN);
    check_code(body).is_some_and(|code| code == char::from(check[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_code_known_values() {
        assert_eq!(check_code(b"11010119900307051"), Some('3'));
        assert_eq!(check_code(b"44052418800101001"), Some('4'));
        assert_eq!(check_code(b"11010519491231002"), Some('X'));
        assert_eq!(check_code(b"44030420000229002"), Some('2'));
    }

    #[test]
    fn test_check_code_rejects_bad_body() {
        assert_eq!(check_code(b"1101011990030705"), None);
        assert_eq!(check_code(b"110101199003070513"), None);
        assert_eq!(check_code(b"1101011990030705X"), None);
    }

    #[test]
    fn test_verify() {
        assert!(verify(b"110101199003070513"));
        assert!(!verify(b"110101199003070515"));
        assert!(!verify(b"11010119900307051X"));
        assert!(verify(b"11010519491231002X"));
        assert!(!verify(b"11010519491231002x"));
    }

    #[test]
    fn test_single_digit_change_detected() {
        let valid = b"110101199003070513";
        for pos in 0..BODY_LEN {
            let mut altered = *valid;
            altered[pos] = if altered[pos] == b'9' { b'0' } else { altered[pos] + 1 };
            assert!(!verify(&altered), "change at {pos} went unnoticed");
        }
    }
}
