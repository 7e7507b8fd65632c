// ── Local input validation ──
//
// Format checks that gate user input before it touches the store or
// the network. The device firmware does not validate anything, so the
// companion has to.

use std::net::Ipv4Addr;

use crate::error::CoreError;
use crate::model::SyncInterval;

/// Minimum WiFi password length the firmware accepts (WPA2 floor).
pub const MIN_PASSWORD_LEN: usize = 8;

/// `true` when the password meets the firmware's minimum length.
pub fn password_valid(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// `true` when `input` is a well-formed IPv4 dotted quad.
pub fn ipv4_valid(input: &str) -> bool {
    input.parse::<Ipv4Addr>().is_ok()
}

/// `true` when `minutes` is one of the selectable sync intervals.
pub fn interval_valid(minutes: u32) -> bool {
    SyncInterval::from_minutes(minutes).is_some()
}

/// Validate a password, producing the error the display layer shows.
pub fn ensure_password(password: &str) -> Result<(), CoreError> {
    if password_valid(password) {
        Ok(())
    } else {
        Err(CoreError::Validation {
            message: format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        })
    }
}

/// Validate a device address entered by hand.
pub fn ensure_ipv4(input: &str) -> Result<(), CoreError> {
    if ipv4_valid(input) {
        Ok(())
    } else {
        Err(CoreError::Validation {
            message: format!("'{input}' is not a valid IPv4 address"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_boundary_is_exactly_eight() {
        assert!(!password_valid("short"));
        assert!(!password_valid("1234567"));
        assert!(password_valid("12345678"));
        assert!(password_valid("123456789"));
    }

    #[test]
    fn empty_password_is_invalid() {
        assert!(!password_valid(""));
    }

    #[test]
    fn ipv4_accepts_dotted_quads() {
        assert!(ipv4_valid("192.168.4.1"));
        assert!(ipv4_valid("10.0.0.1"));
        assert!(ipv4_valid("255.255.255.255"));
    }

    #[test]
    fn ipv4_rejects_out_of_range_octets() {
        assert!(!ipv4_valid("999.1.1.1"));
        assert!(!ipv4_valid("256.0.0.1"));
    }

    #[test]
    fn ipv4_rejects_non_numeric_input() {
        assert!(!ipv4_valid("abc.def.ghi.jkl"));
        assert!(!ipv4_valid(""));
        assert!(!ipv4_valid("192.168.4"));
    }

    #[test]
    fn interval_accepts_only_the_selectable_set() {
        assert!(interval_valid(1));
        assert!(interval_valid(5));
        assert!(interval_valid(10));
        assert!(interval_valid(15));
        assert!(!interval_valid(0));
        assert!(!interval_valid(60));
    }
}
