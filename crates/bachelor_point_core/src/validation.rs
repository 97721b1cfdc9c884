//! crates/bachelor_point_core/src/validation.rs
//!
//! Field-level validation and input coercion shared by both flows.

use regex::Regex;
use std::sync::OnceLock;

use crate::catalog;
use crate::domain::{MediaKind, SignupProfile};
use crate::i18n::Message;

/// A local, field-level failure. The flow refuses the transition and shows `message()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{0}' is not a valid Bangladeshi mobile number")]
    InvalidPhone(String),
    #[error("name is required")]
    MissingName,
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("division is required")]
    MissingDivision,
    #[error("'{0}' is not a known division")]
    UnknownDivision(String),
    #[error("district is required for division '{division}'")]
    MissingDistrict { division: String },
    #[error("district '{district}' is not part of division '{division}'")]
    DistrictNotInDivision { division: String, district: String },
    #[error("address is required")]
    MissingAddress,
    #[error("the code must be exactly {expected} digits")]
    InvalidCodeFormat { expected: usize },
    #[error("a new code can be requested in {remaining}s")]
    ResendNotReady { remaining: u32 },
    #[error("at most {limit} {kind} can be attached")]
    MediaLimit { kind: MediaKind, limit: usize },
}

impl ValidationError {
    pub fn message(&self) -> Message {
        match self {
            ValidationError::InvalidPhone(_) => Message::EnterValidPhone,
            ValidationError::MissingName => Message::EnterName,
            ValidationError::InvalidEmail => Message::EnterValidEmail,
            ValidationError::MissingDivision | ValidationError::UnknownDivision(_) => {
                Message::SelectDivision
            }
            ValidationError::MissingDistrict { .. }
            | ValidationError::DistrictNotInDivision { .. } => Message::SelectDistrict,
            ValidationError::MissingAddress => Message::EnterAddress,
            ValidationError::InvalidCodeFormat { .. } => Message::EnterSixDigitCode,
            ValidationError::ResendNotReady { .. } => Message::ResendNotReady,
            ValidationError::MediaLimit { kind: MediaKind::Image, .. } => Message::TooManyImages,
            ValidationError::MediaLimit { kind: MediaKind::Video, .. } => Message::TooManyVideos,
        }
    }
}

//=========================================================================================
// Phone Numbers
//=========================================================================================

fn bd_phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\+?880|0)?(1[3-9]\d{8})$").expect("phone pattern is a valid regex")
    })
}

fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Accepts `01XXXXXXXXX`, `1XXXXXXXXX`, `880…` and `+880…` mobile numbers.
pub fn is_valid_bd_phone(raw: &str) -> bool {
    bd_phone_pattern().is_match(&strip_whitespace(raw))
}

/// Canonical `+8801XXXXXXXXX` form of a valid number.
pub fn normalize_bd_phone(raw: &str) -> Option<String> {
    let compact = strip_whitespace(raw);
    bd_phone_pattern()
        .captures(&compact)
        .and_then(|caps| caps.get(1))
        .map(|subscriber| format!("+880{}", subscriber.as_str()))
}

/// Display formatting: local numbers gain the `+880` prefix, anything else is returned as is.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 11 && digits.starts_with("01") {
        return format!("+880{}", &digits[1..]);
    }
    if digits.len() == 11 && digits.starts_with('1') {
        return format!("+880{}", digits);
    }
    raw.to_string()
}

//=========================================================================================
// Numbers
//=========================================================================================

/// Parses a count from raw input. Unparsable or below-minimum input yields `min`.
pub fn coerce_count(raw: &str, min: u32) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= i64::from(min) => u32::try_from(value).unwrap_or(u32::MAX),
        _ => min,
    }
}

//=========================================================================================
// Signup and Codes
//=========================================================================================

/// Runs the signup checks in display order and reports the first failure.
pub fn validate_signup(profile: &SignupProfile) -> Result<(), ValidationError> {
    if profile.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    let email = profile.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    let division = profile.division.trim();
    if division.is_empty() {
        return Err(ValidationError::MissingDivision);
    }
    if !catalog::is_known_division(division) {
        return Err(ValidationError::UnknownDivision(division.to_string()));
    }
    let district = profile.district.trim();
    if district.is_empty() {
        return Err(ValidationError::MissingDistrict {
            division: division.to_string(),
        });
    }
    if !catalog::division_has_district(division, district) {
        return Err(ValidationError::DistrictNotInDivision {
            division: division.to_string(),
            district: district.to_string(),
        });
    }
    if profile.address.trim().is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    Ok(())
}

pub fn validate_code(code: &str, length: usize) -> Result<(), ValidationError> {
    if code.len() == length && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCodeFormat { expected: length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_pattern_compiles_and_captures_subscriber() {
        let captures = bd_phone_pattern().captures("+8801712345678").unwrap();
        assert_eq!(&captures[1], "1712345678");
        assert!(bd_phone_pattern().captures("01212345678").is_none());
    }

    fn profile() -> SignupProfile {
        SignupProfile {
            name: "Rahim Uddin".into(),
            email: "rahim@example.com".into(),
            division: "Dhaka".into(),
            district: "Gazipur".into(),
            address: "House 12, Road 4".into(),
        }
    }

    #[test]
    fn phone_forms() {
        assert!(is_valid_bd_phone("1712345678"));
        assert!(is_valid_bd_phone("01712345678"));
        assert!(is_valid_bd_phone("+8801812345678"));
        assert!(is_valid_bd_phone("8801912345678"));
        assert!(is_valid_bd_phone("017 1234 5678"));
        assert!(!is_valid_bd_phone("12345"));
        assert!(!is_valid_bd_phone("01212345678"));
        assert!(!is_valid_bd_phone("017123456789"));
        assert!(!is_valid_bd_phone(""));
    }

    #[test]
    fn phone_normalization() {
        assert_eq!(normalize_bd_phone("01712345678").as_deref(), Some("+8801712345678"));
        assert_eq!(normalize_bd_phone("+8801812345678").as_deref(), Some("+8801812345678"));
        assert_eq!(normalize_bd_phone("1712345678").as_deref(), Some("+8801712345678"));
        assert_eq!(normalize_bd_phone("12345"), None);
    }

    #[test]
    fn phone_display_format() {
        assert_eq!(format_phone_number("01712345678"), "+8801712345678");
        assert_eq!(format_phone_number("17123456789"), "+88017123456789");
        assert_eq!(format_phone_number("+880-123"), "+880-123");
    }

    #[test]
    fn count_coercion() {
        assert_eq!(coerce_count("3", 1), 3);
        assert_eq!(coerce_count(" 7 ", 1), 7);
        assert_eq!(coerce_count("0", 1), 1);
        assert_eq!(coerce_count("-4", 1), 1);
        assert_eq!(coerce_count("abc", 1), 1);
        assert_eq!(coerce_count("", 0), 0);
        assert_eq!(coerce_count("99999999999", 0), u32::MAX);
    }

    #[test]
    fn signup_checks_in_order() {
        assert_eq!(validate_signup(&profile()), Ok(()));

        let mut p = profile();
        p.name = "  ".into();
        p.email = String::new();
        assert_eq!(validate_signup(&p), Err(ValidationError::MissingName));

        let mut p = profile();
        p.email = "rahim.example.com".into();
        assert_eq!(validate_signup(&p), Err(ValidationError::InvalidEmail));

        let mut p = profile();
        p.division = "Atlantis".into();
        assert_eq!(
            validate_signup(&p),
            Err(ValidationError::UnknownDivision("Atlantis".into()))
        );

        let mut p = profile();
        p.district = String::new();
        assert_eq!(
            validate_signup(&p),
            Err(ValidationError::MissingDistrict { division: "Dhaka".into() })
        );

        let mut p = profile();
        p.district = "Sylhet".into();
        assert!(matches!(
            validate_signup(&p),
            Err(ValidationError::DistrictNotInDivision { .. })
        ));

        let mut p = profile();
        p.address = String::new();
        assert_eq!(validate_signup(&p), Err(ValidationError::MissingAddress));
    }

    #[test]
    fn code_format() {
        assert!(validate_code("123456", 6).is_ok());
        assert!(validate_code("12345", 6).is_err());
        assert!(validate_code("12a456", 6).is_err());
        assert!(validate_code("১২৩৪৫৬", 6).is_err());
    }

    #[test]
    fn district_errors_map_to_district_message() {
        let err = ValidationError::MissingDistrict { division: "Dhaka".into() };
        assert_eq!(err.message(), Message::SelectDistrict);
    }
}
