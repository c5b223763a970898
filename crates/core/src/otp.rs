//! One-time code generation and mobile number validation for OTP auth.

use rand::Rng;

use crate::error::CoreError;

/// Codes expire this many minutes after being issued.
pub const OTP_EXPIRY_MINS: i64 = 5;

/// Number of digits in a generated code.
pub const OTP_LEN: usize = 6;

/// Generate a random 6-digit code as a string (leading zeros never occur;
/// the range starts at 100000 so every code is exactly six digits).
pub fn generate_code() -> String {
    rand::rng().random_range(100_000..=999_999).to_string()
}

/// Normalize and validate a mobile number.
///
/// Accepts 10-15 digits with an optional leading `+`; surrounding
/// whitespace is trimmed. Returns the trimmed form.
pub fn normalize_mobile(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if digits.len() < 10 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "'{trimmed}' is not a valid mobile number"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), OTP_LEN);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn normalize_accepts_plain_and_prefixed_numbers() {
        assert_eq!(normalize_mobile("01712345678").unwrap(), "01712345678");
        assert_eq!(
            normalize_mobile(" +8801712345678 ").unwrap(),
            "+8801712345678"
        );
    }

    #[test]
    fn normalize_rejects_bad_input() {
        assert!(normalize_mobile("12345").is_err());
        assert!(normalize_mobile("01712-345678").is_err());
        assert!(normalize_mobile("not a number").is_err());
        assert!(normalize_mobile("12345678901234567890").is_err());
    }
}
