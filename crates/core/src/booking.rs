//! Appointment enums and the normalization rules applied to client input.
//!
//! Clients send loosely formatted values (`"video_call"`, `"bKash"`,
//! `"A+"`); the database stores one canonical spelling per value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a consultation is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationType {
    Physical,
    VideoCall,
}

impl ConsultationType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsultationType::Physical => "PHYSICAL",
            ConsultationType::VideoCall => "VIDEO_CALL",
        }
    }

    /// Parse a client-supplied value, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PHYSICAL" => Ok(ConsultationType::Physical),
            "VIDEO_CALL" => Ok(ConsultationType::VideoCall),
            other => Err(CoreError::Validation(format!(
                "unknown consultation type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted payment channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Bkash,
    Bank,
    Reference,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Bkash => "BKASH",
            PaymentMethod::Bank => "BANK",
            PaymentMethod::Reference => "REFERENCE",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BKASH" => Ok(PaymentMethod::Bkash),
            "BANK" => Ok(PaymentMethod::Bank),
            "REFERENCE" => Ok(PaymentMethod::Reference),
            other => Err(CoreError::Validation(format!(
                "unknown payment method '{other}'"
            ))),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(AppointmentStatus::Pending),
            "CONFIRMED" => Ok(AppointmentStatus::Confirmed),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "unknown appointment status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonicalize a blood group: `"A+"` → `"A_POSITIVE"`, `"o-"` →
/// `"O_NEGATIVE"`. Already-canonical values pass through.
pub fn normalize_blood_group(raw: &str) -> Result<String, CoreError> {
    let upper = raw.trim().to_ascii_uppercase();

    let canonical = match upper.as_str() {
        "A+" | "A_POSITIVE" => "A_POSITIVE",
        "A-" | "A_NEGATIVE" => "A_NEGATIVE",
        "B+" | "B_POSITIVE" => "B_POSITIVE",
        "B-" | "B_NEGATIVE" => "B_NEGATIVE",
        "AB+" | "AB_POSITIVE" => "AB_POSITIVE",
        "AB-" | "AB_NEGATIVE" => "AB_NEGATIVE",
        "O+" | "O_POSITIVE" => "O_POSITIVE",
        "O-" | "O_NEGATIVE" => "O_NEGATIVE",
        other => {
            return Err(CoreError::Validation(format!(
                "unknown blood group '{other}'"
            )))
        }
    };
    Ok(canonical.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consultation_type_parses_case_insensitively() {
        assert_eq!(
            ConsultationType::parse("video_call").unwrap(),
            ConsultationType::VideoCall
        );
        assert_eq!(
            ConsultationType::parse(" Physical ").unwrap(),
            ConsultationType::Physical
        );
        assert!(ConsultationType::parse("house_call").is_err());
    }

    #[test]
    fn payment_method_round_trips() {
        for raw in ["bkash", "BANK", "Reference"] {
            let parsed = PaymentMethod::parse(raw).unwrap();
            assert_eq!(PaymentMethod::parse(parsed.as_str()).unwrap(), parsed);
        }
    }

    #[test]
    fn blood_groups_are_canonicalized() {
        assert_eq!(normalize_blood_group("A+").unwrap(), "A_POSITIVE");
        assert_eq!(normalize_blood_group("o-").unwrap(), "O_NEGATIVE");
        assert_eq!(normalize_blood_group("AB_POSITIVE").unwrap(), "AB_POSITIVE");
        assert!(normalize_blood_group("C+").is_err());
    }

    #[test]
    fn status_defaults_and_parses() {
        assert_eq!(AppointmentStatus::Pending.as_str(), "PENDING");
        assert_eq!(
            AppointmentStatus::parse("cancelled").unwrap(),
            AppointmentStatus::Cancelled
        );
        assert!(AppointmentStatus::parse("archived").is_err());
    }
}
