//! Common validation rules shared across request payloads.

use validator::ValidationError;

/// Validates activation code format.
///
/// Requirements:
/// - Only uppercase ASCII letters and digits
/// - 4-12 characters in length
pub fn validate_activation_code(code: &str) -> Result<(), ValidationError> {
    if code.len() < 4 || code.len() > 12 {
        return Err(ValidationError::new("code_invalid_length"));
    }

    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(ValidationError::new("code_invalid_characters"));
    }

    Ok(())
}

/// Validates that an emotion value is on the 1-5 scale.
pub fn validate_emotion(emotion: i32) -> Result<(), ValidationError> {
    if !(1..=5).contains(&emotion) {
        return Err(ValidationError::new("emotion_out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_rejects_lowercase() {
        assert!(validate_activation_code("abc123").is_err());
    }

    #[test]
    fn code_rejects_too_short() {
        assert!(validate_activation_code("AB1").is_err());
    }

    #[test]
    fn code_accepts_valid() {
        assert!(validate_activation_code("A1B2C3").is_ok());
    }

    #[test]
    fn emotion_rejects_out_of_scale() {
        assert!(validate_emotion(0).is_err());
        assert!(validate_emotion(6).is_err());
    }

    #[test]
    fn emotion_accepts_scale_bounds() {
        assert!(validate_emotion(1).is_ok());
        assert!(validate_emotion(5).is_ok());
    }
}
