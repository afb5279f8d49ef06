//! Breed record validation.

use crate::error::CoreError;

/// Minimum length for a breed name, in characters.
pub const MIN_BREED_NAME_LENGTH: usize = 2;

/// Maximum length for a breed name, in characters.
pub const MAX_BREED_NAME_LENGTH: usize = 255;

/// Maximum length for free-text breed fields (description, history, ...).
pub const MAX_BREED_TEXT_LENGTH: usize = 10_000;

/// Validate a breed name after trimming surrounding whitespace.
pub fn validate_breed_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if !(MIN_BREED_NAME_LENGTH..=MAX_BREED_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Breed name must be between {MIN_BREED_NAME_LENGTH} and {MAX_BREED_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional long-form text field.
pub fn validate_breed_text(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > MAX_BREED_TEXT_LENGTH => Err(CoreError::Validation(
            format!("Breed {field} exceeds maximum length of {MAX_BREED_TEXT_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_bounds() {
        assert!(validate_breed_name("A").is_err());
        assert!(validate_breed_name("  A  ").is_err());
        assert!(validate_breed_name("Ab").is_ok());
        assert!(validate_breed_name(&"x".repeat(MAX_BREED_NAME_LENGTH)).is_ok());
        assert!(validate_breed_name(&"x".repeat(MAX_BREED_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn long_text_rejected() {
        let long = "y".repeat(MAX_BREED_TEXT_LENGTH + 1);
        assert!(validate_breed_text("history", Some(&long)).is_err());
        assert!(validate_breed_text("history", None).is_ok());
        assert!(validate_breed_text("history", Some("short")).is_ok());
    }
}
