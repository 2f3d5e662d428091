//! Field-level validation rules
//!
//! Rules run when a guarded field is assigned, at construction or on a
//! later mutation, and always before anything reaches storage:
//!
//! - `Power.description`: non-empty, at least 20 characters
//! - `HeroPower.strength`: exactly `Strong`, `Weak` or `Average`

mod errors;

pub use errors::{ValidationError, ValidationResult};

use crate::model::Strength;

/// Minimum description length, counted in characters
pub const MIN_DESCRIPTION_LEN: usize = 20;

const DESCRIPTION_MESSAGE: &str = "Description must be at least 20 characters long.";
const STRENGTH_MESSAGE: &str = "Strength must be 'Strong', 'Weak', or 'Average'.";

/// Checks a power description.
///
/// # Errors
///
/// Fails when the description is empty or shorter than
/// [`MIN_DESCRIPTION_LEN`] characters.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.is_empty() || description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::new("description", DESCRIPTION_MESSAGE));
    }
    Ok(())
}

/// Checks a strength literal and returns the matching [`Strength`].
///
/// Matching is exact and case-sensitive.
pub fn validate_strength(strength: &str) -> ValidationResult<Strength> {
    Strength::ALL
        .iter()
        .copied()
        .find(|s| s.as_str() == strength)
        .ok_or_else(|| ValidationError::new("strength", STRENGTH_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_boundaries() {
        assert!(validate_description("").is_err());
        assert!(validate_description("too short").is_err());
        assert!(validate_description(&"x".repeat(19)).is_err());
        assert!(validate_description(&"x".repeat(20)).is_ok());
        assert!(validate_description("This is a valid description.").is_ok());
    }

    #[test]
    fn test_description_counts_characters_not_bytes() {
        // 10 two-byte characters: 20 bytes but only 10 characters
        let accented = "é".repeat(10);
        assert_eq!(accented.len(), 20);
        assert!(validate_description(&accented).is_err());
    }

    #[test]
    fn test_description_error_names_field() {
        let err = validate_description("nope").unwrap_err();
        assert_eq!(err.field(), "description");
        assert_eq!(err.message(), DESCRIPTION_MESSAGE);
    }

    #[test]
    fn test_strength_accepts_exact_literals() {
        assert_eq!(validate_strength("Strong").unwrap(), Strength::Strong);
        assert_eq!(validate_strength("Weak").unwrap(), Strength::Weak);
        assert_eq!(validate_strength("Average").unwrap(), Strength::Average);
    }

    #[test]
    fn test_strength_is_case_sensitive() {
        for bad in ["strong", "WEAK", "Medium", "", " Strong"] {
            let err = validate_strength(bad).unwrap_err();
            assert_eq!(err.field(), "strength");
        }
    }
}
