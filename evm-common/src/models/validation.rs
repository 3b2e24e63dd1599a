//! Form validation helpers
//!
//! Inputs arrive from HTML forms, so text is trimmed, blank optional fields
//! become `None`, and numeric rules are checked before any SQL runs.

use crate::{Error, Result};

/// Clean and check an input record before it is written
pub trait Validate: Sized {
    /// Return the normalized record, or the first rule it breaks
    fn validated(self) -> Result<Self>;
}

/// Trimmed, non-empty text
pub fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trimmed text, with blank treated as absent
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Required e-mail address (must contain `@` with text on both sides)
pub fn email(field: &str, value: String) -> Result<String> {
    let value = required(field, value)?;
    check_email(field, &value)?;
    Ok(value)
}

/// Optional e-mail address
pub fn optional_email(field: &str, value: Option<String>) -> Result<Option<String>> {
    match optional(value) {
        Some(v) => {
            check_email(field, &v)?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

fn check_email(field: &str, value: &str) -> Result<()> {
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(Error::InvalidInput(format!(
            "{} must be a valid e-mail address",
            field
        ))),
    }
}

/// Finite number strictly greater than zero
pub fn positive(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!("{} must be > 0", field)))
    }
}

/// Finite number greater than or equal to zero
pub fn non_negative(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!("{} must be >= 0", field)))
    }
}

/// Integer within an inclusive range
pub fn in_range(field: &str, value: i64, min: i64, max: i64) -> Result<i64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!(
            "{} must be between {} and {}",
            field, min, max
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("Name", "  Gala  ".to_string()).unwrap(), "Gala");
        assert!(required("Name", "   ".to_string()).is_err());
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional(Some("  ".to_string())), None);
        assert_eq!(optional(Some(" IN ".to_string())), Some("IN".to_string()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_email_rules() {
        assert!(email("Email", "a@b.com".to_string()).is_ok());
        assert!(email("Email", "ab.com".to_string()).is_err());
        assert!(email("Email", "@b.com".to_string()).is_err());
        assert_eq!(optional_email("Email", Some(String::new())).unwrap(), None);
    }

    #[test]
    fn test_numeric_rules() {
        assert!(positive("Budget", 0.0).is_err());
        assert!(positive("Budget", f64::NAN).is_err());
        assert!(non_negative("Fee", 0.0).is_ok());
        assert!(non_negative("Fee", -1.0).is_err());
        assert!(in_range("Age", 121, 1, 120).is_err());
    }
}
