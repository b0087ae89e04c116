//! Parse/validate boundary between raw form text and typed order data.
//!
//! Form fields keep whatever the user typed. Nothing downstream (the preview
//! geometry, the order payload) sees those strings directly; they go through
//! the helpers here and either come out typed or as a [`ValidationError`].

use thiserror::Error;

use crate::state::form::Field;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{} is required", .field.label())]
    Required { field: Field },

    #[error("{} must be a number (got \"{raw}\")", .field.label())]
    NotANumber { field: Field, raw: String },

    #[error("{} must be a finite number", .field.label())]
    NotFinite { field: Field },

    #[error("{} must be greater than zero (got {value})", .field.label())]
    NonPositive { field: Field, value: f64 },

    #[error("Quantity must be a whole number of at least 1 (got \"{raw}\")")]
    InvalidQuantity { raw: String },

    #[error("Email address \"{raw}\" is not valid")]
    InvalidEmail { raw: String },
}

/// Parse a dimension field. The sign is not checked here.
pub fn parse_number(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    let value: f64 = trimmed.parse().map_err(|_| ValidationError::NotANumber {
        field,
        raw: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    Ok(value)
}

/// Parse a dimension field that must be strictly positive
pub fn parse_positive(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}

/// Quantity: integer, minimum 1
pub fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: Field::Quantity,
        });
    }
    match trimmed.parse::<u32>() {
        Ok(q) if q >= 1 => Ok(q),
        _ => Err(ValidationError::InvalidQuantity {
            raw: raw.to_string(),
        }),
    }
}

/// Non-empty after trimming
pub fn require(field: Field, raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

/// Loose `type=email` check: one `@` with something on both sides
pub fn check_email(raw: &str) -> Result<(), ValidationError> {
    require(Field::Email, raw)?;
    let trimmed = raw.trim();
    match trimmed.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail {
            raw: raw.to_string(),
        }),
    }
}
