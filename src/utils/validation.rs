use crate::utils::error::{CalcError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Unwraps a required numeric field and rejects NaN/infinity.
pub fn require_number(field_name: &str, value: Option<f64>) -> Result<f64> {
    let value =
        value.ok_or_else(|| CalcError::invalid_input(format!("{} is required", field_name)))?;
    validate_finite(field_name, value)?;
    Ok(value)
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(format!(
            "{} must be a finite number",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if value < 0.0 {
        return Err(CalcError::invalid_input(format!(
            "{} must not be negative",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(CalcError::invalid_input(format!(
            "{} must be greater than zero",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_whole_number(field_name: &str, value: f64) -> Result<()> {
    if value.fract() != 0.0 {
        return Err(CalcError::invalid_input(format!(
            "{} must be a whole number",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CalcError::invalid_input(format!(
            "{} must be between {} and {}",
            field_name, min, max
        )));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CalcError::invalid_input(format!(
            "{} cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

/// Rejects a computed value that overflowed to infinity or became NaN.
pub fn ensure_finite_result(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input("result is not a finite number"))
    }
}
