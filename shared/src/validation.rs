//! Input validation functions
//!
//! Draft input stays raw text until submission; these helpers turn it into
//! the values that are allowed to reach the database.

/// Maximum number of photos attached to a single report
pub const MAX_IMAGES: usize = 5;

/// Maximum number of free-form custom fields on a single report
pub const MAX_CUSTOM_FIELDS: usize = 10;

/// Parse the raw weight text entered on the report screen
///
/// Accepts any finite, non-negative decimal number surrounded by optional
/// whitespace. Anything else is rejected, so `NaN` is never persisted.
pub fn parse_weight_input(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Weight is required".to_string());
    }
    let weight: f64 = trimmed
        .parse()
        .map_err(|_| "Weight must be a number".to_string())?;
    validate_weight(weight)?;
    Ok(weight)
}

/// Validate a weight value already in numeric form
pub fn validate_weight(weight: f64) -> Result<(), String> {
    if weight.is_nan() || weight.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight < 0.0 {
        return Err("Weight cannot be negative".to_string());
    }
    Ok(())
}

/// Trim a custom field, returning `None` when nothing is left
pub fn normalize_custom_field(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
