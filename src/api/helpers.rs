use crate::errors::ApiError;

/// Derive a company code from its display name: lowercase, keep only
/// alphanumeric characters, no separator retained ("Dummy Co" -> "dummyco").
pub fn company_code_from_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Require a non-empty string field, rejecting absent and empty values alike.
pub fn require(value: Option<&str>, message: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::BadRequest(message.to_string())),
    }
}

/// Require a usable amount. Zero counts as missing, matching the lenient
/// "no amount to update" check the API has always had.
pub fn require_amount(amt: Option<f64>, message: &str) -> Result<f64, ApiError> {
    match amt {
        Some(a) if a != 0.0 => Ok(a),
        _ => Err(ApiError::BadRequest(message.to_string())),
    }
}
