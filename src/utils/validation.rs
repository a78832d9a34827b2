use crate::api::error::AppError;
use crate::config::EXTENSION_MAX_LENGTH;

/// Canonical form of an extension name: surrounding whitespace trimmed,
/// lowercased, and every '.' removed (".tar" and "a.b" become "tar" and
/// "ab"). Applied on every insert and lookup-by-name path so comparisons
/// always run against the stored form.
pub fn normalize_extension(raw: &str) -> String {
    raw.trim().to_lowercase().replace('.', "")
}

/// Normalizes a raw extension name and checks it is storable.
///
/// The checks run on the normalized form: casing, surrounding whitespace
/// and dots never cause a rejection by themselves.
pub fn validate_extension(raw: &str) -> Result<String, AppError> {
    let normalized = normalize_extension(raw);

    if normalized.is_empty() {
        return Err(AppError::InvalidFormat(
            "Extension cannot be empty".to_string(),
        ));
    }

    if normalized.len() > EXTENSION_MAX_LENGTH {
        return Err(AppError::InvalidFormat(format!(
            "Extension exceeds the maximum length of {} characters",
            EXTENSION_MAX_LENGTH
        )));
    }

    if !normalized
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(AppError::InvalidFormat(format!(
            "Extension '{}' may only contain letters and digits",
            normalized
        )));
    }

    Ok(normalized)
}
