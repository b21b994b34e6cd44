//! Pure request-validation functions.
//!
//! These run before any engine call so malformed input never reaches the
//! store. Email checking is intentionally shallow: a local part, one `@`,
//! and a domain with a dot, enough to reject obvious garbage without
//! chasing the full RFC grammar.

/// Returns `true` if `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    // No second '@', no whitespace anywhere.
    if domain.contains('@') || value.chars().any(|c| c.is_whitespace()) {
        return false;
    }

    // Domain needs a dot with something on both sides.
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Validates an email field, naming the field in the error message.
pub fn validate_email(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if !is_valid_email(value) {
        return Err(format!("{field} must be a valid email address"));
    }
    Ok(())
}

/// Validates a non-empty free-text field.
pub fn validate_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

/// Validates a non-empty list of email addresses.
pub fn validate_email_list(field: &str, values: &[String]) -> Result<(), String> {
    if values.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    for value in values {
        validate_email(field, value)?;
    }
    Ok(())
}
