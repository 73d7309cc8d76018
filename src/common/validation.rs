use url::Url;

use super::ResourceError;

/// Email validation
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || local.len() > 64 || domain.is_empty() {
        return false;
    }

    if email.chars().any(char::is_whitespace) {
        return false;
    }

    // Domain must have at least one dot, and not at either end
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Phone numbers: 7 to 15 digits, optional leading `+`, and the usual
/// separators (spaces, dashes, dots, parentheses).
pub fn validate_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let body = phone.strip_prefix('+').unwrap_or(phone);

    if body.is_empty() {
        return false;
    }

    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return false,
        }
    }

    (7..=15).contains(&digits)
}

/// Slug validation
pub fn validate_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > 255 {
        return false;
    }

    // Slug should only contain lowercase alphanumeric, hyphens, and underscores
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Links stored on content: absolute `http(s)` URLs with a host, or paths
/// on this site such as `/uploads/x.png`.
pub fn validate_link(link: &str) -> bool {
    if link.chars().any(char::is_whitespace) {
        return false;
    }
    if let Some(rest) = link.strip_prefix('/') {
        return !rest.starts_with('/') && !rest.starts_with('\\');
    }

    match Url::parse(link) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Rejects a malformed link. Absent or empty passes, empty clears a column.
pub fn check_link(field: &str, link: Option<&str>) -> Result<(), ResourceError> {
    match link {
        Some(l) if !l.is_empty() && !validate_link(l) => Err(ResourceError::invalid(
            format!("'{field}' must be an http(s) URL or a path starting with '/'"),
        )),
        _ => Ok(()),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trimmed, non-empty text or an `InvalidRequest` naming the field.
pub fn require_text(field: &str, value: &str) -> Result<String, ResourceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ResourceError::invalid(format!("'{field}' is required")));
    }
    Ok(value.to_string())
}

/// Same as [`require_text`] for partial updates: absent stays absent.
pub fn require_text_opt(
    field: &str,
    value: Option<&str>,
) -> Result<Option<String>, ResourceError> {
    value.map(|v| require_text(field, v)).transpose()
}

/// Optional free text: blank collapses to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
