//! Parsing of comma-separated identifier lists.

/// Errors from reading a user-supplied list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Empty input encountered. Try again")]
    Empty,
}

/// Splits `raw` on commas into identifiers.
///
/// Surrounding whitespace is trimmed from each token and empty tokens from
/// stray separators are dropped. Input that is blank as a whole is rejected.
pub fn parse_list(raw: &str) -> Result<Vec<String>, InputError> {
    if raw.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect())
}
