use std::str::FromStr;

use crate::loader::error::ConfigLoadError;

pub fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

pub fn parse_csv_var(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|raw| parse_csv(&raw))
}

/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_bool_var(name: &str) -> Result<Option<bool>, ConfigLoadError> {
    match non_empty_var(name) {
        Some(raw) => parse_bool(&raw).map(Some).ok_or_else(|| {
            ConfigLoadError::InvalidValue {
                key: name.to_string(),
                reason: format!("expected a boolean, got '{raw}'"),
            }
        }),
        None => Ok(None),
    }
}

/// Read and parse `name`. Unset or blank variables yield `None`; anything
/// else that fails to parse is an error rather than being ignored.
pub fn parse_var<T>(name: &str) -> Result<Option<T>, ConfigLoadError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_empty_var(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|err| {
                ConfigLoadError::InvalidValue {
                    key: name.to_string(),
                    reason: err.to_string(),
                }
            })
        })
        .transpose()
}

pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_drops_blank_segments() {
        assert_eq!(parse_csv(" plain, ,html,"), vec!["plain", "html"]);
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn bool_forms() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
