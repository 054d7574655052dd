//! Character classes for the fields of a variant property.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Pattern every namespace must match.
pub const VALIDATION_NAMESPACE_REGEX: &str = r"^[a-z0-9_]+$";

/// Pattern every feature name must match.
pub const VALIDATION_FEATURE_REGEX: &str = r"^[a-z0-9_]+$";

/// Pattern every feature value must match.
pub const VALIDATION_VALUE_REGEX: &str = r"^[a-z0-9_.]+$";

static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VALIDATION_NAMESPACE_REGEX).expect("valid namespace regex"));
static FEATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VALIDATION_FEATURE_REGEX).expect("valid feature regex"));
static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VALIDATION_VALUE_REGEX).expect("valid value regex"));

fn validate_matches(value: &str, re: &Regex, pattern: &'static str) -> Result<(), ValidationError> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::PatternMismatch {
            value: value.to_string(),
            pattern,
        })
    }
}

pub fn validate_namespace(namespace: &str) -> Result<(), ValidationError> {
    validate_matches(namespace, &NAMESPACE_RE, VALIDATION_NAMESPACE_REGEX)
}

pub fn validate_feature(feature: &str) -> Result<(), ValidationError> {
    validate_matches(feature, &FEATURE_RE, VALIDATION_FEATURE_REGEX)
}

pub fn validate_value(value: &str) -> Result<(), ValidationError> {
    validate_matches(value, &VALUE_RE, VALIDATION_VALUE_REGEX)
}

/// Split `input` on `::` into exactly `N` trimmed, non-empty segments.
pub(crate) fn split_segments<'a, const N: usize>(
    input: &'a str,
    expected: &'static str,
) -> Result<[&'a str; N], ValidationError> {
    let invalid = || ValidationError::InvalidFormat {
        input: input.to_string(),
        expected,
    };

    let segments = input.split("::").map(str::trim).collect::<Vec<_>>();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(invalid());
    }
    segments.try_into().map_err(|_| invalid())
}
