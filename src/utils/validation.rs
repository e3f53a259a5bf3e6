//! Centralized validation and helper functions.

/// Errors raised when validating matching configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Threshold '{name}' must be between 0 and 1, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("Fallback threshold '{fallback}' ({fallback_value}) must not exceed '{primary}' ({primary_value})")]
    ThresholdNotRelaxed {
        primary: &'static str,
        primary_value: f64,
        fallback: &'static str,
        fallback_value: f64,
    },
}

/// Uppercase a code-like string and drop the spaces and hyphens that AIS
/// operators commonly insert into codes ("AE FJR", "CA-VAN").
///
/// # Examples
///
/// ```
/// use port_resolver::utils::validation::compact_code;
///
/// assert_eq!(compact_code("ae fjr"), "AEFJR");
/// assert_eq!(compact_code("CA-VAN"), "CAVAN");
/// ```
#[must_use]
pub fn compact_code(s: &str) -> String {
    s.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Check that a string is exactly `len` alphabetic characters.
fn is_alphabetic_of_len(s: &str, len: usize) -> bool {
    s.chars().count() == len && s.chars().all(char::is_alphabetic)
}

/// Validate that a string has the shape of a LOCODE (2 + 3 letters).
///
/// This only checks the shape; whether the code exists is up to the catalog.
///
/// # Examples
///
/// ```
/// use port_resolver::utils::validation::is_locode_shape;
///
/// assert!(is_locode_shape("TRTUZ"));
/// assert!(!is_locode_shape("TRTU"));
/// assert!(!is_locode_shape("TR1UZ"));
/// ```
#[must_use]
pub fn is_locode_shape(s: &str) -> bool {
    is_alphabetic_of_len(s, 5)
}

/// Validate that a string has the shape of a bare port code (3 letters).
#[must_use]
pub fn is_port_code_shape(s: &str) -> bool {
    is_alphabetic_of_len(s, 3)
}

/// Validate that a string has the shape of a country code (2 characters).
#[must_use]
pub fn is_country_code_shape(s: &str) -> bool {
    s.chars().count() == 2
}

/// Check that a similarity threshold lies in `[0, 1]`.
///
/// # Errors
///
/// Returns `ValidationError::ThresholdOutOfRange` for values outside the
/// range, including NaN.
pub fn validate_threshold(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::ThresholdOutOfRange { name, value })
    }
}

/// Check that a fallback threshold relaxes (never tightens) its primary threshold.
///
/// # Errors
///
/// Returns `ValidationError::ThresholdNotRelaxed` if `fallback > primary`.
pub fn validate_relaxation(
    primary: (&'static str, f64),
    fallback: (&'static str, f64),
) -> Result<(), ValidationError> {
    if fallback.1 > primary.1 {
        return Err(ValidationError::ThresholdNotRelaxed {
            primary: primary.0,
            primary_value: primary.1,
            fallback: fallback.0,
            fallback_value: fallback.1,
        });
    }
    Ok(())
}
