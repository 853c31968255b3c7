//! Short code generation and validation utilities.
//!
//! Generated codes are 6 symbols from the URL-safe alphabet `A-Z a-z 0-9 _ -`.
//! Custom codes may use the same alphabet with a length of 1 to 64.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 6;

/// Upper bound for caller-supplied codes.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 64;

/// 64 symbols, so masking a byte to 6 bits picks each one with equal probability.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Codes that would shadow the service's own routes.
const RESERVED_CODES: &[&str] = &["shorten", "health"];

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy. Uniqueness is not checked here; at 64^6
/// possible codes a collision between two live links is negligible.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect()
}

/// Returns true if `code` could have been issued by this service.
///
/// Used by the redirect path to skip store lookups for impossible codes.
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CUSTOM_CODE_LENGTH && CODE_REGEX.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::InvalidIdentifier`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::invalid_identifier(
            "Custom ID must be 1-64 characters",
            json!({ "provided_length": code.chars().count() }),
        ));
    }

    if !CODE_REGEX.is_match(code) {
        return Err(AppError::invalid_identifier(
            "Custom ID can only contain letters, digits, '_' and '-'",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::invalid_identifier(
            "This custom ID is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
