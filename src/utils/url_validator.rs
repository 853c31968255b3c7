//! Destination URL validation.

use url::Url;

/// Reasons a destination URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `raw` is an absolute URL with a scheme and a non-empty host.
///
/// The input is not rewritten; callers store it exactly as submitted.
/// Schemes without an authority (`javascript:`, `data:`, `mailto:`) fail
/// because they have no host.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com/path?q=1").is_ok());
/// assert!(validate_url("not a url").is_err());
/// assert!(validate_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_url(raw: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com:8080/path?x=1#frag").is_ok());
    }

    #[test]
    fn test_accepts_other_schemes_with_host() {
        assert!(validate_url("ftp://files.example.com/pub").is_ok());
    }

    #[test]
    fn test_accepts_ip_hosts() {
        assert!(validate_url("http://127.0.0.1:3000/").is_ok());
        assert!(validate_url("http://[::1]/").is_ok());
    }

    #[test]
    fn test_rejects_plain_text() {
        assert!(matches!(
            validate_url("not a url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(validate_url("/relative/path").is_err());
        assert!(validate_url("example.com").is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_rejects_hostless_schemes() {
        assert!(validate_url("javascript:alert(1)").is_err());
        assert!(validate_url("data:text/plain,hello").is_err());
        assert!(validate_url("mailto:someone@example.com").is_err());
    }
}
