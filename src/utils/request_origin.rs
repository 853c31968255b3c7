//! Origin resolution for building short URLs from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Determines the origin that prefixes short URLs in responses.
///
/// Priority:
/// 1. The `Origin` request header (browsers send it on `POST`)
/// 2. The configured public base URL
/// 3. `http://` + the `Host` header
/// 4. An empty string, which yields a root-relative short URL
///
/// An `Origin` of `null` (sandboxed or privacy-sensitive contexts) is ignored.
pub fn request_origin(headers: &HeaderMap, public_base_url: Option<&str>) -> String {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "null");

    if let Some(origin) = origin {
        return origin.trim_end_matches('/').to_string();
    }

    if let Some(base) = public_base_url {
        return base.trim_end_matches('/').to_string();
    }

    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|host| format!("http://{}", host))
        .unwrap_or_default()
}

/// Joins an origin and a short code into the public short URL.
pub fn short_url(origin: &str, code: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), code)
}
