//! Helper functions used across the application:
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - Destination URL validation
//! - [`request_origin`] - Short URL origin from HTTP headers

pub mod code_generator;
pub mod request_origin;
pub mod url_validator;
