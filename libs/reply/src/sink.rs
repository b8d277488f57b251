//! Transport boundary the replier writes responses through

use std::io;

use http::header::{HeaderName, HeaderValue};
use http::{Response, StatusCode};

use crate::error::ReplyError;

/// Destination of a single HTTP response.
///
/// Headers must all be set before the first body write.
pub trait ResponseSink {
    /// Current value of a header; lookups are case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;

    /// Set a header, replacing any value already stored under the same name.
    ///
    /// # Errors
    /// Returns `ReplyError::InvalidHeader` if the name or value is not a
    /// valid HTTP header.
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), ReplyError>;

    fn set_status(&mut self, status: StatusCode);

    /// Append bytes to the response body.
    ///
    /// # Errors
    /// Returns an I/O error if the body cannot be written.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// Check that `name` and `value` form a valid HTTP header.
///
/// # Errors
/// Returns `ReplyError::InvalidHeader` naming the offending header.
pub fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ReplyError> {
    let invalid = |reason: String| ReplyError::InvalidHeader {
        name: name.to_owned(),
        reason,
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    Ok((header_name, header_value))
}

impl ResponseSink for Response<Vec<u8>> {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), ReplyError> {
        let (header_name, header_value) = parse_header(name, value)?;
        self.headers_mut().insert(header_name, header_value);
        Ok(())
    }

    fn set_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.body_mut().extend_from_slice(body);
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let mut response = Response::new(Vec::new());
        response.set_header("Correlation-Id", "some-id").unwrap();

        assert_eq!(response.header("correlation-id"), Some("some-id"));
        assert_eq!(response.header("CORRELATION-ID"), Some("some-id"));
        assert_eq!(response.header("content-type"), None);
    }

    #[test]
    fn set_header_replaces_existing_value() {
        let mut response = Response::new(Vec::new());
        response.set_header("content-type", "text/plain").unwrap();
        response.set_header("Content-Type", "application/json").unwrap();

        assert_eq!(response.headers().get_all("content-type").iter().count(), 1);
        assert_eq!(response.header("content-type"), Some("application/json"));
    }

    #[test]
    fn invalid_header_is_rejected() {
        let mut response = Response::new(Vec::new());

        let err = response.set_header("bad header", "x").unwrap_err();
        assert!(matches!(err, ReplyError::InvalidHeader { ref name, .. } if name == "bad header"));

        let err = response.set_header("x-ok", "line\nbreak").unwrap_err();
        assert!(matches!(err, ReplyError::InvalidHeader { .. }));
        assert!(response.headers().is_empty());
    }

    #[test]
    fn body_writes_append() {
        let mut response = Response::new(Vec::new());
        response.set_status(StatusCode::CREATED);
        response.write_body(b"{\"data\":").unwrap();
        response.write_body(b"1}\n").unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.body().as_slice(), b"{\"data\":1}\n");
    }
}
