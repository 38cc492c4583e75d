//! Request/response transport abstraction
//!
//! The socket and HTTP parsing live in the driver. The firmware only sees
//! fully-read requests, one at a time, and hands back one response per
//! request.

use alloc::string::String;
use alloc::vec::Vec;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Parse a request-line method token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Request-line token for this method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully-read admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Path without query string
    pub path: String,
    /// Raw body bytes (empty for GET)
    pub body: Vec<u8>,
}

impl Request {
    /// Build a bodiless GET request.
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: Vec::new(),
        }
    }

    /// Build a POST request carrying `body`.
    pub fn post(path: &str, body: &[u8]) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: body.to_vec(),
        }
    }
}

/// Response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// `application/json`
    Json(Vec<u8>),
    /// `text/html`, served from flash
    Html(&'static str),
}

impl Body {
    /// MIME type for the `Content-Type` header.
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Html(_) => "text/html",
        }
    }

    /// Payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Json(bytes) => bytes,
            Self::Html(page) => page.as_bytes(),
        }
    }
}

/// Response to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Payload
    pub body: Body,
}

/// Source of admin requests.
pub trait Transport {
    /// Return the next fully-read request, if one is pending. Never blocks.
    fn poll_request(&mut self) -> Option<Request>;

    /// Send the response to the request last returned by
    /// [`Transport::poll_request`].
    fn respond(&mut self, response: Response);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_roundtrip() {
        for method in [Method::Get, Method::Post, Method::Put, Method::Delete] {
            assert_eq!(Method::parse(method.as_str()), Some(method));
        }
    }

    #[test]
    fn test_method_parse_is_case_sensitive() {
        assert_eq!(Method::parse("get"), None);
        assert_eq!(Method::parse("PATCH"), None);
    }

    #[test]
    fn test_body_content_type() {
        assert_eq!(Body::Json(Vec::new()).content_type(), "application/json");
        assert_eq!(Body::Html("<p></p>").content_type(), "text/html");
        assert_eq!(Body::Html("abc").as_bytes(), b"abc");
    }
}
