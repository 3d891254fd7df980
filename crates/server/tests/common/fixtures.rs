//! Test fixtures: multipart body construction and well-known identifiers.
//! Note: #[allow(dead_code)] because each test file compiles common/ separately.
#![allow(dead_code)]

/// A valid 24-hex object id for a user.
pub const USER_A: &str = "507f1f77bcf86cd799439011";

/// A second valid user id.
pub const USER_B: &str = "507f1f77bcf86cd799439012";

/// A valid file id.
pub const FILE_ID: &str = "64b7f0a1c2d3e4f5a6b7c8d9";

/// One part of a hand-built multipart body.
pub struct FormPart {
    pub name: &'static str,
    pub filename: Option<&'static str>,
    pub content_type: Option<&'static str>,
    pub value: Vec<u8>,
}

impl FormPart {
    /// A plain text form field.
    pub fn text(name: &'static str, value: &str) -> Self {
        Self {
            name,
            filename: None,
            content_type: None,
            value: value.as_bytes().to_vec(),
        }
    }

    /// A file field with filename and content type.
    pub fn file(
        name: &'static str,
        filename: &'static str,
        content_type: &'static str,
        value: &[u8],
    ) -> Self {
        Self {
            name,
            filename: Some(filename),
            content_type: Some(content_type),
            value: value.to_vec(),
        }
    }
}

/// Encode parts as a multipart/form-data body with the given boundary.
pub fn multipart_body(boundary: &str, parts: &[FormPart]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
