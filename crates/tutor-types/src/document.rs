use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// True for `application/pdf`, ignoring case and MIME parameters.
pub fn is_pdf_mime(mime_type: &str) -> bool {
    mime_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MIME_TYPE))
        .unwrap_or(false)
}

/// What the file picker tells us before any bytes are read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        is_pdf_mime(&self.mime_type)
    }
}

/// The PDF the session is currently about, already base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDocument {
    pub name: String,
    pub encoded_bytes: String,
    pub size_bytes: u64,
    /// Set once a reply to a request carrying the bytes has arrived
    #[serde(default)]
    pub delivered: bool,
}

impl ActiveDocument {
    pub fn new(name: impl Into<String>, encoded_bytes: String, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            encoded_bytes,
            size_bytes,
            delivered: false,
        }
    }
}
