//! Text Extractor: turns an uploaded resume file into raw text.
//!
//! Only plain text is accepted. Bytes that are not valid UTF-8 are replaced
//! rather than rejected.

use bytes::Bytes;
use thiserror::Error;

const PLAIN_TEXT: &str = "text/plain";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No file provided")]
    MissingFile,

    #[error("File size exceeds {} MB limit", .limit / (1024 * 1024))]
    TooLarge { limit: usize },

    #[error("Only text (.txt) files are supported. You provided: {0}")]
    UnsupportedType(String),
}

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Upload {
    /// Whether the upload declares `text/plain` (parameters such as charset are
    /// ignored). With no declared type, a `.txt` file name is accepted.
    pub fn is_plain_text(&self) -> bool {
        match self.content_type.as_deref() {
            Some(ct) => ct
                .split(';')
                .next()
                .map(|mime| mime.trim().eq_ignore_ascii_case(PLAIN_TEXT))
                .unwrap_or(false),
            None => self
                .file_name
                .as_deref()
                .map(|name| name.to_ascii_lowercase().ends_with(".txt"))
                .unwrap_or(false),
        }
    }
}

/// Validates the upload and returns its text content.
pub fn extract_text(upload: &Upload, max_bytes: usize) -> Result<String, ExtractError> {
    if upload.data.len() > max_bytes {
        return Err(ExtractError::TooLarge { limit: max_bytes });
    }

    if !upload.is_plain_text() {
        let declared = upload
            .content_type
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        return Err(ExtractError::UnsupportedType(declared));
    }

    Ok(String::from_utf8_lossy(&upload.data).into_owned())
}
