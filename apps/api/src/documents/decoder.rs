//! Resume decoders. Decoding failure is fatal to the request: there is no text
//! to analyze.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::warn;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("Document is not valid UTF-8 text")]
    InvalidUtf8,

    #[error("Could not extract text from the document. Please ensure it's a readable PDF.")]
    NoText,

    #[error("Unsupported document type: {0}")]
    Unsupported(String),
}

pub trait DocumentDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError>;
}

pub struct PdfDecoder;

impl DocumentDecoder for PdfDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let extracted = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }))
        .map_err(|_| DecodeError::Pdf("decoder aborted on malformed document".to_string()))?;

        let text = extracted.map_err(|e| DecodeError::Pdf(e.to_string()))?;
        non_blank(text)
    }
}

pub struct PlainTextDecoder;

impl DocumentDecoder for PlainTextDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
        non_blank(text.to_string())
    }
}

/// Picks a decoder from the upload's content type and file name, falling back to
/// sniffing the `%PDF-` header.
pub fn decode_upload(
    bytes: &[u8],
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<String, DecodeError> {
    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
    let file_name = file_name.unwrap_or_default().to_ascii_lowercase();

    let is_pdf = bytes.starts_with(PDF_MAGIC)
        || content_type == "application/pdf"
        || file_name.ends_with(".pdf");
    let is_text = content_type.starts_with("text/")
        || file_name.ends_with(".txt")
        || file_name.ends_with(".md");

    let result = if is_pdf {
        PdfDecoder.decode(bytes)
    } else if is_text {
        PlainTextDecoder.decode(bytes)
    } else {
        Err(DecodeError::Unsupported(if content_type.is_empty() {
            "unknown".to_string()
        } else {
            content_type
        }))
    };

    if let Err(e) = &result {
        warn!("Document decode failed ({} bytes): {e}", bytes.len());
    }
    result
}

fn non_blank(text: String) -> Result<String, DecodeError> {
    if text.trim().is_empty() {
        Err(DecodeError::NoText)
    } else {
        Ok(text)
    }
}
