//! PDF text extraction.
//!
//! Extraction is synchronous and CPU-bound; callers run it inside
//! `tokio::task::spawn_blocking`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction error: {0}")]
    Pdf(String),
}

/// Turns raw document bytes into a plain-text transcript.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &[u8]) -> Result<String, ExtractError>;
}

/// `pdf-extract` backed extractor.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(document).map_err(|e| ExtractError::Pdf(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_pdf_bytes_are_an_error() {
        let result = PdfTextExtractor.extract(b"this is a plain text file, not a PDF");
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("PDF extraction error"));
    }
}
