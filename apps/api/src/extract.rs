//! Text Extractor — best-effort plain text from an uploaded PDF byte buffer.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to extract text from PDF: {0}")]
pub struct ExtractionError(#[from] pdf_extract::OutputError);

/// Extracts the textual content of a PDF held in memory.
/// An image-only PDF legitimately yields an empty string; bytes that are not
/// a parseable PDF yield `ExtractionError`. No side effects.
pub fn extract_resume_text(data: &[u8]) -> Result<String, ExtractionError> {
    Ok(pdf_extract::extract_text_from_mem(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_pdf_bytes_fail_extraction() {
        let result = extract_resume_text(b"just some plain text, not a PDF");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_buffer_fails_extraction() {
        assert!(extract_resume_text(&[]).is_err());
    }
}
